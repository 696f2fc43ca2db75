pub mod error;
pub mod http;

use async_trait::async_trait;

pub use error::BackendError;
pub use http::HttpBackend;

use crate::models::{Credentials, GroupRecommendation, RegisterRequest, RegisteredUser, TokenResponse};

/// 远端服务接口
///
/// 用户服务负责登录/注册，业务后端负责访问上报和推荐。
/// 测试中用内存实现替换 `HttpBackend`。
#[async_trait]
pub trait BackendApi: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<TokenResponse, BackendError>;

    async fn register(&self, request: &RegisterRequest) -> Result<RegisteredUser, BackendError>;

    /// 上报一次电影访问（Bearer 认证）
    async fn send_visit(&self, token: &str, movie_id: i64) -> Result<(), BackendError>;

    /// 按选中的好友获取群组推荐
    async fn group_recommendations(
        &self,
        token: &str,
        friend_ids: &[String],
    ) -> Result<Vec<GroupRecommendation>, BackendError>;
}
