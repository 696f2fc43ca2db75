// 登录状态
//
// 登录/注册委托给用户服务，本地只保存 token 和从 token 中解出的用户 ID。

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde_json::Value;
use std::sync::{Arc, PoisonError, RwLock};

use crate::external::{BackendApi, BackendError};
use crate::models::{Credentials, RegisterRequest, Session, UserId};

pub struct AuthStore {
    backend: Arc<dyn BackendApi>,
    session: RwLock<Session>,
}

impl AuthStore {
    pub fn new(backend: Arc<dyn BackendApi>) -> Self {
        Self {
            backend,
            session: RwLock::new(Session::default()),
        }
    }

    /// 登录成功后保存 token 和用户 ID；失败时会话保持不变
    pub async fn login(&self, credentials: &Credentials) -> Result<UserId, BackendError> {
        let token = self.backend.login(credentials).await.map_err(|e| {
            tracing::error!("Login failed for {}: {}", credentials.username, e);
            e
        })?;

        let user_id = decode_user_id(&token.access_token)?;

        {
            let mut session = self.session.write().unwrap_or_else(PoisonError::into_inner);
            *session = Session {
                user_id: Some(user_id.clone()),
                token: Some(token.access_token),
                username: Some(credentials.username.clone()),
            };
        }

        tracing::info!("User {} logged in", user_id);
        Ok(user_id)
    }

    /// 注册后直接用注册的用户名和密码登录
    pub async fn register(&self, request: &RegisterRequest) -> Result<UserId, BackendError> {
        let registered = self.backend.register(request).await.map_err(|e| {
            tracing::error!("Registration failed for {}: {}", request.username, e);
            e
        })?;

        tracing::info!("Registered user {}", registered.username);
        self.login(&Credentials::new(registered.username, request.password.clone())).await
    }

    pub fn logout(&self) {
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = Session::default();
    }

    pub fn session(&self) -> Session {
        self.session.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.session().user_id
    }

    pub fn token(&self) -> Option<String> {
        self.session().token
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.read().unwrap_or_else(PoisonError::into_inner).is_authenticated()
    }

    /// 已登录时返回 (用户 ID, token)
    pub fn credentials(&self) -> Option<(UserId, String)> {
        let session = self.session.read().unwrap_or_else(PoisonError::into_inner);
        if !session.is_authenticated() {
            return None;
        }
        Some((session.user_id.clone()?, session.token.clone()?))
    }
}

/// 从 JWT 的 payload 段取出用户 ID，优先 `user_id`，否则 `sub`
///
/// 不校验签名；兼容带填充的标准 base64。
pub fn decode_user_id(token: &str) -> Result<UserId, BackendError> {
    let payload = token
        .split('.')
        .nth(1)
        .filter(|segment| !segment.is_empty())
        .ok_or_else(|| BackendError::InvalidToken("missing payload segment".to_string()))?;

    let normalized: String = payload
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();

    let bytes = URL_SAFE_NO_PAD
        .decode(normalized.as_bytes())
        .map_err(|e| BackendError::InvalidToken(e.to_string()))?;
    let claims: Value =
        serde_json::from_slice(&bytes).map_err(|e| BackendError::InvalidToken(e.to_string()))?;

    ["user_id", "sub"]
        .iter()
        .filter_map(|key| claims.get(*key))
        .find_map(user_id_from_claim)
        .ok_or_else(|| BackendError::InvalidToken("no user_id or sub claim".to_string()))
}

fn user_id_from_claim(value: &Value) -> Option<UserId> {
    match value {
        Value::Number(n) => n.as_i64().map(UserId::Number),
        Value::String(s) if !s.is_empty() => Some(UserId::Text(s.clone())),
        _ => None,
    }
}
