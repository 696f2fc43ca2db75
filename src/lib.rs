// 电影发现客户端核心库
//
// 本库提供电影浏览前端的状态与过滤逻辑，包括：
// - 电影搜索、过滤与分页
// - 筛选表单、搜索词、详情弹窗、好友推荐等界面状态
// - 登录会话与访问上报
// - 后端 HTTP 接口

pub mod config;
pub mod external;
pub mod models;
pub mod services;
pub mod state;

pub use config::AppConfig;
pub use state::AppState;
