use serde::{Deserialize, Serialize};

/// 用户 ID：JWT 中可能是数字（user_id）也可能是字符串（sub）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserId::Number(id) => write!(f, "{}", id),
            UserId::Text(id) => write!(f, "{}", id),
        }
    }
}

/// 当前登录会话
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub user_id: Option<UserId>,
    pub token: Option<String>,
    pub username: Option<String>,
}

impl Session {
    /// 同时持有用户 ID 和 token 才算已登录
    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some() && self.token.as_deref().map_or(false, |t| !t.is_empty())
    }
}

/// 登录表单
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// OAuth2 password grant 表单字段
    pub fn form_fields(&self) -> [(&'static str, &str); 4] {
        [
            ("grant_type", "password"),
            ("username", &self.username),
            ("password", &self.password),
            ("scope", ""),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisteredUser {
    pub username: String,
    #[serde(default)]
    pub id: Option<UserId>,
    #[serde(default)]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_requires_user_and_token() {
        let mut session = Session::default();
        assert!(!session.is_authenticated());

        session.user_id = Some(UserId::Number(42));
        assert!(!session.is_authenticated());

        session.token = Some(String::new());
        assert!(!session.is_authenticated());

        session.token = Some("token-xyz".to_string());
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_credentials_form_fields() {
        let credentials = Credentials::new("tester", "1234");
        let fields = credentials.form_fields();
        assert_eq!(fields[0], ("grant_type", "password"));
        assert_eq!(fields[1], ("username", "tester"));
        assert_eq!(fields[3], ("scope", ""));
    }
}
