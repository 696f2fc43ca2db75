// 后端调用错误类型
//
// 只区分网络/状态码/解析几类，不做重试分类

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("HTTP error: status {0}")]
    Status(u16),

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("Invalid access token: {0}")]
    InvalidToken(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Not authenticated")]
    NotAuthenticated,
}

impl BackendError {
    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::Status(code) => Some(*code),
            _ => None,
        }
    }
}

// 实现从 reqwest::Error 到 BackendError 的转换
impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            BackendError::Timeout
        } else if err.is_decode() {
            BackendError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            BackendError::Status(status.as_u16())
        } else {
            BackendError::Network(err.to_string())
        }
    }
}

impl From<url::ParseError> for BackendError {
    fn from(err: url::ParseError) -> Self {
        BackendError::InvalidUrl(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(BackendError::Status(401).to_string(), "HTTP error: status 401");
        assert_eq!(BackendError::NotAuthenticated.to_string(), "Not authenticated");
    }

    #[test]
    fn test_status_accessor() {
        assert_eq!(BackendError::Status(503).status(), Some(503));
        assert_eq!(BackendError::Timeout.status(), None);
    }
}
