use thiserror::Error;

/// 搜索失败的原因
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("Invalid page: {0} (pages start at 1)")]
    InvalidPage(u32),

    #[error("Catalog unavailable: {0}")]
    Catalog(String),
}
