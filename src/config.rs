// 客户端配置
//
// 从环境变量（以及可选的 .env 文件）读取后端地址、防抖窗口和分页大小。

use anyhow::{anyhow, Context, Result};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
pub const DEFAULT_USERS_URL: &str = "http://localhost:8001";
pub const DEFAULT_VISIT_DEBOUNCE_MS: u64 = 5_000;
pub const DEFAULT_VISIT_CACHE_CAPACITY: u64 = 10_000;
pub const DEFAULT_SEARCH_PAGE_SIZE: usize = 4;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// 业务后端（访问上报、推荐）
    pub backend_url: Url,
    /// 用户服务（登录、注册）
    pub users_url: Url,
    pub visit_debounce: Duration,
    pub visit_cache_capacity: u64,
    pub search_page_size: usize,
    pub http_timeout: Duration,
}

impl AppConfig {
    /// 读取进程环境变量，先加载当前目录下的 .env
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 加载指定的 .env 文件后读取环境变量；进程中已有的变量优先
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        dotenv::from_path(path).with_context(|| format!("Failed to load env file {}", path.display()))?;
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend_url = parse_base_url(
            "BACKEND_URL",
            &lookup("BACKEND_URL").unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string()),
        )?;
        let users_url = parse_base_url(
            "USERS_URL",
            &lookup("USERS_URL").unwrap_or_else(|| DEFAULT_USERS_URL.to_string()),
        )?;

        let debounce_ms: u64 = parse_number(&lookup, "VISIT_DEBOUNCE_MS", DEFAULT_VISIT_DEBOUNCE_MS);
        let timeout_secs: u64 = parse_number(&lookup, "HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS);

        Ok(Self {
            backend_url,
            users_url,
            visit_debounce: Duration::from_millis(debounce_ms),
            visit_cache_capacity: parse_number(&lookup, "VISIT_CACHE_CAPACITY", DEFAULT_VISIT_CACHE_CAPACITY).max(1),
            search_page_size: parse_number(&lookup, "SEARCH_PAGE_SIZE", DEFAULT_SEARCH_PAGE_SIZE).max(1),
            http_timeout: Duration::from_secs(timeout_secs.max(1)),
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None).expect("Default config URLs are valid - this should never fail")
    }
}

/// 解析基础地址，并保证路径以 `/` 结尾，方便后续 `join` 相对路径
fn parse_base_url(key: &str, raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim()).with_context(|| format!("{} is not a valid URL: {}", key, raw))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(anyhow!("{} must use http or https, got {}", key, url.scheme()));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

fn parse_number<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!("Invalid value for {}: {:?}, using default {}", key, raw, default);
                default
            }
        },
        None => default,
    }
}
