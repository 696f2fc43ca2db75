use chrono::{DateTime, Utc};
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

use super::auth::AuthStore;
use crate::external::BackendApi;

/// 一次访问上报的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitOutcome {
    Sent,
    /// 防抖窗口内已上报过
    Debounced,
    NotAuthenticated,
    /// 请求失败，防抖记录已移除以便重试
    Failed,
}

/// 电影访问上报
///
/// 同一部电影在防抖窗口内只上报一次。最近访问记录保存在有容量上限、
/// 按窗口自动过期的缓存里；上报失败会立即移除记录。
pub struct MovieVisitTracker {
    backend: Arc<dyn BackendApi>,
    auth: Arc<AuthStore>,
    recent_visits: Cache<i64, DateTime<Utc>>,
}

impl MovieVisitTracker {
    pub fn new(backend: Arc<dyn BackendApi>, auth: Arc<AuthStore>, debounce: Duration, capacity: u64) -> Self {
        let recent_visits = Cache::builder()
            .max_capacity(capacity)
            .time_to_live(debounce)
            .build();

        Self {
            backend,
            auth,
            recent_visits,
        }
    }

    /// 上报访问，错误只记录日志不向上抛
    pub async fn send_movie_visit(&self, movie_id: i64) -> VisitOutcome {
        let Some((user_id, token)) = self.auth.credentials() else {
            tracing::debug!("Skipping visit for movie {}: user not authenticated", movie_id);
            return VisitOutcome::NotAuthenticated;
        };

        let entry = self.recent_visits
            .entry(movie_id)
            .or_insert_with(async { Utc::now() })
            .await;

        if !entry.is_fresh() {
            tracing::debug!("Recent visit to movie {} at {}, skipping", movie_id, entry.value());
            return VisitOutcome::Debounced;
        }

        match self.backend.send_visit(&token, movie_id).await {
            Ok(()) => {
                tracing::info!("Visit sent: movie {} by user {}", movie_id, user_id);
                VisitOutcome::Sent
            }
            Err(e) => {
                tracing::error!("Failed to send visit for movie {}: {}", movie_id, e);
                self.recent_visits.invalidate(&movie_id).await;
                VisitOutcome::Failed
            }
        }
    }
}
