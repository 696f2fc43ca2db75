// 电影搜索引擎
//
// 持有当前过滤条件和已加载的结果列表：
// - search 按过滤条件分页搜索，第 1 页替换结果，之后的页追加
// - load_more 加载下一页
// - clear 恢复初始状态
//
// 并发的搜索不会互相取消；每次调用分配递增的请求号，
// 只有最新请求的结果会写回状态，旧请求的结果只返回给它自己的调用方。

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::catalog::MovieCatalog;
use super::error::SearchError;
use crate::models::{ActiveFilter, Movie, MovieFilters, SearchResult};

/// 搜索状态快照
#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    pub filters: MovieFilters,
    pub results: Vec<Movie>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub total: usize,
    pub current_page: u32,
    pub has_more: bool,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            filters: MovieFilters::default(),
            results: Vec::new(),
            is_loading: false,
            error: None,
            total: 0,
            current_page: 1,
            has_more: false,
        }
    }
}

pub struct MovieSearch {
    catalog: Arc<dyn MovieCatalog>,
    page_size: usize,
    state: RwLock<SearchState>,
    latest_request: AtomicU64,
}

impl MovieSearch {
    pub fn new(catalog: Arc<dyn MovieCatalog>, page_size: usize) -> Self {
        Self {
            catalog,
            page_size: page_size.max(1),
            state: RwLock::new(SearchState::default()),
            latest_request: AtomicU64::new(0),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    fn read_state(&self) -> RwLockReadGuard<'_, SearchState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, SearchState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// 执行搜索
    ///
    /// `filters` 为 Some 时整体替换当前过滤条件（不是逐字段合并）。
    /// 失败时错误信息会写入状态，同时返回给调用方。
    pub async fn search(&self, filters: Option<MovieFilters>, page: u32) -> Result<SearchResult, SearchError> {
        let request_id = self.latest_request.fetch_add(1, Ordering::SeqCst) + 1;

        let active_filters = {
            let mut state = self.write_state();
            state.is_loading = true;
            state.error = None;
            if let Some(filters) = filters {
                state.filters = filters;
            }
            state.filters.clone()
        };

        let outcome = self.evaluate(&active_filters, page).await;

        if self.latest_request.load(Ordering::SeqCst) != request_id {
            tracing::debug!("Discarding stale search response (request {}, page {})", request_id, page);
            return outcome;
        }

        let mut state = self.write_state();
        state.is_loading = false;

        match outcome {
            Ok(result) => {
                if page == 1 {
                    state.results = result.movies.clone();
                } else {
                    state.results.extend(result.movies.iter().cloned());
                }
                state.total = result.total;
                state.current_page = result.page;
                state.has_more = result.has_more;

                tracing::debug!(
                    "Search page {} returned {} of {} movies",
                    result.page,
                    result.movies.len(),
                    result.total
                );
                Ok(result)
            }
            Err(e) => {
                tracing::error!("Search failed: {}", e);
                state.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    async fn evaluate(&self, filters: &MovieFilters, page: u32) -> Result<SearchResult, SearchError> {
        if page == 0 {
            return Err(SearchError::InvalidPage(page));
        }

        let movies = self.catalog
            .movies()
            .await
            .map_err(|e| SearchError::Catalog(e.to_string()))?;

        let matches: Vec<Movie> = movies.into_iter().filter(|movie| filters.matches(movie)).collect();
        Ok(SearchResult::from_matches(matches, page, self.page_size))
    }

    /// 加载下一页；没有更多结果或正在加载时什么也不做
    pub async fn load_more(&self) -> Result<Option<SearchResult>, SearchError> {
        let next_page = {
            let state = self.read_state();
            if !state.has_more || state.is_loading {
                return Ok(None);
            }
            state.current_page + 1
        };

        self.search(None, next_page).await.map(Some)
    }

    /// 清空过滤条件和结果
    ///
    /// 同时作废所有未完成的请求，避免它们在清空后写回旧结果。
    pub fn clear(&self) {
        self.latest_request.fetch_add(1, Ordering::SeqCst);
        *self.write_state() = SearchState::default();
    }

    pub fn snapshot(&self) -> SearchState {
        self.read_state().clone()
    }

    pub fn filters(&self) -> MovieFilters {
        self.read_state().filters.clone()
    }

    pub fn results(&self) -> Vec<Movie> {
        self.read_state().results.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.read_state().is_loading
    }

    pub fn error(&self) -> Option<String> {
        self.read_state().error.clone()
    }

    pub fn total(&self) -> usize {
        self.read_state().total
    }

    pub fn current_page(&self) -> u32 {
        self.read_state().current_page
    }

    pub fn has_more(&self) -> bool {
        self.read_state().has_more
    }

    pub fn active_filters(&self) -> Vec<ActiveFilter> {
        self.read_state().filters.active_filters()
    }

    pub fn has_active_filters(&self) -> bool {
        self.read_state().filters.has_active_filters()
    }
}
