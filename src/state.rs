// 应用上下文
//
// 所有状态容器在这里构造一次，按需传给使用方，不使用全局单例。

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::AppConfig;
use crate::external::{BackendApi, BackendError, HttpBackend};
use crate::models::{FilterSelectionPatch, GroupRecommendation, Movie, SearchResult};
use crate::services::{
    AuthStore, CatalogPage, CatalogQuery, FilterStore, FriendsStore, InMemoryCatalog, ModalStore,
    MovieCatalog, MovieSearch, MovieVisitTracker, SearchError, SearchStore, VisitOutcome,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub backend: Arc<dyn BackendApi>,
    pub auth: Arc<AuthStore>,
    pub movie_search: Arc<MovieSearch>,
    pub visits: Arc<MovieVisitTracker>,
    pub filters: Arc<RwLock<FilterStore>>,
    pub search: Arc<RwLock<SearchStore>>,
    pub modal: Arc<RwLock<ModalStore>>,
    pub friends: Arc<RwLock<FriendsStore>>,
    pub catalog_page: Arc<RwLock<CatalogPage>>,
}

impl AppState {
    /// 使用 HTTP 后端和内置示例目录
    pub fn new(config: AppConfig) -> Result<Self, BackendError> {
        let backend = Arc::new(HttpBackend::new(&config)?);
        Ok(Self::with_parts(config, backend, Arc::new(InMemoryCatalog::seeded())))
    }

    pub fn with_parts(config: AppConfig, backend: Arc<dyn BackendApi>, catalog: Arc<dyn MovieCatalog>) -> Self {
        let auth = Arc::new(AuthStore::new(backend.clone()));
        let visits = Arc::new(MovieVisitTracker::new(
            backend.clone(),
            auth.clone(),
            config.visit_debounce,
            config.visit_cache_capacity,
        ));
        let movie_search = Arc::new(MovieSearch::new(catalog, config.search_page_size));

        Self {
            config: Arc::new(config),
            backend,
            auth,
            movie_search,
            visits,
            filters: Arc::new(RwLock::new(FilterStore::new())),
            search: Arc::new(RwLock::new(SearchStore::new())),
            modal: Arc::new(RwLock::new(ModalStore::new())),
            friends: Arc::new(RwLock::new(FriendsStore::new())),
            catalog_page: Arc::new(RwLock::new(CatalogPage::new())),
        }
    }

    /// 更新筛选表单后回到第 1 页并重新搜索
    pub async fn apply_filter_selection(
        &self,
        patch: FilterSelectionPatch,
    ) -> Result<(CatalogQuery, SearchResult), SearchError> {
        let selection = {
            let mut filters = self.filters.write().await;
            filters.set_filters(patch);
            filters.filters().clone()
        };
        let search = self.search.read().await.search().map(str::to_string);

        let query = self.catalog_page.write().await.on_filters_changed(&selection, search.as_deref());
        self.run_query(query).await
    }

    /// 更新搜索词后回到第 1 页并重新搜索；空字符串视为清空
    pub async fn apply_search_term(&self, term: Option<String>) -> Result<(CatalogQuery, SearchResult), SearchError> {
        let search = {
            let mut store = self.search.write().await;
            match term.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
                Some(term) => store.set_search(term),
                None => store.clear_search(),
            }
            store.search().map(str::to_string)
        };
        let selection = self.filters.read().await.filters().clone();

        let query = self.catalog_page.write().await.on_search_changed(&selection, search.as_deref());
        self.run_query(query).await
    }

    /// 从 URL 查询串恢复页面状态
    pub async fn restore_from_query(&self, query_string: &str) -> Result<(CatalogQuery, SearchResult), SearchError> {
        let query = CatalogQuery::parse(query_string);

        self.filters.write().await.replace_filters(query.selection.clone());
        {
            let mut store = self.search.write().await;
            match query.search.clone() {
                Some(term) => store.set_search(term),
                None => store.clear_search(),
            }
        }
        self.catalog_page.write().await.set_page(query.page);

        self.run_query(query).await
    }

    /// 从第 1 页开始逐页加载到 `query.page`，引擎中累积的结果与页码保持一致；
    /// 页码超出范围时停在最后一页，并回写到 URL 状态
    async fn run_query(&self, mut query: CatalogQuery) -> Result<(CatalogQuery, SearchResult), SearchError> {
        tracing::debug!("Catalog query: {}", query.to_query_string());
        let mut result = self.movie_search.search(Some(query.movie_filters()), 1).await?;

        while result.page < query.page && result.has_more {
            result = self.movie_search.search(None, result.page + 1).await?;
        }

        if result.page != query.page {
            tracing::debug!("Page {} out of range, showing page {}", query.page, result.page);
            query.page = result.page;
            self.catalog_page.write().await.set_page(result.page);
        }

        Ok((query, result))
    }

    /// 打开电影详情并上报访问；没有数字 ID 的电影只打开弹窗
    pub async fn open_movie(&self, movie: Movie) -> Option<VisitOutcome> {
        let movie_id = movie.numeric_id();
        self.modal.write().await.open_modal(movie);

        match movie_id {
            Some(id) => Some(self.visits.send_movie_visit(id).await),
            None => {
                tracing::debug!("Movie has no numeric id, visit not reported");
                None
            }
        }
    }

    /// 为当前选中的好友获取群组推荐并写入 FriendsStore
    pub async fn refresh_group_recommendations(&self) -> Result<Vec<GroupRecommendation>, BackendError> {
        let Some((_, token)) = self.auth.credentials() else {
            return Err(BackendError::NotAuthenticated);
        };

        let friend_ids = self.friends.read().await.selected_friend_ids();
        if friend_ids.is_empty() {
            self.friends.write().await.set_group_recommendations(Vec::new());
            return Ok(Vec::new());
        }

        let recommendations = self.backend
            .group_recommendations(&token, &friend_ids)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch group recommendations: {}", e);
                e
            })?;

        tracing::info!(
            "Fetched {} group recommendations for {} friends",
            recommendations.len(),
            friend_ids.len()
        );
        self.friends.write().await.set_group_recommendations(recommendations.clone());
        Ok(recommendations)
    }
}
