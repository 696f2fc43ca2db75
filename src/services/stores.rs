// 界面状态容器
//
// 这些结构只保存状态、提供变更方法和派生的只读判断，
// 不做网络调用。共享时由 AppState 包在 RwLock 里。

use crate::models::{FilterKey, FilterSelection, FilterSelectionPatch, Friend, GroupRecommendation, Movie};

/// 筛选表单状态
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterStore {
    filters: FilterSelection,
}

impl FilterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filters(&self) -> &FilterSelection {
        &self.filters
    }

    /// 浅合并：补丁中给出的字段覆盖原值，其余字段保留
    pub fn set_filters(&mut self, patch: FilterSelectionPatch) {
        if let Some(genres) = patch.genres {
            self.filters.genres = genres;
        }
        if let Some(era) = patch.release_era {
            self.filters.release_era = era;
        }
        if let Some(duration) = patch.duration {
            self.filters.duration = duration;
        }
        if let Some(sort) = patch.sort {
            self.filters.sort = sort;
        }
        if let Some(platforms) = patch.platforms {
            self.filters.platforms = platforms;
        }
    }

    /// 整体替换
    pub fn replace_filters(&mut self, selection: FilterSelection) {
        self.filters = selection;
    }

    pub fn clear_filters(&mut self) {
        self.filters = FilterSelection::default();
    }

    /// 按 URL 键名重置单个字段，未知键名忽略
    ///
    /// 返回该字段之前是否有值。
    pub fn remove_filter_item(&mut self, key: &str) -> bool {
        let Some(filter_key) = FilterKey::from_str(key) else {
            tracing::debug!("Ignoring unknown filter key: {}", key);
            return false;
        };

        match filter_key {
            FilterKey::Genres => !std::mem::take(&mut self.filters.genres).is_empty(),
            FilterKey::ReleaseEra => self.filters.release_era.take().is_some(),
            FilterKey::Duration => self.filters.duration.take().is_some(),
            FilterKey::Sort => self.filters.sort.take().is_some(),
            FilterKey::Platforms => !std::mem::take(&mut self.filters.platforms).is_empty(),
        }
    }

    pub fn has_genre_filters(&self) -> bool {
        !self.filters.genres.is_empty()
    }

    pub fn has_duration_filter(&self) -> bool {
        self.filters.duration.is_some()
    }

    pub fn has_sort(&self) -> bool {
        self.filters.sort.is_some()
    }

    pub fn has_platform_filters(&self) -> bool {
        !self.filters.platforms.is_empty()
    }

    /// 类型、排序或时长任一被选中
    ///
    /// 平台和上映年代不计入。
    pub fn has_any_filters(&self) -> bool {
        self.has_genre_filters() || self.has_sort() || self.has_duration_filter()
    }
}

/// 导航栏搜索词
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStore {
    search: Option<String>,
}

impl SearchStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = Some(search.into());
    }

    pub fn clear_search(&mut self) {
        self.search = None;
    }
}

/// 电影详情弹窗
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModalStore {
    is_open: bool,
    selected_movie: Option<Movie>,
}

impl ModalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_modal(&mut self, movie: Movie) {
        self.selected_movie = Some(movie);
        self.is_open = true;
    }

    pub fn close_modal(&mut self) {
        self.is_open = false;
        self.selected_movie = None;
    }

    pub fn modal_is_open(&self) -> bool {
        self.is_open
    }

    pub fn current_movie(&self) -> Option<&Movie> {
        self.selected_movie.as_ref()
    }
}

/// 好友与群组推荐
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FriendsStore {
    friends: Vec<String>,
    selected_friends: Vec<Friend>,
    group_recommendations: Vec<GroupRecommendation>,
}

impl FriendsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn friends(&self) -> &[String] {
        &self.friends
    }

    pub fn selected_friends(&self) -> &[Friend] {
        &self.selected_friends
    }

    pub fn group_recommendations(&self) -> &[GroupRecommendation] {
        &self.group_recommendations
    }

    pub fn add_friend(&mut self, friend: impl Into<String>) {
        self.friends.push(friend.into());
    }

    /// 删除所有同名条目
    pub fn remove_friend(&mut self, friend: &str) {
        self.friends.retain(|f| f != friend);
    }

    pub fn set_selected_friends(&mut self, friends: Vec<Friend>) {
        self.selected_friends = friends;
    }

    pub fn selected_friend_ids(&self) -> Vec<String> {
        self.selected_friends.iter().map(|f| f.id.clone()).collect()
    }

    pub fn set_group_recommendations(&mut self, recommendations: Vec<GroupRecommendation>) {
        self.group_recommendations = recommendations;
    }

    /// 同时清空推荐和已选好友
    pub fn clear_group_recommendations(&mut self) {
        self.group_recommendations.clear();
        self.selected_friends.clear();
    }
}
