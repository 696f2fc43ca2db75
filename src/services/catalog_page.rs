// 电影列表页控制器
//
// 负责把筛选表单、搜索词和当前页码同步到 URL 查询串，
// 以及把界面筛选换算成搜索引擎的 MovieFilters。

use crate::models::{FilterKey, FilterSelection, MovieFilters};

/// 列表页的 URL 状态
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub page: u32,
    pub search: Option<String>,
    pub selection: FilterSelection,
}

impl CatalogQuery {
    /// 按固定顺序输出非空的查询参数，列表值用逗号连接
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("page".to_string(), self.page.max(1).to_string())];

        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("search".to_string(), search.to_string()));
        }

        let selection = &self.selection;
        let fields: [(FilterKey, Option<String>); 5] = [
            (FilterKey::Genres, join_list(&selection.genres)),
            (FilterKey::ReleaseEra, selection.release_era.clone()),
            (FilterKey::Duration, selection.duration.clone()),
            (FilterKey::Sort, selection.sort.clone()),
            (FilterKey::Platforms, join_list(&selection.platforms)),
        ];

        for (key, value) in fields {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                pairs.push((key.as_str().to_string(), value));
            }
        }

        pairs
    }

    pub fn to_query_string(&self) -> String {
        self.to_pairs()
            .iter()
            .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// 解析查询串；非法页码回到第 1 页，未知参数忽略
    pub fn parse(query: &str) -> Self {
        let mut parsed = CatalogQuery {
            page: 1,
            ..CatalogQuery::default()
        };

        for pair in query.trim_start_matches('?').split('&').filter(|p| !p.is_empty()) {
            let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = decode(raw_key);
            let value = decode(raw_value);

            if key == "page" {
                parsed.page = value.parse().ok().filter(|&p: &u32| p >= 1).unwrap_or(1);
                continue;
            }
            if key == "search" {
                parsed.search = Some(value).filter(|v| !v.is_empty());
                continue;
            }

            match FilterKey::from_str(&key) {
                Some(FilterKey::Genres) => parsed.selection.genres = split_list(&value),
                Some(FilterKey::ReleaseEra) => parsed.selection.release_era = Some(value).filter(|v| !v.is_empty()),
                Some(FilterKey::Duration) => parsed.selection.duration = Some(value).filter(|v| !v.is_empty()),
                Some(FilterKey::Sort) => parsed.selection.sort = Some(value).filter(|v| !v.is_empty()),
                Some(FilterKey::Platforms) => parsed.selection.platforms = split_list(&value),
                None => tracing::debug!("Ignoring query parameter {}", key),
            }
        }

        parsed
    }

    /// 换算成搜索引擎的过滤条件
    ///
    /// 引擎每个维度只接受一个值，多选时取第一个；上映年代无法表达为单一年份，不参与换算。
    pub fn movie_filters(&self) -> MovieFilters {
        MovieFilters {
            genre: self.selection.genres.first().cloned(),
            year: None,
            duration: self.selection.duration_range(),
            platform: self.selection.platforms.first().cloned(),
            search_text: self.search.clone().filter(|s| !s.is_empty()),
        }
    }
}

fn join_list(values: &[String]) -> Option<String> {
    if values.is_empty() {
        None
    } else {
        Some(values.join(","))
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

fn decode(raw: &str) -> String {
    let raw = raw.replace('+', " ");
    match urlencoding::decode(&raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw,
    }
}

/// 列表页当前页码，页码与搜索引擎的分页一致
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPage {
    page: u32,
}

impl CatalogPage {
    pub fn new() -> Self {
        Self { page: 1 }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// 筛选变化：回到第 1 页并生成新的 URL 状态
    pub fn on_filters_changed(&mut self, selection: &FilterSelection, search: Option<&str>) -> CatalogQuery {
        self.page = 1;
        self.query(selection, search)
    }

    /// 搜索词变化：同样回到第 1 页
    pub fn on_search_changed(&mut self, selection: &FilterSelection, search: Option<&str>) -> CatalogQuery {
        self.on_filters_changed(selection, search)
    }

    pub fn query(&self, selection: &FilterSelection, search: Option<&str>) -> CatalogQuery {
        CatalogQuery {
            page: self.page,
            search: search.map(str::to_string),
            selection: selection.clone(),
        }
    }
}

impl Default for CatalogPage {
    fn default() -> Self {
        Self::new()
    }
}
