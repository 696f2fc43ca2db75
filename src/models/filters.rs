use serde::{Deserialize, Serialize};

use super::Movie;

/// 时长区间（分钟），两端都可以省略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
}

impl DurationRange {
    pub fn new(min: Option<u32>, max: Option<u32>) -> Self {
        Self { min, max }
    }

    pub fn at_least(min: u32) -> Self {
        Self::new(Some(min), None)
    }

    pub fn at_most(max: u32) -> Self {
        Self::new(None, Some(max))
    }

    fn min_bound(&self) -> Option<u32> {
        self.min.filter(|&m| m > 0)
    }

    fn max_bound(&self) -> Option<u32> {
        self.max.filter(|&m| m > 0)
    }

    /// 至少有一端生效（0 视为未设置）
    pub fn is_constrained(&self) -> bool {
        self.min_bound().is_some() || self.max_bound().is_some()
    }

    /// 没有时长的电影不满足任何时长约束
    pub fn contains(&self, duration: Option<u32>) -> bool {
        let Some(minutes) = duration else {
            return false;
        };
        let meets_min = self.min_bound().map_or(true, |min| minutes >= min);
        let meets_max = self.max_bound().map_or(true, |max| minutes <= max);
        meets_min && meets_max
    }

    /// 展示用标签，例如 "100-150 min"、"100-∞ min"
    pub fn label(&self) -> String {
        let min = self.min_bound().unwrap_or(0);
        match self.max_bound() {
            Some(max) => format!("{}-{} min", min, max),
            None => format!("{}-∞ min", min),
        }
    }
}

/// 搜索引擎使用的过滤条件
///
/// 每个维度都是可选的；缺失即不约束。空字符串和 0 与缺失等价。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<DurationRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_text: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl MovieFilters {
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    pub fn with_search_text(mut self, text: impl Into<String>) -> Self {
        self.search_text = Some(text.into());
        self
    }

    pub fn with_duration(mut self, range: DurationRange) -> Self {
        self.duration = Some(range);
        self
    }

    fn year_filter(&self) -> Option<i32> {
        self.year.filter(|&y| y != 0)
    }

    fn duration_filter(&self) -> Option<&DurationRange> {
        self.duration.as_ref().filter(|range| range.is_constrained())
    }

    /// 所有维度都未设置
    pub fn is_empty(&self) -> bool {
        present(&self.search_text).is_none()
            && present(&self.genre).is_none()
            && self.year_filter().is_none()
            && present(&self.platform).is_none()
            && self.duration_filter().is_none()
    }

    /// 各维度之间是 AND 关系
    pub fn matches(&self, movie: &Movie) -> bool {
        if let Some(text) = present(&self.search_text) {
            let term = text.to_lowercase();
            let in_title = movie.title.to_lowercase().contains(&term);
            let in_director = movie
                .director
                .as_deref()
                .map_or(false, |d| d.to_lowercase().contains(&term));
            if !in_title && !in_director {
                return false;
            }
        }

        if let Some(genre) = present(&self.genre) {
            if movie.genre.as_deref() != Some(genre) {
                return false;
            }
        }

        if let Some(year) = self.year_filter() {
            if movie.year != Some(year) {
                return false;
            }
        }

        if let Some(platform) = present(&self.platform) {
            if movie.platform.as_deref() != Some(platform) {
                return false;
            }
        }

        if let Some(range) = self.duration_filter() {
            if !range.contains(movie.known_duration()) {
                return false;
            }
        }

        true
    }

    /// 当前生效的过滤条件，顺序固定：search、genre、year、platform、duration
    pub fn active_filters(&self) -> Vec<ActiveFilter> {
        let mut active = Vec::new();

        if let Some(text) = present(&self.search_text) {
            active.push(ActiveFilter {
                kind: FilterKind::Search,
                label: format!("\"{}\"", text),
                value: FilterValue::Text(text.to_string()),
            });
        }

        if let Some(genre) = present(&self.genre) {
            active.push(ActiveFilter {
                kind: FilterKind::Genre,
                label: genre.to_string(),
                value: FilterValue::Text(genre.to_string()),
            });
        }

        if let Some(year) = self.year_filter() {
            active.push(ActiveFilter {
                kind: FilterKind::Year,
                label: year.to_string(),
                value: FilterValue::Year(year),
            });
        }

        if let Some(platform) = present(&self.platform) {
            active.push(ActiveFilter {
                kind: FilterKind::Platform,
                label: platform.to_string(),
                value: FilterValue::Text(platform.to_string()),
            });
        }

        if let Some(range) = self.duration_filter() {
            active.push(ActiveFilter {
                kind: FilterKind::Duration,
                label: range.label(),
                value: FilterValue::Duration(*range),
            });
        }

        active
    }

    pub fn has_active_filters(&self) -> bool {
        !self.is_empty()
    }
}

/// 过滤维度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    Search,
    Genre,
    Year,
    Platform,
    Duration,
}

impl FilterKind {
    pub fn as_str(&self) -> &str {
        match self {
            FilterKind::Search => "search",
            FilterKind::Genre => "genre",
            FilterKind::Year => "year",
            FilterKind::Platform => "platform",
            FilterKind::Duration => "duration",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Text(String),
    Year(i32),
    Duration(DurationRange),
}

/// UI 中展示的一个已生效过滤条件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveFilter {
    #[serde(rename = "type")]
    pub kind: FilterKind,
    pub label: String,
    pub value: FilterValue,
}
