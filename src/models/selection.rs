// 界面侧的筛选选择
//
// 与搜索引擎的 MovieFilters 是两套结构：这里保存的是筛选表单里
// 勾选的原始值（多选类型、上映年代、时长档位、排序、平台），
// 由页面控制器负责换算成 MovieFilters 并同步到 URL。

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::DurationRange;

lazy_static! {
    static ref MORE_THAN: Regex = Regex::new(r"(?i)^\s*m[aá]s\s+de\s+(\d+)").unwrap();
    static ref LESS_THAN: Regex = Regex::new(r"(?i)^\s*menos\s+de\s+(\d+)").unwrap();
    static ref BETWEEN: Regex = Regex::new(r"(\d+)\s*[-–]\s*(\d+)").unwrap();
}

/// 筛选表单的当前选择
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(rename = "estreno", default)]
    pub release_era: Option<String>,
    #[serde(rename = "duracion", default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(rename = "plataforma", default)]
    pub platforms: Vec<String>,
}

impl FilterSelection {
    /// 把时长档位换算成区间
    ///
    /// 支持 "Más de 120 min"、"Menos de 90 min"、"90-120 min" 三种写法，
    /// 无法识别的档位返回 None。
    pub fn duration_range(&self) -> Option<DurationRange> {
        let bucket = self.duration.as_deref()?;

        if let Some(caps) = MORE_THAN.captures(bucket) {
            let minutes: u32 = caps[1].parse().ok()?;
            return Some(DurationRange::at_least(minutes.saturating_add(1)));
        }

        if let Some(caps) = LESS_THAN.captures(bucket) {
            let minutes: u32 = caps[1].parse().ok()?;
            return Some(DurationRange::at_most(minutes.saturating_sub(1).max(1)));
        }

        if let Some(caps) = BETWEEN.captures(bucket) {
            let min: u32 = caps[1].parse().ok()?;
            let max: u32 = caps[2].parse().ok()?;
            return Some(DurationRange::new(Some(min), Some(max)));
        }

        tracing::warn!("Unrecognized duration bucket: {}", bucket);
        None
    }
}

/// setFilters 的局部更新：Some 覆盖，None 保持原值
///
/// 可空字段用 `Option<Option<_>>`，`Some(None)` 表示显式清空。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelectionPatch {
    pub genres: Option<Vec<String>>,
    pub release_era: Option<Option<String>>,
    pub duration: Option<Option<String>>,
    pub sort: Option<Option<String>>,
    pub platforms: Option<Vec<String>>,
}

impl FilterSelectionPatch {
    pub fn genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = Some(genres.into_iter().map(Into::into).collect());
        self
    }

    pub fn release_era(mut self, era: impl Into<String>) -> Self {
        self.release_era = Some(Some(era.into()));
        self
    }

    pub fn duration(mut self, bucket: impl Into<String>) -> Self {
        self.duration = Some(Some(bucket.into()));
        self
    }

    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(Some(sort.into()));
        self
    }

    pub fn platforms<I, S>(mut self, platforms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.platforms = Some(platforms.into_iter().map(Into::into).collect());
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// 筛选字段在 URL / 表单中的键名
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKey {
    Genres,
    ReleaseEra,
    Duration,
    Sort,
    Platforms,
}

impl FilterKey {
    pub const ALL: [FilterKey; 5] = [
        FilterKey::Genres,
        FilterKey::ReleaseEra,
        FilterKey::Duration,
        FilterKey::Sort,
        FilterKey::Platforms,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            FilterKey::Genres => "genres",
            FilterKey::ReleaseEra => "estreno",
            FilterKey::Duration => "duracion",
            FilterKey::Sort => "sort",
            FilterKey::Platforms => "plataforma",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "genres" => Some(FilterKey::Genres),
            "estreno" => Some(FilterKey::ReleaseEra),
            "duracion" => Some(FilterKey::Duration),
            "sort" => Some(FilterKey::Sort),
            "plataforma" => Some(FilterKey::Platforms),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_bucket(bucket: &str) -> FilterSelection {
        FilterSelection {
            duration: Some(bucket.to_string()),
            ..FilterSelection::default()
        }
    }

    #[test]
    fn test_initial_selection_json() {
        let json = serde_json::to_value(FilterSelection::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "genres": [],
                "estreno": null,
                "duracion": null,
                "sort": null,
                "plataforma": [],
            })
        );
    }

    #[test]
    fn test_duration_buckets() {
        assert_eq!(with_bucket("Más de 120 min").duration_range(), Some(DurationRange::at_least(121)));
        assert_eq!(with_bucket("menos de 90 min").duration_range(), Some(DurationRange::at_most(89)));
        assert_eq!(
            with_bucket("90-120 min").duration_range(),
            Some(DurationRange::new(Some(90), Some(120)))
        );
        assert_eq!(with_bucket("larga").duration_range(), None);
        assert_eq!(FilterSelection::default().duration_range(), None);
    }

    #[test]
    fn test_filter_key_round_trip_names() {
        for key in FilterKey::ALL {
            assert_eq!(FilterKey::from_str(key.as_str()), Some(key));
        }
        assert_eq!(FilterKey::from_str("rating"), None);
    }

    #[test]
    fn test_patch_builder() {
        let patch = FilterSelectionPatch::default().genres(["Acción"]).sort("titulo");
        assert_eq!(patch.genres, Some(vec!["Acción".to_string()]));
        assert_eq!(patch.sort, Some(Some("titulo".to_string())));
        assert!(patch.duration.is_none());
        assert!(FilterSelectionPatch::default().is_empty());
    }
}
