use serde::{Deserialize, Serialize};

use super::Movie;

/// 一页搜索结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub movies: Vec<Movie>,
    pub total: usize,       // 所有页的匹配总数
    pub page: u32,          // 从 1 开始
    pub has_more: bool,
}

impl SearchResult {
    /// 从全部匹配项中切出第 `page` 页
    ///
    /// `page` 必须 >= 1，调用方负责校验。
    pub fn from_matches(matches: Vec<Movie>, page: u32, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let total = matches.len();
        let start_index = (page.max(1) as usize - 1).saturating_mul(page_size);
        let end_index = start_index.saturating_add(page_size);

        let movies = matches
            .into_iter()
            .skip(start_index)
            .take(page_size)
            .collect();

        Self {
            movies,
            total,
            page,
            has_more: end_index < total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn movies(count: usize) -> Vec<Movie> {
        (0..count).map(|i| Movie::new(format!("Movie {}", i + 1))).collect()
    }

    #[test]
    fn test_first_and_last_page() {
        let first = SearchResult::from_matches(movies(6), 1, 4);
        assert_eq!(first.movies.len(), 4);
        assert_eq!(first.total, 6);
        assert!(first.has_more);

        let second = SearchResult::from_matches(movies(6), 2, 4);
        assert_eq!(second.movies.len(), 2);
        assert_eq!(second.movies[0].title, "Movie 5");
        assert!(!second.has_more);
    }

    #[test]
    fn test_page_past_the_end() {
        let result = SearchResult::from_matches(movies(3), 5, 4);
        assert!(result.movies.is_empty());
        assert_eq!(result.total, 3);
        assert!(!result.has_more);
    }

    #[test]
    fn test_exact_multiple_has_no_trailing_page() {
        let result = SearchResult::from_matches(movies(8), 2, 4);
        assert_eq!(result.movies.len(), 4);
        assert!(!result.has_more);
    }

    proptest! {
        #[test]
        fn prop_pages_with_more_is_ceil_minus_one(total in 1usize..200, page_size in 1usize..25) {
            let pages = (total + page_size - 1) / page_size;
            let mut with_more = 0;
            let mut seen = 0;

            for page in 1..=pages as u32 {
                let result = SearchResult::from_matches(movies(total), page, page_size);
                seen += result.movies.len();
                if result.has_more {
                    with_more += 1;
                }
                if page as usize == pages {
                    prop_assert!(!result.has_more);
                }
            }

            prop_assert_eq!(with_more, pages - 1);
            prop_assert_eq!(seen, total);
        }
    }
}
