use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

use crate::models::{Movie, MovieId};

/// 电影数据来源
///
/// 搜索引擎只依赖这个接口；真实后端查询可以替换内存实现。
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    async fn movies(&self) -> Result<Vec<Movie>>;
}

/// 内存电影目录，可选模拟网络延迟
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    movies: Vec<Movie>,
    latency: Option<Duration>,
}

impl InMemoryCatalog {
    pub fn new(movies: Vec<Movie>) -> Self {
        Self { movies, latency: None }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// 内置的六部示例电影
    pub fn seeded() -> Self {
        Self::new(vec![
            seed(1, "The Matrix", "scifi", 1999, 136, "netflix", "The Wachowskis", 1200, 450, 8.7),
            seed(2, "Inception", "scifi", 2010, 148, "netflix", "Christopher Nolan", 980, 320, 8.8),
            seed(3, "The Godfather", "crime", 1972, 175, "hbo-max", "Francis Ford Coppola", 1500, 600, 9.2),
            seed(4, "Pulp Fiction", "crime", 1994, 154, "amazon-prime", "Quentin Tarantino", 1100, 480, 8.9),
            seed(5, "The Dark Knight", "action", 2008, 152, "hbo-max", "Christopher Nolan", 1300, 520, 9.0),
            seed(6, "Forrest Gump", "drama", 1994, 142, "disney-plus", "Robert Zemeckis", 900, 350, 8.8),
        ])
    }
}

#[allow(clippy::too_many_arguments)]
fn seed(
    id: i64,
    title: &str,
    genre: &str,
    year: i32,
    duration: u32,
    platform: &str,
    director: &str,
    views: u64,
    likes: u64,
    rating: f32,
) -> Movie {
    Movie {
        id: Some(MovieId::Number(id)),
        title: title.to_string(),
        src: Some("/images/cat.jpg".to_string()),
        views: Some(views),
        likes: Some(likes),
        genre: Some(genre.to_string()),
        year: Some(year),
        duration: Some(duration),
        platform: Some(platform.to_string()),
        director: Some(director.to_string()),
        actors: Vec::new(),
        rating: Some(rating),
    }
}

#[async_trait]
impl MovieCatalog for InMemoryCatalog {
    async fn movies(&self) -> Result<Vec<Movie>> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        Ok(self.movies.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[tokio::test]
    async fn test_seeded_catalog() {
        let catalog = InMemoryCatalog::seeded();
        assert_eq!(catalog.len(), 6);

        let movies = catalog.movies().await.unwrap();
        let ids: HashSet<i64> = movies.iter().filter_map(Movie::numeric_id).collect();
        assert_eq!(ids.len(), 6);
        assert!(movies.iter().all(|m| m.known_duration().is_some()));
    }

    #[tokio::test]
    async fn test_latency_is_applied() {
        let catalog = InMemoryCatalog::new(Vec::new()).with_latency(Duration::from_millis(30));
        assert!(catalog.is_empty());

        let started = std::time::Instant::now();
        catalog.movies().await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(30));
    }
}
