use serde::{Deserialize, Serialize};

/// 电影标识：后端可能返回数字或字符串 ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MovieId {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MovieId::Number(id) => write!(f, "{}", id),
            MovieId::Text(id) => write!(f, "{}", id),
        }
    }
}

impl From<i64> for MovieId {
    fn from(id: i64) -> Self {
        MovieId::Number(id)
    }
}

impl From<&str> for MovieId {
    fn from(id: &str) -> Self {
        MovieId::Text(id.to_string())
    }
}

/// 目录中的一部电影
///
/// 除标题外的字段都是可选的，过滤引擎只读不写。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<MovieId>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,           // 海报/缩略图路径
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,         // 分钟
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
}

impl Movie {
    /// 只带标题的电影，其余字段为空
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            src: None,
            views: None,
            likes: None,
            genre: None,
            year: None,
            duration: None,
            platform: None,
            director: None,
            actors: Vec::new(),
            rating: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<MovieId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// 时长为 0 视为缺失
    pub fn known_duration(&self) -> Option<u32> {
        self.duration.filter(|&minutes| minutes > 0)
    }

    /// 数字 ID（用于访问上报）
    pub fn numeric_id(&self) -> Option<i64> {
        match self.id {
            Some(MovieId::Number(id)) => Some(id),
            Some(MovieId::Text(ref id)) => id.parse().ok(),
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_json_shape() {
        let json = r#"{"id": 2, "title": "Inception", "genre": "scifi", "duration": 148}"#;
        let movie: Movie = serde_json::from_str(json).unwrap();

        assert_eq!(movie.id, Some(MovieId::Number(2)));
        assert_eq!(movie.duration, Some(148));
        assert!(movie.director.is_none());
        assert!(movie.actors.is_empty());

        let back = serde_json::to_value(&movie).unwrap();
        assert!(back.get("director").is_none());
    }

    #[test]
    fn test_string_id() {
        let movie: Movie = serde_json::from_str(r#"{"id": "tt0133093", "title": "The Matrix"}"#).unwrap();
        assert_eq!(movie.id, Some(MovieId::Text("tt0133093".to_string())));
        assert_eq!(movie.numeric_id(), None);
    }

    #[test]
    fn test_zero_duration_is_unknown() {
        let mut movie = Movie::new("Short");
        movie.duration = Some(0);
        assert_eq!(movie.known_duration(), None);
    }
}
