use serde::{Deserialize, Serialize};

/// 好友信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Friend {
    pub id: String,
    pub name: String,
    pub country: String,
    pub registration_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture_url: Option<String>,
}

/// 推荐服务返回的电影（字段名沿用后端的西语命名）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedMovie {
    pub id: i64,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "posterUrl", default, skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    #[serde(rename = "sinopsis", default, skip_serializing_if = "Option::is_none")]
    pub synopsis: Option<String>,
    #[serde(rename = "duracionMinutos", default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    #[serde(rename = "fechaEstreno", default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
}

/// 群组推荐：电影 + 匹配分
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRecommendation {
    pub movie: RecommendedMovie,
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommendation_wire_names() {
        let json = r#"{
            "movie": {"id": 7, "titulo": "Dune", "duracionMinutos": 155, "fechaEstreno": "2021-10-22"},
            "score": 0.92
        }"#;
        let rec: GroupRecommendation = serde_json::from_str(json).unwrap();
        assert_eq!(rec.movie.title, "Dune");
        assert_eq!(rec.movie.duration_minutes, Some(155));
        assert!(rec.movie.poster_url.is_none());
        assert!((rec.score - 0.92).abs() < f64::EPSILON);
    }

    #[test]
    fn test_friend_without_picture() {
        let json = r#"{"id": "f1", "name": "Ana", "country": "CL", "registration_date": "2024-03-05"}"#;
        let friend: Friend = serde_json::from_str(json).unwrap();
        assert_eq!(friend.name, "Ana");
        assert!(friend.profile_picture_url.is_none());
        assert!(!serde_json::to_string(&friend).unwrap().contains("profile_picture_url"));
    }
}
