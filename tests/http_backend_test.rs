// HttpBackend 协议测试
//
// 在本地端口启动一个 axum 服务，检查请求的路径、表单、Bearer 头和 JSON 体

use axum::extract::{Form, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use cine_client::external::{BackendApi, BackendError, HttpBackend};
use cine_client::models::{Credentials, RegisterRequest};
use cine_client::AppConfig;

#[derive(Default)]
struct Recorded {
    login_form: Option<HashMap<String, String>>,
    register_body: Option<Value>,
    visit_auth: Option<String>,
    visit_body: Option<Value>,
    recommendation_body: Option<Value>,
}

type Shared = Arc<Mutex<Recorded>>;

const TOKEN: &str = "header.eyJ1c2VyX2lkIjogN30.signature";

async fn login(State(recorded): State<Shared>, Form(form): Form<HashMap<String, String>>) -> impl IntoResponse {
    let accepted = form.get("password").map(String::as_str) == Some("1234");
    recorded.lock().unwrap().login_form = Some(form);

    if accepted {
        (StatusCode::OK, Json(json!({ "access_token": TOKEN, "token_type": "bearer" })))
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({ "detail": "Incorrect username or password" })))
    }
}

async fn register(State(recorded): State<Shared>, Json(body): Json<Value>) -> impl IntoResponse {
    let username = body["username"].clone();
    recorded.lock().unwrap().register_body = Some(body);
    Json(json!({ "username": username, "id": 7 }))
}

async fn visit(State(recorded): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> StatusCode {
    let mut recorded = recorded.lock().unwrap();
    recorded.visit_auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    recorded.visit_body = Some(body);
    StatusCode::CREATED
}

async fn recommendations(State(recorded): State<Shared>, Json(body): Json<Value>) -> impl IntoResponse {
    recorded.lock().unwrap().recommendation_body = Some(body);
    Json(json!([
        {
            "movie": {"id": 3, "titulo": "The Godfather", "duracionMinutos": 175},
            "score": 0.8
        }
    ]))
}

async fn spawn_server() -> (AppConfig, Shared) {
    let recorded: Shared = Arc::new(Mutex::new(Recorded::default()));
    let app = Router::new()
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/register", post(register))
        .route("/api/v1/visits/visit", post(visit))
        .route("/api/v1/recommendations/group", post(recommendations))
        .with_state(recorded.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let base = format!("http://{}", addr);
    let config = AppConfig::from_lookup(|key| match key {
        "BACKEND_URL" | "USERS_URL" => Some(base.clone()),
        _ => None,
    })
    .unwrap();

    (config, recorded)
}

#[tokio::test]
async fn test_login_posts_password_form() {
    let (config, recorded) = spawn_server().await;
    let backend = HttpBackend::new(&config).unwrap();

    let token = backend.login(&Credentials::new("ana", "1234")).await.unwrap();
    assert_eq!(token.access_token, TOKEN);

    let form = recorded.lock().unwrap().login_form.clone().unwrap();
    assert_eq!(form.get("grant_type").map(String::as_str), Some("password"));
    assert_eq!(form.get("username").map(String::as_str), Some("ana"));
    assert_eq!(form.get("password").map(String::as_str), Some("1234"));
}

#[tokio::test]
async fn test_rejected_login_maps_status() {
    let (config, _) = spawn_server().await;
    let backend = HttpBackend::new(&config).unwrap();

    let err = backend.login(&Credentials::new("ana", "wrong")).await.unwrap_err();
    assert!(matches!(err, BackendError::Status(401)));
    assert_eq!(err.status(), Some(401));
}

#[tokio::test]
async fn test_register_sends_json() {
    let (config, recorded) = spawn_server().await;
    let backend = HttpBackend::new(&config).unwrap();

    let request = RegisterRequest {
        username: "ana".to_string(),
        email: "ana@example.com".to_string(),
        password: "1234".to_string(),
        name: Some("Ana".to_string()),
        country: None,
    };
    let user = backend.register(&request).await.unwrap();
    assert_eq!(user.username, "ana");

    let body = recorded.lock().unwrap().register_body.clone().unwrap();
    assert_eq!(body["email"], "ana@example.com");
    assert_eq!(body["password"], "1234");
}

#[tokio::test]
async fn test_visit_uses_bearer_token() {
    let (config, recorded) = spawn_server().await;
    let backend = HttpBackend::new(&config).unwrap();

    backend.send_visit(TOKEN, 12).await.unwrap();

    let recorded = recorded.lock().unwrap();
    assert_eq!(recorded.visit_auth.as_deref(), Some(format!("Bearer {}", TOKEN).as_str()));
    assert_eq!(recorded.visit_body, Some(json!({ "movie_id": 12 })));
}

#[tokio::test]
async fn test_group_recommendations_round_trip() {
    let (config, recorded) = spawn_server().await;
    let backend = HttpBackend::new(&config).unwrap();

    let ids = vec!["f1".to_string(), "f2".to_string()];
    let recommendations = backend.group_recommendations(TOKEN, &ids).await.unwrap();
    assert_eq!(recommendations.len(), 1);
    assert_eq!(recommendations[0].movie.title, "The Godfather");
    assert_eq!(recommendations[0].movie.duration_minutes, Some(175));

    let body = recorded.lock().unwrap().recommendation_body.clone().unwrap();
    assert_eq!(body, json!({ "friend_ids": ["f1", "f2"] }));
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let base = format!("http://{}", addr);
    let config = AppConfig::from_lookup(|key| match key {
        "BACKEND_URL" | "USERS_URL" => Some(base.clone()),
        _ => None,
    })
    .unwrap();
    let backend = HttpBackend::new(&config).unwrap();

    let err = backend.send_visit(TOKEN, 1).await.unwrap_err();
    assert!(matches!(err, BackendError::Network(_)));
}
