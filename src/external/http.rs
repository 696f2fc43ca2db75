use async_trait::async_trait;
use reqwest::{header, Client, Response};
use serde_json::json;
use url::Url;

use super::{BackendApi, BackendError};
use crate::config::AppConfig;
use crate::models::{Credentials, GroupRecommendation, RegisterRequest, RegisteredUser, TokenResponse};

const LOGIN_PATH: &str = "api/v1/auth/login";
const REGISTER_PATH: &str = "api/v1/auth/register";
const VISIT_PATH: &str = "api/v1/visits/visit";
const GROUP_RECOMMENDATIONS_PATH: &str = "api/v1/recommendations/group";

/// 基于 reqwest 的后端客户端
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    backend_url: Url,
    users_url: Url,
}

impl HttpBackend {
    pub fn new(config: &AppConfig) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(config.http_timeout)
            .build()?;

        Ok(Self {
            client,
            backend_url: config.backend_url.clone(),
            users_url: config.users_url.clone(),
        })
    }

    fn users_endpoint(&self, path: &str) -> Result<Url, BackendError> {
        Ok(self.users_url.join(path)?)
    }

    fn backend_endpoint(&self, path: &str) -> Result<Url, BackendError> {
        Ok(self.backend_url.join(path)?)
    }

    fn check_status(response: Response) -> Result<Response, BackendError> {
        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Backend responded {} for {}", status, response.url());
            return Err(BackendError::Status(status.as_u16()));
        }
        Ok(response)
    }
}

#[async_trait]
impl BackendApi for HttpBackend {
    async fn login(&self, credentials: &Credentials) -> Result<TokenResponse, BackendError> {
        let url = self.users_endpoint(LOGIN_PATH)?;

        let response = self.client
            .post(url)
            .form(&credentials.form_fields()[..])
            .send()
            .await?;

        let token: TokenResponse = Self::check_status(response)?.json().await?;
        Ok(token)
    }

    async fn register(&self, request: &RegisterRequest) -> Result<RegisteredUser, BackendError> {
        let url = self.users_endpoint(REGISTER_PATH)?;

        let response = self.client
            .post(url)
            .json(request)
            .send()
            .await?;

        let user: RegisteredUser = Self::check_status(response)?.json().await?;
        Ok(user)
    }

    async fn send_visit(&self, token: &str, movie_id: i64) -> Result<(), BackendError> {
        let url = self.backend_endpoint(VISIT_PATH)?;

        let response = self.client
            .post(url)
            .header(header::ACCEPT, "application/json")
            .bearer_auth(token)
            .json(&json!({ "movie_id": movie_id }))
            .send()
            .await?;

        Self::check_status(response)?;
        Ok(())
    }

    async fn group_recommendations(
        &self,
        token: &str,
        friend_ids: &[String],
    ) -> Result<Vec<GroupRecommendation>, BackendError> {
        let url = self.backend_endpoint(GROUP_RECOMMENDATIONS_PATH)?;

        let response = self.client
            .post(url)
            .header(header::ACCEPT, "application/json")
            .bearer_auth(token)
            .json(&json!({ "friend_ids": friend_ids }))
            .send()
            .await?;

        let recommendations: Vec<GroupRecommendation> = Self::check_status(response)?.json().await?;
        Ok(recommendations)
    }
}
