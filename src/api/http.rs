//! HTTP implementation of the backend API.
//!
//! Talks to the trackmail backend over its `/api` prefix with a bearer
//! token read from the shared [`Session`]. Response handling maps HTTP
//! status codes onto the [`ApiError`] taxonomy so callers never see raw
//! transport details.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::session::Session;
use super::traits::{ApiError, ConnectTarget, EmailQuery, MailApi, Result, SyncOutcome};
use crate::config::ApiSettings;
use crate::domain::{
    AccountId, EmailAccount, EmailId, EmailWithAnalysis, PriorityFeedback, UserPreferences,
};

/// Backend API client over HTTP.
pub struct HttpMailApi {
    client: reqwest::Client,
    base_url: String,
    session: Arc<Session>,
}

impl HttpMailApi {
    /// Creates a client for the given backend.
    pub fn new(settings: &ApiSettings, session: Arc<Session>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| ApiError::Internal(format!("build http client: {}", e)))?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    fn auth_headers(&self) -> Result<HeaderMap> {
        let token = self
            .session
            .access_token()
            .ok_or_else(|| ApiError::Authentication("not signed in".to_string()))?;

        let mut headers = HeaderMap::new();
        let value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| ApiError::Internal(format!("invalid token header: {}", e)))?;
        headers.insert(AUTHORIZATION, value);
        Ok(headers)
    }

    /// Makes an authenticated GET request.
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self
            .client
            .get(self.endpoint(path))
            .headers(self.auth_headers()?)
            .send()
            .await
            .map_err(|e| ApiError::Connection(e.to_string()))?;

        Self::handle_response(response).await
    }

    /// Makes an authenticated GET request with query parameters.
    async fn get_with_query<T: DeserializeOwned, Q: Serialize>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T> {
        let response = self
            .client
            .get(self.endpoint(path))
            .headers(self.auth_headers()?)
            .query(query)
            .send()
            .await
            .map_err(|e| ApiError::Connection(e.to_string()))?;

        Self::handle_response(response).await
    }

    /// Makes an authenticated POST request.
    async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let mut headers = self.auth_headers()?;
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let response = self
            .client
            .post(self.endpoint(path))
            .headers(headers)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Connection(e.to_string()))?;

        Self::handle_response(response).await
    }

    /// Makes an authenticated PUT request.
    async fn put<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let mut headers = self.auth_headers()?;
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let response = self
            .client
            .put(self.endpoint(path))
            .headers(headers)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Connection(e.to_string()))?;

        Self::handle_response(response).await
    }

    /// Makes an authenticated DELETE request that returns no useful body.
    async fn delete(&self, path: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.endpoint(path))
            .headers(self.auth_headers()?)
            .send()
            .await
            .map_err(|e| ApiError::Connection(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::handle_error(response).await);
        }
        Ok(())
    }

    /// Handles an API response, checking for errors.
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        if !response.status().is_success() {
            return Err(Self::handle_error(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Internal(format!("parse response: {}", e)))
    }

    /// Handles API error responses.
    async fn handle_error(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        map_status(status, detail_message(&body))
    }
}

/// Maps an HTTP status and error detail onto the [`ApiError`] taxonomy.
fn map_status(status: u16, message: String) -> ApiError {
    match status {
        401 | 403 => ApiError::Authentication(message),
        404 => ApiError::NotFound(message),
        429 => ApiError::RateLimited {
            retry_after_secs: None,
        },
        400 | 422 => ApiError::InvalidRequest(message),
        _ => ApiError::Server { status, message },
    }
}

/// Pulls the human-readable `detail` field out of a FastAPI error body,
/// falling back to the raw body.
fn detail_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str().map(String::from)))
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl MailApi for HttpMailApi {
    async fn list_accounts(&self) -> Result<Vec<EmailAccount>> {
        self.get("/accounts").await
    }

    async fn begin_gmail_connect(&self) -> Result<ConnectTarget> {
        self.post("/accounts/connect", &serde_json::json!({})).await
    }

    async fn disconnect_account(&self, id: &AccountId) -> Result<()> {
        self.delete(&format!("/accounts/{}", id)).await
    }

    async fn sync_account(&self, id: &AccountId) -> Result<SyncOutcome> {
        self.post(&format!("/accounts/{}/sync", id), &serde_json::json!({}))
            .await
    }

    async fn list_emails(&self, query: &EmailQuery) -> Result<Vec<EmailWithAnalysis>> {
        self.get_with_query("/emails", query).await
    }

    async fn list_priority_emails(
        &self,
        threshold: u8,
        limit: u32,
    ) -> Result<Vec<EmailWithAnalysis>> {
        self.get_with_query(
            "/emails/priority",
            &[("threshold", u32::from(threshold)), ("limit", limit)],
        )
        .await
    }

    async fn get_email(&self, id: &EmailId) -> Result<EmailWithAnalysis> {
        self.get(&format!("/emails/{}", id)).await
    }

    async fn get_preferences(&self) -> Result<UserPreferences> {
        self.get("/emails/preferences/me").await
    }

    async fn update_preferences(&self, preferences: &UserPreferences) -> Result<UserPreferences> {
        self.put("/emails/preferences/me", preferences).await
    }

    async fn submit_feedback(&self, id: &EmailId, feedback: &PriorityFeedback) -> Result<()> {
        let _: serde_json::Value = self
            .post(&format!("/emails/{}/feedback", id), feedback)
            .await?;
        Ok(())
    }
}
