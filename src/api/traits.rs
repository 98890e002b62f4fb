//! Backend API trait definition.
//!
//! This module defines the [`MailApi`] trait which abstracts over the
//! trackmail backend. The services and the inbox view model depend on this
//! trait rather than on a concrete transport, so tests drive them with
//! scripted in-memory implementations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{
    AccountId, EmailAccount, EmailId, EmailWithAnalysis, PriorityFeedback, UserPreferences,
};

/// Result type alias for backend API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors that can occur talking to the backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Authentication failed or the session token expired.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// Network or connection error.
    #[error("connection error: {0}")]
    Connection(String),

    /// Requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded.
    #[error("rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimited {
        /// Seconds to wait before retrying, if known.
        retry_after_secs: Option<u64>,
    },

    /// Invalid request or parameters.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Server-side error.
    #[error("server error ({status}): {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        message: String,
    },

    /// Internal error (response parsing and the like).
    #[error("internal error: {0}")]
    Internal(String),
}

/// The authorization target returned when a Gmail connect flow begins.
///
/// The caller is responsible for navigating the user to this URL; the
/// account appears in the account list only after the provider redirects
/// back and the list is refetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectTarget {
    /// Provider authorization URL to send the user to.
    pub auth_url: String,
}

/// Result of syncing a single account.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SyncOutcome {
    /// Number of new emails pulled in.
    pub synced_count: u32,
    /// Number of emails analyzed.
    pub analyzed_count: u32,
}

/// Query parameters for listing emails.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EmailQuery {
    /// Maximum number of emails to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Offset for pagination.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    /// Only emails scored at or above this value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_priority: Option<u8>,
    /// Only emails scored at or below this value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_priority: Option<u8>,
    /// Filter by read status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_read: Option<bool>,
}

impl EmailQuery {
    /// Creates a query with the specified limit.
    pub fn with_limit(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            ..Default::default()
        }
    }
}

/// Trait for trackmail backend access.
///
/// All requests travel over an authenticated channel; implementations are
/// responsible for attaching the session's credentials.
#[async_trait]
pub trait MailApi: Send + Sync {
    /// Lists the connected email accounts, in server order.
    async fn list_accounts(&self) -> Result<Vec<EmailAccount>>;

    /// Begins a Gmail OAuth connect flow, returning the authorization
    /// target for the caller to navigate to.
    async fn begin_gmail_connect(&self) -> Result<ConnectTarget>;

    /// Disconnects an account server-side.
    async fn disconnect_account(&self, id: &AccountId) -> Result<()>;

    /// Syncs one account's mailbox into the backend.
    async fn sync_account(&self, id: &AccountId) -> Result<SyncOutcome>;

    /// Lists emails with their analysis, newest first.
    async fn list_emails(&self, query: &EmailQuery) -> Result<Vec<EmailWithAnalysis>>;

    /// Lists emails scored at or above `threshold`.
    async fn list_priority_emails(
        &self,
        threshold: u8,
        limit: u32,
    ) -> Result<Vec<EmailWithAnalysis>>;

    /// Fetches a single email with its analysis.
    async fn get_email(&self, id: &EmailId) -> Result<EmailWithAnalysis>;

    /// Fetches the user's preferences.
    async fn get_preferences(&self) -> Result<UserPreferences>;

    /// Replaces the user's preferences wholesale.
    async fn update_preferences(&self, preferences: &UserPreferences) -> Result<UserPreferences>;

    /// Submits a priority-accuracy judgement for one email.
    async fn submit_feedback(&self, id: &EmailId, feedback: &PriorityFeedback) -> Result<()>;
}
