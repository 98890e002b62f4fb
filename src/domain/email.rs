//! Email domain types.
//!
//! Represents individual messages and the AI analysis attached to them.
//! Emails are sourced entirely from the backend; the client never creates
//! or deletes them, and only the server flips `is_read`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AccountId, EmailId};

/// An individual email message as the backend serves it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Email {
    /// Unique identifier for this email.
    pub id: EmailId,
    /// Account this email belongs to.
    pub account_id: AccountId,
    /// Provider-side conversation identifier.
    pub thread_id: String,
    /// Sender display name, if the provider supplied one.
    pub sender_name: Option<String>,
    /// Sender address.
    pub sender_email: String,
    /// Subject line.
    pub subject: String,
    /// Short preview of the email content.
    pub snippet: String,
    /// Plain text body, when fetched.
    pub body_text: Option<String>,
    /// When the email was received.
    pub received_at: DateTime<Utc>,
    /// Whether the email has been read.
    pub is_read: bool,
    /// Provider labels applied to this email.
    #[serde(default)]
    pub labels: Vec<String>,
}

impl Email {
    /// Returns the sender's display representation: name when present,
    /// address otherwise.
    pub fn sender_display(&self) -> &str {
        match self.sender_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.sender_email,
        }
    }

    /// Returns the text to show in the detail view, falling back to the
    /// snippet when no body was fetched.
    pub fn display_body(&self) -> &str {
        match self.body_text.as_deref() {
            Some(body) if !body.is_empty() => body,
            _ => &self.snippet,
        }
    }
}

/// AI analysis produced for an email.
///
/// Analysis arrives asynchronously relative to sync; an email may exist
/// without one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailAnalysis {
    /// Unique identifier for this analysis record.
    pub id: String,
    /// Email this analysis belongs to.
    pub email_id: EmailId,
    /// Priority score in [0, 100].
    pub priority_score: u8,
    /// One-sentence explanation of the assigned priority.
    pub explanation: String,
    /// Suggested follow-up actions, possibly empty.
    #[serde(default)]
    pub action_items: Vec<String>,
    /// Factors the analyzer considered (is_vip, has_deadline, ...).
    /// Free-form: the analyzer's fallback path returns an empty map.
    #[serde(default)]
    pub urgency_factors: serde_json::Map<String, serde_json::Value>,
    /// When the analysis was produced.
    pub analyzed_at: DateTime<Utc>,
}

/// An email joined with its optional analysis.
///
/// This is the unit the presentation layer consumes. The backend serves it
/// as the email record with an `analysis` field merged in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailWithAnalysis {
    /// The email itself.
    #[serde(flatten)]
    pub email: Email,
    /// The AI analysis, if one has been produced yet.
    pub analysis: Option<EmailAnalysis>,
}

impl EmailWithAnalysis {
    /// Returns the priority score, if analyzed.
    pub fn priority_score(&self) -> Option<u8> {
        self.analysis.as_ref().map(|a| a.priority_score)
    }

    /// Returns the email id.
    pub fn id(&self) -> &EmailId {
        &self.email.id
    }
}
