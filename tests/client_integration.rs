//! Integration tests for the client core.
//!
//! These tests drive the public pieces together over a scripted in-memory
//! backend: classification, the inbox view model's load/selection state
//! machine, sync orchestration, and the preferences and feedback flows.
//! Each module contains its own unit tests for detailed logic.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use pretty_assertions::assert_eq;

use trackmail::api::{
    ApiError, ConnectTarget, EmailQuery, MailApi, Result as ApiResult, SyncOutcome,
};
use trackmail::app::{DisplayState, LoadState, ViewMode};
use trackmail::config::InboxSettings;
use trackmail::domain::{
    classify, AccountId, Email, EmailAccount, EmailAnalysis, EmailId, EmailWithAnalysis,
    PriorityBucket, PriorityFeedback, UserPreferences,
};
use trackmail::services::{PreferencesEditor, SyncService};
use trackmail::InboxViewModel;

// ============================================================================
// Scripted backend
// ============================================================================

/// In-memory stand-in for the trackmail backend.
#[derive(Default)]
struct InMemoryBackend {
    accounts: Mutex<Vec<EmailAccount>>,
    emails: Mutex<Vec<EmailWithAnalysis>>,
    preferences: Mutex<UserPreferences>,
    feedback: Mutex<Vec<(EmailId, bool)>>,
    failing_sync_accounts: Mutex<HashSet<AccountId>>,
    sync_attempts: Mutex<Vec<AccountId>>,
    feedback_posts: AtomicU32,
}

impl InMemoryBackend {
    fn with_accounts(ids: &[&str]) -> Self {
        let backend = Self::default();
        *backend.accounts.lock().unwrap() = ids.iter().map(|id| account(id)).collect();
        backend
    }

    fn fail_sync_for(&self, id: &str) {
        self.failing_sync_accounts
            .lock()
            .unwrap()
            .insert(AccountId::from(id));
    }
}

#[async_trait]
impl MailApi for InMemoryBackend {
    async fn list_accounts(&self) -> ApiResult<Vec<EmailAccount>> {
        Ok(self.accounts.lock().unwrap().clone())
    }

    async fn begin_gmail_connect(&self) -> ApiResult<ConnectTarget> {
        Ok(ConnectTarget {
            auth_url: "https://accounts.google.com/o/oauth2/auth?state=abc".to_string(),
        })
    }

    async fn disconnect_account(&self, id: &AccountId) -> ApiResult<()> {
        let mut accounts = self.accounts.lock().unwrap();
        let before = accounts.len();
        accounts.retain(|a| &a.id != id);
        if accounts.len() == before {
            return Err(ApiError::NotFound("Account not found".to_string()));
        }
        Ok(())
    }

    async fn sync_account(&self, id: &AccountId) -> ApiResult<SyncOutcome> {
        self.sync_attempts.lock().unwrap().push(id.clone());
        if self.failing_sync_accounts.lock().unwrap().contains(id) {
            return Err(ApiError::Server {
                status: 502,
                message: "upstream mailbox error".to_string(),
            });
        }
        Ok(SyncOutcome {
            synced_count: 3,
            analyzed_count: 3,
        })
    }

    async fn list_emails(&self, _query: &EmailQuery) -> ApiResult<Vec<EmailWithAnalysis>> {
        Ok(self.emails.lock().unwrap().clone())
    }

    async fn list_priority_emails(
        &self,
        threshold: u8,
        _limit: u32,
    ) -> ApiResult<Vec<EmailWithAnalysis>> {
        let emails = self.emails.lock().unwrap();
        Ok(emails
            .iter()
            .filter(|e| {
                e.analysis
                    .as_ref()
                    .map(|a| a.priority_score >= threshold)
                    .unwrap_or(false)
            })
            .cloned()
            .collect())
    }

    async fn get_email(&self, id: &EmailId) -> ApiResult<EmailWithAnalysis> {
        let emails = self.emails.lock().unwrap();
        emails
            .iter()
            .find(|e| e.id() == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound("Email not found".to_string()))
    }

    async fn get_preferences(&self) -> ApiResult<UserPreferences> {
        Ok(self.preferences.lock().unwrap().clone())
    }

    async fn update_preferences(
        &self,
        preferences: &UserPreferences,
    ) -> ApiResult<UserPreferences> {
        *self.preferences.lock().unwrap() = preferences.clone();
        Ok(preferences.clone())
    }

    async fn submit_feedback(&self, id: &EmailId, feedback: &PriorityFeedback) -> ApiResult<()> {
        self.feedback_posts.fetch_add(1, Ordering::SeqCst);
        self.feedback
            .lock()
            .unwrap()
            .push((id.clone(), feedback.is_correct));
        Ok(())
    }
}

fn account(id: &str) -> EmailAccount {
    EmailAccount {
        id: AccountId::from(id),
        email_address: format!("{}@gmail.com", id),
        last_sync_at: None,
        created_at: Utc::now(),
    }
}

fn email(id: &str, score: Option<u8>) -> EmailWithAnalysis {
    EmailWithAnalysis {
        email: Email {
            id: EmailId::from(id),
            account_id: AccountId::from("a"),
            thread_id: format!("thread-{}", id),
            sender_name: Some("Sender".to_string()),
            sender_email: "sender@example.com".to_string(),
            subject: format!("Subject {}", id),
            snippet: "Snippet".to_string(),
            body_text: None,
            received_at: Utc::now(),
            is_read: false,
            labels: Vec::new(),
        },
        analysis: score.map(|priority_score| EmailAnalysis {
            id: format!("analysis-{}", id),
            email_id: EmailId::from(id),
            priority_score,
            explanation: "explanation".to_string(),
            action_items: Vec::new(),
            urgency_factors: serde_json::Map::new(),
            analyzed_at: Utc::now(),
        }),
    }
}

// ============================================================================
// Priority classification
// ============================================================================

#[test]
fn classification_partitions_the_score_range() {
    // Every score lands in exactly one bucket, and adjacent buckets meet
    // exactly at the 20/40/60/80 boundaries.
    let mut last = classify(Some(0));
    let mut transitions = Vec::new();
    for score in 1..=100u8 {
        let bucket = classify(Some(score));
        if bucket != last {
            transitions.push(score);
            last = bucket;
        }
    }
    assert_eq!(transitions, vec![20, 40, 60, 80]);
}

#[test]
fn unanalyzed_emails_classify_as_none() {
    assert_eq!(classify(None), PriorityBucket::None);
    assert_eq!(email("x", None).priority_score(), None);
}

// ============================================================================
// Inbox view model
// ============================================================================

#[tokio::test]
async fn zero_accounts_renders_the_no_account_state() {
    let backend = Arc::new(InMemoryBackend::default());
    // Messages exist, but without accounts they must not win.
    backend.emails.lock().unwrap().push(email("1", Some(90)));

    let mut inbox = InboxViewModel::new(backend, InboxSettings::default());
    inbox.load(ViewMode::All).await;

    assert_eq!(inbox.display_state(), DisplayState::NoAccounts);
}

#[tokio::test]
async fn selection_is_idempotent() {
    let backend = Arc::new(InMemoryBackend::with_accounts(&["a"]));
    backend.emails.lock().unwrap().push(email("1", Some(50)));

    let mut inbox = InboxViewModel::new(backend, InboxSettings::default());
    inbox.load(ViewMode::All).await;

    inbox.select(EmailId::from("1"));
    let first = inbox.selection().cloned();
    inbox.select(EmailId::from("1"));

    assert_eq!(inbox.selection().cloned(), first);
}

#[tokio::test]
async fn priority_view_shows_only_high_scores() {
    let backend = Arc::new(InMemoryBackend::with_accounts(&["a"]));
    backend.emails.lock().unwrap().push(email("low", Some(30)));
    backend.emails.lock().unwrap().push(email("high", Some(75)));
    backend.emails.lock().unwrap().push(email("unscored", None));

    let mut inbox = InboxViewModel::new(backend, InboxSettings::default());
    inbox.load(ViewMode::PriorityOnly { min_score: 60 }).await;

    assert_eq!(*inbox.state(), LoadState::Ready);
    let subjects: Vec<_> = inbox
        .emails()
        .iter()
        .map(|e| e.email.subject.as_str())
        .collect();
    assert_eq!(subjects, vec!["Subject high"]);
}

// ============================================================================
// Sync orchestration
// ============================================================================

#[tokio::test]
async fn sync_all_stops_at_the_first_failing_account() {
    let backend = Arc::new(InMemoryBackend::with_accounts(&["a", "b", "c"]));
    backend.fail_sync_for("b");

    let service = SyncService::new(backend.clone());
    let accounts = backend.accounts.lock().unwrap().clone();
    let error = service.sync_all(&accounts).await.unwrap_err();

    // A succeeded, B failed, C was never attempted; the error names B.
    assert_eq!(error.account_id, AccountId::from("b"));
    let attempted: Vec<_> = backend
        .sync_attempts
        .lock()
        .unwrap()
        .iter()
        .map(|id| id.0.clone())
        .collect();
    assert_eq!(attempted, vec!["a", "b"]);
}

#[tokio::test]
async fn connect_yields_a_navigable_authorization_url() {
    let backend = Arc::new(InMemoryBackend::default());
    let service = SyncService::new(backend);

    let url = service.begin_connect().await.unwrap();
    assert_eq!(url.scheme(), "https");
    assert_eq!(url.host_str(), Some("accounts.google.com"));
}

// ============================================================================
// Preferences
// ============================================================================

#[tokio::test]
async fn domain_normalization_scenario() {
    let backend = Arc::new(InMemoryBackend::default());
    backend.preferences.lock().unwrap().vip_domains = vec!["acme.com".to_string()];

    let mut editor = PreferencesEditor::load(backend).await.unwrap();

    // Already present after normalization.
    assert!(!editor.add_domain("@ACME.com"));
    assert!(editor.add_domain("Foo.io"));
    assert_eq!(editor.domains(), ["acme.com", "foo.io"]);
}

#[tokio::test]
async fn preferences_save_round_trips() {
    let backend = Arc::new(InMemoryBackend::default());

    let mut editor = PreferencesEditor::load(backend.clone()).await.unwrap();
    editor.add_contact("a@x.com");
    editor.add_domain("x.com");
    editor.save().await.unwrap();

    // A fresh load sees exactly the saved sets.
    let reloaded = PreferencesEditor::load(backend).await.unwrap();
    let contacts: HashSet<_> = reloaded.contacts().iter().cloned().collect();
    let domains: HashSet<_> = reloaded.domains().iter().cloned().collect();
    assert_eq!(contacts, HashSet::from(["a@x.com".to_string()]));
    assert_eq!(domains, HashSet::from(["x.com".to_string()]));
}

// ============================================================================
// Feedback
// ============================================================================

#[tokio::test]
async fn feedback_is_write_once_per_view_instance() {
    let backend = Arc::new(InMemoryBackend::with_accounts(&["a"]));
    backend.emails.lock().unwrap().push(email("42", Some(70)));

    let mut inbox = InboxViewModel::new(backend.clone(), InboxSettings::default());
    inbox.load(ViewMode::All).await;
    inbox.select(EmailId::from("42"));

    assert!(inbox.give_feedback(PriorityFeedback::correct()).await);
    assert!(inbox.feedback_given());

    // The control is replaced by an acknowledgment; resubmitting is not
    // offered and nothing reaches the backend.
    assert!(!inbox.give_feedback(PriorityFeedback::incorrect()).await);
    assert_eq!(backend.feedback_posts.load(Ordering::SeqCst), 1);

    let recorded = backend.feedback.lock().unwrap().clone();
    assert_eq!(recorded, vec![(EmailId::from("42"), true)]);
}
