//! The inbox view model.
//!
//! Owns the account store, the ranked message list, and the selection
//! slot for one view instance, and drives loads, syncs, and feedback
//! against the backend. All state transitions are synchronous; the model
//! suspends only at API calls.

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::api::{ApiError, EmailQuery, MailApi};
use crate::config::InboxSettings;
use crate::domain::{AccountId, EmailAccount, EmailId, EmailWithAnalysis, PriorityFeedback};
use crate::services::{
    AccountStore, FeedbackRecorder, SyncError, SyncEvent, SyncReport, SyncService,
};

use super::state::{DisplayState, InboxEntry, LoadState, ViewMode};

/// View model for the ranked inbox.
///
/// One instance backs one view. The account store and message list are
/// owned here exclusively; the presentation layer reads snapshots and
/// issues the command methods.
pub struct InboxViewModel<A> {
    api: Arc<A>,
    sync: SyncService<A>,
    feedback: FeedbackRecorder<A>,
    settings: InboxSettings,
    accounts: AccountStore,
    emails: Vec<EmailWithAnalysis>,
    state: LoadState,
    view_mode: ViewMode,
    selection: Option<EmailId>,
    /// Non-fatal sync failure shown alongside the (retained) list.
    sync_notice: Option<String>,
    /// Monotonically increasing load generation; only the newest load may
    /// commit its result, so a stale in-flight fetch cannot clobber state.
    generation: u64,
}

impl<A: MailApi> InboxViewModel<A> {
    /// Creates a view model over the given API.
    pub fn new(api: Arc<A>, settings: InboxSettings) -> Self {
        Self {
            sync: SyncService::new(Arc::clone(&api)),
            feedback: FeedbackRecorder::new(Arc::clone(&api)),
            api,
            settings,
            accounts: AccountStore::new(),
            emails: Vec::new(),
            state: LoadState::Loading,
            view_mode: ViewMode::default(),
            selection: None,
            sync_notice: None,
            generation: 0,
        }
    }

    /// Loads accounts and emails for the given view mode.
    ///
    /// The two fetches run concurrently with no mutual ordering; the view
    /// becomes `Ready` only when both arrive, or `Error` with the first
    /// failure's message.
    pub async fn load(&mut self, mode: ViewMode) {
        self.view_mode = mode;
        self.generation += 1;
        let generation = self.generation;
        self.state = LoadState::Loading;

        let api = Arc::clone(&self.api);
        let result = Self::fetch(api.as_ref(), &self.settings, mode).await;
        self.finish_load(generation, result);
    }

    /// Re-runs the last load. Used after sync, feedback, and disconnect.
    pub async fn refresh(&mut self) {
        self.load(self.view_mode).await;
    }

    async fn fetch(
        api: &A,
        settings: &InboxSettings,
        mode: ViewMode,
    ) -> Result<(Vec<EmailAccount>, Vec<EmailWithAnalysis>), ApiError> {
        let accounts = api.list_accounts();
        let emails = async {
            match mode {
                ViewMode::All => {
                    api.list_emails(&EmailQuery::with_limit(settings.fetch_limit))
                        .await
                }
                ViewMode::PriorityOnly { min_score } => {
                    api.list_priority_emails(min_score, settings.priority_fetch_limit)
                        .await
                }
            }
        };

        futures::try_join!(accounts, emails)
    }

    /// Commits a load result unless a newer load has started since.
    fn finish_load(
        &mut self,
        generation: u64,
        result: Result<(Vec<EmailAccount>, Vec<EmailWithAnalysis>), ApiError>,
    ) {
        if generation != self.generation {
            tracing::debug!(generation, "discarding superseded load result");
            return;
        }

        match result {
            Ok((accounts, emails)) => {
                self.accounts.replace_all(accounts);
                self.emails = emails;
                self.state = LoadState::Ready;
            }
            Err(e) => {
                self.state = LoadState::Error(e.to_string());
            }
        }
    }

    /// Syncs every connected account sequentially, then refetches.
    ///
    /// A failure is surfaced as a non-fatal notice next to the retained
    /// list; accounts synced before the failure keep their progress.
    pub async fn sync_all(&mut self) -> Result<SyncReport, SyncError> {
        if self.accounts.is_empty() {
            return Ok(SyncReport::default());
        }

        let accounts = self.accounts.list().to_vec();
        match self.sync.sync_all(&accounts).await {
            Ok(report) => {
                self.sync_notice = None;
                self.refresh().await;
                Ok(report)
            }
            Err(e) => {
                self.sync_notice = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Begins the Gmail connect flow; see [`SyncService::begin_connect`].
    pub async fn begin_connect(&self) -> Result<url::Url, crate::services::ConnectError> {
        self.sync.begin_connect().await
    }

    /// Disconnects an account (the caller has confirmed) and refetches on
    /// success. On failure the local state is untouched.
    pub async fn disconnect_account(&mut self, id: &AccountId) -> Result<(), ApiError> {
        self.sync.disconnect(&mut self.accounts, id).await?;
        self.refresh().await;
        Ok(())
    }

    /// Opens an email in the detail view.
    ///
    /// Selecting the already-open email is a no-op; anything else starts a
    /// fresh detail-view instance (feedback is offered anew). Ids not in
    /// the current list are ignored.
    pub fn select(&mut self, id: EmailId) {
        if self.selection.as_ref() == Some(&id) {
            return;
        }
        if !self.emails.iter().any(|e| e.id() == &id) {
            return;
        }
        self.selection = Some(id);
        self.feedback.reset();
    }

    /// Closes the detail view.
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Submits feedback for the open email and refetches on success.
    ///
    /// Returns true when the judgement was accepted. Without a selection,
    /// or once feedback was already given in this view instance, this is a
    /// no-op returning false. Failures are logged and swallowed; the
    /// control stays available.
    pub async fn give_feedback(&mut self, feedback: PriorityFeedback) -> bool {
        let Some(id) = self.selection.clone() else {
            return false;
        };

        let accepted = self.feedback.submit(&id, feedback).await;
        if accepted {
            self.refresh().await;
        }
        accepted
    }

    /// Returns true once feedback for the open email has been accepted.
    pub fn feedback_given(&self) -> bool {
        self.selection
            .as_ref()
            .map(|id| self.feedback.is_given(id))
            .unwrap_or(false)
    }

    /// What the presentation layer should render right now.
    pub fn display_state(&self) -> DisplayState {
        match &self.state {
            LoadState::Loading => DisplayState::Loading,
            LoadState::Error(_) => DisplayState::Error,
            LoadState::Ready if self.accounts.is_empty() => DisplayState::NoAccounts,
            LoadState::Ready if self.emails.is_empty() => DisplayState::NoMessages,
            LoadState::Ready => DisplayState::Messages,
        }
    }

    /// The load state, including any fetch error message.
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// The fetch error message, if the view is in the error state.
    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            LoadState::Error(message) => Some(message),
            _ => None,
        }
    }

    /// The last sync failure, if it has not been superseded.
    pub fn sync_notice(&self) -> Option<&str> {
        self.sync_notice.as_deref()
    }

    /// The connected accounts.
    pub fn accounts(&self) -> &AccountStore {
        &self.accounts
    }

    /// The fetched emails, in server (newest-first) order.
    pub fn emails(&self) -> &[EmailWithAnalysis] {
        &self.emails
    }

    /// Classified rows for the list view.
    pub fn entries(&self) -> Vec<InboxEntry<'_>> {
        self.emails
            .iter()
            .map(|email| {
                let selected = self.selection.as_ref() == Some(email.id());
                InboxEntry::for_email(email, selected)
            })
            .collect()
    }

    /// The id of the open email, if any.
    pub fn selection(&self) -> Option<&EmailId> {
        self.selection.as_ref()
    }

    /// The open email, if it is still in the list.
    pub fn selected_email(&self) -> Option<&EmailWithAnalysis> {
        let id = self.selection.as_ref()?;
        self.emails.iter().find(|e| e.id() == id)
    }

    /// The current view mode.
    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Subscribes to sync progress events.
    pub fn sync_events(&self) -> broadcast::Receiver<SyncEvent> {
        self.sync.subscribe()
    }
}
