//! Sync orchestration.
//!
//! The [`SyncService`] drives connect, disconnect, and sync-all against the
//! backend. Syncing is strictly sequential per account: the upstream
//! provider is rate-limited per mailbox, so fan-out stays at one in-flight
//! sync and account N+1 is not issued until account N resolves.

use std::sync::Arc;

use tokio::sync::broadcast;
use url::Url;

use crate::api::{ApiError, MailApi, SyncOutcome};
use crate::domain::{AccountId, EmailAccount};
use crate::services::AccountStore;

/// The connect flow could not produce an authorization target.
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    /// The backend refused to start the flow.
    #[error("could not start the connect flow: {0}")]
    Begin(#[source] ApiError),

    /// The backend returned an unusable authorization URL.
    #[error("invalid authorization url: {0}")]
    InvalidAuthUrl(#[source] url::ParseError),
}

/// A specific account failed to sync.
///
/// Carries the failing account so the caller can surface which mailbox is
/// stuck; accounts synced before the failure keep their progress.
#[derive(Debug, thiserror::Error)]
#[error("sync failed for {account_id}: {source}")]
pub struct SyncError {
    /// The account whose sync failed.
    pub account_id: AccountId,
    /// The underlying API failure.
    #[source]
    pub source: ApiError,
}

/// Aggregate result of a completed sync-all pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncReport {
    /// Number of accounts synced.
    pub accounts_synced: usize,
    /// Total new emails pulled across accounts.
    pub emails_synced: u32,
    /// Total emails analyzed across accounts.
    pub emails_analyzed: u32,
}

impl SyncReport {
    fn absorb(&mut self, outcome: SyncOutcome) {
        self.accounts_synced += 1;
        self.emails_synced += outcome.synced_count;
        self.emails_analyzed += outcome.analyzed_count;
    }
}

/// Event emitted while a sync-all pass runs.
#[derive(Debug, Clone)]
pub enum SyncEvent {
    /// A sync-all pass started.
    Started {
        /// Number of accounts queued.
        accounts: usize,
    },
    /// One account finished syncing.
    AccountSynced {
        /// The account that synced.
        account_id: AccountId,
        /// What the sync pulled in.
        outcome: SyncOutcome,
    },
    /// The pass finished with every account synced.
    Completed(SyncReport),
    /// The pass aborted at this account.
    Failed {
        /// The account that failed.
        account_id: AccountId,
        /// Why it failed.
        error: String,
    },
}

/// Orchestrates connect, disconnect, and sync-all against the backend.
pub struct SyncService<A> {
    api: Arc<A>,
    events: broadcast::Sender<SyncEvent>,
}

impl<A: MailApi> SyncService<A> {
    /// Creates a new sync service over the given API.
    pub fn new(api: Arc<A>) -> Self {
        let (events, _) = broadcast::channel(32);
        Self { api, events }
    }

    /// Subscribes to sync events.
    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.events.subscribe()
    }

    /// Begins a Gmail connect flow and returns the authorization URL the
    /// user must be sent to.
    ///
    /// Nothing is stored locally here: the account appears only after the
    /// provider redirects back and the account list is refetched.
    pub async fn begin_connect(&self) -> Result<Url, ConnectError> {
        let target = self
            .api
            .begin_gmail_connect()
            .await
            .map_err(ConnectError::Begin)?;

        Url::parse(&target.auth_url).map_err(ConnectError::InvalidAuthUrl)
    }

    /// Disconnects an account.
    ///
    /// The caller has already taken the user through a confirmation step.
    /// The store entry is removed only after the backend confirms; on
    /// failure the store is left untouched and the error is returned.
    pub async fn disconnect(
        &self,
        store: &mut AccountStore,
        id: &AccountId,
    ) -> Result<(), ApiError> {
        self.api.disconnect_account(id).await?;
        store.remove(id);
        tracing::info!(account_id = %id, "account disconnected");
        Ok(())
    }

    /// Syncs the given accounts one at a time, in order.
    ///
    /// Aborts on the first failing account: its error is returned and the
    /// remaining accounts are not attempted. Accounts synced before the
    /// failure keep their server-side progress, visible on the next
    /// account-list refetch.
    pub async fn sync_all(&self, accounts: &[EmailAccount]) -> Result<SyncReport, SyncError> {
        let _ = self.events.send(SyncEvent::Started {
            accounts: accounts.len(),
        });

        let mut report = SyncReport::default();
        for account in accounts {
            match self.api.sync_account(&account.id).await {
                Ok(outcome) => {
                    report.absorb(outcome);
                    tracing::info!(
                        account_id = %account.id,
                        synced = outcome.synced_count,
                        analyzed = outcome.analyzed_count,
                        "account synced"
                    );
                    let _ = self.events.send(SyncEvent::AccountSynced {
                        account_id: account.id.clone(),
                        outcome,
                    });
                }
                Err(source) => {
                    let error = SyncError {
                        account_id: account.id.clone(),
                        source,
                    };
                    tracing::warn!(account_id = %error.account_id, "sync aborted: {}", error.source);
                    let _ = self.events.send(SyncEvent::Failed {
                        account_id: error.account_id.clone(),
                        error: error.source.to_string(),
                    });
                    return Err(error);
                }
            }
        }

        let _ = self.events.send(SyncEvent::Completed(report));
        Ok(report)
    }
}
