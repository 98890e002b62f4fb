//! Service layer for the trackmail client.
//!
//! Services sit between the backend API and the view model: the account
//! store, sync orchestration, the preferences edit buffer, and the
//! best-effort feedback recorder.

mod account_store;
mod feedback_service;
mod preferences_service;
mod sync_service;

pub use account_store::{AccountStore, AccountUpdate};
pub use feedback_service::FeedbackRecorder;
pub use preferences_service::{PreferencesEditor, PreferencesError, SaveError};
pub use sync_service::{ConnectError, SyncError, SyncEvent, SyncReport, SyncService};
