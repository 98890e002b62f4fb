//! Domain types for the trackmail client.
//!
//! These types mirror the records the backend serves: connected accounts,
//! emails with their optional AI analysis, user preferences, and the
//! priority classification applied for display.

mod account;
mod email;
mod preferences;
mod priority;
mod types;

pub use account::EmailAccount;
pub use email::{Email, EmailAnalysis, EmailWithAnalysis};
pub use preferences::{normalize_domain, PriorityFeedback, UserPreferences};
pub use priority::{classify, PriorityBucket};
pub use types::{AccountId, EmailId};
