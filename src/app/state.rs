//! View-state types for the inbox.

use crate::domain::{classify, EmailWithAnalysis, PriorityBucket};

/// Which slice of the inbox is being viewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Every email, newest first.
    #[default]
    All,
    /// Only emails scored at or above the threshold. Filtering is done by
    /// the backend query, not locally.
    PriorityOnly {
        /// Minimum score to include.
        min_score: u8,
    },
}

/// Load lifecycle of the inbox view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    /// A load is in flight and nothing is ready to show.
    #[default]
    Loading,
    /// Accounts and emails both arrived.
    Ready,
    /// A fetch failed; carries the failure's message verbatim.
    Error(String),
}

/// What the presentation layer should render, in precedence order.
///
/// The zero-account state is terminal for the view and outranks the
/// empty-message state: with no accounts connected there is nothing to
/// sync, whatever the message query returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
    /// Show a loading indicator.
    Loading,
    /// Show the load error.
    Error,
    /// Show the "no accounts connected" call to action.
    NoAccounts,
    /// Accounts exist but the list is empty.
    NoMessages,
    /// Show the message list.
    Messages,
}

/// One classified row of the inbox list.
#[derive(Debug, Clone, Copy)]
pub struct InboxEntry<'a> {
    /// The underlying email and analysis.
    pub email: &'a EmailWithAnalysis,
    /// Urgency bucket for grouping and coloring.
    pub bucket: PriorityBucket,
    /// Unread emails render with stronger emphasis.
    pub unread: bool,
    /// Whether this row is open in the detail view.
    pub selected: bool,
}

impl<'a> InboxEntry<'a> {
    /// Builds the row for one email.
    pub fn for_email(email: &'a EmailWithAnalysis, selected: bool) -> Self {
        Self {
            email,
            bucket: classify(email.priority_score()),
            unread: !email.email.is_read,
            selected,
        }
    }
}
