//! User preference and feedback wire types.
//!
//! Preferences hold the VIP contacts and domains the analyzer weighs when
//! scoring. The server copy is the source of truth; edits happen in a local
//! buffer (see the preferences service) and are persisted wholesale.

use serde::{Deserialize, Serialize};

/// VIP contact and domain preferences.
///
/// Contacts are kept with the case the user entered; domains are stored
/// lower-cased without a leading `@`. Neither list contains duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Sender addresses flagged for elevated priority weighting.
    #[serde(default)]
    pub vip_contacts: Vec<String>,
    /// Sender domains flagged for elevated priority weighting.
    #[serde(default)]
    pub vip_domains: Vec<String>,
}

impl UserPreferences {
    /// Returns true when both lists are empty.
    pub fn is_empty(&self) -> bool {
        self.vip_contacts.is_empty() && self.vip_domains.is_empty()
    }
}

/// Normalizes a domain as entered by the user: strips a single leading `@`
/// and lower-cases the remainder.
pub fn normalize_domain(input: &str) -> String {
    input.strip_prefix('@').unwrap_or(input).to_lowercase()
}

/// A user's judgement on one email's priority analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriorityFeedback {
    /// Whether the analysis was judged correct.
    pub is_correct: bool,
    /// The priority the user believes is right, when supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_priority: Option<u8>,
}

impl PriorityFeedback {
    /// Feedback confirming the analysis.
    pub fn correct() -> Self {
        Self {
            is_correct: true,
            actual_priority: None,
        }
    }

    /// Feedback rejecting the analysis.
    pub fn incorrect() -> Self {
        Self {
            is_correct: false,
            actual_priority: None,
        }
    }

    /// Feedback rejecting the analysis with a corrected score, clamped to
    /// the valid [0, 100] range.
    pub fn incorrect_with_score(score: u8) -> Self {
        Self {
            is_correct: false,
            actual_priority: Some(score.min(100)),
        }
    }
}
