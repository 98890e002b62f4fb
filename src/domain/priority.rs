//! Priority classification.
//!
//! Maps a numeric priority score to a discrete urgency bucket for display
//! grouping and coloring. The partition is total over [0, 100] plus the
//! "no analysis yet" case, with half-open intervals closed at the top.

use serde::{Deserialize, Serialize};

/// Discrete urgency tier derived from a priority score.
///
/// Ordered ascending by urgency, so comparisons like
/// `bucket >= PriorityBucket::High` read naturally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityBucket {
    /// No analysis yet; no visual emphasis.
    None,
    /// [0, 20): newsletters, promotions, automated mail.
    Minimal,
    /// [20, 40): can wait.
    Low,
    /// [40, 60): respond within a day.
    Medium,
    /// [60, 80): respond within hours.
    High,
    /// [80, 100]: needs immediate attention.
    Critical,
}

impl PriorityBucket {
    /// Returns the bucket's display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityBucket::None => "none",
            PriorityBucket::Minimal => "minimal",
            PriorityBucket::Low => "low",
            PriorityBucket::Medium => "medium",
            PriorityBucket::High => "high",
            PriorityBucket::Critical => "critical",
        }
    }

    /// Returns true for buckets the list view draws a colored accent for.
    ///
    /// Scores below 20 and unanalyzed emails render without emphasis.
    pub fn is_accented(&self) -> bool {
        *self >= PriorityBucket::Low
    }
}

/// Classifies a priority score into its urgency bucket.
///
/// Total over the score domain: every score maps to exactly one bucket and
/// an absent score always maps to [`PriorityBucket::None`].
pub fn classify(score: Option<u8>) -> PriorityBucket {
    match score {
        None => PriorityBucket::None,
        Some(s) if s >= 80 => PriorityBucket::Critical,
        Some(s) if s >= 60 => PriorityBucket::High,
        Some(s) if s >= 40 => PriorityBucket::Medium,
        Some(s) if s >= 20 => PriorityBucket::Low,
        Some(_) => PriorityBucket::Minimal,
    }
}
