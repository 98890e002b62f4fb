//! Priority-feedback recording.
//!
//! Records a user's correctness judgement on one email's analysis, at most
//! once per detail-view instance. Feedback is best-effort: a failed submit
//! is logged and swallowed, and the control stays available for retry.

use std::collections::HashSet;
use std::sync::Arc;

use crate::api::MailApi;
use crate::domain::{EmailId, PriorityFeedback};

/// Records analysis feedback for the lifetime of one detail view.
///
/// The feedback-given state is deliberately view-scoped, not persisted:
/// re-opening the same email in a fresh view re-offers the control.
pub struct FeedbackRecorder<A> {
    api: Arc<A>,
    given: HashSet<EmailId>,
}

impl<A: MailApi> FeedbackRecorder<A> {
    /// Creates a recorder for a new detail-view instance.
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            given: HashSet::new(),
        }
    }

    /// Returns true once feedback for this email has been accepted, in
    /// which case the control is replaced by an acknowledgment.
    pub fn is_given(&self, id: &EmailId) -> bool {
        self.given.contains(id)
    }

    /// Submits a judgement for one email.
    ///
    /// Returns true when the backend accepted it. A duplicate submit in
    /// the same view instance is a no-op returning false. Failures are
    /// logged and swallowed; the judgement is not recorded locally so the
    /// control remains available.
    pub async fn submit(&mut self, id: &EmailId, feedback: PriorityFeedback) -> bool {
        if self.given.contains(id) {
            return false;
        }

        match self.api.submit_feedback(id, &feedback).await {
            Ok(()) => {
                self.given.insert(id.clone());
                true
            }
            Err(e) => {
                tracing::warn!(email_id = %id, "failed to submit feedback: {}", e);
                false
            }
        }
    }

    /// Forgets all recorded judgements, starting a fresh view instance.
    pub fn reset(&mut self) {
        self.given.clear();
    }
}
