//! FeedbackRepository port.

use async_trait::async_trait;

use crate::domain::feedback::Feedback;
use crate::domain::foundation::{DomainError, FeedbackId};

/// Port for feedback persistence.
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// Inserts or updates the feedback entry and returns the stored state.
    async fn save(&self, feedback: &Feedback) -> Result<Feedback, DomainError>;

    async fn find_by_id(&self, id: FeedbackId) -> Result<Option<Feedback>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn FeedbackRepository) {}
}
