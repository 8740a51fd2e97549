//! FeedbackClassifier port - external text classification collaborator.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;

/// Result of classifying one message against a set of candidate labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub category: String,
    pub confidence_score: f64,
}

/// Port for the external classification service.
#[async_trait]
pub trait FeedbackClassifier: Send + Sync {
    /// Classifies `text` into one of `labels`.
    ///
    /// `labels` is never empty; callers skip classification entirely when no
    /// taxonomy applies.
    async fn classify(&self, text: &str, labels: &[String])
        -> Result<Classification, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn FeedbackClassifier) {}
}
