//! Mailer port - outbound transactional email.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::peer::Email;

/// Everything the invitation email template needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvitationMail {
    pub recipient: Email,
    pub inviter_name: String,
    pub team_name: String,
    /// Slug the recipient follows to accept.
    pub invite_slug: String,
}

/// Port for sending invitation emails.
///
/// Delivery is best-effort: callers log failures and continue, the inviting
/// use case never rolls back on a mail error.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_invitation(&self, mail: &InvitationMail) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn Mailer) {}
}
