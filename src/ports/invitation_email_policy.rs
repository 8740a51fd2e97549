//! InvitationEmailPolicy port - which addresses may be invited.

use crate::domain::foundation::DomainError;
use crate::domain::peer::Email;

/// Policy deciding whether an email address may receive an invitation.
///
/// Checked before any invitation row is written. Pure and synchronous; the
/// production policy only consults the address itself.
pub trait InvitationEmailPolicy: Send + Sync {
    /// Ok when the address is allowed, a business-rule error otherwise.
    fn check(&self, email: &Email) -> Result<(), DomainError>;
}
