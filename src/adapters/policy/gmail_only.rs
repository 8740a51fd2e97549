//! Gmail-only invitation policy.

use crate::domain::foundation::DomainError;
use crate::domain::peer::Email;
use crate::ports::InvitationEmailPolicy;

/// Only Gmail addresses may be invited. The check is case-insensitive on the
/// domain and runs before any invitation is written or sent.
#[derive(Debug, Clone, Copy, Default)]
pub struct GmailOnlyEmailPolicy;

impl GmailOnlyEmailPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl InvitationEmailPolicy for GmailOnlyEmailPolicy {
    fn check(&self, email: &Email) -> Result<(), DomainError> {
        if email.domain().eq_ignore_ascii_case("gmail.com") {
            Ok(())
        } else {
            Err(
                DomainError::business_rule("Only Gmail addresses can be invited")
                    .with_detail("domain", email.domain()),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_gmail_addresses() {
        let policy = GmailOnlyEmailPolicy::new();
        assert!(policy.check(&Email::new("ben@gmail.com").unwrap()).is_ok());
        assert!(policy.check(&Email::new("ben@GMAIL.com").unwrap()).is_ok());
    }

    #[test]
    fn rejects_other_domains() {
        let policy = GmailOnlyEmailPolicy::new();
        let err = policy
            .check(&Email::new("ben@outlook.com").unwrap())
            .unwrap_err();
        assert!(err.message.contains("Gmail"));
    }
}
