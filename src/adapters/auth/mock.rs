//! Mock identity verifier for tests.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{AuthenticatedPeer, IdentityVerifier};

/// Maps known tokens to identities; anything else is rejected.
#[derive(Debug, Default)]
pub struct MockIdentityVerifier {
    tokens: RwLock<HashMap<String, AuthenticatedPeer>>,
}

impl MockIdentityVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_peer(self, token: impl Into<String>, peer: AuthenticatedPeer) -> Self {
        self.tokens
            .write()
            .expect("MockIdentityVerifier: lock poisoned")
            .insert(token.into(), peer);
        self
    }

    /// Registers a token for a subject with a matching test email.
    pub fn with_subject(self, token: impl Into<String>, subject: impl Into<String>) -> Self {
        let subject = subject.into();
        let email = format!("{}@gmail.com", subject);
        self.with_peer(
            token,
            AuthenticatedPeer {
                subject,
                email: Some(email),
            },
        )
    }
}

#[async_trait]
impl IdentityVerifier for MockIdentityVerifier {
    async fn verify(&self, token: &str) -> Result<AuthenticatedPeer, DomainError> {
        self.tokens
            .read()
            .expect("MockIdentityVerifier: lock poisoned")
            .get(token)
            .cloned()
            .ok_or_else(|| DomainError::new(ErrorCode::Unauthorized, "Invalid bearer token"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn known_token_verifies() {
        let verifier = MockIdentityVerifier::new().with_subject("token-1", "auth-1");
        let peer = verifier.verify("token-1").await.unwrap();
        assert_eq!(peer.subject, "auth-1");
        assert_eq!(peer.email.as_deref(), Some("auth-1@gmail.com"));
    }

    #[tokio::test]
    async fn unknown_token_is_rejected() {
        let verifier = MockIdentityVerifier::new();
        let err = verifier.verify("nope").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
    }
}
