//! IdentityVerifier port - bearer credential verification.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;

/// Identity attached to a request after verifying its bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedPeer {
    /// Stable external subject; the key peers are stored under.
    pub subject: String,
    /// Email claimed by the identity provider, when present.
    pub email: Option<String>,
}

/// Port for verifying bearer credentials.
///
/// Verification failures map to 401 at the HTTP boundary.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<AuthenticatedPeer, DomainError>;
}
