//! Authentication configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Authentication configuration (Firebase ID tokens)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Firebase project id; doubles as the expected token audience
    pub firebase_project_id: String,

    /// JWKS cache TTL in seconds
    #[serde(default = "default_jwks_cache_ttl")]
    pub jwks_cache_ttl_secs: u64,
}

impl AuthConfig {
    /// Get JWKS cache TTL as Duration
    pub fn jwks_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.jwks_cache_ttl_secs)
    }

    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.firebase_project_id.is_empty() {
            return Err(ValidationError::MissingRequired("FIREBASE_PROJECT_ID"));
        }
        Ok(())
    }
}

fn default_jwks_cache_ttl() -> u64 {
    3600
}
