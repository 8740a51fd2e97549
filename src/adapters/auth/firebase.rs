//! Firebase ID token verification.
//!
//! Implements the `IdentityVerifier` port against Firebase Authentication.
//! Tokens are RS256 JWTs signed by Google; the signing keys are fetched from
//! Google's JWKS endpoint and cached, and issuer, audience and expiry are
//! validated against the configured project.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::{decode, decode_header, jwk::JwkSet, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{AuthenticatedPeer, IdentityVerifier};

const GOOGLE_JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";

#[derive(Debug, Clone)]
pub struct FirebaseConfig {
    /// Firebase project id; doubles as the expected audience.
    pub project_id: String,
    /// How long fetched signing keys stay cached. Defaults to 1 hour.
    pub jwks_cache_duration: Option<Duration>,
}

impl FirebaseConfig {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            jwks_cache_duration: None,
        }
    }

    pub fn with_cache_duration(mut self, duration: Duration) -> Self {
        self.jwks_cache_duration = Some(duration);
        self
    }

    fn issuer(&self) -> String {
        format!("https://securetoken.google.com/{}", self.project_id)
    }
}

#[derive(Debug, Deserialize)]
struct FirebaseClaims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
}

struct JwksCache {
    jwks: JwkSet,
    fetched_at: Instant,
    cache_duration: Duration,
}

impl JwksCache {
    fn new(jwks: JwkSet, cache_duration: Duration) -> Self {
        Self {
            jwks,
            fetched_at: Instant::now(),
            cache_duration,
        }
    }

    fn is_expired(&self) -> bool {
        self.fetched_at.elapsed() > self.cache_duration
    }
}

pub struct FirebaseIdentityVerifier {
    config: FirebaseConfig,
    http_client: reqwest::Client,
    jwks_cache: Arc<RwLock<Option<JwksCache>>>,
}

impl FirebaseIdentityVerifier {
    /// Keys are fetched lazily on first verification, not at construction.
    pub fn new(config: FirebaseConfig) -> Result<Self, DomainError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::InternalError,
                    format!("Failed to create HTTP client: {}", e),
                )
            })?;

        Ok(Self {
            config,
            http_client,
            jwks_cache: Arc::new(RwLock::new(None)),
        })
    }

    async fn fetch_jwks(&self) -> Result<JwkSet, DomainError> {
        debug!("fetching Google signing keys");
        let response = self
            .http_client
            .get(GOOGLE_JWKS_URL)
            .send()
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::Unauthorized,
                    format!("Failed to fetch signing keys: {}", e),
                )
            })?;

        if !response.status().is_success() {
            return Err(DomainError::new(
                ErrorCode::Unauthorized,
                format!("Signing key endpoint returned {}", response.status()),
            ));
        }

        response.json().await.map_err(|e| {
            DomainError::new(
                ErrorCode::Unauthorized,
                format!("Failed to parse signing keys: {}", e),
            )
        })
    }

    async fn get_jwks(&self) -> Result<JwkSet, DomainError> {
        {
            let cache = self.jwks_cache.read().await;
            if let Some(ref cached) = *cache {
                if !cached.is_expired() {
                    return Ok(cached.jwks.clone());
                }
            }
        }

        let jwks = self.fetch_jwks().await?;

        {
            let mut cache = self.jwks_cache.write().await;
            let duration = self
                .config
                .jwks_cache_duration
                .unwrap_or(Duration::from_secs(3600));
            *cache = Some(JwksCache::new(jwks.clone(), duration));
        }

        Ok(jwks)
    }

    fn invalid_token(reason: &str) -> DomainError {
        warn!(reason, "rejected bearer token");
        DomainError::new(ErrorCode::Unauthorized, "Invalid bearer token")
    }
}

#[async_trait]
impl IdentityVerifier for FirebaseIdentityVerifier {
    async fn verify(&self, token: &str) -> Result<AuthenticatedPeer, DomainError> {
        let header =
            decode_header(token).map_err(|_| Self::invalid_token("undecodable header"))?;
        let kid = header
            .kid
            .ok_or_else(|| Self::invalid_token("missing kid"))?;

        let jwks = self.get_jwks().await?;
        let jwk = jwks
            .find(&kid)
            .ok_or_else(|| Self::invalid_token("unknown signing key"))?;
        let decoding_key =
            DecodingKey::from_jwk(jwk).map_err(|_| Self::invalid_token("bad signing key"))?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[self.config.issuer()]);
        validation.set_audience(&[&self.config.project_id]);
        validation.set_required_spec_claims(&["exp", "iss", "sub", "aud"]);

        let token_data = decode::<FirebaseClaims>(token, &decoding_key, &validation)
            .map_err(|e| Self::invalid_token(&e.to_string()))?;

        Ok(AuthenticatedPeer {
            subject: token_data.claims.sub,
            email: token_data.claims.email,
        })
    }
}

impl std::fmt::Debug for FirebaseIdentityVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirebaseIdentityVerifier")
            .field("project_id", &self.config.project_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builds_issuer_from_project_id() {
        let config = FirebaseConfig::new("honesthive-prod");
        assert_eq!(
            config.issuer(),
            "https://securetoken.google.com/honesthive-prod"
        );
    }

    #[test]
    fn config_with_custom_cache_duration() {
        let config =
            FirebaseConfig::new("honesthive-prod").with_cache_duration(Duration::from_secs(300));
        assert_eq!(config.jwks_cache_duration, Some(Duration::from_secs(300)));
    }

    #[test]
    fn jwks_cache_expires_after_duration() {
        let jwks = JwkSet { keys: vec![] };
        let cache = JwksCache::new(jwks, Duration::from_millis(1));
        std::thread::sleep(Duration::from_millis(10));
        assert!(cache.is_expired());
    }

    #[test]
    fn verifier_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FirebaseIdentityVerifier>();
    }
}
