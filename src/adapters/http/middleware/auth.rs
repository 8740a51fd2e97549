//! Bearer token middleware and the `RequireAuth` extractor.
//!
//! The middleware verifies the Authorization header through the
//! `IdentityVerifier` port and stores the resulting identity in request
//! extensions. Handlers opt in to authentication with `RequireAuth`;
//! requests without a valid identity are rejected there with 401.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use tracing::debug;

use crate::ports::{AuthenticatedPeer, IdentityVerifier};

pub type AuthState = Arc<dyn IdentityVerifier>;

/// Verifies the Bearer token when one is present.
///
/// A missing header passes through untouched; `RequireAuth` rejects later.
/// An invalid token fails fast with 401.
pub async fn auth_middleware(
    State(verifier): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    match token {
        Some(token) => match verifier.verify(token).await {
            Ok(peer) => {
                request.extensions_mut().insert(peer);
                next.run(request).await
            }
            Err(e) => {
                debug!(error = %e, "bearer token rejected");
                (
                    StatusCode::UNAUTHORIZED,
                    Json(serde_json::json!({
                        "code": "UNAUTHORIZED",
                        "message": "Invalid bearer token"
                    })),
                )
                    .into_response()
            }
        },
        None => next.run(request).await,
    }
}

/// Extractor for handlers that require a verified caller.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedPeer);

impl<S> axum::extract::FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<AuthenticatedPeer>()
                .cloned()
                .map(RequireAuth)
                .ok_or(AuthRejection::Unauthenticated)
        })
    }
}

#[derive(Debug, Clone)]
pub enum AuthRejection {
    Unauthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({
                "code": "UNAUTHORIZED",
                "message": "Authentication required"
            })),
        )
            .into_response()
    }
}
