//! HTTP surface: routers, handlers, DTOs, middleware.

pub mod error;
pub mod feedback;
pub mod invitation;
pub mod middleware;
pub mod peer;
pub mod state;
pub mod team;

use std::sync::Arc;

use axum::Router;

use crate::ports::IdentityVerifier;

pub use error::ApiError;
pub use state::AppState;

/// Builds the full API router with bearer-token auth applied to every route.
///
/// The auth middleware attaches the verified caller to request extensions;
/// routes that require a caller use the `RequireAuth` extractor, the rest
/// (invitation lookup by slug) serve anonymous requests too.
pub fn api_router(state: AppState, verifier: Arc<dyn IdentityVerifier>) -> Router {
    Router::new()
        .merge(peer::peer_router())
        .merge(team::team_router())
        .merge(invitation::invitation_router())
        .merge(feedback::feedback_router())
        .layer(axum::middleware::from_fn_with_state(
            verifier,
            middleware::auth_middleware,
        ))
        .with_state(state)
}
