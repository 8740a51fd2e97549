//! Route configuration for peer endpoints.

use axum::routing::{get, put};
use axum::Router;

use super::super::state::AppState;
use super::handlers::{get_profile, save_profile};

/// Routes:
/// - `PUT /peers/me` - create or update the caller's profile
/// - `GET /peers/me` - fetch the caller's profile
pub fn peer_router() -> Router<AppState> {
    Router::new()
        .route("/peers/me", put(save_profile))
        .route("/peers/me", get(get_profile))
}
