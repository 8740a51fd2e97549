//! Route configuration for invitation endpoints.

use axum::routing::{get, post, put};
use axum::Router;

use super::super::state::AppState;
use super::handlers::{accept_invitation, get_invitation, send_invitation};

/// Routes:
/// - `POST /invitations` - invite an address to the caller's own team
/// - `GET /invitations/:slug` - look up an invitation by slug
/// - `PUT /invitations/:slug/accept` - accept an invitation
pub fn invitation_router() -> Router<AppState> {
    Router::new()
        .route("/invitations", post(send_invitation))
        .route("/invitations/:slug", get(get_invitation))
        .route("/invitations/:slug/accept", put(accept_invitation))
}
