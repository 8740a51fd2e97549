//! Route configuration for feedback endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::super::state::AppState;
use super::handlers::{get_team_feedback, give_feedback};

/// Routes:
/// - `POST /feedback` - give feedback to a teammate
/// - `GET /feedback/teams/:team_id` - recent feedback for a team
pub fn feedback_router() -> Router<AppState> {
    Router::new()
        .route("/feedback", post(give_feedback))
        .route("/feedback/teams/:team_id", get(get_team_feedback))
}
