//! Route configuration for team endpoints.

use axum::routing::get;
use axum::Router;

use super::super::state::AppState;
use super::handlers::{create_team, get_my_team, list_my_teams, list_team_types};

/// Routes:
/// - `POST /peers/me/own-team` - create the caller's own team
/// - `GET /peers/me/own-team` - fetch the caller's own team
/// - `GET /me/teams` - list every team the caller belongs to
/// - `GET /teamtypes` - list team kinds with their growth categories
pub fn team_router() -> Router<AppState> {
    Router::new()
        .route("/peers/me/own-team", get(get_my_team).post(create_team))
        .route("/me/teams", get(list_my_teams))
        .route("/teamtypes", get(list_team_types))
}
