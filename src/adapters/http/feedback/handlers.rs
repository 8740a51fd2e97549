//! HTTP handlers for feedback endpoints.

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;

use crate::application::handlers::feedback::{GetTeamFeedbackQuery, GiveFeedbackCommand};
use crate::domain::foundation::TeamId;

use super::super::error::ApiError;
use super::super::middleware::RequireAuth;
use super::super::state::AppState;
use super::dto::{FeedbackResponse, GiveFeedbackRequest, TeamFeedbackResponse};

#[derive(Debug, Deserialize)]
pub struct TeamFeedbackParams {
    pub limit: Option<u32>,
}

/// POST /feedback - give feedback to a teammate.
pub async fn give_feedback(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Json(request): Json<GiveFeedbackRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.give_feedback_handler();
    let result = handler
        .handle(GiveFeedbackCommand {
            subject: caller.subject,
            to_peer_id: request.to_peer_id,
            message: request.message,
        })
        .await
        .map_err(ApiError::of)?;

    Ok((
        StatusCode::CREATED,
        Json(FeedbackResponse::from(&result.feedback)),
    ))
}

/// GET /feedback/teams/:team_id - recent feedback for a team, newest first.
pub async fn get_team_feedback(
    State(state): State<AppState>,
    RequireAuth(_caller): RequireAuth,
    Path(team_id): Path<TeamId>,
    Query(params): Query<TeamFeedbackParams>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.get_team_feedback_handler();
    let entries = handler
        .handle(GetTeamFeedbackQuery {
            team_id,
            limit: params.limit,
        })
        .await?;

    let body: Vec<TeamFeedbackResponse> = entries.iter().map(TeamFeedbackResponse::from).collect();
    Ok((StatusCode::OK, Json(body)))
}
