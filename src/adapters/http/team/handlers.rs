//! HTTP handlers for team endpoints.

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::team::{CreateTeamCommand, GetMyTeamQuery, ListMyTeamsQuery};

use super::super::error::ApiError;
use super::super::middleware::RequireAuth;
use super::super::peer::dto::TeamLinkDto;
use super::super::state::AppState;
use super::dto::{CreateTeamRequest, TeamResponse, TeamTypeResponse};

/// POST /peers/me/own-team - create the caller's own team.
pub async fn create_team(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Json(request): Json<CreateTeamRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.create_team_handler();
    let result = handler
        .handle(CreateTeamCommand {
            subject: caller.subject,
            team_name: request.name,
            team_kind: request.kind,
        })
        .await
        .map_err(ApiError::of)?;

    Ok((StatusCode::CREATED, Json(TeamResponse::from(&result.team))))
}

/// GET /peers/me/own-team - the team the caller owns.
pub async fn get_my_team(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.get_my_team_handler();
    let team = handler
        .handle(GetMyTeamQuery {
            subject: caller.subject,
        })
        .await?;

    Ok((StatusCode::OK, Json(TeamResponse::from(&team))))
}

/// GET /me/teams - every team the caller belongs to, own team first.
pub async fn list_my_teams(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.list_my_teams_handler();
    let links = handler
        .handle(ListMyTeamsQuery {
            subject: caller.subject,
        })
        .await?;

    let body: Vec<TeamLinkDto> = links.iter().map(TeamLinkDto::from).collect();
    Ok((StatusCode::OK, Json(body)))
}

/// GET /teamtypes - the team kinds and their growth categories.
pub async fn list_team_types(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.list_team_types_handler();
    let taxonomies = handler.handle().await?;

    let body: Vec<TeamTypeResponse> = taxonomies.iter().map(TeamTypeResponse::from).collect();
    Ok((StatusCode::OK, Json(body)))
}
