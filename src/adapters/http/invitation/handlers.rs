//! HTTP handlers for invitation endpoints.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::invitation::{
    AcceptInvitationCommand, GetInvitationQuery, SendInvitationCommand,
};

use super::super::error::ApiError;
use super::super::middleware::RequireAuth;
use super::super::state::AppState;
use super::super::team::dto::TeamResponse;
use super::dto::{AcceptInvitationResponse, InvitationResponse, SendInvitationRequest};

/// POST /invitations - invite an address to the caller's own team.
pub async fn send_invitation(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Json(request): Json<SendInvitationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.send_invitation_handler();
    let result = handler
        .handle(SendInvitationCommand {
            subject: caller.subject,
            email: request.email,
        })
        .await
        .map_err(ApiError::of)?;

    Ok((
        StatusCode::CREATED,
        Json(InvitationResponse::from(&result.invitation)),
    ))
}

/// GET /invitations/:slug - look up an invitation by its slug.
///
/// Unauthenticated on purpose; the invitee follows the link before they
/// have an account.
pub async fn get_invitation(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.get_invitation_handler();
    let invitation = handler.handle(GetInvitationQuery { slug }).await?;

    Ok((StatusCode::OK, Json(InvitationResponse::from(&invitation))))
}

/// PUT /invitations/:slug/accept - accept an invitation as the caller.
pub async fn accept_invitation(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.accept_invitation_handler();
    let result = handler
        .handle(AcceptInvitationCommand {
            subject: caller.subject,
            slug,
        })
        .await
        .map_err(ApiError::of)?;

    Ok((
        StatusCode::OK,
        Json(AcceptInvitationResponse {
            invitation: InvitationResponse::from(&result.invitation),
            team: TeamResponse::from(&result.team),
        }),
    ))
}
