//! HTTP handlers for peer endpoints.

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::peer::{GetProfileQuery, SaveProfileCommand};

use super::super::error::ApiError;
use super::super::middleware::RequireAuth;
use super::super::state::AppState;
use super::dto::{PeerResponse, SaveProfileRequest};

/// PUT /peers/me - create or update the caller's profile.
pub async fn save_profile(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Json(request): Json<SaveProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.save_profile_handler();
    let peer = handler
        .handle(SaveProfileCommand {
            subject: caller.subject,
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            profile_url: request.profile_url,
        })
        .await
        .map_err(ApiError::of)?;

    Ok((StatusCode::OK, Json(PeerResponse::from(&peer))))
}

/// GET /peers/me - the caller's profile.
pub async fn get_profile(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.get_profile_handler();
    let peer = handler
        .handle(GetProfileQuery {
            subject: caller.subject,
        })
        .await?;

    Ok((StatusCode::OK, Json(PeerResponse::from(&peer))))
}
