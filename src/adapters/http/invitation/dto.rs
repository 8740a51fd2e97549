//! Request and response types for invitation endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::invitation::Invitation;

use super::super::team::dto::TeamResponse;

#[derive(Debug, Clone, Deserialize)]
pub struct SendInvitationRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvitationResponse {
    pub id: String,
    pub email: String,
    pub slug: String,
    pub team_name: String,
    pub inviter_name: String,
    pub created_at: String,
    pub expires_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted_at: Option<String>,
}

impl From<&Invitation> for InvitationResponse {
    fn from(invitation: &Invitation) -> Self {
        Self {
            id: invitation.id().to_string(),
            email: invitation.email().as_str().to_string(),
            slug: invitation.slug().as_str().to_string(),
            team_name: invitation.team_name().as_str().to_string(),
            inviter_name: invitation.inviter_name().as_str().to_string(),
            created_at: invitation.created_at().as_datetime().to_rfc3339(),
            expires_at: invitation.expires_at().as_datetime().to_rfc3339(),
            accepted_at: invitation
                .accepted_at()
                .map(|t| t.as_datetime().to_rfc3339()),
        }
    }
}

/// Response for a successful acceptance: the invitation plus the team joined.
#[derive(Debug, Clone, Serialize)]
pub struct AcceptInvitationResponse {
    pub invitation: InvitationResponse,
    pub team: TeamResponse,
}
