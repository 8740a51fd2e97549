//! Request and response types for team endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::invitation::Invitation;
use crate::domain::peer::Peer;
use crate::domain::taxonomy::CategoryTaxonomy;
use crate::domain::team::Team;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTeamRequest {
    pub name: String,
    pub kind: String,
}

/// Compact peer view embedded in team responses.
#[derive(Debug, Clone, Serialize)]
pub struct MemberDto {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<&Peer> for MemberDto {
    fn from(peer: &Peer) -> Self {
        Self {
            id: peer.id().to_string(),
            first_name: peer.first_name().as_str().to_string(),
            last_name: peer.last_name().as_str().to_string(),
            email: peer.email().as_str().to_string(),
        }
    }
}

/// An invitation that has not yet been accepted.
#[derive(Debug, Clone, Serialize)]
pub struct PendingMemberDto {
    pub email: String,
    pub slug: String,
    pub expires_at: String,
}

impl From<&Invitation> for PendingMemberDto {
    fn from(invitation: &Invitation) -> Self {
        Self {
            email: invitation.email().as_str().to_string(),
            slug: invitation.slug().as_str().to_string(),
            expires_at: invitation.expires_at().as_datetime().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamResponse {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub owner: MemberDto,
    pub members: Vec<MemberDto>,
    pub pending_members: Vec<PendingMemberDto>,
}

impl From<&Team> for TeamResponse {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id().to_string(),
            name: team.name().as_str().to_string(),
            kind: team.kind().as_str().to_string(),
            owner: MemberDto::from(team.owner()),
            members: team.members().iter().map(MemberDto::from).collect(),
            pending_members: team
                .pending_members()
                .iter()
                .map(PendingMemberDto::from)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryDto {
    pub name: String,
    pub description: String,
}

/// One team kind with the growth categories feedback is classified into.
#[derive(Debug, Clone, Serialize)]
pub struct TeamTypeResponse {
    pub kind: String,
    pub categories: Vec<CategoryDto>,
}

impl From<&CategoryTaxonomy> for TeamTypeResponse {
    fn from(taxonomy: &CategoryTaxonomy) -> Self {
        Self {
            kind: taxonomy.team_kind.as_str().to_string(),
            categories: taxonomy
                .categories
                .iter()
                .map(|c| CategoryDto {
                    name: c.name.clone(),
                    description: c.description.clone(),
                })
                .collect(),
        }
    }
}
