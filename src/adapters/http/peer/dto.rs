//! Request and response types for peer endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::peer::{Peer, TeamLink};

#[derive(Debug, Clone, Deserialize)]
pub struct SaveProfileRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub profile_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamLinkDto {
    pub id: String,
    pub name: String,
    pub kind: String,
}

impl From<&TeamLink> for TeamLinkDto {
    fn from(link: &TeamLink) -> Self {
        Self {
            id: link.id.to_string(),
            name: link.name.as_str().to_string(),
            kind: link.kind.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PeerResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub own_team: Option<TeamLinkDto>,
    pub invited_teams: Vec<TeamLinkDto>,
}

impl From<&Peer> for PeerResponse {
    fn from(peer: &Peer) -> Self {
        Self {
            id: peer.id().to_string(),
            first_name: peer.first_name().as_str().to_string(),
            last_name: peer.last_name().as_str().to_string(),
            email: peer.email().as_str().to_string(),
            profile_url: peer.profile_url().map(|u| u.as_str().to_string()),
            own_team: peer.own_team().map(TeamLinkDto::from),
            invited_teams: peer.invited_teams().iter().map(TeamLinkDto::from).collect(),
        }
    }
}
