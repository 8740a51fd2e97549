//! GetMyTeamHandler - loads the team the caller owns.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::team::Team;
use crate::ports::{PeerRepository, TeamRepository};

/// Query for the caller's own team.
#[derive(Debug, Clone)]
pub struct GetMyTeamQuery {
    pub subject: String,
}

pub struct GetMyTeamHandler {
    peer_repository: Arc<dyn PeerRepository>,
    team_repository: Arc<dyn TeamRepository>,
}

impl GetMyTeamHandler {
    pub fn new(
        peer_repository: Arc<dyn PeerRepository>,
        team_repository: Arc<dyn TeamRepository>,
    ) -> Self {
        Self {
            peer_repository,
            team_repository,
        }
    }

    pub async fn handle(&self, query: GetMyTeamQuery) -> Result<Team, DomainError> {
        let peer = self
            .peer_repository
            .find_by_subject(&query.subject)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::PeerNotFound, "No profile for this account")
            })?;

        self.team_repository
            .find_by_owner(peer.id())
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::TeamNotFound, "You do not own a team")
                    .with_detail("peerId", peer.id().to_string())
            })
    }
}
