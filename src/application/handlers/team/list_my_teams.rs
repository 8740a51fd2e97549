//! ListMyTeamsHandler - all teams the caller belongs to.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::peer::TeamLink;
use crate::ports::PeerRepository;

/// Query for the caller's teams, own team first.
#[derive(Debug, Clone)]
pub struct ListMyTeamsQuery {
    pub subject: String,
}

pub struct ListMyTeamsHandler {
    peer_repository: Arc<dyn PeerRepository>,
}

impl ListMyTeamsHandler {
    pub fn new(peer_repository: Arc<dyn PeerRepository>) -> Self {
        Self { peer_repository }
    }

    pub async fn handle(&self, query: ListMyTeamsQuery) -> Result<Vec<TeamLink>, DomainError> {
        let peer = self
            .peer_repository
            .find_by_subject(&query.subject)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::PeerNotFound, "No profile for this account")
            })?;

        let mut teams = Vec::new();
        if let Some(own) = peer.own_team() {
            teams.push(own.clone());
        }
        teams.extend(peer.invited_teams().iter().cloned());
        Ok(teams)
    }
}
