//! Reacts to `team.created`: backlinks the new team on its owner.

use async_trait::async_trait;
use std::sync::Arc;

use crate::application::handlers::team::TeamCreatedEvent;
use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::domain::peer::TeamLink;
use crate::ports::{EventHandler, PeerRepository};

pub struct AssignOwnTeamListener {
    peer_repository: Arc<dyn PeerRepository>,
}

impl AssignOwnTeamListener {
    pub fn new(peer_repository: Arc<dyn PeerRepository>) -> Self {
        Self { peer_repository }
    }
}

#[async_trait]
impl EventHandler for AssignOwnTeamListener {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
        let payload: TeamCreatedEvent = event
            .payload_as()
            .map_err(|e| DomainError::new(ErrorCode::InternalError, e.to_string()))?;

        let mut owner = self
            .peer_repository
            .find_by_id(payload.peer_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::PeerNotFound, "Team owner no longer exists")
                    .with_detail("peerId", payload.peer_id.to_string())
            })?;

        owner.assign_own_team(TeamLink {
            id: payload.team_id,
            name: payload.team_name,
            kind: payload.team_kind,
        });
        self.peer_repository.save(&owner).await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "AssignOwnTeamListener"
    }
}
