//! GetProfileHandler - loads the calling peer's profile.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::peer::Peer;
use crate::ports::PeerRepository;

/// Query for the caller's profile.
#[derive(Debug, Clone)]
pub struct GetProfileQuery {
    pub subject: String,
}

pub struct GetProfileHandler {
    peer_repository: Arc<dyn PeerRepository>,
}

impl GetProfileHandler {
    pub fn new(peer_repository: Arc<dyn PeerRepository>) -> Self {
        Self { peer_repository }
    }

    pub async fn handle(&self, query: GetProfileQuery) -> Result<Peer, DomainError> {
        self.peer_repository
            .find_by_subject(&query.subject)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::PeerNotFound, "No profile for this account")
                    .with_detail("subject", query.subject)
            })
    }
}
