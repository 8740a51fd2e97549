//! PeerRepository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PeerId};
use crate::domain::peer::Peer;

/// Port for peer persistence.
///
/// `save` upserts keyed on the auth subject: saving a peer whose subject
/// already exists replaces the stored profile fields while keeping team
/// links accumulated by listeners.
#[async_trait]
pub trait PeerRepository: Send + Sync {
    /// Upserts the peer by auth subject and returns the stored state.
    async fn save(&self, peer: &Peer) -> Result<Peer, DomainError>;

    async fn find_by_id(&self, id: PeerId) -> Result<Option<Peer>, DomainError>;

    async fn find_by_subject(&self, subject: &str) -> Result<Option<Peer>, DomainError>;
}
