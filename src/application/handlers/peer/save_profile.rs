//! SaveProfileHandler - upserts the calling peer's profile.

use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::domain::peer::{Email, FirstName, LastName, Peer, ProfileUrl};
use crate::ports::PeerRepository;

/// Command to create or update the caller's profile.
#[derive(Debug, Clone)]
pub struct SaveProfileCommand {
    /// Auth subject of the caller; the upsert key.
    pub subject: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub profile_url: Option<String>,
}

/// Error type for profile saving.
#[derive(Debug, Clone)]
pub enum SaveProfileError {
    Domain(DomainError),
}

impl std::fmt::Display for SaveProfileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveProfileError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for SaveProfileError {}

impl From<DomainError> for SaveProfileError {
    fn from(err: DomainError) -> Self {
        SaveProfileError::Domain(err)
    }
}

impl From<SaveProfileError> for DomainError {
    fn from(err: SaveProfileError) -> Self {
        match err {
            SaveProfileError::Domain(e) => e,
        }
    }
}

/// Handler for saving profiles.
pub struct SaveProfileHandler {
    peer_repository: Arc<dyn PeerRepository>,
}

impl SaveProfileHandler {
    pub fn new(peer_repository: Arc<dyn PeerRepository>) -> Self {
        Self { peer_repository }
    }

    pub async fn handle(&self, cmd: SaveProfileCommand) -> Result<Peer, SaveProfileError> {
        let first_name = FirstName::new(cmd.first_name).map_err(DomainError::from)?;
        let last_name = LastName::new(cmd.last_name).map_err(DomainError::from)?;
        let email = Email::new(cmd.email).map_err(DomainError::from)?;
        let profile_url = cmd
            .profile_url
            .map(ProfileUrl::new)
            .transpose()
            .map_err(DomainError::from)?;

        // An existing peer keeps its id and accumulated team links; only the
        // profile fields are replaced.
        let peer = match self.peer_repository.find_by_subject(&cmd.subject).await? {
            Some(existing) => Peer::from_parts(
                existing.id(),
                first_name,
                last_name,
                email,
                cmd.subject,
                profile_url,
                existing.own_team().cloned(),
                existing.invited_teams().to_vec(),
            ),
            None => Peer::new(first_name, last_name, email, cmd.subject, profile_url),
        };

        let saved = self.peer_repository.save(&peer).await?;
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ErrorCode, PeerId, TeamId};
    use crate::domain::peer::TeamLink;
    use crate::domain::team::{TeamKind, TeamName};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockPeerRepository {
        peers: Mutex<Vec<Peer>>,
    }

    impl MockPeerRepository {
        fn new() -> Self {
            Self {
                peers: Mutex::new(Vec::new()),
            }
        }

        fn with_peer(peer: Peer) -> Self {
            Self {
                peers: Mutex::new(vec![peer]),
            }
        }
    }

    #[async_trait]
    impl PeerRepository for MockPeerRepository {
        async fn save(&self, peer: &Peer) -> Result<Peer, DomainError> {
            let mut peers = self.peers.lock().unwrap();
            peers.retain(|p| p.subject() != peer.subject());
            peers.push(peer.clone());
            Ok(peer.clone())
        }

        async fn find_by_id(&self, id: PeerId) -> Result<Option<Peer>, DomainError> {
            Ok(self.peers.lock().unwrap().iter().find(|p| p.id() == id).cloned())
        }

        async fn find_by_subject(&self, subject: &str) -> Result<Option<Peer>, DomainError> {
            Ok(self
                .peers
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.subject() == subject)
                .cloned())
        }
    }

    fn command() -> SaveProfileCommand {
        SaveProfileCommand {
            subject: "auth-1".to_string(),
            first_name: "Amelia".to_string(),
            last_name: "Stone".to_string(),
            email: "amelia@gmail.com".to_string(),
            profile_url: None,
        }
    }

    #[tokio::test]
    async fn creates_new_peer() {
        let repo = Arc::new(MockPeerRepository::new());
        let handler = SaveProfileHandler::new(repo.clone());

        let peer = handler.handle(command()).await.unwrap();

        assert_eq!(peer.subject(), "auth-1");
        assert_eq!(peer.first_name().as_str(), "Amelia");
        assert!(repo.find_by_subject("auth-1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn update_keeps_id_and_team_links() {
        let mut existing = Peer::new(
            FirstName::new("Amelia").unwrap(),
            LastName::new("Stone").unwrap(),
            Email::new("amelia@gmail.com").unwrap(),
            "auth-1",
            None,
        );
        existing.add_invited_team(TeamLink {
            id: TeamId::new(),
            name: TeamName::new("Pioneers").unwrap(),
            kind: TeamKind::Family,
        });
        let existing_id = existing.id();
        let repo = Arc::new(MockPeerRepository::with_peer(existing));
        let handler = SaveProfileHandler::new(repo);

        let mut cmd = command();
        cmd.last_name = "Field".to_string();
        let peer = handler.handle(cmd).await.unwrap();

        assert_eq!(peer.id(), existing_id);
        assert_eq!(peer.last_name().as_str(), "Field");
        assert_eq!(peer.invited_teams().len(), 1);
    }

    #[tokio::test]
    async fn rejects_invalid_names() {
        let handler = SaveProfileHandler::new(Arc::new(MockPeerRepository::new()));

        let mut cmd = command();
        cmd.first_name = "Amelia2".to_string();
        let err = handler.handle(cmd).await.unwrap_err();

        let SaveProfileError::Domain(err) = err;
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn rejects_invalid_profile_url() {
        let handler = SaveProfileHandler::new(Arc::new(MockPeerRepository::new()));

        let mut cmd = command();
        cmd.profile_url = Some("not a url".to_string());
        assert!(handler.handle(cmd).await.is_err());
    }
}
