//! Peer aggregate.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{PeerId, TeamId};
use crate::domain::team::{TeamKind, TeamName};

use super::{Email, FirstName, LastName, ProfileUrl};

/// Lightweight reference to a team, carried on peers instead of the full
/// aggregate to keep Peer and Team from owning each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamLink {
    pub id: TeamId,
    pub name: TeamName,
    pub kind: TeamKind,
}

/// A person using the application, identified externally by an auth subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Peer {
    id: PeerId,
    first_name: FirstName,
    last_name: LastName,
    email: Email,
    /// External auth provider subject; unique per peer.
    subject: String,
    profile_url: Option<ProfileUrl>,
    own_team: Option<TeamLink>,
    invited_teams: Vec<TeamLink>,
}

impl Peer {
    pub fn new(
        first_name: FirstName,
        last_name: LastName,
        email: Email,
        subject: impl Into<String>,
        profile_url: Option<ProfileUrl>,
    ) -> Self {
        Self {
            id: PeerId::new(),
            first_name,
            last_name,
            email,
            subject: subject.into(),
            profile_url,
            own_team: None,
            invited_teams: Vec::new(),
        }
    }

    /// Rebuilds a peer from stored state.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: PeerId,
        first_name: FirstName,
        last_name: LastName,
        email: Email,
        subject: String,
        profile_url: Option<ProfileUrl>,
        own_team: Option<TeamLink>,
        invited_teams: Vec<TeamLink>,
    ) -> Self {
        Self {
            id,
            first_name,
            last_name,
            email,
            subject,
            profile_url,
            own_team,
            invited_teams,
        }
    }

    pub fn id(&self) -> PeerId {
        self.id
    }

    pub fn first_name(&self) -> &FirstName {
        &self.first_name
    }

    pub fn last_name(&self) -> &LastName {
        &self.last_name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn profile_url(&self) -> Option<&ProfileUrl> {
        self.profile_url.as_ref()
    }

    pub fn own_team(&self) -> Option<&TeamLink> {
        self.own_team.as_ref()
    }

    pub fn invited_teams(&self) -> &[TeamLink] {
        &self.invited_teams
    }

    /// Sets the team this peer owns.
    pub fn assign_own_team(&mut self, team: TeamLink) {
        self.own_team = Some(team);
    }

    /// Adds a team this peer was invited into. Idempotent per team id.
    pub fn add_invited_team(&mut self, team: TeamLink) {
        if self.invited_teams.iter().any(|t| t.id == team.id) {
            return;
        }
        self.invited_teams.push(team);
    }
}
