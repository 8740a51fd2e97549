//! Team aggregate.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::TeamId;
use crate::domain::invitation::Invitation;
use crate::domain::peer::{Peer, TeamLink};

use super::{TeamKind, TeamName};

/// A group of peers exchanging feedback. The owner is not part of `members`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    id: TeamId,
    name: TeamName,
    kind: TeamKind,
    owner: Peer,
    members: Vec<Peer>,
    pending_members: Vec<Invitation>,
}

impl Team {
    pub fn new(name: TeamName, kind: TeamKind, owner: Peer) -> Self {
        Self {
            id: TeamId::new(),
            name,
            kind,
            owner,
            members: Vec::new(),
            pending_members: Vec::new(),
        }
    }

    /// Rebuilds a team from stored state.
    pub fn from_parts(
        id: TeamId,
        name: TeamName,
        kind: TeamKind,
        owner: Peer,
        members: Vec<Peer>,
        pending_members: Vec<Invitation>,
    ) -> Self {
        Self {
            id,
            name,
            kind,
            owner,
            members,
            pending_members,
        }
    }

    pub fn id(&self) -> TeamId {
        self.id
    }

    pub fn name(&self) -> &TeamName {
        &self.name
    }

    pub fn kind(&self) -> TeamKind {
        self.kind
    }

    pub fn owner(&self) -> &Peer {
        &self.owner
    }

    pub fn members(&self) -> &[Peer] {
        &self.members
    }

    pub fn pending_members(&self) -> &[Invitation] {
        &self.pending_members
    }

    /// A light reference to this team for storage on peers.
    pub fn link(&self) -> TeamLink {
        TeamLink {
            id: self.id,
            name: self.name.clone(),
            kind: self.kind,
        }
    }

    /// Adds a peer as member. The owner and existing members are skipped.
    pub fn add_member(&mut self, peer: Peer) {
        if peer.id() == self.owner.id() {
            return;
        }
        if self.members.iter().any(|m| m.id() == peer.id()) {
            return;
        }
        self.members.push(peer);
    }

    /// Records an outstanding invitation.
    pub fn add_pending_member(&mut self, invitation: Invitation) {
        if self
            .pending_members
            .iter()
            .any(|i| i.id() == invitation.id())
        {
            return;
        }
        self.pending_members.push(invitation);
    }

    /// Drops a pending invitation once it has been accepted.
    pub fn remove_pending_member(&mut self, invitation_id: crate::domain::foundation::InvitationId) {
        self.pending_members.retain(|i| i.id() != invitation_id);
    }
}
