//! Invitation module - expiring, single-use team invitations.

mod aggregate;
mod slug;

pub use aggregate::{Invitation, INVITATION_TTL_DAYS};
pub use slug::InviteSlug;
