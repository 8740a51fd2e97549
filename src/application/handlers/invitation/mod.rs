//! Invitation use cases.

mod accept_invitation;
mod get_invitation;
mod send_invitation;

pub use accept_invitation::{
    AcceptInvitationCommand, AcceptInvitationError, AcceptInvitationHandler,
    AcceptInvitationResult, InvitationAcceptedEvent,
};
pub use get_invitation::{GetInvitationHandler, GetInvitationQuery};
pub use send_invitation::{
    InvitationSentEvent, SendInvitationCommand, SendInvitationError, SendInvitationHandler,
    SendInvitationResult,
};
