//! Ports layer - trait boundaries between the application core and the
//! adapters that implement persistence, transport and collaborators.

mod classifier;
mod event_publisher;
mod event_subscriber;
mod feedback_repository;
mod identity_verifier;
mod invitation_email_policy;
mod invitation_repository;
mod mailer;
mod outbox_store;
mod peer_repository;
mod taxonomy_repository;
mod team_feedback_repository;
mod team_repository;

pub use classifier::{Classification, FeedbackClassifier};
pub use event_publisher::EventPublisher;
pub use event_subscriber::{EventBus, EventHandler, EventSubscriber};
pub use feedback_repository::FeedbackRepository;
pub use identity_verifier::{AuthenticatedPeer, IdentityVerifier};
pub use invitation_email_policy::InvitationEmailPolicy;
pub use invitation_repository::InvitationRepository;
pub use mailer::{InvitationMail, Mailer};
pub use outbox_store::{OutboxMessage, OutboxStore};
pub use peer_repository::PeerRepository;
pub use taxonomy_repository::TaxonomyRepository;
pub use team_feedback_repository::TeamFeedbackRepository;
pub use team_repository::TeamRepository;
