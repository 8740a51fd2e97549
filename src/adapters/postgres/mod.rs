//! PostgreSQL adapters.
//!
//! One repository per aggregate plus the durable outbox store. Aggregates
//! are stored normalized where other rows reference them (peers, teams) and
//! as scalar columns elsewhere; team links carried on a peer are jsonb.

mod feedback_repository;
mod invitation_repository;
mod outbox_store;
mod peer_repository;
mod taxonomy_repository;
mod team_feedback_repository;
mod team_repository;

pub use feedback_repository::PostgresFeedbackRepository;
pub use invitation_repository::PostgresInvitationRepository;
pub use outbox_store::PostgresOutboxStore;
pub use peer_repository::PostgresPeerRepository;
pub use taxonomy_repository::PostgresTaxonomyRepository;
pub use team_feedback_repository::PostgresTeamFeedbackRepository;
pub use team_repository::PostgresTeamRepository;
