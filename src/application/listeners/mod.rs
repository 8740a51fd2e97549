//! Event listeners - secondary writes triggered by published domain events.

mod add_pending_member;
mod assign_own_team;
mod classify_feedback;
mod project_team_feedback;
mod register_accepted_member;

pub use add_pending_member::AddPendingMemberListener;
pub use assign_own_team::AssignOwnTeamListener;
pub use classify_feedback::{
    ClassifyFeedbackListener, ClassifyFeedbackMessage, CLASSIFY_FEEDBACK_MESSAGE,
};
pub use project_team_feedback::TeamFeedbackProjectionListener;
pub use register_accepted_member::RegisterAcceptedMemberListener;
