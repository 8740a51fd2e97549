//! Feedback use cases.

mod classify_feedback;
mod get_team_feedback;
mod give_feedback;

pub use classify_feedback::{
    ClassifyFeedbackCommand, ClassifyFeedbackError, ClassifyFeedbackHandler,
    ClassifyFeedbackOutcome,
};
pub use get_team_feedback::{
    GetTeamFeedbackHandler, GetTeamFeedbackQuery, DEFAULT_FEEDBACK_LIMIT,
};
pub use give_feedback::{
    FeedbackGivenEvent, GiveFeedbackCommand, GiveFeedbackError, GiveFeedbackHandler,
    GiveFeedbackResult, FEEDBACK_GIVEN,
};
