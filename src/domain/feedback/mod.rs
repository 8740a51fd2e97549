//! Feedback module - peer-to-peer messages and their classification.

mod aggregate;
mod message;
mod projection;

pub use aggregate::{ClassificationResult, Feedback};
pub use message::FeedbackMessage;
pub use projection::TeamFeedback;
