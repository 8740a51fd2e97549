//! Feedback classification adapters.

mod eden_ai;

pub use eden_ai::{EdenAiClassifier, EdenAiConfig};
