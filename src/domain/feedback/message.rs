//! Feedback message value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// A short feedback text: at least three words, limited punctuation, emoji
/// allowed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeedbackMessage(String);

impl FeedbackMessage {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::empty_field("message"));
        }
        if let Some(c) = value.chars().find(|c| !Self::is_allowed_char(*c)) {
            return Err(ValidationError::invalid_format(
                "message",
                format!("character '{c}' is not allowed"),
            ));
        }
        if value.split_whitespace().count() < 3 {
            return Err(ValidationError::invalid_format(
                "message",
                "must contain at least three words",
            ));
        }
        Ok(Self(value))
    }

    fn is_allowed_char(c: char) -> bool {
        c.is_alphanumeric()
            || c.is_whitespace()
            || matches!(c, '.' | ',' | '!' | '?' | '\'' | '"' | '-')
            || !c.is_ascii()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FeedbackMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
