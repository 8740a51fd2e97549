//! Team kind value object.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// The kind of group a team represents. Parsing is case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamKind {
    Family,
    Organisation,
}

impl TeamKind {
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value.to_ascii_lowercase().as_str() {
            "family" => Ok(TeamKind::Family),
            "organisation" => Ok(TeamKind::Organisation),
            _ => Err(ValidationError::invalid_format(
                "teamKind",
                "must be 'family' or 'organisation'",
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TeamKind::Family => "family",
            TeamKind::Organisation => "organisation",
        }
    }
}

impl FromStr for TeamKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TeamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
