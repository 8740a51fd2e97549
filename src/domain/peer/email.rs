//! Email address value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// An email address of the shape `local@domain.tld`.
///
/// Deliberately permissive beyond that shape; policy restrictions (such as
/// which domains may receive invitations) live behind `InvitationEmailPolicy`,
/// not here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        if !Self::has_valid_shape(&value) {
            return Err(ValidationError::invalid_format(
                "email",
                "must look like local@domain.tld",
            ));
        }
        Ok(Self(value))
    }

    fn has_valid_shape(value: &str) -> bool {
        let mut parts = value.splitn(2, '@');
        let local = parts.next().unwrap_or("");
        let Some(domain) = parts.next() else {
            return false;
        };
        if local.is_empty() || local.contains(char::is_whitespace) {
            return false;
        }
        if domain.contains('@') || domain.contains(char::is_whitespace) {
            return false;
        }
        // Domain needs at least one dot with non-empty labels around it.
        let labels: Vec<&str> = domain.split('.').collect();
        labels.len() >= 2 && labels.iter().all(|l| !l.is_empty())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part after the `@`.
    pub fn domain(&self) -> &str {
        self.0.split('@').nth(1).unwrap_or("")
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
