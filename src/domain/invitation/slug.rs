//! Invitation slug value object.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::domain::foundation::ValidationError;

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const GENERATED_LEN: usize = 12;
const MAX_LEN: usize = 24;

/// Short alphabetic token identifying an invitation in URLs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InviteSlug(String);

impl InviteSlug {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::empty_field("slug"));
        }
        if value.len() > MAX_LEN {
            return Err(ValidationError::invalid_format(
                "slug",
                "must be at most 24 characters",
            ));
        }
        if !value.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::invalid_format(
                "slug",
                "must contain only letters",
            ));
        }
        Ok(Self(value))
    }

    /// Generates a 12-letter slug from UUID randomness.
    pub fn generate() -> Self {
        let bytes = *Uuid::new_v4().as_bytes();
        let slug: String = bytes
            .iter()
            .take(GENERATED_LEN)
            .map(|b| ALPHABET[*b as usize % ALPHABET.len()] as char)
            .collect();
        Self(slug)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InviteSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn generated_slugs_validate() {
        for _ in 0..50 {
            let slug = InviteSlug::generate();
            assert_eq!(slug.as_str().len(), GENERATED_LEN);
            assert!(InviteSlug::new(slug.as_str()).is_ok());
        }
    }

    #[test]
    fn generated_slugs_differ() {
        assert_ne!(InviteSlug::generate(), InviteSlug::generate());
    }

    #[test]
    fn rejects_non_letters_and_overlong() {
        assert!(InviteSlug::new("abc123").is_err());
        assert!(InviteSlug::new("").is_err());
        assert!(InviteSlug::new("a".repeat(25)).is_err());
        assert!(InviteSlug::new("a".repeat(24)).is_ok());
    }

    proptest! {
        #[test]
        fn alphabetic_slugs_up_to_24_are_accepted(s in "[a-zA-Z]{1,24}") {
            prop_assert!(InviteSlug::new(s).is_ok());
        }
    }
}
