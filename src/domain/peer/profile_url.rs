//! Profile picture URL value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// An http(s) URL pointing at a profile picture.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileUrl(String);

impl ProfileUrl {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::empty_field("profileUrl"));
        }
        let rest = value
            .strip_prefix("https://")
            .or_else(|| value.strip_prefix("http://"));
        let valid = match rest {
            Some(host_and_path) => {
                let host = host_and_path.split('/').next().unwrap_or("");
                !host.is_empty() && !host.contains(char::is_whitespace)
            }
            None => false,
        };
        if !valid {
            return Err(ValidationError::invalid_format(
                "profileUrl",
                "must be an http(s) URL",
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProfileUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_https_urls() {
        assert!(ProfileUrl::new("https://cdn.example.com/avatar/42.png").is_ok());
    }

    #[test]
    fn accepts_http_urls() {
        assert!(ProfileUrl::new("http://example.com").is_ok());
    }

    #[test]
    fn rejects_other_schemes() {
        assert!(ProfileUrl::new("ftp://example.com/a.png").is_err());
        assert!(ProfileUrl::new("example.com/a.png").is_err());
    }

    #[test]
    fn rejects_empty_host() {
        assert!(ProfileUrl::new("https://").is_err());
        assert!(ProfileUrl::new("").is_err());
    }
}
