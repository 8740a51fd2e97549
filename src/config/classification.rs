//! Classification configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Classification configuration (Eden AI)
#[derive(Debug, Clone, Deserialize)]
pub struct ClassificationConfig {
    /// Eden AI API key
    pub eden_api_key: String,

    /// API base URL override, mainly for tests
    pub base_url: Option<String>,
}

impl ClassificationConfig {
    /// Validate classification configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.eden_api_key.is_empty() {
            return Err(ValidationError::MissingRequired("EDEN_API_KEY"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_key_rejected() {
        let config = ClassificationConfig {
            eden_api_key: String::new(),
            base_url: None,
        };
        assert!(config.validate().is_err());
    }
}
