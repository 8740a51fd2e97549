//! Outbox processor configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Outbox processor configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutboxConfig {
    /// Seconds between polls of the outbox table
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

impl OutboxConfig {
    /// Get the poll interval as Duration
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Validate outbox configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.poll_interval_secs == 0 {
            return Err(ValidationError::InvalidPollInterval);
        }
        Ok(())
    }
}

impl Default for OutboxConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
        }
    }
}

fn default_poll_interval() -> u64 {
    60
}
