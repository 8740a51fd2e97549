//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read with the `HONESTHIVE`
//! prefix and nested sections use `__` as separator, e.g.
//! `HONESTHIVE__SERVER__PORT=8080` or `HONESTHIVE__DATABASE__URL=...`.

mod auth;
mod classification;
mod database;
mod error;
mod mail;
mod outbox;
mod server;

pub use auth::AuthConfig;
pub use classification::ClassificationConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use mail::MailConfig;
pub use outbox::OutboxConfig;
pub use server::ServerConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// Authentication configuration (Firebase ID tokens)
    pub auth: AuthConfig,

    /// Classification configuration (Eden AI)
    pub classification: ClassificationConfig,

    /// Mail configuration (MailerSend)
    #[serde(default)]
    pub mail: MailConfig,

    /// Outbox processor configuration
    #[serde(default)]
    pub outbox: OutboxConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads a `.env` file if present, then reads environment variables
    /// with the `HONESTHIVE` prefix into typed sections.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("HONESTHIVE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate()?;
        self.classification.validate()?;
        self.mail.validate()?;
        self.outbox.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> AppConfig {
        AppConfig {
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url: "postgres://localhost/honesthive".to_string(),
                min_connections: 1,
                max_connections: 10,
                acquire_timeout_secs: 5,
                idle_timeout_secs: 600,
                run_migrations: false,
            },
            auth: AuthConfig {
                firebase_project_id: "honesthive-prod".to_string(),
                jwks_cache_ttl_secs: 3600,
            },
            classification: ClassificationConfig {
                eden_api_key: "eden-key".to_string(),
                base_url: None,
            },
            mail: MailConfig::default(),
            outbox: OutboxConfig::default(),
        }
    }

    #[test]
    fn valid_config_passes_validation() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn invalid_section_fails_validation() {
        let mut config = valid_config();
        config.database.url = "not-a-url".to_string();
        assert!(config.validate().is_err());
    }
}
