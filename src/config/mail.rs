//! Mail configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Mail configuration (MailerSend)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct MailConfig {
    /// MailerSend API key
    #[serde(default)]
    pub mailersend_api_key: String,

    /// Template used for invitation mails
    #[serde(default)]
    pub invitation_template_id: String,

    /// Whether invitation mails are actually sent. When off, invitations
    /// are still created and the slug is returned to the caller.
    #[serde(default)]
    pub enabled: bool,
}

impl MailConfig {
    /// Validate mail configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.enabled && self.mailersend_api_key.is_empty() {
            return Err(ValidationError::MailKeyMissing);
        }
        if self.enabled && self.invitation_template_id.is_empty() {
            return Err(ValidationError::MissingRequired(
                "MAIL_INVITATION_TEMPLATE_ID",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_mail_needs_no_key() {
        assert!(MailConfig::default().validate().is_ok());
    }

    #[test]
    fn enabled_mail_requires_key_and_template() {
        let config = MailConfig {
            enabled: true,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = MailConfig {
            mailersend_api_key: "ms_key".to_string(),
            invitation_template_id: "tmpl_1".to_string(),
            enabled: true,
        };
        assert!(config.validate().is_ok());
    }
}
