//! MailerSend invitation mail.
//!
//! Implements the `Mailer` port by posting a templated email to MailerSend.
//! The template receives the team name, inviter name and invite slug.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use std::time::Duration;
use tracing::info;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{InvitationMail, Mailer};

const DEFAULT_BASE_URL: &str = "https://api.mailersend.com/v1";

#[derive(Debug, Clone)]
pub struct MailerSendConfig {
    api_key: Secret<String>,
    /// MailerSend template used for invitations.
    pub template_id: String,
    /// Sender address shown on outgoing mail.
    pub from_email: String,
    pub from_name: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl MailerSendConfig {
    pub fn new(api_key: impl Into<String>, template_id: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            template_id: template_id.into(),
            from_email: "info@honesthive.io".to_string(),
            from_name: "HonestHive [Do Not Reply]".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(15),
        }
    }

    pub fn with_sender(mut self, email: impl Into<String>, name: impl Into<String>) -> Self {
        self.from_email = email.into();
        self.from_name = name.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    from: Address<'a>,
    to: Vec<Address<'a>>,
    subject: &'a str,
    template_id: &'a str,
    personalization: Vec<Personalization<'a>>,
}

#[derive(Debug, Serialize)]
struct Address<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct Personalization<'a> {
    email: &'a str,
    data: TemplateData<'a>,
}

#[derive(Debug, Serialize)]
struct TemplateData<'a> {
    team_name: &'a str,
    inviter_name: &'a str,
    invitation_slug: &'a str,
}

pub struct MailerSendMailer {
    config: MailerSendConfig,
    client: Client,
}

impl MailerSendMailer {
    pub fn new(config: MailerSendConfig) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::InternalError,
                    format!("Failed to create HTTP client: {}", e),
                )
            })?;

        Ok(Self { config, client })
    }

    fn endpoint(&self) -> String {
        format!("{}/email", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl Mailer for MailerSendMailer {
    async fn send_invitation(&self, mail: &InvitationMail) -> Result<(), DomainError> {
        let request = SendRequest {
            from: Address {
                email: &self.config.from_email,
                name: Some(&self.config.from_name),
            },
            to: vec![Address {
                email: mail.recipient.as_str(),
                name: None,
            }],
            subject: "You have been invited to join a team",
            template_id: &self.config.template_id,
            personalization: vec![Personalization {
                email: mail.recipient.as_str(),
                data: TemplateData {
                    team_name: &mail.team_name,
                    inviter_name: &mail.inviter_name,
                    invitation_slug: &mail.invite_slug,
                },
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(self.config.api_key())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                DomainError::new(ErrorCode::MailError, format!("Failed to send mail: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(DomainError::new(
                ErrorCode::MailError,
                format!("Mail service returned {}", response.status()),
            ));
        }

        info!(team = %mail.team_name, "invitation mail sent");
        Ok(())
    }
}

impl std::fmt::Debug for MailerSendMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailerSendMailer")
            .field("template_id", &self.config.template_id)
            .field("from_email", &self.config.from_email)
            .finish_non_exhaustive()
    }
}
