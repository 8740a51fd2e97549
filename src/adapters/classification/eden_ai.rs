//! Eden AI classification client.
//!
//! Implements the `FeedbackClassifier` port against Eden AI's custom text
//! classification endpoint, routed through the OpenAI provider.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{Classification, FeedbackClassifier};

const DEFAULT_BASE_URL: &str = "https://api.edenai.run/v2";
const PROVIDER: &str = "openai";

#[derive(Debug, Clone)]
pub struct EdenAiConfig {
    api_key: Secret<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl EdenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

#[derive(Debug, Serialize)]
struct ClassificationRequest<'a> {
    providers: &'a str,
    texts: Vec<&'a str>,
    labels: &'a [String],
}

#[derive(Debug, Deserialize)]
struct ClassificationResponse {
    openai: ProviderResult,
}

#[derive(Debug, Deserialize)]
struct ProviderResult {
    classifications: Vec<LabelScore>,
}

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    confidence: f64,
}

pub struct EdenAiClassifier {
    config: EdenAiConfig,
    client: Client,
}

impl EdenAiClassifier {
    pub fn new(config: EdenAiConfig) -> Result<Self, DomainError> {
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
        format!(
            "{}/text/custom_classification",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl FeedbackClassifier for EdenAiClassifier {
    async fn classify(
        &self,
        text: &str,
        labels: &[String],
    ) -> Result<Classification, DomainError> {
        let request = ClassificationRequest {
            providers: PROVIDER,
            texts: vec![text],
            labels,
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(self.config.api_key())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::ClassificationError,
                    format!("Classification request failed: {}", e),
                )
            })?;

        if !response.status().is_success() {
            return Err(DomainError::new(
                ErrorCode::ClassificationError,
                format!("Classification service returned {}", response.status()),
            ));
        }

        let body: ClassificationResponse = response.json().await.map_err(|e| {
            DomainError::new(
                ErrorCode::ClassificationError,
                format!("Failed to parse classification response: {}", e),
            )
        })?;

        let best = body
            .openai
            .classifications
            .into_iter()
            .next()
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::ClassificationError,
                    "Classification response contained no labels",
                )
            })?;

        debug!(
            category = %best.label,
            confidence = best.confidence,
            "message classified"
        );

        Ok(Classification {
            category: best.label,
            confidence_score: best.confidence,
        })
    }
}

impl std::fmt::Debug for EdenAiClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EdenAiClassifier")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}
