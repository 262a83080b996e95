//! Authenticity Scorer Gateway
//!
//! HTTP client for the external scoring service. The caller decides what an
//! error means; for uploads the use case substitutes a degraded review and
//! continues.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::entities::{AiReview, PaperMetadata};
use crate::domain::repository::{AuthenticityScorer, ScoreOutcome};
use crate::error::ScorerError;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings. `None` base URL means scoring is disabled and every
/// call reports `Unconfigured`.
#[derive(Debug, Clone, Default)]
pub struct ScorerConfig {
    pub base_url: Option<String>,
    pub timeout: Option<Duration>,
}

/// HTTP scorer client
#[derive(Clone)]
pub struct HttpScorerClient {
    client: reqwest::Client,
    config: ScorerConfig,
}

#[derive(Serialize)]
struct MetadataPayload<'a> {
    department: &'a str,
    subject: &'a str,
    year: i32,
    semester: &'a str,
    university: Option<&'a str>,
}

#[derive(Serialize)]
struct CheckPayload<'a> {
    metadata: MetadataPayload<'a>,
    file_url: &'a str,
    existing_texts: &'a [String],
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckResponse {
    is_authentic: bool,
    authenticity_score: f64,
    ai_feedback: String,
    #[serde(default)]
    extracted_text: String,
}

impl HttpScorerClient {
    pub fn new(config: ScorerConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

impl AuthenticityScorer for HttpScorerClient {
    async fn score(
        &self,
        metadata: &PaperMetadata,
        file_url: &str,
        corpus: &[String],
    ) -> Result<ScoreOutcome, ScorerError> {
        let base_url = self
            .config
            .base_url
            .as_deref()
            .ok_or(ScorerError::Unconfigured)?;

        let payload = CheckPayload {
            metadata: MetadataPayload {
                department: &metadata.department,
                subject: &metadata.subject,
                year: metadata.year,
                semester: &metadata.semester,
                university: metadata.university.as_deref(),
            },
            file_url,
            existing_texts: corpus,
        };

        let response = self
            .client
            .post(format!("{}/check", base_url.trim_end_matches('/')))
            .json(&payload)
            .timeout(self.config.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ScorerError::Timeout
                } else {
                    ScorerError::Transport(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScorerError::UpstreamStatus(status));
        }

        let body: CheckResponse = response
            .json()
            .await
            .map_err(|e| ScorerError::MalformedResponse(e.to_string()))?;

        Ok(ScoreOutcome {
            review: AiReview {
                authenticity_score: body.authenticity_score,
                is_authentic: body.is_authentic,
                feedback: body.ai_feedback,
            },
            extracted_text: body.extracted_text,
        })
    }
}
