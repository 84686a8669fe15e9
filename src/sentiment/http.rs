//! Remote text-classification scorer.
//!
//! Calls a hosted inference endpoint that follows the Hugging Face inference
//! API shape: `POST {endpoint}` with `{"inputs": [...]}` and a response of
//! label/score candidates per input.

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::ScorerConfig;
use crate::error::{Result, SigapError};

use super::scorer::SentimentScorer;
use super::types::SentimentScore;

/// Request body for the inference endpoint.
#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    /// Texts to classify (batch).
    inputs: &'a [&'a str],
    options: InferenceOptions,
}

#[derive(Debug, Serialize)]
struct InferenceOptions {
    /// Block until the model is loaded instead of failing with 503.
    wait_for_model: bool,
}

/// One label candidate in the response.
#[derive(Debug, Clone, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

/// The endpoint answers either with candidates per input, or with a flat list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

/// Scorer backed by a hosted sentiment model.
///
/// # Examples
///
/// ```no_run
/// use sigap::sentiment::{HttpSentimentScorer, SentimentScorer};
///
/// # async fn example() -> sigap::error::Result<()> {
/// let scorer = HttpSentimentScorer::new(
///     "https://api-inference.huggingface.co/models/w11wo/indonesian-roberta-base-sentiment-classifier",
///     Some("hf_...".to_string()),
/// )?;
///
/// let score = scorer.score("ayam saya sedih").await?;
/// println!("{} ({:.2})", score.label, score.score);
/// # Ok(())
/// # }
/// ```
pub struct HttpSentimentScorer {
    /// HTTP client for making API requests.
    client: Client,
    /// Full inference URL.
    endpoint: String,
    /// Optional bearer token.
    api_token: Option<String>,
}

impl std::fmt::Debug for HttpSentimentScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSentimentScorer")
            .field("endpoint", &self.endpoint)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl HttpSentimentScorer {
    /// Create a scorer for an explicit endpoint URL.
    pub fn new<S: Into<String>>(endpoint: S, api_token: Option<String>) -> Result<Self> {
        let endpoint = endpoint.into();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(SigapError::configuration(format!(
                "Scorer endpoint must be an http(s) URL, got {endpoint:?}"
            )));
        }

        Ok(Self {
            client: Client::new(),
            endpoint,
            api_token,
        })
    }

    /// Create a scorer from configuration, using the default host when no
    /// endpoint is set.
    pub fn from_config(config: &ScorerConfig) -> Result<Self> {
        let endpoint = config
            .endpoint
            .clone()
            .unwrap_or_else(|| config.default_endpoint());
        Self::new(endpoint, config.api_token.clone())
    }

    /// The inference URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn request(&self, texts: &[&str]) -> Result<String> {
        let request = InferenceRequest {
            inputs: texts,
            options: InferenceOptions {
                wait_for_model: true,
            },
        };

        let mut builder = self.client.post(&self.endpoint).json(&request);
        if let Some(token) = &self.api_token {
            builder = builder.bearer_auth(token);
        }

        let http_response = builder
            .send()
            .await
            .map_err(|e| SigapError::fallback(format!("Inference request failed: {e}")))?;

        let status = http_response.status();
        let response_text = http_response.text().await.map_err(|e| {
            SigapError::fallback(format!("Failed to read inference response: {e}"))
        })?;

        if !status.is_success() {
            return Err(SigapError::fallback(format!(
                "Inference API error (status {status}): {response_text}"
            )));
        }

        Ok(response_text)
    }
}

/// Pick the highest-scoring candidate.
fn top_label(candidates: Vec<LabelScore>) -> Result<SentimentScore> {
    candidates
        .into_iter()
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .map(|best| SentimentScore::new(best.label, best.score))
        .ok_or_else(|| SigapError::fallback("Inference response has no labels"))
}

/// Turn a response body into one score per input.
fn parse_response(body: &str, expected: usize) -> Result<Vec<SentimentScore>> {
    let response: InferenceResponse = serde_json::from_str(body).map_err(|e| {
        SigapError::fallback(format!(
            "Failed to parse inference response: {e}. Response text: {body}"
        ))
    })?;

    let scores = match response {
        InferenceResponse::Nested(per_input) => per_input
            .into_iter()
            .map(top_label)
            .collect::<Result<Vec<_>>>()?,
        // A single input may come back as a flat candidate list.
        InferenceResponse::Flat(candidates) if expected == 1 => vec![top_label(candidates)?],
        // Otherwise a flat list holds the top label of each input.
        InferenceResponse::Flat(candidates) => candidates
            .into_iter()
            .map(|c| SentimentScore::new(c.label, c.score))
            .collect(),
    };

    if scores.len() != expected {
        return Err(SigapError::fallback(format!(
            "Inference response has {} results for {} inputs",
            scores.len(),
            expected
        )));
    }

    Ok(scores)
}

#[async_trait]
impl SentimentScorer for HttpSentimentScorer {
    async fn score(&self, text: &str) -> Result<SentimentScore> {
        let mut scores = self.score_batch(&[text]).await?;
        scores
            .pop()
            .ok_or_else(|| SigapError::fallback("Inference response is empty"))
    }

    async fn score_batch(&self, texts: &[&str]) -> Result<Vec<SentimentScore>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!("scoring {} text(s) via {}", texts.len(), self.endpoint);
        let body = self.request(texts).await?;
        parse_response(&body, texts.len())
    }

    fn name(&self) -> &str {
        "http"
    }
}
