//! Configuration for a sentiment update run.
//!
//! [`SigapConfig`] is built once at startup (defaults, then an optional JSON
//! file, then CLI overrides) and handed to the pipeline by reference. Nothing
//! mutates it afterwards.
//!
//! # Examples
//!
//! ```
//! use sigap::config::{FallbackErrorPolicy, SigapConfig};
//!
//! let config = SigapConfig::default();
//! assert_eq!(config.typo_threshold, 85.0);
//! assert_eq!(config.negative_threshold, 0.15);
//! assert_eq!(config.fallback_error_policy, FallbackErrorPolicy::Neutral);
//!
//! let custom: SigapConfig = serde_json::from_str(r#"{"negative_threshold": 0.5}"#).unwrap();
//! assert_eq!(custom.negative_threshold, 0.5);
//! assert_eq!(custom.typo_threshold, 85.0);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SigapError};
use crate::vocabulary::Vocabulary;

/// Default inference endpoint base for hosted text-classification models.
pub const DEFAULT_INFERENCE_BASE_URL: &str = "https://api-inference.huggingface.co/models";

/// Default pretrained Indonesian sentiment model.
pub const DEFAULT_SENTIMENT_MODEL: &str = "w11wo/indonesian-roberta-base-sentiment-classifier";

/// What to do with a record when the fallback scorer fails or times out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackErrorPolicy {
    /// Label the record neutral, log a warning and keep going.
    #[default]
    Neutral,
    /// Abort the whole run with the scorer error.
    Fail,
}

/// Column names used to read and write the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    /// Free-text answer column.
    pub text: String,
    /// Date-like column.
    pub date: String,
    /// Derived column holding the normalized, corrected text.
    pub preprocessed: String,
    /// Derived column holding the 0/1 negative label.
    pub label: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        ColumnConfig {
            text: "jawaban".to_string(),
            date: "tanggal".to_string(),
            preprocessed: "preprocessed_text".to_string(),
            label: "sentimen_negatif".to_string(),
        }
    }
}

/// Settings for the hosted fallback scorer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorerConfig {
    /// Full inference URL. `None` means the default host for `model`.
    pub endpoint: Option<String>,
    /// Model identifier, used to build the endpoint from the base URL.
    pub model: String,
    /// Bearer token. Never written back out.
    #[serde(skip_serializing)]
    pub api_token: Option<String>,
    /// Maximum number of texts sent in one request.
    pub batch_size: usize,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        ScorerConfig {
            endpoint: None,
            model: DEFAULT_SENTIMENT_MODEL.to_string(),
            api_token: None,
            batch_size: 32,
        }
    }
}

impl ScorerConfig {
    /// Endpoint URL for the configured model on the default inference host.
    pub fn default_endpoint(&self) -> String {
        format!("{DEFAULT_INFERENCE_BASE_URL}/{}", self.model)
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SigapConfig {
    /// Domain term lists.
    pub vocabulary: Vocabulary,
    /// Minimum partial-similarity score (0–100) for a typo substitution.
    pub typo_threshold: f64,
    /// A fallback "negative" label counts only above this confidence.
    pub negative_threshold: f64,
    /// Hard timeout around each fallback scorer call, in milliseconds.
    pub fallback_timeout_ms: u64,
    /// Behavior when the fallback scorer fails.
    pub fallback_error_policy: FallbackErrorPolicy,
    /// Dataset column names.
    pub columns: ColumnConfig,
    /// Fallback scorer settings.
    pub scorer: ScorerConfig,
}

impl Default for SigapConfig {
    fn default() -> Self {
        SigapConfig {
            vocabulary: Vocabulary::default(),
            typo_threshold: 85.0,
            negative_threshold: 0.15,
            fallback_timeout_ms: 30_000,
            fallback_error_policy: FallbackErrorPolicy::Neutral,
            columns: ColumnConfig::default(),
            scorer: ScorerConfig::default(),
        }
    }
}

impl SigapConfig {
    /// Load a configuration from a JSON file. Missing fields keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SigapError::configuration(format!(
                "Cannot read config file {}: {e}",
                path.display()
            ))
        })?;
        let config: SigapConfig = serde_json::from_str(&content).map_err(|e| {
            SigapError::configuration(format!(
                "Invalid config file {}: {e}",
                path.display()
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Fallback timeout as a [`Duration`].
    pub fn fallback_timeout(&self) -> Duration {
        Duration::from_millis(self.fallback_timeout_ms)
    }

    /// Reject values the pipeline cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.typo_threshold) {
            return Err(SigapError::configuration(format!(
                "typo_threshold must be within 0..=100, got {}",
                self.typo_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.negative_threshold) {
            return Err(SigapError::configuration(format!(
                "negative_threshold must be within 0..=1, got {}",
                self.negative_threshold
            )));
        }
        if self.fallback_timeout_ms == 0 {
            return Err(SigapError::configuration(
                "fallback_timeout_ms must be greater than zero",
            ));
        }
        if self.scorer.batch_size == 0 {
            return Err(SigapError::configuration(
                "scorer.batch_size must be greater than zero",
            ));
        }

        let columns = [
            &self.columns.text,
            &self.columns.date,
            &self.columns.preprocessed,
            &self.columns.label,
        ];
        if columns.iter().any(|c| c.trim().is_empty()) {
            return Err(SigapError::configuration("column names must not be empty"));
        }
        for (i, a) in columns.iter().enumerate() {
            if columns[i + 1..].contains(a) {
                return Err(SigapError::configuration(format!(
                    "column name {a:?} is used twice"
                )));
            }
        }

        self.vocabulary.validate()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = SigapConfig::default();
        assert_eq!(config.typo_threshold, 85.0);
        assert_eq!(config.negative_threshold, 0.15);
        assert_eq!(config.fallback_timeout(), Duration::from_secs(30));
        assert_eq!(config.columns.text, "jawaban");
        assert_eq!(config.columns.date, "tanggal");
        assert_eq!(config.columns.label, "sentimen_negatif");
        assert!(config.scorer.endpoint.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_endpoint() {
        let scorer = ScorerConfig::default();
        assert_eq!(
            scorer.default_endpoint(),
            "https://api-inference.huggingface.co/models/w11wo/indonesian-roberta-base-sentiment-classifier"
        );
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = SigapConfig::default();
        config.negative_threshold = 1.5;
        assert!(config.validate().is_err());

        let mut config = SigapConfig::default();
        config.typo_threshold = -1.0;
        assert!(config.validate().is_err());

        let mut config = SigapConfig::default();
        config.columns.label = "jawaban".to_string();
        assert!(config.validate().is_err());

        let mut config = SigapConfig::default();
        config.columns.date = " ".to_string();
        assert!(config.validate().is_err());

        let mut config = SigapConfig::default();
        config.fallback_timeout_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_policy_serde() {
        let config: SigapConfig =
            serde_json::from_str(r#"{"fallback_error_policy": "fail"}"#).unwrap();
        assert_eq!(config.fallback_error_policy, FallbackErrorPolicy::Fail);
    }

    #[test]
    fn test_api_token_not_serialized() {
        let mut config = SigapConfig::default();
        config.scorer.api_token = Some("secret".to_string());
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret"));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"typo_threshold": 90, "columns": {{"text": "answer"}}}}"#
        )
        .unwrap();

        let config = SigapConfig::from_file(file.path()).unwrap();
        assert_eq!(config.typo_threshold, 90.0);
        assert_eq!(config.columns.text, "answer");
        assert_eq!(config.columns.date, "tanggal");

        assert!(SigapConfig::from_file("/nonexistent/sigap.json").is_err());
    }
}
