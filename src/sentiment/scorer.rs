//! Fallback sentiment scorer trait.

use async_trait::async_trait;

use crate::error::Result;

use super::types::SentimentScore;

/// A general-purpose, pretrained text-to-label sentiment scorer.
///
/// The pipeline consults a scorer only for texts the keyword rules cannot
/// decide. Implementations may be slow (model inference, network calls); the
/// pipeline wraps every call in a timeout.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use sigap::error::Result;
/// use sigap::sentiment::{SentimentScore, SentimentScorer};
///
/// struct AlwaysNegative;
///
/// #[async_trait]
/// impl SentimentScorer for AlwaysNegative {
///     async fn score(&self, _text: &str) -> Result<SentimentScore> {
///         Ok(SentimentScore::new("negative", 0.9))
///     }
///
///     fn name(&self) -> &str {
///         "always_negative"
///     }
/// }
/// ```
#[async_trait]
pub trait SentimentScorer: Send + Sync {
    /// Score a single text.
    async fn score(&self, text: &str) -> Result<SentimentScore>;

    /// Score several texts, returning one score per input in input order.
    ///
    /// The default implementation scores texts one at a time. Remote
    /// scorers should override it with a single batched request.
    async fn score_batch(&self, texts: &[&str]) -> Result<Vec<SentimentScore>> {
        let mut scores = Vec::with_capacity(texts.len());
        for text in texts {
            scores.push(self.score(text).await?);
        }
        Ok(scores)
    }

    /// Get the name of this scorer for debugging and logging.
    fn name(&self) -> &str;
}
