//! No-operation fallback scorer.
//!
//! [`NoopScorer`] is used when no remote scorer is configured. It answers
//! every text with a confident neutral label, so undecided texts end up
//! neutral and the keyword rules alone determine negative labels.

use async_trait::async_trait;

use crate::error::Result;

use super::scorer::SentimentScorer;
use super::types::SentimentScore;

/// A scorer that labels everything neutral.
#[derive(Debug, Clone, Default)]
pub struct NoopScorer;

impl NoopScorer {
    /// Creates a new `NoopScorer`.
    pub fn new() -> Self {
        NoopScorer
    }
}

#[async_trait]
impl SentimentScorer for NoopScorer {
    async fn score(&self, _text: &str) -> Result<SentimentScore> {
        Ok(SentimentScore::new("neutral", 1.0))
    }

    async fn score_batch(&self, texts: &[&str]) -> Result<Vec<SentimentScore>> {
        Ok(vec![SentimentScore::new("neutral", 1.0); texts.len()])
    }

    fn name(&self) -> &str {
        "noop"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::types::SentimentLabel;

    #[tokio::test]
    async fn test_noop_scorer() {
        let scorer = NoopScorer::new();
        let score = scorer.score("sapi saya sedih").await.unwrap();
        assert_eq!(score.to_label(0.15), SentimentLabel::Neutral);

        let scores = scorer.score_batch(&["a", "", "c"]).await.unwrap();
        assert_eq!(scores.len(), 3);
        assert_eq!(scorer.name(), "noop");
    }
}
