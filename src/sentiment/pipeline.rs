//! End-to-end classification of survey answers.
//!
//! normalize → correct typos → keyword rules → fallback scorer (undecided only).

use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use rayon::prelude::*;

use crate::analysis::normalizer::TextNormalizer;
use crate::config::{FallbackErrorPolicy, SigapConfig};
use crate::error::{Result, SigapError};
use crate::spelling::corrector::{CorrectionResult, TypoCorrector};

use super::rules::RuleEngine;
use super::scorer::SentimentScorer;
use super::types::{
    ClassifiedText, DecisionSource, RuleDecision, SentimentLabel, SentimentScore,
};

/// Output of the deterministic stages for one record.
struct Prepared {
    raw_text: String,
    preprocessed: CorrectionResult,
    decision: RuleDecision,
}

impl Prepared {
    fn needs_fallback(&self) -> bool {
        self.decision.is_undecided() && !self.preprocessed.corrected.is_empty()
    }

    fn finish(self, label: SentimentLabel, source: DecisionSource) -> ClassifiedText {
        ClassifiedText {
            raw_text: self.raw_text,
            preprocessed_text: self.preprocessed.corrected,
            label,
            source,
            corrections: self.preprocessed.corrections,
        }
    }
}

/// Hybrid rule-based and model-backed sentiment classifier.
///
/// Holds no per-record state; classifying the same text twice gives the same
/// answer as long as the scorer does.
pub struct ClassificationPipeline {
    normalizer: TextNormalizer,
    corrector: TypoCorrector,
    rules: RuleEngine,
    scorer: Arc<dyn SentimentScorer>,
    negative_threshold: f64,
    fallback_timeout: Duration,
    error_policy: FallbackErrorPolicy,
    batch_size: usize,
}

impl std::fmt::Debug for ClassificationPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassificationPipeline")
            .field("normalizer", &self.normalizer)
            .field("rules", &self.rules)
            .field("scorer", &self.scorer.name())
            .field("negative_threshold", &self.negative_threshold)
            .field("fallback_timeout", &self.fallback_timeout)
            .field("error_policy", &self.error_policy)
            .finish()
    }
}

impl ClassificationPipeline {
    /// Build a pipeline from a validated configuration and a scorer.
    pub fn new(config: &SigapConfig, scorer: Arc<dyn SentimentScorer>) -> Result<Self> {
        config.validate()?;

        Ok(ClassificationPipeline {
            normalizer: TextNormalizer::new()?,
            corrector: TypoCorrector::from_vocabulary(&config.vocabulary, config.typo_threshold),
            rules: RuleEngine::new(&config.vocabulary)?,
            scorer,
            negative_threshold: config.negative_threshold,
            fallback_timeout: config.fallback_timeout(),
            error_policy: config.fallback_error_policy,
            batch_size: config.scorer.batch_size,
        })
    }

    /// The scorer consulted for undecided texts.
    pub fn scorer(&self) -> &Arc<dyn SentimentScorer> {
        &self.scorer
    }

    /// Normalize and correct a raw text.
    pub fn preprocess(&self, raw_text: &str) -> CorrectionResult {
        let normalized = self.normalizer.normalize(raw_text);
        self.corrector.correct_with_details(&normalized)
    }

    /// Run the deterministic stages only.
    pub fn classify_rule(&self, raw_text: &str) -> RuleDecision {
        self.rules.classify(&self.preprocess(raw_text).corrected)
    }

    fn prepare(&self, raw_text: &str) -> Prepared {
        let preprocessed = self.preprocess(raw_text);
        let decision = self.rules.classify(&preprocessed.corrected);
        Prepared {
            raw_text: raw_text.to_string(),
            preprocessed,
            decision,
        }
    }

    /// Classify a single text.
    pub async fn classify(&self, raw_text: &str) -> Result<ClassifiedText> {
        let mut results = self.classify_batch(&[raw_text]).await?;
        results
            .pop()
            .ok_or_else(|| SigapError::other("Pipeline returned no result"))
    }

    /// Classify many texts, preserving input order.
    ///
    /// Rules run in parallel; every undecided text goes to the scorer in
    /// chunks of the configured batch size, each chunk under the fallback
    /// timeout.
    pub async fn classify_batch<S>(&self, texts: &[S]) -> Result<Vec<ClassifiedText>>
    where
        S: AsRef<str> + Sync,
    {
        let prepared: Vec<Prepared> = texts
            .par_iter()
            .map(|text| self.prepare(text.as_ref()))
            .collect();

        let pending: Vec<usize> = prepared
            .iter()
            .enumerate()
            .filter(|(_, p)| p.needs_fallback())
            .map(|(i, _)| i)
            .collect();

        debug!(
            "{} text(s) decided by rules, {} sent to scorer {}",
            prepared.len() - pending.len(),
            pending.len(),
            self.scorer.name()
        );

        let mut sources: Vec<Option<(SentimentLabel, DecisionSource)>> =
            vec![None; prepared.len()];

        for chunk in pending.chunks(self.batch_size) {
            let inputs: Vec<&str> = chunk
                .iter()
                .map(|&i| prepared[i].preprocessed.corrected.as_str())
                .collect();

            match self.score_chunk(&inputs).await {
                Ok(scores) => {
                    for (&i, score) in chunk.iter().zip(scores) {
                        let label = score.to_label(self.negative_threshold);
                        sources[i] = Some((
                            label,
                            DecisionSource::Fallback {
                                label: score.label,
                                score: score.score,
                            },
                        ));
                    }
                }
                Err(e) => match self.error_policy {
                    FallbackErrorPolicy::Fail => return Err(e),
                    FallbackErrorPolicy::Neutral => {
                        warn!(
                            "scorer failed for {} text(s), labelling them neutral: {e}",
                            chunk.len()
                        );
                        let message = e.to_string();
                        for &i in chunk {
                            sources[i] = Some((
                                SentimentLabel::Neutral,
                                DecisionSource::FallbackError {
                                    message: message.clone(),
                                },
                            ));
                        }
                    }
                },
            }
        }

        Ok(prepared
            .into_iter()
            .zip(sources)
            .map(|(p, fallback)| {
                let (label, source) = match fallback {
                    Some(decided) => decided,
                    None => match &p.decision {
                        RuleDecision::Neutral(m) => (
                            SentimentLabel::Neutral,
                            DecisionSource::Rule { matched: m.clone() },
                        ),
                        RuleDecision::Negative(m) => (
                            SentimentLabel::Negative,
                            DecisionSource::Rule { matched: m.clone() },
                        ),
                        RuleDecision::Undecided => {
                            (SentimentLabel::Neutral, DecisionSource::EmptyText)
                        }
                    },
                };
                p.finish(label, source)
            })
            .collect())
    }

    async fn score_chunk(&self, inputs: &[&str]) -> Result<Vec<SentimentScore>> {
        let scores = tokio::time::timeout(self.fallback_timeout, self.scorer.score_batch(inputs))
            .await
            .map_err(|_| {
                SigapError::timeout(format!(
                    "scorer {} did not answer within {:?}",
                    self.scorer.name(),
                    self.fallback_timeout
                ))
            })??;

        if scores.len() != inputs.len() {
            return Err(SigapError::fallback(format!(
                "scorer {} returned {} scores for {} texts",
                self.scorer.name(),
                scores.len(),
                inputs.len()
            )));
        }
        Ok(scores)
    }
}
