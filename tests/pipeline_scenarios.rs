//! Integration tests for the classification pipeline with scripted scorers.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use sigap::config::SigapConfig;
use sigap::error::{Result, SigapError};
use sigap::sentiment::{
    ClassificationPipeline, DecisionSource, RuleDecision, SentimentLabel, SentimentScore,
    SentimentScorer,
};
use sigap::vocabulary::Vocabulary;

/// Looks each text up in a table; unknown texts are an error.
struct ScriptedScorer {
    answers: HashMap<String, SentimentScore>,
    batches: AtomicUsize,
}

impl ScriptedScorer {
    fn new(answers: &[(&str, &str, f64)]) -> Self {
        ScriptedScorer {
            answers: answers
                .iter()
                .map(|(text, label, score)| (text.to_string(), SentimentScore::new(*label, *score)))
                .collect(),
            batches: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl SentimentScorer for ScriptedScorer {
    async fn score(&self, text: &str) -> Result<SentimentScore> {
        self.answers
            .get(text)
            .cloned()
            .ok_or_else(|| SigapError::fallback(format!("unexpected text {text:?}")))
    }

    async fn score_batch(&self, texts: &[&str]) -> Result<Vec<SentimentScore>> {
        self.batches.fetch_add(1, Ordering::SeqCst);
        let mut scores = Vec::with_capacity(texts.len());
        for text in texts {
            scores.push(self.score(text).await?);
        }
        Ok(scores)
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Returns fewer scores than asked for.
struct ShortScorer;

#[async_trait]
impl SentimentScorer for ShortScorer {
    async fn score(&self, _text: &str) -> Result<SentimentScore> {
        Ok(SentimentScore::new("negative", 0.9))
    }

    async fn score_batch(&self, _texts: &[&str]) -> Result<Vec<SentimentScore>> {
        Ok(Vec::new())
    }

    fn name(&self) -> &str {
        "short"
    }
}

fn pipeline(scorer: Arc<dyn SentimentScorer>) -> ClassificationPipeline {
    ClassificationPipeline::new(&SigapConfig::default(), scorer).unwrap()
}

#[tokio::test]
async fn test_mixed_survey_batch() -> Result<()> {
    let scorer = Arc::new(ScriptedScorer::new(&[
        ("ayam sedih", "negative", 0.8),
        ("cuaca mendung", "neutral", 0.7),
        ("kecewa sekali", "negative", 0.1),
    ]));
    let pipeline = pipeline(scorer.clone());

    let answers = vec![
        "Sapi saya matiii kemarin!!",
        "saya sedih",
        "Kambing sehat, terima kasih",
        "cuaca mendung",
        "",
        "hari ini panas sekali",
        "kecewa sekali",
    ];
    let results = pipeline.classify_batch(&answers).await?;

    let labels: Vec<u8> = results.iter().map(|r| r.label.as_u8()).collect();
    assert_eq!(labels, vec![1, 1, 0, 0, 0, 0, 0]);
    assert_eq!(scorer.batches.load(Ordering::SeqCst), 1);

    assert_eq!(results[4].source, DecisionSource::EmptyText);
    assert!(matches!(results[1].source, DecisionSource::Fallback { .. }));
    assert!(matches!(results[2].source, DecisionSource::Rule { .. }));

    Ok(())
}

#[tokio::test]
async fn test_custom_threshold() -> Result<()> {
    let mut config = SigapConfig::default();
    config.negative_threshold = 0.05;
    let scorer = Arc::new(ScriptedScorer::new(&[("kecewa sekali", "negative", 0.1)]));
    let pipeline = ClassificationPipeline::new(&config, scorer)?;

    let result = pipeline.classify("kecewa sekali").await?;
    assert_eq!(result.label, SentimentLabel::Negative);
    Ok(())
}

#[tokio::test]
async fn test_score_count_mismatch_is_a_scorer_failure() -> Result<()> {
    let result = pipeline(Arc::new(ShortScorer)).classify("saya sedih").await?;
    assert_eq!(result.label, SentimentLabel::Neutral);
    match result.source {
        DecisionSource::FallbackError { message } => assert!(message.contains("0 scores")),
        other => panic!("unexpected source: {other:?}"),
    }
    Ok(())
}

#[test]
fn test_custom_vocabulary() {
    let mut config = SigapConfig::default();
    config.vocabulary = Vocabulary {
        negative_keywords: vec!["pincang".to_string()],
        positive_keywords: vec![],
        relevant_entities: vec!["kuda".to_string()],
        unrelated_phrases: vec![],
    };
    let pipeline = ClassificationPipeline::new(
        &config,
        Arc::new(sigap::sentiment::NoopScorer::new()),
    )
    .unwrap();

    assert_eq!(
        pipeline.classify_rule("Kuda kami pincaang").label(),
        Some(SentimentLabel::Negative)
    );
    // Default terms are gone.
    assert_eq!(pipeline.classify_rule("sapi mati"), RuleDecision::Undecided);
}

#[test]
fn test_invalid_vocabulary_rejected() {
    let mut config = SigapConfig::default();
    config.vocabulary.negative_keywords.push("Mati!".to_string());
    let result = ClassificationPipeline::new(
        &config,
        Arc::new(sigap::sentiment::NoopScorer::new()),
    );
    assert!(result.is_err());
}
