//! Common types for sentiment classification.

use serde::{Deserialize, Serialize};

use crate::spelling::corrector::Correction;

/// Binary label written to the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    /// Neutral, positive or off-topic answer (0).
    Neutral,
    /// Alarming answer about animal health (1).
    Negative,
}

impl SentimentLabel {
    /// Numeric value stored in the label column.
    pub fn as_u8(self) -> u8 {
        match self {
            SentimentLabel::Neutral => 0,
            SentimentLabel::Negative => 1,
        }
    }

    /// Whether this is the negative label.
    pub fn is_negative(self) -> bool {
        self == SentimentLabel::Negative
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// The rule that fired, with the term(s) that triggered it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum RuleMatch {
    /// Rule 1: an everyday phrase unrelated to livestock.
    UnrelatedPhrase { phrase: String },
    /// Rule 2: a positive keyword.
    PositiveKeyword { keyword: String },
    /// Rule 3: a livestock entity together with a negative keyword.
    EntityWithNegative { entity: String, keyword: String },
}

/// Outcome of the rule engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum RuleDecision {
    /// Decided neutral by rule 1 or 2.
    Neutral(RuleMatch),
    /// Decided negative by rule 3.
    Negative(RuleMatch),
    /// No rule applied; the fallback scorer decides.
    Undecided,
}

impl RuleDecision {
    /// The decided label, or `None` when undecided.
    pub fn label(&self) -> Option<SentimentLabel> {
        match self {
            RuleDecision::Neutral(_) => Some(SentimentLabel::Neutral),
            RuleDecision::Negative(_) => Some(SentimentLabel::Negative),
            RuleDecision::Undecided => None,
        }
    }

    /// Whether no rule applied.
    pub fn is_undecided(&self) -> bool {
        matches!(self, RuleDecision::Undecided)
    }
}

/// Raw output of a fallback scorer for one text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    /// Label predicted by the model (for example "negative").
    pub label: String,
    /// Confidence of that label in `[0, 1]`.
    pub score: f64,
}

impl SentimentScore {
    /// Create a new score.
    pub fn new<S: Into<String>>(label: S, score: f64) -> Self {
        SentimentScore {
            label: label.into(),
            score,
        }
    }

    /// Whether the predicted label names negative sentiment (case-insensitive).
    pub fn is_negative_label(&self) -> bool {
        self.label.trim().eq_ignore_ascii_case("negative")
    }

    /// Map the score to a binary label.
    ///
    /// Negative only when the label is negative and the confidence is
    /// strictly above `threshold`.
    pub fn to_label(&self, threshold: f64) -> SentimentLabel {
        if self.is_negative_label() && self.score > threshold {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

/// Which stage produced a record's label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum DecisionSource {
    /// A keyword rule decided.
    Rule { matched: RuleMatch },
    /// The fallback scorer decided.
    Fallback { label: String, score: f64 },
    /// The fallback scorer failed and the neutral policy applied.
    FallbackError { message: String },
    /// Nothing was left after normalization.
    EmptyText,
}

/// A classified text with everything needed to explain the label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedText {
    /// Text as supplied.
    pub raw_text: String,
    /// Normalized and corrected text.
    pub preprocessed_text: String,
    /// Final label.
    pub label: SentimentLabel,
    /// Stage that decided the label.
    pub source: DecisionSource,
    /// Typo substitutions applied during preprocessing.
    pub corrections: Vec<Correction>,
}

impl ClassifiedText {
    /// Whether the fallback scorer was consulted for this text.
    pub fn used_fallback(&self) -> bool {
        matches!(
            self.source,
            DecisionSource::Fallback { .. } | DecisionSource::FallbackError { .. }
        )
    }
}
