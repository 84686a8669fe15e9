//! Greedy, token-local typo corrector.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::util::similarity::extract_one;
use crate::vocabulary::Vocabulary;

/// Default minimum similarity score for a substitution.
pub const DEFAULT_TYPO_THRESHOLD: f64 = 85.0;

/// A single token substitution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Correction {
    /// Token position in the input.
    pub position: usize,
    /// Token as it appeared in the input.
    pub original: String,
    /// Vocabulary term that replaced it.
    pub replacement: String,
    /// Similarity score of the substitution (0–100).
    pub score: f64,
}

/// Result of correcting one text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionResult {
    /// Input text.
    pub original: String,
    /// Output text, tokens joined by single spaces.
    pub corrected: String,
    /// Tokens whose content changed.
    pub corrections: Vec<Correction>,
}

impl CorrectionResult {
    /// Whether any token changed.
    pub fn has_corrections(&self) -> bool {
        !self.corrections.is_empty()
    }
}

/// Replaces each whitespace-delimited token with its best vocabulary match.
///
/// Matching is per token with no sentence context and no backtracking. A
/// token is replaced only when the best partial-similarity score reaches the
/// threshold; ties go to the term listed first. Output has exactly one slot
/// per input token, in input order, although a slot may hold a multi-word
/// term such as "tidak mau makan".
#[derive(Debug, Clone)]
pub struct TypoCorrector {
    terms: Vec<String>,
    threshold: f64,
}

impl TypoCorrector {
    /// Create a corrector over an explicit, ordered term list.
    pub fn new(terms: Vec<String>, threshold: f64) -> Self {
        TypoCorrector { terms, threshold }
    }

    /// Create a corrector from a vocabulary's correction terms.
    pub fn from_vocabulary(vocabulary: &Vocabulary, threshold: f64) -> Self {
        Self::new(vocabulary.correction_terms(), threshold)
    }

    /// The correction dictionary, in tie-break order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Minimum score for a substitution.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Correct a text and return only the corrected string.
    pub fn correct(&self, text: &str) -> String {
        self.correct_with_details(text).corrected
    }

    /// Correct a text and report every substitution.
    pub fn correct_with_details(&self, text: &str) -> CorrectionResult {
        let mut corrections = Vec::new();
        let mut slots = Vec::new();

        for (position, token) in text.split_whitespace().enumerate() {
            let best = extract_one(token, self.terms.iter().map(String::as_str));

            match best {
                Some(found) if found.score >= self.threshold => {
                    if found.choice != token {
                        debug!(
                            "corrected {token:?} -> {:?} (score {:.1})",
                            found.choice, found.score
                        );
                        corrections.push(Correction {
                            position,
                            original: token.to_string(),
                            replacement: found.choice.to_string(),
                            score: found.score,
                        });
                    }
                    slots.push(found.choice);
                }
                _ => slots.push(token),
            }
        }

        CorrectionResult {
            original: text.to_string(),
            corrected: slots.join(" "),
            corrections,
        }
    }
}
