//! Keyword rule engine.
//!
//! Evaluates an ordered decision list over normalized, corrected text. All
//! matching is substring matching, so multi-word keywords such as
//! "tidak mau makan" match inside longer answers.
//!
//! 1. Any unrelated phrase → neutral.
//! 2. Any positive keyword → neutral.
//! 3. A relevant entity and a negative keyword anywhere in the text → negative.
//! 4. Otherwise undecided.

use aho_corasick::{AhoCorasick, MatchKind};

use crate::error::{Result, SigapError};
use crate::vocabulary::Vocabulary;

use super::types::{RuleDecision, RuleMatch};

/// A term list compiled into one multi-pattern matcher.
struct TermSet {
    terms: Vec<String>,
    matcher: AhoCorasick,
}

impl TermSet {
    fn new(name: &str, terms: &[String]) -> Result<Self> {
        let matcher = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(terms)
            .map_err(|e| {
                SigapError::configuration(format!("Cannot compile {name} matcher: {e}"))
            })?;
        Ok(TermSet {
            terms: terms.to_vec(),
            matcher,
        })
    }

    /// The leftmost term occurring in `text`.
    fn find(&self, text: &str) -> Option<&str> {
        self.matcher
            .find(text)
            .map(|m| self.terms[m.pattern().as_usize()].as_str())
    }
}

/// Ordered keyword/entity rules.
pub struct RuleEngine {
    unrelated: TermSet,
    positive: TermSet,
    entities: TermSet,
    negative: TermSet,
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("unrelated_phrases", &self.unrelated.terms.len())
            .field("positive_keywords", &self.positive.terms.len())
            .field("relevant_entities", &self.entities.terms.len())
            .field("negative_keywords", &self.negative.terms.len())
            .finish()
    }
}

impl RuleEngine {
    /// Compile the rule engine from a vocabulary.
    pub fn new(vocabulary: &Vocabulary) -> Result<Self> {
        Ok(RuleEngine {
            unrelated: TermSet::new("unrelated_phrases", &vocabulary.unrelated_phrases)?,
            positive: TermSet::new("positive_keywords", &vocabulary.positive_keywords)?,
            entities: TermSet::new("relevant_entities", &vocabulary.relevant_entities)?,
            negative: TermSet::new("negative_keywords", &vocabulary.negative_keywords)?,
        })
    }

    /// Apply the decision list; the first matching rule wins.
    pub fn classify(&self, text: &str) -> RuleDecision {
        if let Some(phrase) = self.unrelated.find(text) {
            return RuleDecision::Neutral(RuleMatch::UnrelatedPhrase {
                phrase: phrase.to_string(),
            });
        }

        if let Some(keyword) = self.positive.find(text) {
            return RuleDecision::Neutral(RuleMatch::PositiveKeyword {
                keyword: keyword.to_string(),
            });
        }

        if let Some(entity) = self.entities.find(text)
            && let Some(keyword) = self.negative.find(text)
        {
            return RuleDecision::Negative(RuleMatch::EntityWithNegative {
                entity: entity.to_string(),
                keyword: keyword.to_string(),
            });
        }

        RuleDecision::Undecided
    }
}
