//! Domain vocabulary for livestock-health survey answers.
//!
//! The vocabulary is split into four ordered term lists. The rule engine
//! matches all four against normalized text; the typo corrector uses the
//! negative keywords, positive keywords and entities (in that order) as its
//! correction dictionary. Unrelated phrases are never used as correction
//! targets.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SigapError};

/// Ordered domain term lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    /// Words and phrases that signal a sick or dying animal.
    pub negative_keywords: Vec<String>,
    /// Words and phrases that signal the animals are fine.
    pub positive_keywords: Vec<String>,
    /// Livestock nouns that make a text relevant.
    pub relevant_entities: Vec<String>,
    /// Everyday phrases that look negative but are not about livestock.
    pub unrelated_phrases: Vec<String>,
}

fn owned(terms: &[&str]) -> Vec<String> {
    terms.iter().map(|t| t.to_string()).collect()
}

impl Default for Vocabulary {
    fn default() -> Self {
        Vocabulary {
            negative_keywords: owned(&[
                "mati",
                "sakit",
                "lemas",
                "muntah",
                "menggigil",
                "kurus",
                "kenapa",
                "tolong",
                "meninggal",
                "terkapar",
                "demam",
                "lesu",
                "pingsan",
                "tidak mau makan",
                "drop",
                "lemes",
            ]),
            positive_keywords: owned(&[
                "sehat",
                "baik",
                "aman",
                "damai",
                "bagus",
                "stabil",
                "tidak apaapa",
            ]),
            relevant_entities: owned(&[
                "sapi",
                "kerbau",
                "ternak",
                "ayam",
                "domba",
                "bebek",
                "kambing",
                "itik",
                "peternakan",
                "hewan ternak",
            ]),
            unrelated_phrases: owned(&[
                "hari ini panas",
                "belum makan siang",
                "tidak ada makanan enak",
            ]),
        }
    }
}

impl Vocabulary {
    /// Terms the typo corrector may substitute into a text.
    ///
    /// Negative keywords come first, then positive keywords, then entities.
    /// The order decides ties between equally similar terms.
    pub fn correction_terms(&self) -> Vec<String> {
        self.negative_keywords
            .iter()
            .chain(&self.positive_keywords)
            .chain(&self.relevant_entities)
            .cloned()
            .collect()
    }

    /// Total number of terms across all four lists.
    pub fn len(&self) -> usize {
        self.negative_keywords.len()
            + self.positive_keywords.len()
            + self.relevant_entities.len()
            + self.unrelated_phrases.len()
    }

    /// Whether every list is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check that every term can actually match normalized text.
    ///
    /// Normalized text only contains `[a-z0-9 ]` with single spaces and no
    /// surrounding whitespace, so a term outside that shape never matches.
    pub fn validate(&self) -> Result<()> {
        let lists = [
            ("negative_keywords", &self.negative_keywords),
            ("positive_keywords", &self.positive_keywords),
            ("relevant_entities", &self.relevant_entities),
            ("unrelated_phrases", &self.unrelated_phrases),
        ];

        for (name, terms) in lists {
            for term in terms {
                let well_formed = !term.is_empty()
                    && term.trim() == term
                    && !term.contains("  ")
                    && term
                        .chars()
                        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == ' ');
                if !well_formed {
                    return Err(SigapError::configuration(format!(
                        "Vocabulary term {term:?} in {name} must be lowercase [a-z0-9 ] \
                         with single spaces"
                    )));
                }
            }
        }

        Ok(())
    }
}
