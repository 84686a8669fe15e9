//! Text normalizer that chains char filters.
//!
//! The normalizer turns a raw survey answer into the canonical form every
//! later stage works on: lowercase ASCII letters, digits and single spaces,
//! with exaggerated character runs collapsed.
//!
//! # Architecture
//!
//! The default chain applies, in order:
//! 1. [`LowercaseCharFilter`]
//! 2. [`PatternReplaceCharFilter::strip_non_alphanumeric`]
//! 3. [`RepeatCollapseCharFilter`] (runs of 3 or more)
//! 4. [`TrimCharFilter`]
//!
//! Stripping happens before collapsing and trimming happens last, so the
//! output never contains a disallowed character, a run of three identical
//! characters or surrounding whitespace. Normalizing an already normalized
//! string is therefore a no-op.
//!
//! # Examples
//!
//! ```
//! use sigap::analysis::normalizer::TextNormalizer;
//!
//! let normalizer = TextNormalizer::new().unwrap();
//! assert_eq!(normalizer.normalize("  Matiiii SAPI!!! "), "mati sapi");
//! ```

use std::sync::Arc;

use crate::analysis::char_filter::CharFilter;
use crate::analysis::char_filter::lowercase::LowercaseCharFilter;
use crate::analysis::char_filter::pattern_replace::PatternReplaceCharFilter;
use crate::analysis::char_filter::repeat_collapse::RepeatCollapseCharFilter;
use crate::analysis::char_filter::trim::TrimCharFilter;
use crate::error::Result;

/// A configurable chain of char filters.
#[derive(Clone)]
pub struct TextNormalizer {
    char_filters: Vec<Arc<dyn CharFilter>>,
}

impl std::fmt::Debug for TextNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.char_filters.iter().map(|f| f.name()).collect();
        f.debug_struct("TextNormalizer")
            .field("char_filters", &names)
            .finish()
    }
}

impl TextNormalizer {
    /// Create the default survey-answer normalizer.
    pub fn new() -> Result<Self> {
        Ok(Self::empty()
            .add_char_filter(Arc::new(LowercaseCharFilter::new()))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::strip_non_alphanumeric()?))
            .add_char_filter(Arc::new(RepeatCollapseCharFilter::new(3)))
            .add_char_filter(Arc::new(TrimCharFilter::new())))
    }

    /// Create a normalizer with no filters (identity).
    pub fn empty() -> Self {
        TextNormalizer {
            char_filters: Vec::new(),
        }
    }

    /// Add a char filter to the end of the chain.
    pub fn add_char_filter(mut self, char_filter: Arc<dyn CharFilter>) -> Self {
        self.char_filters.push(char_filter);
        self
    }

    /// Get the char filters used by this normalizer.
    pub fn char_filters(&self) -> &[Arc<dyn CharFilter>] {
        &self.char_filters
    }

    /// Normalize a text. Total over every input, including the empty string.
    pub fn normalize(&self, text: &str) -> String {
        self.char_filters
            .iter()
            .fold(text.to_string(), |acc, filter| filter.filter(&acc))
    }
}
