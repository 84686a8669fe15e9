//! Char filter implementations for text normalization.
//!
//! This module provides filters that rewrite a whole text string. They are
//! chained by [`crate::analysis::normalizer::TextNormalizer`] to turn noisy
//! survey answers into a canonical lowercase form.
//!
//! # Available Filters
//!
//! - [`lowercase::LowercaseCharFilter`] - Unicode-aware lowercasing
//! - [`pattern_replace::PatternReplaceCharFilter`] - Regex-based replacement
//! - [`repeat_collapse::RepeatCollapseCharFilter`] - Collapses exaggerated character runs
//! - [`trim::TrimCharFilter`] - Removes surrounding whitespace
//!
//! # Examples
//!
//! ```
//! use sigap::analysis::char_filter::CharFilter;
//! use sigap::analysis::char_filter::repeat_collapse::RepeatCollapseCharFilter;
//!
//! let filter = RepeatCollapseCharFilter::new(3);
//! assert_eq!(filter.filter("tolooong"), "tolong");
//! ```

/// Trait for character filters that transform a text string.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text and return the filtered text.
    fn filter(&self, input: &str) -> String;

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

pub mod lowercase;
pub mod pattern_replace;
pub mod repeat_collapse;
pub mod trim;
