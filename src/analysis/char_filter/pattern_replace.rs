use regex::Regex;

use super::CharFilter;
use crate::error::{Result, SigapError};

/// Pattern matching every character outside lowercase ASCII letters, digits and space.
pub const NON_ALPHANUMERIC_PATTERN: &str = r"[^a-z0-9 ]";

/// A char filter that replaces text matching a regex pattern.
pub struct PatternReplaceCharFilter {
    pattern: Regex,
    replacement: String,
}

impl std::fmt::Debug for PatternReplaceCharFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternReplaceCharFilter")
            .field("pattern", &self.pattern.as_str())
            .field("replacement", &self.replacement)
            .finish()
    }
}

impl PatternReplaceCharFilter {
    /// Create a new pattern replace char filter.
    pub fn new(pattern: &str, replacement: &str) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern).map_err(|e| {
                SigapError::configuration(format!("Invalid pattern {pattern:?}: {e}"))
            })?,
            replacement: replacement.to_string(),
        })
    }

    /// Create a filter that deletes everything but `[a-z0-9 ]`.
    pub fn strip_non_alphanumeric() -> Result<Self> {
        Self::new(NON_ALPHANUMERIC_PATTERN, "")
    }
}

impl CharFilter for PatternReplaceCharFilter {
    fn filter(&self, input: &str) -> String {
        self.pattern
            .replace_all(input, self.replacement.as_str())
            .into_owned()
    }

    fn name(&self) -> &'static str {
        "pattern_replace"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_replace() {
        let filter = PatternReplaceCharFilter::new(r"\d+", "NUM").unwrap();
        assert_eq!(filter.filter("umur 2 tahun"), "umur NUM tahun");
    }

    #[test]
    fn test_strip_non_alphanumeric() {
        let filter = PatternReplaceCharFilter::strip_non_alphanumeric().unwrap();
        assert_eq!(filter.filter("sapi-ku sakit!!! (3 ekor)"), "sapiku sakit 3 ekor");
        assert_eq!(filter.filter("Tabs\tand\nnewlines"), "absandnewlines");
        assert_eq!(filter.filter("é ü"), " ");
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(PatternReplaceCharFilter::new("(unclosed", "").is_err());
    }
}
