//! Trim char filter implementation.

use super::CharFilter;

/// A char filter that removes leading and trailing whitespace.
#[derive(Clone, Debug, Default)]
pub struct TrimCharFilter;

impl TrimCharFilter {
    /// Create a new trim char filter.
    pub fn new() -> Self {
        TrimCharFilter
    }
}

impl CharFilter for TrimCharFilter {
    fn filter(&self, input: &str) -> String {
        input.trim().to_string()
    }

    fn name(&self) -> &'static str {
        "trim"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_char_filter() {
        let filter = TrimCharFilter::new();
        assert_eq!(filter.filter("  sapi sakit \n"), "sapi sakit");
        assert_eq!(filter.filter("   "), "");
        assert_eq!(filter.name(), "trim");
    }
}
