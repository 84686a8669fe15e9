//! Lowercase char filter implementation.

use super::CharFilter;

/// A char filter that converts text to lowercase.
///
/// ASCII-only input takes the cheap byte-wise path; anything else falls
/// back to Unicode-aware lowercasing.
#[derive(Clone, Debug, Default)]
pub struct LowercaseCharFilter;

impl LowercaseCharFilter {
    /// Create a new lowercase char filter.
    pub fn new() -> Self {
        LowercaseCharFilter
    }
}

impl CharFilter for LowercaseCharFilter {
    fn filter(&self, input: &str) -> String {
        if input.is_ascii() {
            input.to_ascii_lowercase()
        } else {
            input.to_lowercase()
        }
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}
