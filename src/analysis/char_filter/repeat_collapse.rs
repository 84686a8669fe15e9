//! Collapses exaggerated spellings such as "matiiii" or "tolooong".

use super::CharFilter;

/// A char filter that collapses runs of identical characters.
///
/// Any run of `min_run` or more identical consecutive characters is replaced
/// by a single occurrence. Shorter runs (for example the double "a" in
/// "maaf") are kept as they are.
#[derive(Clone, Debug)]
pub struct RepeatCollapseCharFilter {
    min_run: usize,
}

impl Default for RepeatCollapseCharFilter {
    fn default() -> Self {
        Self::new(3)
    }
}

impl RepeatCollapseCharFilter {
    /// Create a filter collapsing runs of at least `min_run` characters.
    pub fn new(min_run: usize) -> Self {
        Self {
            min_run: min_run.max(2),
        }
    }

    fn flush(&self, output: &mut String, ch: char, run: usize) {
        if run >= self.min_run {
            output.push(ch);
        } else {
            output.extend(std::iter::repeat_n(ch, run));
        }
    }
}

impl CharFilter for RepeatCollapseCharFilter {
    fn filter(&self, input: &str) -> String {
        let mut output = String::with_capacity(input.len());
        let mut current: Option<(char, usize)> = None;

        for ch in input.chars() {
            current = match current {
                Some((prev, run)) if prev == ch => Some((prev, run + 1)),
                Some((prev, run)) => {
                    self.flush(&mut output, prev, run);
                    Some((ch, 1))
                }
                None => Some((ch, 1)),
            };
        }

        if let Some((prev, run)) = current {
            self.flush(&mut output, prev, run);
        }

        output
    }

    fn name(&self) -> &'static str {
        "repeat_collapse"
    }
}
