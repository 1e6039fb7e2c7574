//! Snippets that point into the expression text a diagnostic is about.

use serde::{Deserialize, Serialize};

/// A piece of input text with a highlighted byte range.
///
/// Guard and assignment expressions are short single-line strings, so a
/// snippet carries the whole string plus the offending range within it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    /// Where the text came from (e.g., `transition 3, when`).
    pub origin: String,
    /// The full text of the expression.
    pub text: String,
    /// Start byte offset of the highlighted range.
    pub start: usize,
    /// End byte offset (exclusive) of the highlighted range.
    pub end: usize,
}

impl Snippet {
    /// Creates a snippet highlighting `start..end` of `text`.
    pub fn new(origin: impl Into<String>, text: impl Into<String>, start: usize, end: usize) -> Self {
        let text = text.into();
        let end = end.min(text.len());
        Self {
            origin: origin.into(),
            start: start.min(end),
            end,
            text,
        }
    }

    /// Creates a snippet that highlights the whole text.
    pub fn whole(origin: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let end = text.len();
        Self::new(origin, text, 0, end)
    }

    /// Returns the 1-based column of the highlighted range.
    pub fn column(&self) -> usize {
        self.text
            .get(..self.start)
            .map_or(self.start, |prefix| prefix.chars().count())
            + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_is_one_based() {
        let s = Snippet::new("transition 0, when", "a = 1 and b == 2", 12, 14);
        assert_eq!(s.column(), 13);
    }

    #[test]
    fn range_is_clamped() {
        let s = Snippet::new("t", "abc", 2, 10);
        assert_eq!(s.end, 3);
        assert_eq!(s.start, 2);
    }

    #[test]
    fn whole_covers_text() {
        let s = Snippet::whole("t", "count = 1");
        assert_eq!((s.start, s.end), (0, 9));
    }
}
