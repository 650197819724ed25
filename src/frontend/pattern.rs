//! Anchored pattern matching for the scanner.

use regex::Regex;
use std::fmt;

/// A compiled pattern that only ever matches at the start of its input.
#[derive(Clone)]
pub struct Pattern {
    regex: Regex,
    source: String,
}

impl Pattern {
    /// Compile `pattern` (regex syntax), anchored at the start of the text.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("^(?:{})", pattern))?;
        Ok(Self {
            regex,
            source: pattern.to_string(),
        })
    }

    /// A pattern matching exactly `text`.
    pub fn literal(text: &str) -> Result<Self, regex::Error> {
        Self::new(&regex::escape(text))
    }

    /// Length in bytes of the prefix of `text` matched by this pattern, or 0.
    pub fn match_len(&self, text: &str) -> usize {
        self.regex.find(text).map(|m| m.end()).unwrap_or(0)
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pattern({:?})", self.source)
    }
}
