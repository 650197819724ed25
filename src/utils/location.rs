//! Source location tracking for diagnostics.
//!
//! Tokens carry a [`Span`] so that parse errors can point back at the
//! offending text, and [`SourceMap`] turns those spans into a quoted
//! source line for the command line tool.

use serde::Serialize;
use std::fmt;

/// A position in source code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct SourceLocation {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed, counted in characters)
    pub column: usize,
    /// Byte offset from start of input
    pub offset: usize,
}

impl SourceLocation {
    /// Create a new source location.
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self { line, column, offset }
    }

    /// The location of the first character of the input.
    pub fn start() -> Self {
        Self { line: 1, column: 1, offset: 0 }
    }

    /// The location reached after consuming `text` from here.
    pub fn advanced_by(self, text: &str) -> Self {
        let mut loc = self;
        for c in text.chars() {
            loc.offset += c.len_utf8();
            if c == '\n' {
                loc.line += 1;
                loc.column = 1;
            } else {
                loc.column += 1;
            }
        }
        loc
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open region of source code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Span {
    /// Start location (inclusive)
    pub start: SourceLocation,
    /// End location (exclusive)
    pub end: SourceLocation,
}

impl Span {
    /// Create a span between two locations.
    pub fn new(start: SourceLocation, end: SourceLocation) -> Self {
        Self { start, end }
    }

    /// A zero-width span at `loc`.
    pub fn point(loc: SourceLocation) -> Self {
        Self { start: loc, end: loc }
    }

    /// Span used for nodes that do not come from source text.
    pub fn dummy() -> Self {
        Self::default()
    }

    pub fn is_dummy(&self) -> bool {
        self.start.line == 0 && self.end.line == 0
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.line == self.end.line {
            write!(f, "{}:{}-{}", self.start.line, self.start.column, self.end.column)
        } else {
            write!(
                f,
                "{}:{}-{}:{}",
                self.start.line, self.start.column, self.end.line, self.end.column
            )
        }
    }
}

/// Line index over a source text, used to quote source lines in diagnostics.
#[derive(Debug, Clone)]
pub struct SourceMap<'a> {
    source: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> SourceMap<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .char_indices()
                .filter(|&(_, c)| c == '\n')
                .map(|(i, _)| i + 1),
        );
        Self { source, line_starts }
    }

    /// Get a line of source (1-indexed), without its terminator.
    pub fn line(&self, line_number: usize) -> Option<&'a str> {
        if line_number == 0 || line_number > self.line_starts.len() {
            return None;
        }
        let start = self.line_starts[line_number - 1];
        let end = self
            .line_starts
            .get(line_number)
            .copied()
            .unwrap_or(self.source.len());
        Some(self.source[start..end].trim_end_matches(&['\n', '\r'][..]))
    }

    /// Render the first line of `span` with a caret marker underneath.
    pub fn snippet(&self, span: &Span) -> Option<String> {
        let text = self.line(span.start.line)?;
        let width = if span.start.line == span.end.line {
            span.end.column.saturating_sub(span.start.column).max(1)
        } else {
            1
        };
        let pad = " ".repeat(span.start.column.saturating_sub(1));
        Some(format!("{}\n{}{}", text, pad, "^".repeat(width)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advanced_by_tracks_lines() {
        let loc = SourceLocation::start().advanced_by("ab\ncd");
        assert_eq!(loc.line, 2);
        assert_eq!(loc.column, 3);
        assert_eq!(loc.offset, 5);
    }

    #[test]
    fn test_span_display() {
        let start = SourceLocation::new(1, 5, 4);
        let span = Span::new(start, SourceLocation::new(1, 10, 9));
        assert_eq!(span.to_string(), "1:5-10");

        let span = Span::new(start, SourceLocation::new(3, 10, 30));
        assert_eq!(span.to_string(), "1:5-3:10");
    }

    #[test]
    fn test_source_map_snippet() {
        let map = SourceMap::new("p () {\n  int 5;\n}");
        assert_eq!(map.line(3), Some("}"));
        assert_eq!(map.line(4), None);
        assert_eq!(map.line(2), Some("  int 5;"));

        let span = Span::new(SourceLocation::new(2, 7, 13), SourceLocation::new(2, 8, 14));
        assert_eq!(map.snippet(&span).unwrap(), "  int 5;\n      ^");
    }
}
