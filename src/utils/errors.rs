//! Error types for the translator.
//!
//! Scanning never fails: unmatched input becomes a lexical-error token.
//! Everything that can go wrong surfaces as a [`ParseError`] from the
//! parser, and the first one aborts the whole parse.

use crate::utils::location::Span;
use std::fmt;
use thiserror::Error;

/// Top-level error type for the crate.
#[derive(Error, Debug)]
pub enum MatcError {
    /// Error during parsing (including lexical errors)
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A diagnostic produced while parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The error message
    pub message: String,
    /// Location in source
    pub span: Span,
    /// The kind of parse error
    pub kind: ParseErrorKind,
    /// Description of the expected terminal, when one specific terminal was required
    pub expected: Option<String>,
    /// Description of the terminal actually found
    pub found: Option<String>,
}

impl ParseError {
    /// Create an error with no expected/found annotations.
    pub fn new(kind: ParseErrorKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            kind,
            expected: None,
            found: None,
        }
    }

    /// "Expected X but found Y".
    pub fn expected(expected: &str, found: &str, span: Span) -> Self {
        Self {
            message: format!("Expected {} but found {}", expected, found),
            span,
            kind: ParseErrorKind::ExpectedToken,
            expected: Some(expected.to_string()),
            found: Some(found.to_string()),
        }
    }

    /// A terminal that has no meaning at this point of the grammar.
    pub fn unexpected(found: &str, context: &str, span: Span) -> Self {
        Self {
            message: format!("Unexpected symbol {} while parsing {}", found, context),
            span,
            kind: ParseErrorKind::UnexpectedToken,
            expected: None,
            found: Some(found.to_string()),
        }
    }

    /// Input the scanner could not match.
    pub fn lexical(lexeme: &str, span: Span) -> Self {
        Self {
            message: format!("Unrecognized input `{}`", lexeme),
            span,
            kind: ParseErrorKind::Lexical,
            expected: None,
            found: Some(lexeme.to_string()),
        }
    }

    /// A parser invariant did not hold.
    pub fn internal(message: impl Into<String>, span: Span) -> Self {
        Self::new(ParseErrorKind::Internal, format!("Internal error: {}", message.into()), span)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.span.is_dummy() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{} at {}", self.message, self.span)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A terminal with no meaning in the current position
    UnexpectedToken,
    /// A specific terminal was required and something else was found
    ExpectedToken,
    /// The scanner produced a lexical-error token
    Lexical,
    /// Grammar/parser mismatch; never produced by well-formed token streams
    Internal,
}

/// Result type threaded through every parsing function.
pub type ParseResult<T> = Result<T, ParseError>;

/// Result type using MatcError.
pub type MatcResult<T> = Result<T, MatcError>;
