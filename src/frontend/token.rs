//! Token types for the matrix language.
//!
//! The scanner produces a flat, owned sequence of [`Token`]s that always
//! ends with a single [`TokenKind::EndOfFile`] sentinel.

use crate::utils::location::Span;
use serde::Serialize;
use std::fmt;

/// A token in the source code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token<'src> {
    /// The kind of token
    pub kind: TokenKind,
    /// The matched text, borrowed from the source
    pub lexeme: &'src str,
    /// The source span
    pub span: Span,
    /// Position in the token sequence
    pub index: usize,
}

impl<'src> Token<'src> {
    /// Create a new token.
    pub fn new(kind: TokenKind, lexeme: &'src str, span: Span, index: usize) -> Self {
        Self { kind, lexeme, span, index }
    }

    /// Check if this is the end-of-input sentinel.
    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::EndOfFile)
    }

    /// Check if this token marks unmatched input.
    pub fn is_error(&self) -> bool {
        matches!(self.kind, TokenKind::LexicalError)
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self.kind, self.lexeme)
    }
}

/// The kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    // Keywords
    /// `int`
    IntKwd,
    /// `float`
    FloatKwd,
    /// `boolean`
    BoolKwd,
    /// `True`
    TrueKwd,
    /// `False`
    FalseKwd,
    /// `string`
    StringKwd,
    /// `matrix`
    MatrixKwd,
    /// `let`
    LetKwd,
    /// `in`
    InKwd,
    /// `end`
    EndKwd,
    /// `if`
    IfKwd,
    /// `then`
    ThenKwd,
    /// `else`
    ElseKwd,
    /// `repeat`
    RepeatKwd,
    /// `while`
    WhileKwd,
    /// `print`
    PrintKwd,
    /// `to`
    ToKwd,

    // Constants
    /// Integer constant: `42`
    IntConst,
    /// Float constant: `4.2`
    FloatConst,
    /// String constant: `"text"`
    StringConst,

    /// Identifier
    VariableName,

    // Punctuation
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `{`
    LeftCurly,
    /// `}`
    RightCurly,
    /// `[`
    LeftSquare,
    /// `]`
    RightSquare,
    /// `;`
    SemiColon,
    /// `:`
    Colon,

    // Operators
    /// `=`
    Assign,
    /// `+`
    PlusSign,
    /// `*`
    Star,
    /// `-`
    Dash,
    /// `/`
    ForwardSlash,
    /// `<`
    LessThan,
    /// `<=`
    LessThanEqual,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterThanEqual,
    /// `==`
    EqualsEquals,
    /// `!=`
    NotEquals,
    /// `&&`
    AndOp,
    /// `||`
    OrOp,
    /// `!`
    NotOp,

    // Special
    /// End-of-input sentinel
    EndOfFile,
    /// Input that matched no scanner rule
    LexicalError,
}

impl TokenKind {
    /// Check if this is a relational operator.
    pub fn is_relational(&self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            LessThan | LessThanEqual | GreaterThan | GreaterThanEqual | EqualsEquals | NotEquals
        )
    }

    /// Check if this kind starts a declaration.
    pub fn is_type_keyword(&self) -> bool {
        use TokenKind::*;
        matches!(self, IntKwd | FloatKwd | StringKwd | BoolKwd | MatrixKwd)
    }

    /// Human-readable label used in diagnostics, independent of the lexeme.
    pub fn description(&self) -> &'static str {
        use TokenKind::*;
        match self {
            IntKwd => "'int'",
            FloatKwd => "'float'",
            BoolKwd => "'boolean'",
            TrueKwd => "'True'",
            FalseKwd => "'False'",
            StringKwd => "'string'",
            MatrixKwd => "'matrix'",
            LetKwd => "'let'",
            InKwd => "'in'",
            EndKwd => "'end'",
            IfKwd => "'if'",
            ThenKwd => "'then'",
            ElseKwd => "'else'",
            RepeatKwd => "'repeat'",
            WhileKwd => "'while'",
            PrintKwd => "'print'",
            ToKwd => "'to'",
            IntConst => "integer constant",
            FloatConst => "float constant",
            StringConst => "string constant",
            VariableName => "variable name",
            LeftParen => "'('",
            RightParen => "')'",
            LeftCurly => "'{'",
            RightCurly => "'}'",
            LeftSquare => "'['",
            RightSquare => "']'",
            SemiColon => "';'",
            Colon => "':'",
            Assign => "'='",
            PlusSign => "'+'",
            Star => "'*'",
            Dash => "'-'",
            ForwardSlash => "'/'",
            LessThan => "'<'",
            LessThanEqual => "'<='",
            GreaterThan => "'>'",
            GreaterThanEqual => "'>='",
            EqualsEquals => "'=='",
            NotEquals => "'!='",
            AndOp => "'&&'",
            OrOp => "'||'",
            NotOp => "'!'",
            EndOfFile => "end of file",
            LexicalError => "lexical error",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
