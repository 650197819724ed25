//! Precedence dispatch for expression parsing.
//!
//! Tokens stay plain data. This module pairs every token kind with the
//! parsing behavior it has in an expression: a prefix action (the token
//! starts an expression), an infix action (the token follows a complete
//! expression), and a left binding power that drives the precedence
//! climbing loop in [`Parser::parse_expr`].

use crate::frontend::ast::{BinaryOp, Expr};
use crate::frontend::parser::Parser;
use crate::frontend::token::{Token, TokenKind};
use crate::utils::errors::ParseResult;
use crate::utils::location::Span;
use std::fmt;

/// Binding powers, loosest first. Zero stops the climbing loop.
pub mod binding_power {
    pub const NONE: u8 = 0;
    pub const OR: u8 = 10;
    pub const AND: u8 = 20;
    pub const RELATIONAL: u8 = 30;
    pub const ADDITIVE: u8 = 40;
    pub const MULTIPLICATIVE: u8 = 50;
    /// Right-hand bound for the operand of prefix `!`.
    pub const PREFIX_NOT: u8 = 60;
}

/// Parses an expression that starts at the current token.
pub type PrefixFn<'src> = fn(&mut Parser<'src>) -> ParseResult<Expr>;

/// Parses the rest of an expression whose left operand is already built.
pub type InfixFn<'src> = fn(&mut Parser<'src>, Expr) -> ParseResult<Expr>;

/// The expression behavior of one token kind.
#[derive(Clone, Copy)]
pub struct Dispatch<'src> {
    pub prefix: Option<PrefixFn<'src>>,
    pub infix: Option<InfixFn<'src>>,
    pub lbp: u8,
}

impl<'src> Dispatch<'src> {
    const NONE: Self = Self { prefix: None, infix: None, lbp: binding_power::NONE };

    fn prefix(f: PrefixFn<'src>) -> Self {
        Self { prefix: Some(f), ..Self::NONE }
    }

    fn infix(f: InfixFn<'src>, lbp: u8) -> Self {
        Self { infix: Some(f), lbp, ..Self::NONE }
    }
}

impl fmt::Debug for Dispatch<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatch")
            .field("prefix", &self.prefix.is_some())
            .field("infix", &self.infix.is_some())
            .field("lbp", &self.lbp)
            .finish()
    }
}

/// The dispatch table, keyed by token kind.
pub fn lookup<'src>(kind: TokenKind) -> Dispatch<'src> {
    use binding_power as bp;
    use TokenKind::*;

    match kind {
        IntConst => Dispatch::prefix(Parser::parse_int_const),
        FloatConst => Dispatch::prefix(Parser::parse_float_const),
        StringConst => Dispatch::prefix(Parser::parse_string_const),
        TrueKwd | FalseKwd => Dispatch::prefix(Parser::parse_bool_const),
        VariableName => Dispatch::prefix(Parser::parse_variable_name),
        LeftParen => Dispatch::prefix(Parser::parse_nested_expr),
        IfKwd => Dispatch::prefix(Parser::parse_if_expr),
        LetKwd => Dispatch::prefix(Parser::parse_let_expr),
        NotOp => Dispatch::prefix(Parser::parse_not_expr),

        OrOp => Dispatch::infix(Parser::parse_logical, bp::OR),
        AndOp => Dispatch::infix(Parser::parse_logical, bp::AND),
        PlusSign | Dash => Dispatch::infix(Parser::parse_arithmetic, bp::ADDITIVE),
        Star | ForwardSlash => Dispatch::infix(Parser::parse_arithmetic, bp::MULTIPLICATIVE),
        kind if kind.is_relational() => Dispatch::infix(Parser::parse_relational, bp::RELATIONAL),

        _ => Dispatch::NONE,
    }
}

/// The operator tag built by an infix token.
pub fn binary_op(kind: TokenKind) -> Option<BinaryOp> {
    use TokenKind::*;
    let op = match kind {
        PlusSign => BinaryOp::Add,
        Dash => BinaryOp::Sub,
        Star => BinaryOp::Mul,
        ForwardSlash => BinaryOp::Div,
        LessThan => BinaryOp::Lt,
        LessThanEqual => BinaryOp::Le,
        GreaterThan => BinaryOp::Gt,
        GreaterThanEqual => BinaryOp::Ge,
        EqualsEquals => BinaryOp::Eq,
        NotEquals => BinaryOp::Ne,
        AndOp => BinaryOp::And,
        OrOp => BinaryOp::Or,
        _ => return None,
    };
    Some(op)
}

/// A scanned token together with its expression behavior.
#[derive(Debug, Clone, Copy)]
pub struct ExtToken<'src> {
    token: Token<'src>,
    dispatch: Dispatch<'src>,
}

impl<'src> ExtToken<'src> {
    pub fn extend(token: Token<'src>) -> Self {
        Self {
            dispatch: lookup(token.kind),
            token,
        }
    }

    pub fn token(&self) -> &Token<'src> {
        &self.token
    }

    pub fn kind(&self) -> TokenKind {
        self.token.kind
    }

    pub fn lexeme(&self) -> &'src str {
        self.token.lexeme
    }

    pub fn span(&self) -> Span {
        self.token.span
    }

    /// Parse an expression that begins with this token.
    pub fn prefix(&self, parser: &mut Parser<'src>) -> ParseResult<Expr> {
        match self.dispatch.prefix {
            Some(parse) => parse(parser),
            None => Err(parser.unexpected("an expression")),
        }
    }

    /// Parse the continuation of `left` with this token as the operator.
    pub fn infix(&self, parser: &mut Parser<'src>, left: Expr) -> ParseResult<Expr> {
        match self.dispatch.infix {
            Some(parse) => parse(parser, left),
            None => Err(parser.unexpected("an operator")),
        }
    }

    pub fn left_binding_power(&self) -> u8 {
        self.dispatch.lbp
    }

    /// Diagnostic label for this token's kind.
    pub fn description(&self) -> &'static str {
        self.token.kind.description()
    }
}

/// Wrap every scanned token with its dispatch entry.
pub fn extend_tokens(tokens: Vec<Token<'_>>) -> Vec<ExtToken<'_>> {
    tokens.into_iter().map(ExtToken::extend).collect()
}
