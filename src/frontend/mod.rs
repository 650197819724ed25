//! Frontend: Scanner, Parser, and AST for the matrix language.
//!
//! This module turns source text into an AST and back.
//!
//! ## Language Overview
//!
//! A program is a name, an empty parameter list and a block of
//! statements. Matrices are a built-in type:
//!
//! ```text
//! main () {
//!     matrix m [ 3 : 3 ] i : j = i * 3 + j;
//!     repeat (k = 0 to 2) {
//!         print(m[k : k]);
//!     }
//! }
//! ```

pub mod token;
pub mod pattern;
pub mod scanner;
pub mod dispatch;
pub mod ast;
pub mod parser;
pub mod unparse;

// Re-exports
pub use scanner::{RuleTable, Scanner};
pub use parser::Parser;
pub use ast::*;
pub use token::{Token, TokenKind};
pub use unparse::Unparse;
pub use crate::utils::errors::{ParseError, ParseResult};

/// Scan source code with the standard rule table.
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    Scanner::new().scan(source)
}

/// Parse a complete program.
pub fn parse(source: &str) -> ParseResult<Program> {
    Parser::from_source(source)?.parse_program()
}

/// Parse a single statement that spans the whole input.
pub fn parse_statement(source: &str) -> ParseResult<Stmt> {
    let mut parser = Parser::from_source(source)?;
    let stmt = parser.parse_stmt()?;
    parser.expect_end()?;
    Ok(stmt)
}

/// Parse a statement sequence that spans the whole input.
pub fn parse_statements(source: &str) -> ParseResult<Stmts> {
    let mut parser = Parser::from_source(source)?;
    let stmts = parser.parse_stmts()?;
    parser.expect_end()?;
    Ok(stmts)
}

/// Parse a single expression that spans the whole input.
pub fn parse_expression(source: &str) -> ParseResult<Expr> {
    let mut parser = Parser::from_source(source)?;
    let expr = parser.parse_expr(dispatch::binding_power::NONE)?;
    parser.expect_end()?;
    Ok(expr)
}
