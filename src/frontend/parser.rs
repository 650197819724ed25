//! Parser for the matrix language.
//!
//! Statements are parsed by recursive descent, one method per
//! non-terminal. Expressions are parsed by precedence climbing over the
//! dispatch table in [`crate::frontend::dispatch`]: the current token's
//! prefix action builds a left operand, and infix actions extend it while
//! the next token binds tighter than the caller's minimum.
//!
//! Parsing is fail-fast. The first error is returned and the partial tree
//! is dropped.

use crate::frontend::ast::*;
use crate::frontend::dispatch::{binary_op, binding_power, extend_tokens, ExtToken};
use crate::frontend::scanner::Scanner;
use crate::frontend::token::{Token, TokenKind};
use crate::utils::errors::{ParseError, ParseResult};
use crate::utils::location::Span;
use log::{debug, trace};

/// A parser for the matrix language.
pub struct Parser<'src> {
    tokens: Vec<ExtToken<'src>>,
    current: usize,
}

impl<'src> Parser<'src> {
    /// Create a parser over a scanned token sequence.
    ///
    /// The sequence must end with exactly one end-of-file token.
    pub fn new(tokens: Vec<Token<'src>>) -> ParseResult<Self> {
        match tokens.iter().position(Token::is_eof) {
            Some(pos) if pos + 1 == tokens.len() => {}
            Some(pos) => {
                return Err(ParseError::internal(
                    "end of file before the end of the token stream",
                    tokens[pos].span,
                ))
            }
            None => {
                let span = tokens.last().map(|t| t.span).unwrap_or_else(Span::dummy);
                return Err(ParseError::internal("token stream not terminated", span));
            }
        }

        Ok(Self {
            tokens: extend_tokens(tokens),
            current: 0,
        })
    }

    /// Scan `source` with the standard rules and create a parser over it.
    pub fn from_source(source: &'src str) -> ParseResult<Self> {
        Self::new(Scanner::new().scan(source))
    }

    /// Parse a complete program, up to and including end of file.
    pub fn parse_program(&mut self) -> ParseResult<Program> {
        let name = self.consume_name()?;
        self.consume(TokenKind::LeftParen)?;
        self.consume(TokenKind::RightParen)?;
        self.consume(TokenKind::LeftCurly)?;
        let stmts = self.parse_stmts()?;
        self.consume(TokenKind::RightCurly)?;
        self.expect_end()?;

        debug!("Parsed program `{}` ({} top-level statements)", name, stmts.len());
        Ok(Program::new(name, stmts))
    }

    /// Parse statements until `}`, `in` or end of file.
    pub fn parse_stmts(&mut self) -> ParseResult<Stmts> {
        let mut stmts = Vec::new();
        while !self.at_stmts_end() {
            stmts.push(self.parse_stmt()?);
        }
        Ok(Stmts::from_vec(stmts))
    }

    fn at_stmts_end(&self) -> bool {
        matches!(
            self.current().kind(),
            TokenKind::RightCurly | TokenKind::InKwd | TokenKind::EndOfFile
        )
    }

    /// Parse one statement, dispatching on its first token.
    pub fn parse_stmt(&mut self) -> ParseResult<Stmt> {
        let kind = self.current().kind();
        trace!("Statement starting at {}", self.current().span());

        match kind {
            k if k.is_type_keyword() => Ok(Stmt::Decl(self.parse_decl()?)),
            TokenKind::LeftCurly => self.parse_block(),
            TokenKind::IfKwd => self.parse_if_stmt(),
            TokenKind::VariableName => self.parse_assignment(),
            TokenKind::PrintKwd => self.parse_print(),
            TokenKind::RepeatKwd => self.parse_repeat(),
            TokenKind::WhileKwd => self.parse_while(),
            TokenKind::SemiColon => {
                self.advance();
                Ok(Stmt::Empty)
            }
            _ => Err(self.unexpected("a statement")),
        }
    }

    fn parse_block(&mut self) -> ParseResult<Stmt> {
        self.consume(TokenKind::LeftCurly)?;
        let stmts = self.parse_stmts()?;
        self.consume(TokenKind::RightCurly)?;
        Ok(Stmt::Block(stmts))
    }

    fn parse_if_stmt(&mut self) -> ParseResult<Stmt> {
        self.consume(TokenKind::IfKwd)?;
        let condition = self.parse_condition()?;
        let then_branch = Box::new(self.parse_stmt()?);

        // A dangling else binds to the innermost open if.
        if self.match_token(TokenKind::ElseKwd) {
            let else_branch = Box::new(self.parse_stmt()?);
            Ok(Stmt::IfElse { condition, then_branch, else_branch })
        } else {
            Ok(Stmt::If { condition, then_branch })
        }
    }

    fn parse_assignment(&mut self) -> ParseResult<Stmt> {
        let name = self.consume_name()?;

        if self.match_token(TokenKind::LeftSquare) {
            let (row, col) = self.parse_indices()?;
            self.consume(TokenKind::Assign)?;
            let value = self.parse_expr(binding_power::NONE)?;
            self.consume(TokenKind::SemiColon)?;
            return Ok(Stmt::AssignMatrix { name, row, col, value });
        }

        self.consume(TokenKind::Assign)?;
        let value = self.parse_expr(binding_power::NONE)?;
        self.consume(TokenKind::SemiColon)?;
        Ok(Stmt::Assign { name, value })
    }

    fn parse_print(&mut self) -> ParseResult<Stmt> {
        self.consume(TokenKind::PrintKwd)?;
        self.consume(TokenKind::LeftParen)?;
        let value = self.parse_expr(binding_power::NONE)?;
        self.consume(TokenKind::RightParen)?;
        self.consume(TokenKind::SemiColon)?;
        Ok(Stmt::Print(value))
    }

    fn parse_repeat(&mut self) -> ParseResult<Stmt> {
        self.consume(TokenKind::RepeatKwd)?;
        self.consume(TokenKind::LeftParen)?;
        let var = self.consume_name()?;
        self.consume(TokenKind::Assign)?;
        let start = self.parse_expr(binding_power::NONE)?;
        self.consume(TokenKind::ToKwd)?;
        let end = self.parse_expr(binding_power::NONE)?;
        self.consume(TokenKind::RightParen)?;
        let body = Box::new(self.parse_stmt()?);
        Ok(Stmt::Repeat { var, start, end, body })
    }

    fn parse_while(&mut self) -> ParseResult<Stmt> {
        self.consume(TokenKind::WhileKwd)?;
        let condition = self.parse_condition()?;
        let body = Box::new(self.parse_stmt()?);
        Ok(Stmt::While { condition, body })
    }

    /// `( expr )` after `if` or `while`.
    fn parse_condition(&mut self) -> ParseResult<Expr> {
        self.consume(TokenKind::LeftParen)?;
        let condition = self.parse_expr(binding_power::NONE)?;
        self.consume(TokenKind::RightParen)?;
        Ok(condition)
    }

    /// `row : col ]`, after the opening `[` has been consumed.
    fn parse_indices(&mut self) -> ParseResult<(Expr, Expr)> {
        let row = self.parse_expr(binding_power::NONE)?;
        self.consume(TokenKind::Colon)?;
        let col = self.parse_expr(binding_power::NONE)?;
        self.consume(TokenKind::RightSquare)?;
        Ok((row, col))
    }

    /// Parse a declaration starting at a type keyword.
    pub fn parse_decl(&mut self) -> ParseResult<Decl> {
        if self.check(TokenKind::MatrixKwd) {
            self.parse_matrix_decl()
        } else {
            self.parse_standard_decl()
        }
    }

    fn parse_matrix_decl(&mut self) -> ParseResult<Decl> {
        self.consume(TokenKind::MatrixKwd)?;
        let name = self.consume_name()?;

        let decl = if self.match_token(TokenKind::LeftSquare) {
            let (rows, cols) = self.parse_indices()?;
            let row_var = self.consume_name()?;
            self.consume(TokenKind::Colon)?;
            let col_var = self.consume_name()?;
            self.consume(TokenKind::Assign)?;
            let init = self.parse_expr(binding_power::NONE)?;
            Decl::LongMatrix { name, rows, cols, row_var, col_var, init }
        } else if self.match_token(TokenKind::Assign) {
            let init = self.parse_expr(binding_power::NONE)?;
            Decl::Matrix { name, init }
        } else {
            let found = self.current();
            return Err(ParseError::expected("'[' or '='", found.description(), found.span()));
        };

        self.consume(TokenKind::SemiColon)?;
        Ok(decl)
    }

    fn parse_standard_decl(&mut self) -> ParseResult<Decl> {
        let ty = match self.current().kind() {
            TokenKind::IntKwd => ScalarType::Int,
            TokenKind::FloatKwd => ScalarType::Float,
            TokenKind::StringKwd => ScalarType::String,
            TokenKind::BoolKwd => ScalarType::Boolean,
            _ => return Err(self.unexpected("a declaration")),
        };
        self.advance();
        let name = self.consume_name()?;
        self.consume(TokenKind::SemiColon)?;
        Ok(Decl::Scalar { ty, name })
    }

    /// Parse an expression whose operators all bind tighter than `min_bp`.
    pub fn parse_expr(&mut self, min_bp: u8) -> ParseResult<Expr> {
        let token = self.current();
        let mut left = token.prefix(self)?;

        while self.current().left_binding_power() > min_bp {
            let token = self.current();
            left = token.infix(self, left)?;
        }

        Ok(left)
    }

    /// Consume end of file, failing on any trailing input.
    pub fn expect_end(&mut self) -> ParseResult<()> {
        self.consume(TokenKind::EndOfFile).map(|_| ())
    }

    // Prefix actions

    pub(crate) fn parse_int_const(&mut self) -> ParseResult<Expr> {
        let token = self.consume(TokenKind::IntConst)?;
        Ok(Expr::IntConst(token.lexeme.to_string()))
    }

    pub(crate) fn parse_float_const(&mut self) -> ParseResult<Expr> {
        let token = self.consume(TokenKind::FloatConst)?;
        Ok(Expr::FloatConst(token.lexeme.to_string()))
    }

    pub(crate) fn parse_string_const(&mut self) -> ParseResult<Expr> {
        let token = self.consume(TokenKind::StringConst)?;
        Ok(Expr::StringConst(token.lexeme.to_string()))
    }

    pub(crate) fn parse_bool_const(&mut self) -> ParseResult<Expr> {
        if self.match_token(TokenKind::TrueKwd) {
            return Ok(Expr::Bool(true));
        }
        self.consume(TokenKind::FalseKwd)?;
        Ok(Expr::Bool(false))
    }

    /// A variable, a matrix cell read, or a call.
    pub(crate) fn parse_variable_name(&mut self) -> ParseResult<Expr> {
        let name = self.consume_name()?;

        if self.match_token(TokenKind::LeftSquare) {
            let (row, col) = self.parse_indices()?;
            return Ok(Expr::MatrixRef {
                name,
                row: Box::new(row),
                col: Box::new(col),
            });
        }

        if self.match_token(TokenKind::LeftParen) {
            let arg = self.parse_expr(binding_power::NONE)?;
            self.consume(TokenKind::RightParen)?;
            return Ok(Expr::Call { callee: name, arg: Box::new(arg) });
        }

        Ok(Expr::Var(name))
    }

    pub(crate) fn parse_nested_expr(&mut self) -> ParseResult<Expr> {
        self.consume(TokenKind::LeftParen)?;
        let inner = self.parse_expr(binding_power::NONE)?;
        self.consume(TokenKind::RightParen)?;
        Ok(Expr::paren(inner))
    }

    pub(crate) fn parse_if_expr(&mut self) -> ParseResult<Expr> {
        self.consume(TokenKind::IfKwd)?;
        let condition = self.parse_expr(binding_power::NONE)?;
        self.consume(TokenKind::ThenKwd)?;
        let then_expr = self.parse_expr(binding_power::NONE)?;
        self.consume(TokenKind::ElseKwd)?;
        let else_expr = self.parse_expr(binding_power::NONE)?;
        Ok(Expr::If {
            condition: Box::new(condition),
            then_expr: Box::new(then_expr),
            else_expr: Box::new(else_expr),
        })
    }

    pub(crate) fn parse_let_expr(&mut self) -> ParseResult<Expr> {
        self.consume(TokenKind::LetKwd)?;
        let stmts = self.parse_stmts()?;
        self.consume(TokenKind::InKwd)?;
        let result = self.parse_expr(binding_power::NONE)?;
        self.consume(TokenKind::EndKwd)?;
        Ok(Expr::Let { stmts, result: Box::new(result) })
    }

    pub(crate) fn parse_not_expr(&mut self) -> ParseResult<Expr> {
        self.consume(TokenKind::NotOp)?;
        let operand = self.parse_expr(binding_power::PREFIX_NOT)?;
        Ok(Expr::Not(Box::new(operand)))
    }

    // Infix actions

    pub(crate) fn parse_arithmetic(&mut self, left: Expr) -> ParseResult<Expr> {
        self.parse_binary(left)
    }

    pub(crate) fn parse_relational(&mut self, left: Expr) -> ParseResult<Expr> {
        self.parse_binary(left)
    }

    pub(crate) fn parse_logical(&mut self, left: Expr) -> ParseResult<Expr> {
        self.parse_binary(left)
    }

    /// Consume the operator and parse a right operand at its binding power.
    ///
    /// Passing the operator's own power as the bound makes every binary
    /// operator left-associative.
    fn parse_binary(&mut self, left: Expr) -> ParseResult<Expr> {
        let operator = self.current();
        let op = binary_op(operator.kind()).ok_or_else(|| {
            ParseError::internal(
                format!("{} has no binary operator", operator.description()),
                operator.span(),
            )
        })?;
        self.advance();

        let right = self.parse_expr(operator.left_binding_power())?;
        Ok(Expr::binary(op, left, right))
    }

    // Helper methods

    fn current(&self) -> ExtToken<'src> {
        self.tokens[self.current]
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current().kind() == kind
    }

    /// Move past the current token. End of file is never passed.
    fn advance(&mut self) -> Token<'src> {
        let token = *self.current().token();
        if !token.is_eof() {
            self.current += 1;
        }
        token
    }

    fn consume(&mut self, kind: TokenKind) -> ParseResult<Token<'src>> {
        if self.check(kind) {
            return Ok(self.advance());
        }

        let found = self.current();
        if found.token().is_error() {
            return Err(ParseError::lexical(found.lexeme(), found.span()));
        }
        Err(ParseError::expected(kind.description(), found.description(), found.span()))
    }

    fn consume_name(&mut self) -> ParseResult<VarName> {
        let token = self.consume(TokenKind::VariableName)?;
        Ok(VarName::new(token.lexeme))
    }

    fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// The error for a current token that cannot start `context`.
    pub(crate) fn unexpected(&self, context: &str) -> ParseError {
        let found = self.current();
        if found.token().is_error() {
            ParseError::lexical(found.lexeme(), found.span())
        } else {
            ParseError::unexpected(found.description(), context, found.span())
        }
    }
}
