//! Rendering an AST back into matrix-language source.
//!
//! Statements are laid out one per line with four-space indentation.
//! Expressions render on a single line, exactly as parsed: no parentheses
//! are added or dropped, so the output re-parses to an equal tree.

use crate::frontend::ast::*;
use crate::utils::pretty::CodeFormatter;
use std::fmt;

const INDENT: &str = "    ";

/// A node that can be written back as matrix-language source.
pub trait Unparse {
    fn unparse(&self) -> String;
}

impl Unparse for Program {
    fn unparse(&self) -> String {
        let mut f = CodeFormatter::new(INDENT);
        f.block(&format!("{} ()", self.name), |f| write_stmts(f, &self.stmts));
        f.finish()
    }
}

impl Unparse for Stmts {
    fn unparse(&self) -> String {
        let mut f = CodeFormatter::new(INDENT);
        write_stmts(&mut f, self);
        f.finish()
    }
}

impl Unparse for Stmt {
    fn unparse(&self) -> String {
        let mut f = CodeFormatter::new(INDENT);
        write_stmt(&mut f, self);
        f.finish()
    }
}

impl Unparse for Decl {
    fn unparse(&self) -> String {
        decl(self)
    }
}

impl Unparse for Expr {
    fn unparse(&self) -> String {
        expr(self)
    }
}

fn write_stmts(f: &mut CodeFormatter, stmts: &Stmts) {
    for stmt in stmts {
        write_stmt(f, stmt);
    }
}

fn write_stmt(f: &mut CodeFormatter, stmt: &Stmt) {
    match stmt {
        Stmt::Decl(d) => f.writeln(&decl(d)),
        Stmt::Block(stmts) => f.block("", |f| write_stmts(f, stmts)),
        Stmt::If { condition, then_branch } => {
            write_body(f, &format!("if ({})", expr(condition)), then_branch);
        }
        Stmt::IfElse { condition, then_branch, else_branch } => {
            write_body(f, &format!("if ({})", expr(condition)), then_branch);
            write_body(f, "else", else_branch);
        }
        Stmt::Assign { name, value } => f.writeln(&format!("{} = {};", name, expr(value))),
        Stmt::AssignMatrix { name, row, col, value } => {
            f.writeln(&format!("{} = {};", cell(name, row, col), expr(value)));
        }
        Stmt::Print(value) => f.writeln(&format!("print({});", expr(value))),
        Stmt::Repeat { var, start, end, body } => {
            let header = format!("repeat ({} = {} to {})", var, expr(start), expr(end));
            write_body(f, &header, body);
        }
        Stmt::While { condition, body } => {
            write_body(f, &format!("while ({})", expr(condition)), body);
        }
        Stmt::Empty => f.writeln(";"),
    }
}

/// `header` followed by a nested statement: braces share the header line,
/// anything else goes on its own indented line.
fn write_body(f: &mut CodeFormatter, header: &str, body: &Stmt) {
    if let Stmt::Block(stmts) = body {
        f.block(header, |f| write_stmts(f, stmts));
    } else {
        f.writeln(header);
        f.indent();
        write_stmt(f, body);
        f.dedent();
    }
}

fn decl(decl: &Decl) -> String {
    match decl {
        Decl::Scalar { ty, name } => format!("{} {};", ty, name),
        Decl::Matrix { name, init } => format!("matrix {} = {};", name, expr(init)),
        Decl::LongMatrix { name, rows, cols, row_var, col_var, init } => format!(
            "matrix {} {} : {} = {};",
            cell(name, rows, cols),
            row_var,
            col_var,
            expr(init)
        ),
    }
}

fn cell(name: &VarName, row: &Expr, col: &Expr) -> String {
    format!("{}[{} : {}]", name, expr(row), expr(col))
}

fn expr(e: &Expr) -> String {
    match e {
        Expr::Binary { op, left, right } => format!("{} {} {}", expr(left), op, expr(right)),
        Expr::MatrixRef { name, row, col } => cell(name, row, col),
        Expr::Bool(true) => "True".to_string(),
        Expr::Bool(false) => "False".to_string(),
        Expr::Var(name) => name.to_string(),
        Expr::Paren(inner) => format!("({})", expr(inner)),
        Expr::Call { callee, arg } => format!("{}({})", callee, expr(arg)),
        Expr::Let { stmts, result } => {
            let mut f = CodeFormatter::single_line();
            write_stmts(&mut f, stmts);
            let body = f.finish();
            if body.is_empty() {
                format!("let in {} end", expr(result))
            } else {
                format!("let {} in {} end", body, expr(result))
            }
        }
        Expr::If { condition, then_expr, else_expr } => format!(
            "if {} then {} else {}",
            expr(condition),
            expr(then_expr),
            expr(else_expr)
        ),
        Expr::Not(operand) => format!("!{}", expr(operand)),
        Expr::IntConst(text) | Expr::FloatConst(text) | Expr::StringConst(text) => text.clone(),
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.unparse())
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.unparse())
    }
}

impl fmt::Display for Decl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&decl(self))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&expr(self))
    }
}
