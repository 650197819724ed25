//! C++ code generation.
//!
//! Matrices are handed to the runtime `matrix` class: construction with
//! `matrix m(rows, cols)` or by copy, element access through
//! `*(m.access(r, c))`, dimensions through `n_rows()`/`n_cols()` and file
//! loading through `matrix::matrix_read(path)`.

use crate::codegen::CodegenConfig;
use crate::frontend::ast::*;
use crate::utils::pretty::CodeFormatter;
use log::{debug, trace, warn};

/// Callee names that become method calls on their argument.
const ACCESSORS: [&str; 2] = ["n_rows", "n_cols"];

/// Callee name of the runtime's file loader.
const MATRIX_READ: &str = "matrix_read";

/// C++ code generator.
pub struct CppCodeGen {
    config: CodegenConfig,
}

impl CppCodeGen {
    pub fn new(config: CodegenConfig) -> Self {
        Self { config }
    }

    /// Generate a complete C++ translation unit for a program.
    pub fn generate(&self, program: &Program) -> String {
        let mut f = self.formatter();

        // Header
        f.writeln("#include <iostream>");
        f.writeln(&format!("#include \"{}\"", self.config.matrix_header));
        f.writeln("#include <math.h>");
        f.writeln("using namespace std;");
        f.writeln("");

        f.block(&format!("int {}()", self.config.entry_point), |f| {
            self.generate_stmts(f, &program.stmts);
        });

        debug!(
            "Generated C++ for `{}` ({} top-level statements)",
            program.name,
            program.stmts.len()
        );
        f.finish()
    }

    /// Translate a single statement.
    pub fn generate_stmt(&self, stmt: &Stmt) -> String {
        let mut f = self.formatter();
        self.write_stmt(&mut f, stmt);
        f.finish()
    }

    /// Translate a single expression.
    pub fn generate_expr(&self, expr: &Expr) -> String {
        match expr {
            Expr::Binary { op, left, right } => format!(
                "({} {} {})",
                self.generate_expr(left),
                op,
                self.generate_expr(right)
            ),
            Expr::MatrixRef { name, row, col } => self.access(name, row, col),
            Expr::Bool(value) => value.to_string(),
            Expr::Var(name) => name.to_string(),
            Expr::Paren(inner) => format!("({})", self.generate_expr(inner)),
            Expr::Call { callee, arg } => self.generate_call(callee, arg),
            Expr::Let { stmts, result } => {
                let mut f = CodeFormatter::single_line();
                self.generate_stmts(&mut f, stmts);
                let body = f.finish();
                if body.is_empty() {
                    format!("({{ {}; }})", self.generate_expr(result))
                } else {
                    format!("({{ {} {}; }})", body, self.generate_expr(result))
                }
            }
            Expr::If { condition, then_expr, else_expr } => format!(
                "(({}) ? ({}) : ({}))",
                self.generate_expr(condition),
                self.generate_expr(then_expr),
                self.generate_expr(else_expr)
            ),
            Expr::Not(operand) => format!("!({})", self.generate_expr(operand)),
            Expr::IntConst(text) | Expr::FloatConst(text) | Expr::StringConst(text) => {
                text.clone()
            }
        }
    }

    fn formatter(&self) -> CodeFormatter {
        CodeFormatter::new(&self.config.indent)
    }

    fn generate_stmts(&self, f: &mut CodeFormatter, stmts: &Stmts) {
        for stmt in stmts {
            self.write_stmt(f, stmt);
        }
    }

    fn write_stmt(&self, f: &mut CodeFormatter, stmt: &Stmt) {
        match stmt {
            Stmt::Decl(decl) => self.generate_decl(f, decl),
            Stmt::Block(stmts) => f.block("", |f| self.generate_stmts(f, stmts)),
            Stmt::If { condition, then_branch } => {
                let header = format!("if ({})", self.generate_expr(condition));
                self.write_body(f, &header, then_branch);
            }
            Stmt::IfElse { condition, then_branch, else_branch } => {
                let ternary = self.ternary(condition, then_branch, Some(&**else_branch));
                f.writeln(&format!("{};", ternary));
            }
            Stmt::Assign { name, value } => {
                f.writeln(&format!("{} = {};", name, self.generate_expr(value)));
            }
            Stmt::AssignMatrix { name, row, col, value } => {
                f.writeln(&format!(
                    "{} = {};",
                    self.access(name, row, col),
                    self.generate_expr(value)
                ));
            }
            Stmt::Print(value) => f.writeln(&format!("cout << {};", self.generate_expr(value))),
            Stmt::Repeat { var, start, end, body } => {
                let header = format!(
                    "for ({var} = {}; {var} <= {}; {var}++)",
                    self.generate_expr(start),
                    self.generate_expr(end),
                    var = var
                );
                self.write_body(f, &header, body);
            }
            Stmt::While { condition, body } => {
                let header = format!("while ({})", self.generate_expr(condition));
                self.write_body(f, &header, body);
            }
            Stmt::Empty => f.writeln(";"),
        }
    }

    fn write_body(&self, f: &mut CodeFormatter, header: &str, body: &Stmt) {
        if let Stmt::Block(stmts) = body {
            f.block(header, |f| self.generate_stmts(f, stmts));
        } else {
            f.writeln(header);
            f.indent();
            self.write_stmt(f, body);
            f.dedent();
        }
    }

    fn generate_decl(&self, f: &mut CodeFormatter, decl: &Decl) {
        trace!("Declaring `{}`", decl.name());
        match decl {
            Decl::Scalar { ty, name } => {
                let ty = match ty {
                    ScalarType::Int => "int",
                    ScalarType::Float => "float",
                    ScalarType::String => "string",
                    ScalarType::Boolean => "bool",
                };
                f.writeln(&format!("{} {};", ty, name));
            }
            Decl::Matrix { name, init } => {
                f.writeln(&format!("matrix {}({});", name, self.generate_expr(init)));
            }
            Decl::LongMatrix { name, rows, cols, row_var, col_var, init } => {
                let rows = self.generate_expr(rows);
                let cols = self.generate_expr(cols);
                f.writeln(&format!("matrix {}({}, {});", name, rows, cols));

                let outer = format!("for (int {i} = 0; {i} < {}; {i}++)", rows, i = row_var);
                let inner = format!("for (int {j} = 0; {j} < {}; {j}++)", cols, j = col_var);
                let cell = format!("*({}.access({}, {}))", name, row_var, col_var);
                f.block(&outer, |f| {
                    f.block(&inner, |f| {
                        f.writeln(&format!("{} = {};", cell, self.generate_expr(init)));
                    });
                });
            }
        }
    }

    fn generate_call(&self, callee: &VarName, arg: &Expr) -> String {
        let name = callee.as_str();
        let arg_code = self.generate_expr(arg);

        if ACCESSORS.contains(&name) {
            match arg {
                Expr::Var(_) | Expr::Paren(_) | Expr::Binary { .. } => {
                    format!("{}.{}()", arg_code, name)
                }
                _ => format!("({}).{}()", arg_code, name),
            }
        } else if name == MATRIX_READ {
            format!("matrix::{}({})", MATRIX_READ, arg_code)
        } else {
            format!("{}({})", name, arg_code)
        }
    }

    fn access(&self, name: &VarName, row: &Expr, col: &Expr) -> String {
        format!(
            "*({}.access({}, {}))",
            name,
            self.generate_expr(row),
            self.generate_expr(col)
        )
    }

    /// `((c) ? (void)(A) : (void)(B))`. A missing else branch becomes `0`.
    fn ternary(&self, condition: &Expr, then_branch: &Stmt, else_branch: Option<&Stmt>) -> String {
        let else_code = match else_branch {
            Some(stmt) => self.branch(stmt),
            None => "0".to_string(),
        };
        format!(
            "(({}) ? (void)({}) : (void)({}))",
            self.generate_expr(condition),
            self.branch(then_branch),
            else_code
        )
    }

    /// A ternary operand for `stmt`, falling back to a statement expression.
    fn branch(&self, stmt: &Stmt) -> String {
        self.expression_form(stmt).unwrap_or_else(|| {
            let mut f = CodeFormatter::single_line();
            self.write_stmt(&mut f, stmt);
            let body = f.finish();
            warn!(
                "Statement branch has no expression form, emitting a GNU statement expression: {}",
                body
            );
            format!("({{ {} }})", body)
        })
    }

    /// The statement as a C++ expression, when it has one.
    fn expression_form(&self, stmt: &Stmt) -> Option<String> {
        match stmt {
            Stmt::Assign { name, value } => {
                Some(format!("{} = {}", name, self.generate_expr(value)))
            }
            Stmt::AssignMatrix { name, row, col, value } => Some(format!(
                "{} = {}",
                self.access(name, row, col),
                self.generate_expr(value)
            )),
            Stmt::Print(value) => Some(format!("(cout << {})", self.generate_expr(value))),
            Stmt::Empty => Some("0".to_string()),
            Stmt::If { condition, then_branch } => {
                Some(self.ternary(condition, then_branch, None))
            }
            Stmt::IfElse { condition, then_branch, else_branch } => {
                Some(self.ternary(condition, then_branch, Some(&**else_branch)))
            }
            Stmt::Block(stmts) if stmts.is_empty() => Some("0".to_string()),
            Stmt::Block(stmts) => stmts
                .iter()
                .map(|s| self.expression_form(s))
                .collect::<Option<Vec<_>>>()
                .map(|forms| forms.join(", ")),
            Stmt::Decl(_) | Stmt::Repeat { .. } | Stmt::While { .. } => None,
        }
    }
}

impl Default for CppCodeGen {
    fn default() -> Self {
        Self::new(CodegenConfig::default())
    }
}
