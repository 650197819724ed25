//! Abstract Syntax Tree (AST) for the matrix language.
//!
//! One closed enum per grammar category, one variant per production.
//! Nodes are not `Clone`. Every node has exactly one owner,
//! its parent, and the [`Program`] root owns the whole tree.

use serde::{Serialize, Serializer};
use std::fmt;

/// A named identifier. A leaf value, not a statement or expression.
#[derive(Debug, PartialEq, Eq, Hash, Serialize)]
pub struct VarName(pub String);

impl VarName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VarName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A complete program: `name () { stmts }`.
#[derive(Debug, PartialEq, Serialize)]
pub struct Program {
    /// Program name
    pub name: VarName,
    /// Top-level statements
    pub stmts: Stmts,
}

impl Program {
    pub fn new(name: VarName, stmts: Stmts) -> Self {
        Self { name, stmts }
    }
}

/// A statement sequence, built as a cons list by recursive descent.
///
/// Comparison, debug output, serialization and drop all walk the list in a
/// loop, so a long sequence costs no more stack than a short one.
pub enum Stmts {
    /// `Stmt Stmts`
    Seq(Box<Stmt>, Box<Stmts>),
    /// The empty sequence
    Empty,
}

impl Stmts {
    /// Prepend `stmt` to `rest`.
    pub fn cons(stmt: Stmt, rest: Stmts) -> Self {
        Stmts::Seq(Box::new(stmt), Box::new(rest))
    }

    /// Build a sequence holding `stmts` in order.
    pub fn from_vec(stmts: Vec<Stmt>) -> Self {
        stmts
            .into_iter()
            .rev()
            .fold(Stmts::Empty, |rest, stmt| Stmts::cons(stmt, rest))
    }

    /// Iterate over the statements in order.
    pub fn iter(&self) -> StmtsIter<'_> {
        StmtsIter { next: self }
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Stmts::Empty)
    }

    /// Unlink and return everything after the first statement.
    fn take_tail(&mut self) -> Stmts {
        match self {
            Stmts::Seq(_, rest) => std::mem::replace(&mut **rest, Stmts::Empty),
            Stmts::Empty => Stmts::Empty,
        }
    }
}

/// Iterator over a [`Stmts`] list.
pub struct StmtsIter<'a> {
    next: &'a Stmts,
}

impl<'a> Iterator for StmtsIter<'a> {
    type Item = &'a Stmt;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next {
            Stmts::Seq(stmt, rest) => {
                self.next = rest;
                Some(stmt)
            }
            Stmts::Empty => None,
        }
    }
}

impl Drop for Stmts {
    fn drop(&mut self) {
        // Each cell is detached from its tail before it is freed.
        let mut next = self.take_tail();
        while !next.is_empty() {
            next = next.take_tail();
        }
    }
}

impl PartialEq for Stmts {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl fmt::Debug for Stmts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Serialized as a flat array of statements.
impl Serialize for Stmts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'a> IntoIterator for &'a Stmts {
    type Item = &'a Stmt;
    type IntoIter = StmtsIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A statement.
#[derive(Debug, PartialEq, Serialize)]
pub enum Stmt {
    /// A declaration used as a statement
    Decl(Decl),

    /// Block: `{ stmts }`
    Block(Stmts),

    /// `if ( cond ) then_branch`
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
    },

    /// `if ( cond ) then_branch else else_branch`
    IfElse {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Box<Stmt>,
    },

    /// `name = value ;`
    Assign {
        name: VarName,
        value: Expr,
    },

    /// `name [ row : col ] = value ;`
    AssignMatrix {
        name: VarName,
        row: Expr,
        col: Expr,
        value: Expr,
    },

    /// `print ( expr ) ;`
    Print(Expr),

    /// `repeat ( var = start to end ) body`, `end` inclusive
    Repeat {
        var: VarName,
        start: Expr,
        end: Expr,
        body: Box<Stmt>,
    },

    /// `while ( cond ) body`
    While {
        condition: Expr,
        body: Box<Stmt>,
    },

    /// A bare `;`
    Empty,
}

/// Scalar declaration types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ScalarType {
    Int,
    Float,
    String,
    Boolean,
}

impl ScalarType {
    /// The keyword spelling in the matrix language.
    pub fn keyword(&self) -> &'static str {
        match self {
            ScalarType::Int => "int",
            ScalarType::Float => "float",
            ScalarType::String => "string",
            ScalarType::Boolean => "boolean",
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A declaration.
#[derive(Debug, PartialEq, Serialize)]
pub enum Decl {
    /// `int x ;`, `float x ;`, `string x ;`, `boolean x ;`
    Scalar {
        ty: ScalarType,
        name: VarName,
    },

    /// `matrix name = init ;`
    Matrix {
        name: VarName,
        init: Expr,
    },

    /// `matrix name [ rows : cols ] row_var : col_var = init ;`
    ///
    /// `init` is evaluated once per cell and may mention both index names.
    LongMatrix {
        name: VarName,
        rows: Expr,
        cols: Expr,
        row_var: VarName,
        col_var: VarName,
        init: Expr,
    },
}

impl Decl {
    /// The declared name.
    pub fn name(&self) -> &VarName {
        match self {
            Decl::Scalar { name, .. } | Decl::Matrix { name, .. } | Decl::LongMatrix { name, .. } => name,
        }
    }
}

/// An expression.
#[derive(Debug, PartialEq, Serialize)]
pub enum Expr {
    /// `left op right`
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// `name [ row : col ]`
    MatrixRef {
        name: VarName,
        row: Box<Expr>,
        col: Box<Expr>,
    },

    /// `True` / `False`
    Bool(bool),

    /// Variable reference
    Var(VarName),

    /// `( inner )`
    Paren(Box<Expr>),

    /// `callee ( arg )`: a function call or a matrix accessor
    Call {
        callee: VarName,
        arg: Box<Expr>,
    },

    /// `let stmts in result end`
    Let {
        stmts: Stmts,
        result: Box<Expr>,
    },

    /// `if condition then then_expr else else_expr`
    If {
        condition: Box<Expr>,
        then_expr: Box<Expr>,
        else_expr: Box<Expr>,
    },

    /// `! operand`
    Not(Box<Expr>),

    /// Integer constant, as written
    IntConst(String),

    /// Float constant, as written
    FloatConst(String),

    /// String constant, as written (quotes and escapes included)
    StringConst(String),
}

impl Expr {
    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn var(name: impl Into<String>) -> Self {
        Expr::Var(VarName::new(name))
    }

    pub fn int(lexeme: impl Into<String>) -> Self {
        Expr::IntConst(lexeme.into())
    }

    pub fn paren(inner: Expr) -> Self {
        Expr::Paren(Box::new(inner))
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,

    // Relational
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,

    // Logical
    And,
    Or,
}

impl BinaryOp {
    /// The operator's spelling, identical in the matrix language and C++.
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
