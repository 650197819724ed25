//! # matc - Matrix Language Translator
//!
//! A front end and source-to-source translator for a small imperative
//! language with scalars, strings, booleans, control flow and a built-in
//! matrix type:
//! - Longest-match scanning over an ordered rule table
//! - Precedence-climbing expression parsing driven by a dispatch table
//! - Recursive descent for statements and declarations
//! - Unparsing back to the source language
//! - C++ code generation against a small matrix runtime
//!
//! ## Architecture
//!
//! ```text
//! Source → Scanner → Tokens → Parser (+ dispatch) → AST → Unparse / C++ CodeGen → Output
//! ```
//!
//! ## Example
//!
//! ```rust
//! let source = r#"
//!     main () {
//!         matrix m [ 2 : 2 ] i : j = i + j;
//!         print(m);
//!     }
//! "#;
//!
//! let program = matc::parse(source)?;
//! assert_eq!(program.name.as_str(), "main");
//!
//! let cpp = matc::translate(source)?;
//! assert!(cpp.contains("*(m.access(i, j)) = (i + j);"));
//! # Ok::<(), matc::utils::errors::ParseError>(())
//! ```

#![warn(clippy::all)]

pub mod frontend;
pub mod codegen;
pub mod utils;

// Re-export commonly used types
pub mod prelude {
    //! Convenient re-exports of commonly used types and traits.

    pub use crate::frontend::ast::*;
    pub use crate::frontend::{parse, parse_expression, parse_statement, tokenize, Unparse};
    pub use crate::frontend::{Parser, Scanner, Token, TokenKind};
    pub use crate::codegen::{CodegenConfig, CppCodeGen};
    pub use crate::utils::errors::*;
    pub use crate::utils::location::{SourceMap, Span};
}

use frontend::Unparse;
use std::path::Path;
use utils::errors::{MatcResult, ParseResult};

/// Main entry point for parsing source code.
pub fn parse(source: &str) -> ParseResult<frontend::Program> {
    frontend::parse(source)
}

/// Render a program back as matrix-language source.
pub fn unparse(program: &frontend::Program) -> String {
    program.unparse()
}

/// Full pipeline: parse source and generate C++ with the default settings.
pub fn translate(source: &str) -> ParseResult<String> {
    translate_with(source, &codegen::CodegenConfig::default())
}

/// Full pipeline with explicit code generation settings.
pub fn translate_with(source: &str, config: &codegen::CodegenConfig) -> ParseResult<String> {
    let program = parse(source)?;
    Ok(codegen::generate(&program, config))
}

/// Read a source file and generate C++ for it.
pub fn translate_file(path: impl AsRef<Path>, config: &codegen::CodegenConfig) -> MatcResult<String> {
    let source = std::fs::read_to_string(path)?;
    Ok(translate_with(&source, config)?)
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
