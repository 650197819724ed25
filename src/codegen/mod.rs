//! Code generation from the matrix-language AST.

pub mod cpp;

pub use cpp::CppCodeGen;

use crate::frontend::ast::Program;
use serde::Serialize;

/// Settings for generated C++.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodegenConfig {
    /// Include path of the matrix runtime header
    pub matrix_header: String,
    /// One level of indentation
    pub indent: String,
    /// Name of the parameterless entry function
    pub entry_point: String,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            matrix_header: "include/Matrix.h".to_string(),
            indent: "    ".to_string(),
            entry_point: "main".to_string(),
        }
    }
}

impl CodegenConfig {
    /// Indent with `width` spaces.
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent = " ".repeat(width);
        self
    }

    pub fn with_matrix_header(mut self, header: impl Into<String>) -> Self {
        self.matrix_header = header.into();
        self
    }
}

/// Generate C++ for a program.
pub fn generate(program: &Program, config: &CodegenConfig) -> String {
    CppCodeGen::new(config.clone()).generate(program)
}
