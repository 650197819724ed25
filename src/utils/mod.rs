//! Utility modules shared across the translator:
//! - Error types
//! - Source location tracking
//! - Text layout for generated output

pub mod errors;
pub mod location;
pub mod pretty;

// Re-exports
pub use errors::*;
pub use location::{SourceLocation, SourceMap, Span};
pub use pretty::CodeFormatter;
