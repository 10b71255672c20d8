//! Syntax layer: loaded files and their scanned headers.
//!
//! Bridges the token-level [`crate::parser`] and the semantic [`crate::hir`]
//! layer by attaching paths, line information and package/import declarations
//! to raw source text.

pub mod file;

pub use file::SourceFile;
