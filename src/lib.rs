//! # enum-meta
//!
//! Enum metadata extraction for interface-definition sources.
//!
//! Every enum member value is resolved to an integer: implicit successors,
//! decimal and hex literals, and references to members of enums in other
//! files reached through `import` declarations. Documentation comments on the
//! property enum are split into a title and `@key value` annotations.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! project   → Directory loading, configuration, assembly, JSON output
//!   ↓
//! hir       → Symbol table, lazy resolution, evaluator, comment annotator
//!   ↓
//! syntax    → Per-file header: package, imports, enum names, raw text
//!   ↓
//! parser    → Logos lexer, enum block extractor
//!   ↓
//! base      → Primitives (FileId, LineIndex, TextSize, errors)
//! ```
//!
//! ## Example
//!
//! ```
//! use enum_meta::hir::{ResolveOptions, SymbolTable};
//! use enum_meta::syntax::SourceFile;
//!
//! let mut table = SymbolTable::new(ResolveOptions::default());
//! for (path, text) in [
//!     ("Color.aidl", "package p; enum Color { RED = 1, GREEN, BLUE = 0x10 }"),
//!     ("Mix.aidl", "package q; import p; enum Mix { PINK = p.Color.RED + 1 }"),
//! ] {
//!     if let Some(source) = SourceFile::parse(path, text.to_string())? {
//!         table.add_file(source)?;
//!     }
//! }
//!
//! let mix = table.resolve("q.Mix")?;
//! assert_eq!(mix.values(), vec![("PINK", 2)]);
//! # Ok::<(), enum_meta::MetadataError>(())
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → syntax → hir → project)
// ============================================================================

/// Foundation types: FileId, LineIndex, TextSize, errors
pub mod base;

/// Parser: Logos lexer, enum block extractor
pub mod parser;

/// Syntax: per-file header and retained source text
pub mod syntax;

/// High-level IR: symbol table and resolved enum metadata
pub mod hir;

/// Project management: directory loading, assembly, output
pub mod project;

// Re-export foundation types
pub use base::{FileId, LineIndex, MetadataError, Position, Result, TextSize};

// Re-export the main entry points
pub use hir::{EnumDescriptor, EnumMember, ResolveOptions, SymbolTable};
pub use project::{MetadataAssembler, MetadataConfig};
