//! High-level IR (HIR): resolved enum metadata.
//!
//! Extracted enum blocks become [`EnumDescriptor`]s here. Values are computed
//! lazily: a file is resolved the first time one of its enums is asked for,
//! after the files it imports.
//!
//! ## Key Types
//!
//! - [`SymbolTable`] - every loaded file, indexed by `package.EnumName`
//! - [`FileDescriptor`] - one file and its resolution state
//! - [`EnumDescriptor`] / [`EnumMember`] - the final output records
//! - [`CommentAnnotations`] - title and `@key value` pairs of a doc comment
//!
//! ## Flow
//!
//! ```text
//! resolve(key)
//!     │
//!     ▼
//! resolve imports first      ← depth-first, cycles rejected
//!     │
//!     ▼
//! extract_enums(file)        ← once per file
//!     │
//!     ▼
//! evaluate(expression)       ← per member, symbols via the table
//!     │
//!     ▼
//! annotate(comment)          ← property enum only
//! ```

mod annotate;
mod eval;
mod resolve;
mod symbols;

pub use annotate::{CommentAnnotations, annotate};
pub use eval::{EvalError, SignedTerm, Term, Terms, evaluate, parse_literal, parse_terms};
pub use resolve::{FileDescriptor, ResolveOptions, ResolveState, SymbolTable};
pub use symbols::{EnumDescriptor, EnumMember};
