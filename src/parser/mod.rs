//! Lexer and enum block extractor for interface-definition sources
//!
//! Only the parts of the language that carry enum metadata are understood:
//! `package` and `import` declarations, and `enum` blocks with their members.
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with SyntaxKind and byte offsets
//!     ↓
//! Extractor → SourceHeader (package, imports, enum names)
//!           → EnumBlock (member name, raw value expression, doc comment)
//! ```
//!
//! Extraction state lives in a cursor value created per call; nothing is shared
//! between calls.

mod extract;
mod lexer;
mod syntax_kind;

pub use extract::{EnumBlock, MemberEntry, SourceHeader, SyntaxError, extract_enums, scan_header};
pub use lexer::{Lexer, Token, tokenize};
pub use syntax_kind::SyntaxKind;
