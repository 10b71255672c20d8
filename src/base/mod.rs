//! Foundation types for enum metadata extraction.
//!
//! This module provides the types every other layer builds on:
//! - [`FileId`] - Index of a loaded file
//! - [`Position`], [`LineIndex`] - Byte offset to line/column conversion
//! - [`MetadataError`], [`Result`] - The crate-wide error type
//! - Domain constants (distinguished enum name, JSON layout)
//! - Dotted-name helpers in [`text_utils`]
//!
//! This module has NO dependencies on other enum-meta modules.

pub mod constants;
mod error;
mod file_id;
mod position;
pub mod text_utils;

pub use error::{MetadataError, Result};
pub use file_id::FileId;
pub use position::{LineIndex, Position};

// Re-export text-size types for convenience
pub use text_size::TextSize;
