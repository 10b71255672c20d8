//! Error types for metadata extraction.

use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T, E = MetadataError> = std::result::Result<T, E>;

/// Errors that abort a metadata extraction run.
///
/// Every variant is fatal: the domain is deterministic text transformation, so
/// errors are propagated to the caller with enough context to fix the source.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// IO error while reading input or writing output.
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source text that does not fit the recognized grammar.
    #[error("{}:{line}: malformed source: {message}", path.display())]
    MalformedSource {
        path: PathBuf,
        /// 1-based line number, 0 when no single line is to blame.
        line: usize,
        message: String,
    },

    /// Symbolic reference that names no imported enum member.
    #[error("Unresolved symbol `{symbol}` ({context})")]
    UnresolvedSymbol { symbol: String, context: String },

    /// Import resolution re-entered a file that is still being resolved.
    #[error("Cyclic dependency: {}", cycle.join(" -> "))]
    CyclicDependency { cycle: Vec<String> },

    /// Two files declare the same `package.Enum` key.
    #[error("Duplicate enum `{key}` declared in {} and {}", first.display(), second.display())]
    DuplicateEnum {
        key: String,
        first: PathBuf,
        second: PathBuf,
    },

    /// Symbol table lookup for a key that was never registered.
    #[error("Unknown enum `{0}`")]
    UnknownEnum(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generated output differs from the checked-in copy.
    #[error(
        "The file {} needs to be updated, run:\n\ncp {} {}\n",
        expected.display(),
        generated.display(),
        expected.display()
    )]
    CheckMismatch {
        expected: PathBuf,
        generated: PathBuf,
    },
}

impl MetadataError {
    /// Create an IO error for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a malformed source error at a 1-based line.
    pub fn malformed(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Self::MalformedSource {
            path: path.into(),
            line,
            message: message.into(),
        }
    }

    /// Create an unresolved symbol error.
    pub fn unresolved(symbol: impl Into<String>, context: impl Into<String>) -> Self {
        Self::UnresolvedSymbol {
            symbol: symbol.into(),
            context: context.into(),
        }
    }
}
