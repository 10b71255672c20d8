//! Loaded source file with its scanned header.
//!
//! A [`SourceFile`] keeps the raw text of a file until its enums are fully
//! extracted. The header (package, imports, enum names) is available from the
//! moment the file is loaded.

use std::path::{Path, PathBuf};

use crate::base::{LineIndex, MetadataError, Result, TextSize};
use crate::parser::{EnumBlock, SyntaxError, extract_enums, scan_header};

/// A source file that declares at least one enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    path: PathBuf,
    package: String,
    imports: Vec<String>,
    enum_names: Vec<String>,
    /// Raw text, released once the enums are extracted for good.
    text: Option<String>,
    line_index: LineIndex,
}

impl SourceFile {
    /// Scan the header of `text`.
    ///
    /// Returns `Ok(None)` for a file that declares no enums; such files need no
    /// package declaration. A file with enums but no package is malformed.
    pub fn parse(path: impl Into<PathBuf>, text: String) -> Result<Option<Self>> {
        let path = path.into();
        let line_index = LineIndex::new(&text);
        let header = scan_header(&text).map_err(|e| syntax_error(&path, &line_index, e))?;

        if header.enums.is_empty() {
            return Ok(None);
        }

        let Some((package, _)) = header.package else {
            let first = &header.enums[0];
            return Err(MetadataError::malformed(
                &path,
                line_index.position(first.offset).display_line(),
                format!(
                    "enum `{}` declared in a file without a package declaration",
                    first.name
                ),
            ));
        };

        Ok(Some(Self {
            package,
            imports: header.imports,
            enum_names: header.enums.into_iter().map(|e| e.name.to_string()).collect(),
            text: Some(text),
            line_index,
            path,
        }))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn imports(&self) -> &[String] {
        &self.imports
    }

    /// Enum names in declaration order.
    pub fn enum_names(&self) -> &[String] {
        &self.enum_names
    }

    /// Fully qualified `package.EnumName` key for each enum.
    pub fn enum_keys(&self) -> impl Iterator<Item = String> + '_ {
        self.enum_names
            .iter()
            .map(move |name| format!("{}.{}", self.package, name))
    }

    /// Whether the raw text is still held.
    pub fn has_text(&self) -> bool {
        self.text.is_some()
    }

    /// Split every enum body into member entries.
    pub fn extract_enums(&self) -> Result<Vec<EnumBlock>> {
        let Some(text) = self.text.as_deref() else {
            return Err(MetadataError::malformed(
                &self.path,
                0,
                "source text already released",
            ));
        };
        extract_enums(text).map_err(|e| syntax_error(&self.path, &self.line_index, e))
    }

    /// Drop the raw text.
    pub fn release_text(&mut self) {
        self.text = None;
    }

    /// 1-based line of a byte offset, for diagnostics.
    pub fn line_of(&self, offset: TextSize) -> usize {
        self.line_index.position(offset).display_line()
    }
}

fn syntax_error(path: &Path, line_index: &LineIndex, error: SyntaxError) -> MetadataError {
    MetadataError::malformed(
        path,
        line_index.position(error.offset).display_line(),
        error.message,
    )
}
