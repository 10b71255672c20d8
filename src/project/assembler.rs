//! Directory-level metadata assembly.
//!
//! Reads every file of an input directory, registers the enum-bearing ones in
//! a [`SymbolTable`] and resolves all of them.
//!
//! Files are read and scanned in parallel, then registered in sorted path
//! order, so the output order never depends on which thread finished first.

use std::path::Path;

use rayon::prelude::*;
use tracing::{debug, info};

use super::config::MetadataConfig;
use super::file_loader;
use crate::base::Result;
use crate::hir::{EnumDescriptor, SymbolTable};
use crate::syntax::SourceFile;

/// Builds the ordered enum metadata for a directory of source files.
#[derive(Debug, Clone, Default)]
pub struct MetadataAssembler {
    config: MetadataConfig,
}

impl MetadataAssembler {
    pub fn new(config: MetadataConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MetadataConfig {
        &self.config
    }

    /// Load `dir` into a symbol table without resolving anything.
    ///
    /// Files without enums, and files that are not UTF-8, are skipped. A file
    /// with enums but no package declaration fails the whole load.
    pub fn load_directory(&self, dir: &Path) -> Result<SymbolTable> {
        let paths = file_loader::collect_file_paths(dir)?;

        let scanned: Vec<Result<Option<SourceFile>>> =
            paths.par_iter().map(|path| scan_file(path)).collect();
        // First failure in path order, whichever thread hit it first.
        let sources = scanned.into_iter().collect::<Result<Vec<_>>>()?;

        let mut table = SymbolTable::new(self.config.resolve_options());
        for source in sources.into_iter().flatten() {
            table.add_file(source)?;
        }

        debug!(
            dir = %dir.display(),
            files = paths.len(),
            enum_files = table.file_count(),
            enums = table.len(),
            "loaded directory"
        );
        Ok(table)
    }

    /// Resolve every enum under `dir` and return them in discovery order.
    pub fn build(&self, dir: &Path) -> Result<Vec<EnumDescriptor>> {
        let mut table = self.load_directory(dir)?;
        table.resolve_all()?;

        let descriptors: Vec<EnumDescriptor> = table.descriptors().cloned().collect();
        info!(
            dir = %dir.display(),
            files = table.file_count(),
            enums = descriptors.len(),
            "assembled enum metadata"
        );
        Ok(descriptors)
    }
}

fn scan_file(path: &Path) -> Result<Option<SourceFile>> {
    let Some(text) = file_loader::load_file(path)? else {
        return Ok(None);
    };
    let source = SourceFile::parse(path, text)?;
    if source.is_none() {
        debug!(path = %path.display(), "no enums, skipped");
    }
    Ok(source)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::base::MetadataError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_directory_registers_in_path_order() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("b.aidl"), "package b;\nenum B { X }").unwrap();
        fs::write(
            temp_dir.path().join("a.aidl"),
            "package a;\nenum A { X }\nenum A2 { Y }",
        )
        .unwrap();
        fs::write(temp_dir.path().join("README"), "no enums here").unwrap();

        let table = MetadataAssembler::default()
            .load_directory(temp_dir.path())
            .unwrap();

        assert_eq!(table.file_count(), 2);
        assert_eq!(table.keys().collect::<Vec<_>>(), vec!["a.A", "a.A2", "b.B"]);
        assert_eq!(table.extraction_count(), 0);
    }

    #[test]
    fn test_first_malformed_file_in_path_order_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["d.aidl", "b.aidl", "c.aidl", "a.aidl"] {
            fs::write(temp_dir.path().join(name), "enum Orphan { A }").unwrap();
        }

        for _ in 0..8 {
            match MetadataAssembler::default().load_directory(temp_dir.path()) {
                Err(MetadataError::MalformedSource { path, .. }) => {
                    assert_eq!(path, temp_dir.path().join("a.aidl"));
                }
                other => panic!("expected MalformedSource, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_build_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let descriptors = MetadataAssembler::default().build(temp_dir.path()).unwrap();
        assert!(descriptors.is_empty());
    }
}
