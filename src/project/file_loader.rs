//! Input directory scanning and file reading.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::base::{MetadataError, Result};

/// Regular files directly inside `dir`, sorted by path.
///
/// Subdirectories are not descended into. The sort makes the discovery order
/// independent of the platform's directory iteration order.
pub fn collect_file_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| MetadataError::io(dir, e))?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| MetadataError::io(dir, e))?;
        let path = entry.path();
        if path.is_file() {
            paths.push(path);
        } else {
            debug!(path = %path.display(), "skipping non-file entry");
        }
    }

    paths.sort();
    Ok(paths)
}

/// Read a file as UTF-8 text. Returns `None` for files that are not UTF-8.
pub fn load_file(path: &Path) -> Result<Option<String>> {
    let bytes = std::fs::read(path).map_err(|e| MetadataError::io(path, e))?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(Some(text)),
        Err(_) => {
            warn!(path = %path.display(), "skipping file that is not valid UTF-8");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests;
