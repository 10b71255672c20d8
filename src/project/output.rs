//! JSON output and check mode.

use std::path::Path;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::base::constants::JSON_INDENT;
use crate::base::{MetadataError, Result};
use crate::hir::EnumDescriptor;

/// Serialize descriptors as a pretty-printed JSON array.
pub fn to_json(descriptors: &[EnumDescriptor]) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(JSON_INDENT));
    descriptors.serialize(&mut serializer)?;
    Ok(buffer)
}

/// Write descriptors to `path`, replacing any existing file.
pub fn write_json(path: &Path, descriptors: &[EnumDescriptor]) -> Result<()> {
    let bytes = to_json(descriptors)?;
    std::fs::write(path, bytes).map_err(|e| MetadataError::io(path, e))
}

/// Compare a generated file with its checked-in copy byte for byte.
pub fn check_against(generated: &Path, expected: &Path) -> Result<()> {
    let generated_bytes = std::fs::read(generated).map_err(|e| MetadataError::io(generated, e))?;
    let expected_bytes = std::fs::read(expected).map_err(|e| MetadataError::io(expected, e))?;

    if generated_bytes == expected_bytes {
        Ok(())
    } else {
        Err(MetadataError::CheckMismatch {
            expected: expected.to_path_buf(),
            generated: generated.to_path_buf(),
        })
    }
}

/// Check mode: compare with the checked-in copy, then create the stamp file
/// (when given) only if they match.
pub fn check_and_stamp(generated: &Path, expected: &Path, stamp: Option<&Path>) -> Result<()> {
    check_against(generated, expected)?;
    if let Some(stamp) = stamp {
        write_stamp(stamp)?;
    }
    Ok(())
}

/// Create (or truncate) an empty stamp file.
pub fn write_stamp(path: &Path) -> Result<()> {
    std::fs::write(path, b"").map_err(|e| MetadataError::io(path, e))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::hir::EnumMember;
    use tempfile::TempDir;

    fn color() -> EnumDescriptor {
        let mut descriptor = EnumDescriptor::new("p", "Color");
        descriptor.members.push(EnumMember::new("RED", 1));
        descriptor
    }

    #[test]
    fn test_four_space_indent() {
        let json = String::from_utf8(to_json(&[color()]).unwrap()).unwrap();
        let expected = r#"[
    {
        "name": "Color",
        "package": "p",
        "values": [
            {
                "name": "RED",
                "value": 1
            }
        ]
    }
]"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(to_json(&[]).unwrap(), b"[]");
    }

    #[test]
    fn test_check_against() {
        let temp_dir = TempDir::new().unwrap();
        let generated = temp_dir.path().join("generated.json");
        let expected = temp_dir.path().join("expected.json");

        write_json(&generated, &[color()]).unwrap();
        write_json(&expected, &[color()]).unwrap();
        check_against(&generated, &expected).unwrap();

        std::fs::write(&expected, "[]").unwrap();
        let err = check_against(&generated, &expected).unwrap_err();
        assert!(matches!(err, MetadataError::CheckMismatch { .. }));
        assert!(err.to_string().contains("needs to be updated"));
    }

    #[test]
    fn test_check_against_missing_expected() {
        let temp_dir = TempDir::new().unwrap();
        let generated = temp_dir.path().join("generated.json");
        write_json(&generated, &[]).unwrap();

        let err = check_against(&generated, &temp_dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, MetadataError::Io { .. }));
    }

    #[test]
    fn test_stamp_only_after_passing_check() {
        let temp_dir = TempDir::new().unwrap();
        let generated = temp_dir.path().join("generated.json");
        let expected = temp_dir.path().join("expected.json");
        let stamp = temp_dir.path().join("stamp");
        write_json(&generated, &[color()]).unwrap();

        std::fs::write(&expected, "[]").unwrap();
        assert!(check_and_stamp(&generated, &expected, Some(stamp.as_path())).is_err());
        assert!(!stamp.exists());

        write_json(&expected, &[color()]).unwrap();
        check_and_stamp(&generated, &expected, Some(stamp.as_path())).unwrap();
        assert!(stamp.exists());
    }

    #[test]
    fn test_write_stamp() {
        let temp_dir = TempDir::new().unwrap();
        let stamp = temp_dir.path().join("stamp");
        std::fs::write(&stamp, "old").unwrap();

        write_stamp(&stamp).unwrap();
        assert_eq!(std::fs::read(&stamp).unwrap(), b"");
    }
}
