#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::super::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_collect_file_paths_sorted() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    for name in ["b.aidl", "a.aidl", "C.aidl", "notes.txt"] {
        fs::write(temp_dir.path().join(name), "").expect("Failed to write test file");
    }

    let paths = collect_file_paths(temp_dir.path()).unwrap();
    let names: Vec<_> = paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();

    // Every file is collected regardless of extension, in byte order.
    assert_eq!(names, vec!["C.aidl", "a.aidl", "b.aidl", "notes.txt"]);
}

#[test]
fn test_collect_file_paths_skips_subdirectories() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let nested = temp_dir.path().join("nested");
    fs::create_dir(&nested).unwrap();
    fs::write(nested.join("Inner.aidl"), "package x;").unwrap();
    fs::write(temp_dir.path().join("Outer.aidl"), "package y;").unwrap();

    let paths = collect_file_paths(temp_dir.path()).unwrap();
    assert_eq!(paths, vec![temp_dir.path().join("Outer.aidl")]);
}

#[test]
fn test_collect_file_paths_missing_directory() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let missing = temp_dir.path().join("missing");

    let err = collect_file_paths(&missing).unwrap_err();
    assert!(matches!(err, MetadataError::Io { ref path, .. } if path == &missing));
}

#[test]
fn test_load_file_utf8() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("Color.aidl");
    fs::write(&path, "package p;\nenum Color { RED }\n").unwrap();

    let text = load_file(&path).unwrap();
    assert_eq!(text.as_deref(), Some("package p;\nenum Color { RED }\n"));
}

#[test]
fn test_load_file_skips_binary() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("blob.bin");
    fs::write(&path, [0xff, 0xfe, 0x00, 0x80]).unwrap();

    assert_eq!(load_file(&path).unwrap(), None);
}
