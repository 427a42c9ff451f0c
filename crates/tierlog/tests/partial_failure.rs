//! Tests for handle release when sink set creation fails part way
//!
//! Separate binary so no other test opens files while descriptors are counted.

#![cfg(target_os = "linux")]

use std::fs;

use tempfile::TempDir;
use tierlog::{LoggingError, SinkSetBuilder};

fn open_descriptors() -> usize
{
    fs::read_dir("/proc/self/fd").unwrap().count()
}

#[test]
fn test_failed_build_closes_opened_files()
{
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    // Blocks the fourth bucket, after panic, fatal and error are open.
    fs::create_dir(temp_dir.path().join("svc.warn.log")).unwrap();

    let before = open_descriptors();
    let result = SinkSetBuilder::new("svc", temp_dir.path()).without_console().build();
    let after = open_descriptors();

    assert!(matches!(result, Err(LoggingError::CreateFile { .. })));
    assert!(temp_dir.path().join("svc.error.log").is_file());
    assert_eq!(before, after);
}
