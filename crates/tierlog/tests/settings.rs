//! Tests for environment-driven setup

use std::collections::HashMap;

use tempfile::TempDir;
use tierlog::settings::{DIR_VAR, LAYOUT_VAR, LEVEL_VAR, NAMING_VAR};
use tierlog::{LogSettings, LoggingError, Severity};

fn env(vars: &[(&str, String)]) -> impl Fn(&str) -> Option<String>
{
    let vars: HashMap<String, String> = vars.iter().map(|(k, v)| ((*k).to_string(), v.clone())).collect();
    move |key| vars.get(key).cloned()
}

fn file_count(dir: &TempDir) -> usize
{
    std::fs::read_dir(dir.path()).unwrap().count()
}

#[test]
fn test_missing_dir_is_console_only()
{
    let settings = LogSettings::from_lookup(env(&[])).unwrap();
    let logger = settings.into_logger("svc").unwrap();

    assert!(logger.routes().is_empty());
    assert!(logger.console().is_some());
    assert_eq!(logger.threshold(), Severity::Info);
}

#[test]
fn test_bogus_level_aborts_before_files_are_created()
{
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let dir = temp_dir.path().to_string_lossy().into_owned();

    let result = LogSettings::from_lookup(env(&[(DIR_VAR, dir), (LEVEL_VAR, "bogus".to_string())]));

    assert!(matches!(result, Err(LoggingError::InvalidLevel(level)) if level == "bogus"));
    assert_eq!(file_count(&temp_dir), 0);
}

#[test]
fn test_dir_builds_files()
{
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let dir = temp_dir.path().to_string_lossy().into_owned();

    let logger = LogSettings::from_lookup(env(&[
        (DIR_VAR, dir),
        (LEVEL_VAR, "warn".to_string()),
        (LAYOUT_VAR, "grouped".to_string()),
        (NAMING_VAR, "suffix-first".to_string()),
    ]))
    .unwrap()
    .into_logger("svc")
    .unwrap();

    assert_eq!(logger.threshold(), Severity::Warn);
    assert_eq!(logger.routes().len(), 2);
    assert!(temp_dir.path().join("errors.svc.log").is_file());
    assert!(temp_dir.path().join("info.svc.log").is_file());
    assert_eq!(file_count(&temp_dir), 2);
}
