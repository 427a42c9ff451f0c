//! Tests for global installation
//!
//! Kept to a single test: the global subscriber is process-wide state.

use std::sync::Arc;

use tierlog::{LineFormat, Logger, MemorySink, Severity};

fn memory_logger(sink: &MemorySink, threshold: Severity) -> Logger
{
    Logger::new(threshold)
        .with_format(LineFormat::default().with_color(false))
        .with_console(Arc::new(sink.clone()))
}

#[test]
fn test_install_replaces_previous_logger()
{
    assert!(tierlog::installed().is_none());

    let first = MemorySink::new("first");
    let installed = tierlog::install(memory_logger(&first, Severity::Info)).unwrap();
    assert_eq!(installed.threshold(), Severity::Info);

    tracing::info!("to the first logger");
    tracing::debug!("below the first threshold");
    assert_eq!(first.lines().len(), 1);
    assert!(first.contents().contains("to the first logger"));

    let second = MemorySink::new("second");
    tierlog::install(memory_logger(&second, Severity::Debug)).unwrap();
    first.clear();

    tracing::info!("to the second logger");
    tracing::debug!("also to the second logger");
    tierlog::fatal!("fatal to the second logger");

    assert!(first.contents().is_empty());
    assert_eq!(second.lines().len(), 3);
    assert!(second.lines()[2].contains("FATAL"));

    let current = tierlog::installed().unwrap();
    assert_eq!(current.threshold(), Severity::Debug);
}
