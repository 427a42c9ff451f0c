//! Tests for per-record fan-out through `Logger`

use std::io;
use std::sync::Arc;

use tierlog::{LineFormat, Logger, LoggingError, MemorySink, Record, Severity, SeveritySet, Sink};

fn plain() -> LineFormat
{
    LineFormat::default().with_color(false)
}

/// One memory sink per severity plus a memory console
fn per_severity_logger(threshold: Severity) -> (Logger, MemorySink, Vec<(Severity, MemorySink)>)
{
    let console = MemorySink::new("console");
    let mut logger = Logger::new(threshold).with_format(plain()).with_console(Arc::new(console.clone()));
    let mut sinks = Vec::new();
    for severity in Severity::ALL {
        let sink = MemorySink::new(severity.as_str());
        logger = logger.route(severity, Arc::new(sink.clone()));
        sinks.push((severity, sink));
    }
    (logger, console, sinks)
}

#[derive(Debug)]
struct FullDisk;

impl Sink for FullDisk
{
    fn name(&self) -> &str
    {
        "full-disk"
    }

    fn write_line(&self, _line: &str) -> io::Result<()>
    {
        Err(io::Error::new(io::ErrorKind::StorageFull, "no space left on device"))
    }
}

#[test]
fn test_each_severity_reaches_exactly_its_sink()
{
    let (logger, console, sinks) = per_severity_logger(Severity::Trace);
    assert!(logger.unrouted().is_empty());

    for severity in Severity::ALL {
        for (_, sink) in &sinks {
            sink.clear();
        }
        let record = Record::new(severity, format!("{severity} happened"));
        logger.log(&record).unwrap();

        let holders: Vec<Severity> = sinks
            .iter()
            .filter(|(_, sink)| sink.contents().contains(&record.message))
            .map(|(s, _)| *s)
            .collect();
        assert_eq!(holders, vec![severity]);
    }

    assert_eq!(console.lines().len(), Severity::ALL.len());
}

#[test]
fn test_threshold_drops_less_severe_records()
{
    let (logger, console, sinks) = per_severity_logger(Severity::Warn);

    for severity in Severity::ALL {
        logger.emit(severity, "message").unwrap();
    }

    for (severity, sink) in &sinks {
        let expected = usize::from(severity.is_enabled_at(Severity::Warn));
        assert_eq!(sink.lines().len(), expected, "{severity}");
    }
    assert_eq!(console.lines().len(), 4);
    assert!(!logger.enabled(Severity::Info));
    assert!(logger.enabled(Severity::Panic));
}

#[test]
fn test_console_written_once_for_overlapping_routes()
{
    let console = MemorySink::new("console");
    let errors = MemorySink::new("errors");
    let everything = MemorySink::new("everything");
    let logger = Logger::new(Severity::Info)
        .with_format(plain())
        .with_console(Arc::new(console.clone()))
        .route(SeveritySet::at_or_above(Severity::Warn), Arc::new(errors.clone()))
        .route(SeveritySet::ALL, Arc::new(everything.clone()));

    logger.emit(Severity::Error, "boom").unwrap();

    assert_eq!(console.lines().len(), 1);
    assert_eq!(errors.lines().len(), 1);
    assert_eq!(everything.lines().len(), 1);
}

#[test]
fn test_routes_deduplicated_by_sink_identity()
{
    let shared: Arc<dyn Sink> = Arc::new(MemorySink::new("shared"));
    let logger = Logger::new(Severity::Trace)
        .route(Severity::Error, Arc::clone(&shared))
        .route(Severity::Warn, Arc::clone(&shared))
        .route(Severity::Error, Arc::clone(&shared));

    assert_eq!(logger.routes().len(), 1);
    assert_eq!(
        logger.routes()[0].levels(),
        SeveritySet::only(Severity::Error).with(Severity::Warn)
    );
}

#[test]
fn test_console_sink_is_never_a_route()
{
    let console = MemorySink::new("console");
    let console_sink: Arc<dyn Sink> = Arc::new(console.clone());

    let logger = Logger::new(Severity::Info)
        .with_format(plain())
        .with_console(Arc::clone(&console_sink))
        .route(SeveritySet::ALL, Arc::clone(&console_sink));
    assert!(logger.routes().is_empty());

    // Setting the console after the route removes the route as well.
    let logger = Logger::new(Severity::Info)
        .with_format(plain())
        .route(SeveritySet::ALL, Arc::clone(&console_sink))
        .with_console(console_sink);
    assert!(logger.routes().is_empty());

    logger.emit(Severity::Info, "once").unwrap();
    assert_eq!(console.lines().len(), 1);
}

#[test]
fn test_write_failure_is_returned_and_other_sinks_still_written()
{
    let errors = MemorySink::new("errors");
    let logger = Logger::new(Severity::Info)
        .with_format(plain())
        .route(Severity::Error, Arc::new(FullDisk))
        .route(Severity::Error, Arc::new(errors.clone()));

    match logger.emit(Severity::Error, "boom") {
        Err(LoggingError::Write { sink, source }) => {
            assert_eq!(sink, "full-disk");
            assert_eq!(source.kind(), io::ErrorKind::StorageFull);
        }
        other => panic!("expected write error, got {other:?}"),
    }
    assert_eq!(errors.lines().len(), 1);
}

#[test]
fn test_same_line_on_console_and_file()
{
    let (logger, console, sinks) = per_severity_logger(Severity::Info);
    let record = Record::new(Severity::Error, "boom").with_caller("src/main.rs", 7);
    logger.log(&record).unwrap();

    let expected = logger.format().format(&record);
    let error_sink = &sinks.iter().find(|(s, _)| *s == Severity::Error).unwrap().1;
    assert_eq!(error_sink.contents(), expected);
    assert_eq!(console.contents(), expected);
}
