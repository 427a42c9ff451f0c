//! # Level Router
//!
//! A router binds a set of severities to one sink. It has no state beyond
//! that binding: the [`Logger`](crate::Logger) formats each record once and
//! hands the line to every router whose set contains the record's severity.

use std::sync::Arc;

use crate::error::{LoggingError, LoggingResult};
use crate::severity::{Severity, SeveritySet};
use crate::sink::Sink;

/// One route entry: severities plus the sink they are written to
#[derive(Debug, Clone)]
pub struct LevelRouter
{
    levels: SeveritySet,
    sink: Arc<dyn Sink>,
}

impl LevelRouter
{
    #[must_use]
    pub fn new(levels: impl Into<SeveritySet>, sink: Arc<dyn Sink>) -> Self
    {
        Self {
            levels: levels.into(),
            sink,
        }
    }

    /// The severities this router wants
    #[must_use]
    pub fn levels(&self) -> SeveritySet
    {
        self.levels
    }

    #[must_use]
    pub fn accepts(&self, severity: Severity) -> bool
    {
        self.levels.contains(severity)
    }

    #[must_use]
    pub fn sink(&self) -> &Arc<dyn Sink>
    {
        &self.sink
    }

    /// Whether this router writes to the very same sink object as `sink`
    #[must_use]
    pub fn is_bound_to(&self, sink: &Arc<dyn Sink>) -> bool
    {
        same_sink(&self.sink, sink)
    }

    pub(crate) fn extend(&mut self, levels: SeveritySet)
    {
        self.levels = self.levels.union(levels);
    }

    /// Write an already formatted record to the bound sink.
    ///
    /// ## Errors
    ///
    /// Returns [`LoggingError::Write`] naming the sink if the write fails.
    pub fn dispatch(&self, line: &str) -> LoggingResult<()>
    {
        self.sink.write_line(line).map_err(|source| LoggingError::Write {
            sink: self.sink.name().to_string(),
            source,
        })
    }
}

/// Identity comparison of two sinks, ignoring vtable differences
fn same_sink(a: &Arc<dyn Sink>, b: &Arc<dyn Sink>) -> bool
{
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

#[cfg(test)]
mod tests
{
    use std::io;

    use super::*;
    use crate::sink::MemorySink;

    #[derive(Debug)]
    struct BrokenSink;

    impl Sink for BrokenSink
    {
        fn name(&self) -> &str
        {
            "broken"
        }

        fn write_line(&self, _line: &str) -> io::Result<()>
        {
            Err(io::Error::new(io::ErrorKind::StorageFull, "no space left on device"))
        }
    }

    #[test]
    fn test_dispatch_writes_line()
    {
        let memory = MemorySink::new("errors");
        let router = LevelRouter::new(SeveritySet::at_or_above(Severity::Warn), Arc::new(memory.clone()));

        assert!(router.accepts(Severity::Fatal));
        assert!(!router.accepts(Severity::Info));

        router.dispatch("line\n").unwrap();
        assert_eq!(memory.contents(), "line\n");
    }

    #[test]
    fn test_dispatch_failure_names_sink()
    {
        let router = LevelRouter::new(Severity::Error, Arc::new(BrokenSink));
        match router.dispatch("line\n") {
            Err(LoggingError::Write { sink, source }) => {
                assert_eq!(sink, "broken");
                assert_eq!(source.kind(), io::ErrorKind::StorageFull);
            }
            other => panic!("expected write error, got {other:?}"),
        }
    }

    #[test]
    fn test_identity()
    {
        let shared: Arc<dyn Sink> = Arc::new(MemorySink::new("shared"));
        let other: Arc<dyn Sink> = Arc::new(MemorySink::new("shared"));
        let router = LevelRouter::new(Severity::Info, Arc::clone(&shared));

        assert!(router.is_bound_to(&shared));
        assert!(!router.is_bound_to(&other));
    }
}
