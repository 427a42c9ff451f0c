//! # Logger
//!
//! The explicit logging configuration: threshold, line format, one console
//! sink and the list of level routers. Call sites hold an `Arc<Logger>` (or a
//! reference) instead of reaching into process-wide state.
//!
//! ## Fan-out
//!
//! For each record at or above the threshold the line is formatted once,
//! written once to the console sink, and then dispatched to every router
//! whose severity set contains the record's severity. The console never
//! receives more than one copy of a record, however many routers match.
//!
//! ```rust
//! use std::sync::Arc;
//! use tierlog::{Logger, MemorySink, Severity, SeveritySet};
//!
//! let errors = MemorySink::new("errors");
//! let logger = Logger::new(Severity::Info).route(SeveritySet::at_or_above(Severity::Warn), Arc::new(errors.clone()));
//!
//! logger.emit(Severity::Error, "boom").unwrap();
//! logger.emit(Severity::Info, "fine").unwrap();
//! assert_eq!(errors.lines().len(), 1);
//! ```

use std::sync::Arc;

use crate::error::{LoggingError, LoggingResult};
use crate::format::LineFormat;
use crate::record::Record;
use crate::router::LevelRouter;
use crate::severity::{Severity, SeveritySet};
use crate::sink::{ConsoleSink, ConsoleTarget, Sink};

/// Severity routing configuration
#[derive(Debug, Clone)]
pub struct Logger
{
    threshold: Severity,
    format: LineFormat,
    console: Option<LevelRouter>,
    routes: Vec<LevelRouter>,
}

impl Default for Logger
{
    fn default() -> Self
    {
        Self::new(Severity::Info)
    }
}

impl Logger
{
    /// A logger with no outputs at all
    #[must_use]
    pub fn new(threshold: Severity) -> Self
    {
        Self {
            threshold,
            format: LineFormat::default(),
            console: None,
            routes: Vec::new(),
        }
    }

    /// A logger that writes every enabled record to the console and nowhere else
    #[must_use]
    pub fn console_only(threshold: Severity, target: ConsoleTarget) -> Self
    {
        Self::new(threshold).with_console(Arc::new(ConsoleSink::new(target)))
    }

    #[must_use]
    pub fn with_format(mut self, format: LineFormat) -> Self
    {
        self.format = format;
        self
    }

    /// Set the console sink, replacing any previous one.
    ///
    /// Routers already bound to this sink are removed, since the console
    /// sees every enabled record anyway.
    #[must_use]
    pub fn with_console(mut self, console: Arc<dyn Sink>) -> Self
    {
        self.routes.retain(|route| !route.is_bound_to(&console));
        self.console = Some(LevelRouter::new(SeveritySet::ALL, console));
        self
    }

    #[must_use]
    pub fn without_console(mut self) -> Self
    {
        self.console = None;
        self
    }

    /// Add a route.
    ///
    /// Routes are deduplicated by sink identity: a sink that is already
    /// routed gets the new severities merged into its existing entry, and the
    /// console sink is never added as a route.
    #[must_use]
    pub fn route(mut self, levels: impl Into<SeveritySet>, sink: Arc<dyn Sink>) -> Self
    {
        self.add_route(LevelRouter::new(levels, sink));
        self
    }

    pub(crate) fn add_route(&mut self, router: LevelRouter)
    {
        if self.console.as_ref().is_some_and(|console| console.is_bound_to(router.sink())) {
            return;
        }
        match self.routes.iter_mut().find(|existing| existing.is_bound_to(router.sink())) {
            Some(existing) => existing.extend(router.levels()),
            None => self.routes.push(router),
        }
    }

    pub fn set_threshold(&mut self, threshold: Severity)
    {
        tracing::trace!(%threshold, "log threshold changed");
        self.threshold = threshold;
    }

    #[must_use]
    pub fn threshold(&self) -> Severity
    {
        self.threshold
    }

    #[must_use]
    pub fn format(&self) -> &LineFormat
    {
        &self.format
    }

    #[must_use]
    pub fn console(&self) -> Option<&Arc<dyn Sink>>
    {
        self.console.as_ref().map(LevelRouter::sink)
    }

    #[must_use]
    pub fn routes(&self) -> &[LevelRouter]
    {
        &self.routes
    }

    /// Severities no router accepts
    #[must_use]
    pub fn unrouted(&self) -> SeveritySet
    {
        let routed = self.routes.iter().fold(SeveritySet::EMPTY, |acc, route| acc.union(route.levels()));
        SeveritySet::ALL.difference(routed)
    }

    /// Whether a record of `severity` would reach any sink
    #[must_use]
    pub fn enabled(&self, severity: Severity) -> bool
    {
        severity.is_enabled_at(self.threshold)
    }

    /// Write `record` to the console and every matching router.
    ///
    /// Records below the threshold are dropped without touching any sink.
    /// Every matching destination is attempted even if an earlier one fails.
    ///
    /// ## Errors
    ///
    /// Returns the first [`LoggingError::Write`]
    /// encountered.
    pub fn log(&self, record: &Record) -> LoggingResult<()>
    {
        if !self.enabled(record.severity) {
            return Ok(());
        }

        let line = self.format.format(record);
        let mut result = Ok(());

        if let Some(console) = &self.console {
            result = console.dispatch(&line);
        }

        for route in self.routes.iter().filter(|route| route.accepts(record.severity)) {
            let dispatched = route.dispatch(&line);
            if result.is_ok() {
                result = dispatched;
            }
        }

        result
    }

    /// Log a bare message at `severity`
    ///
    /// ## Errors
    ///
    /// See [`Logger::log`].
    pub fn emit(&self, severity: Severity, message: impl Into<String>) -> LoggingResult<()>
    {
        self.log(&Record::new(severity, message))
    }

    /// Flush the console and every routed sink
    ///
    /// ## Errors
    ///
    /// Returns the first flush failure; every sink is still attempted.
    pub fn flush(&self) -> LoggingResult<()>
    {
        let sinks = self.console.iter().chain(&self.routes).map(LevelRouter::sink);
        let mut result = Ok(());
        for sink in sinks {
            let flushed = sink.flush().map_err(|source| LoggingError::Write {
                sink: sink.name().to_string(),
                source,
            });
            if result.is_ok() {
                result = flushed;
            }
        }
        result
    }
}
