//! # Log Records
//!
//! A `Record` is one log event detached from the `tracing` machinery: the
//! severity it is routed by, the rendered message, and the metadata the line
//! formatter may print.

use std::fmt;

use chrono::{DateTime, Utc};
use tracing::{Event, Level};
use tracing::field::{Field, Visit};

use crate::severity::Severity;

/// Name of the event field that overrides the severity derived from the
/// `tracing` level. Used to express `Fatal` and `Panic`.
pub const SEVERITY_FIELD: &str = "severity";

/// A single log record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record
{
    /// Severity used for threshold checks and routing
    pub severity: Severity,
    /// Rendered message
    pub message: String,
    /// Module path or explicit `target:` of the call site
    pub target: String,
    /// Source file of the call site, if known
    pub file: Option<String>,
    /// Source line of the call site, if known
    pub line: Option<u32>,
    /// Structured fields in call-site order
    pub fields: Vec<(String, String)>,
    /// Time the record was captured
    pub timestamp: DateTime<Utc>,
}

impl Record
{
    /// Create a record stamped with the current time
    #[must_use]
    pub fn new(severity: Severity, message: impl Into<String>) -> Self
    {
        Self {
            severity,
            message: message.into(),
            target: String::new(),
            file: None,
            line: None,
            fields: Vec::new(),
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn with_target(mut self, target: impl Into<String>) -> Self
    {
        self.target = target.into();
        self
    }

    #[must_use]
    pub fn with_caller(mut self, file: impl Into<String>, line: u32) -> Self
    {
        self.file = Some(file.into());
        self.line = Some(line);
        self
    }

    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self
    {
        self.fields.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self
    {
        self.timestamp = timestamp;
        self
    }

    /// Capture a `tracing` event.
    ///
    /// The `message` field becomes the message and every other field is kept
    /// as a key/value pair. On `ERROR` events a `severity` field of `panic`,
    /// `fatal` or `error` replaces the level-derived severity; anywhere else,
    /// or with any other value, it is kept as an ordinary field.
    #[must_use]
    pub fn from_event(event: &Event<'_>) -> Self
    {
        let metadata = event.metadata();
        let mut visitor = RecordVisitor {
            accepts_override: *metadata.level() == Level::ERROR,
            ..RecordVisitor::default()
        };
        event.record(&mut visitor);

        Self {
            severity: visitor.severity.unwrap_or_else(|| Severity::from(*metadata.level())),
            message: visitor.message,
            target: metadata.target().to_string(),
            file: metadata.file().map(str::to_string),
            line: metadata.line(),
            fields: visitor.fields,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Default)]
struct RecordVisitor
{
    message: String,
    accepts_override: bool,
    severity: Option<Severity>,
    fields: Vec<(String, String)>,
}

impl RecordVisitor
{
    fn push(&mut self, field: &Field, value: String)
    {
        match field.name() {
            "message" => self.message = value,
            SEVERITY_FIELD if self.accepts_override && self.severity.is_none() => match value.parse() {
                Ok(severity @ (Severity::Panic | Severity::Fatal | Severity::Error)) => self.severity = Some(severity),
                _ => self.fields.push((SEVERITY_FIELD.to_string(), value)),
            },
            name => self.fields.push((name.to_string(), value)),
        }
    }
}

impl Visit for RecordVisitor
{
    fn record_str(&mut self, field: &Field, value: &str)
    {
        self.push(field, value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug)
    {
        self.push(field, format!("{value:?}"));
    }
}
