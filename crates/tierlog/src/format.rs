//! # Line Format
//!
//! Turns a [`Record`] into the single line written to every sink.
//!
//! ```text
//! 2026-10-18T09:14:03.512Z ERROR [src/main.rs:27] boom attempt=3
//! ```
//!
//! The format is fixed per `Logger`: the timestamp pattern, color, caller
//! location and target printing are chosen once at configuration time.

use std::fmt::Write as _;

use chrono::format::{Item, StrftimeItems};
use nu_ansi_term::{Color, Style};

use crate::error::{LoggingError, LoggingResult};
use crate::record::Record;
use crate::severity::Severity;

/// Default strftime pattern (RFC 3339, millisecond precision, UTC)
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Formatter configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFormat
{
    timestamp_format: String,
    color: bool,
    caller: bool,
    target: bool,
}

impl Default for LineFormat
{
    fn default() -> Self
    {
        Self {
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            color: true,
            caller: true,
            target: false,
        }
    }
}

impl LineFormat
{
    /// Replace the timestamp pattern.
    ///
    /// ## Errors
    ///
    /// Returns [`LoggingError::InvalidTimestampFormat`] if `pattern` contains
    /// a specifier chrono does not understand.
    pub fn with_timestamp_format(mut self, pattern: &str) -> LoggingResult<Self>
    {
        if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
            return Err(LoggingError::InvalidTimestampFormat(pattern.to_string()));
        }
        self.timestamp_format = pattern.to_string();
        Ok(self)
    }

    /// Force ANSI color on or off
    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self
    {
        self.color = color;
        self
    }

    /// Print `[file:line]` when the record carries a caller location
    #[must_use]
    pub fn with_caller(mut self, caller: bool) -> Self
    {
        self.caller = caller;
        self
    }

    /// Print the record target before the message
    #[must_use]
    pub fn with_target(mut self, target: bool) -> Self
    {
        self.target = target;
        self
    }

    #[must_use]
    pub fn timestamp_format(&self) -> &str
    {
        &self.timestamp_format
    }

    #[must_use]
    pub fn color(&self) -> bool
    {
        self.color
    }

    /// Render `record` as one newline-terminated line
    #[must_use]
    pub fn format(&self, record: &Record) -> String
    {
        let mut line = String::with_capacity(96 + record.message.len());
        self.write_timestamp(&mut line, record);
        self.write_body(&mut line, record);
        line.push('\n');
        line
    }

    /// Falls back to [`DEFAULT_TIMESTAMP_FORMAT`] if the configured pattern
    /// fails while rendering.
    fn write_timestamp(&self, out: &mut String, record: &Record)
    {
        let start = out.len();
        if write!(out, "{}", record.timestamp.format(&self.timestamp_format)).is_err() {
            out.truncate(start);
            out.push_str(&record.timestamp.format(DEFAULT_TIMESTAMP_FORMAT).to_string());
        }
        out.push(' ');
    }

    fn write_body(&self, out: &mut String, record: &Record)
    {
        if self.color {
            out.push_str(&level_style(record.severity).paint(record.severity.label()).to_string());
        } else {
            out.push_str(record.severity.label());
        }

        if self.caller {
            if let (Some(file), Some(line)) = (&record.file, record.line) {
                out.push_str(&format!(" [{file}:{line}]"));
            }
        }

        if self.target && !record.target.is_empty() {
            out.push(' ');
            out.push_str(&record.target);
            out.push(':');
        }

        if !record.message.is_empty() {
            out.push(' ');
            out.push_str(&record.message);
        }

        for (key, value) in &record.fields {
            if needs_quoting(value) {
                out.push_str(&format!(" {key}={value:?}"));
            } else {
                out.push_str(&format!(" {key}={value}"));
            }
        }
    }
}

fn level_style(severity: Severity) -> Style
{
    match severity {
        Severity::Panic | Severity::Fatal => Color::Red.bold(),
        Severity::Error => Color::Red.normal(),
        Severity::Warn => Color::Yellow.normal(),
        Severity::Info => Color::Blue.normal(),
        Severity::Debug | Severity::Trace => Style::new().dimmed(),
    }
}

fn needs_quoting(value: &str) -> bool
{
    value.is_empty() || value.chars().any(|c| c.is_whitespace() || c == '=' || c == '"')
}
