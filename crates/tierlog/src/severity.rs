//! # Severity Levels
//!
//! The seven severities records are routed by, and a compact set type used to
//! describe which severities a route is interested in.
//!
//! Severities are ordered most severe first, so `Severity::Panic` is the
//! smallest value and `Severity::Trace` the largest. A record passes a
//! threshold when `record.severity <= threshold`.

use std::fmt;
use std::str::FromStr;

use tracing::Level;
use tracing::level_filters::LevelFilter;

use crate::error::LoggingError;

/// Severity of a log record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity
{
    /// Highest severity; the process is expected to unwind after logging
    Panic,
    /// The process is expected to exit after logging
    Fatal,
    /// Error level
    Error,
    /// Warning level
    Warn,
    /// Info level (default threshold)
    Info,
    /// Debug level
    Debug,
    /// Trace level (most verbose)
    Trace,
}

impl Severity
{
    /// Every severity, most severe first
    pub const ALL: [Severity; 7] = [
        Severity::Panic,
        Severity::Fatal,
        Severity::Error,
        Severity::Warn,
        Severity::Info,
        Severity::Debug,
        Severity::Trace,
    ];

    /// Lower-case name, also used as the per-severity file suffix
    #[must_use]
    pub const fn as_str(self) -> &'static str
    {
        match self {
            Severity::Panic => "panic",
            Severity::Fatal => "fatal",
            Severity::Error => "error",
            Severity::Warn => "warn",
            Severity::Info => "info",
            Severity::Debug => "debug",
            Severity::Trace => "trace",
        }
    }

    /// Upper-case label padded to five columns, as printed in log lines
    #[must_use]
    pub const fn label(self) -> &'static str
    {
        match self {
            Severity::Panic => "PANIC",
            Severity::Fatal => "FATAL",
            Severity::Error => "ERROR",
            Severity::Warn => "WARN ",
            Severity::Info => "INFO ",
            Severity::Debug => "DEBUG",
            Severity::Trace => "TRACE",
        }
    }

    /// Whether a record of this severity passes `threshold`
    #[must_use]
    pub fn is_enabled_at(self, threshold: Severity) -> bool
    {
        self <= threshold
    }

    /// The most severe value a `tracing` level can carry.
    ///
    /// `ERROR` events may be upgraded to `Fatal` or `Panic` through a
    /// `severity` field, so interest checks done on metadata alone have to
    /// assume the worst case.
    #[must_use]
    pub fn most_severe_for(level: Level) -> Severity
    {
        if level == Level::ERROR {
            Severity::Panic
        } else {
            Severity::from(level)
        }
    }

    const fn bit(self) -> u8
    {
        1 << (self as u8)
    }
}

impl From<Level> for Severity
{
    fn from(level: Level) -> Self
    {
        match level {
            Level::ERROR => Severity::Error,
            Level::WARN => Severity::Warn,
            Level::INFO => Severity::Info,
            Level::DEBUG => Severity::Debug,
            _ => Severity::Trace,
        }
    }
}

impl From<Severity> for Level
{
    fn from(severity: Severity) -> Self
    {
        match severity {
            Severity::Panic | Severity::Fatal | Severity::Error => Level::ERROR,
            Severity::Warn => Level::WARN,
            Severity::Info => Level::INFO,
            Severity::Debug => Level::DEBUG,
            Severity::Trace => Level::TRACE,
        }
    }
}

impl From<Severity> for LevelFilter
{
    fn from(severity: Severity) -> Self
    {
        LevelFilter::from_level(Level::from(severity))
    }
}

impl FromStr for Severity
{
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.trim().to_lowercase().as_str() {
            "panic" => Ok(Severity::Panic),
            "fatal" => Ok(Severity::Fatal),
            "error" => Ok(Severity::Error),
            "warn" | "warning" => Ok(Severity::Warn),
            "info" => Ok(Severity::Info),
            "debug" => Ok(Severity::Debug),
            "trace" => Ok(Severity::Trace),
            _ => Err(LoggingError::InvalidLevel(s.to_string())),
        }
    }
}

impl fmt::Display for Severity
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.write_str(self.as_str())
    }
}

/// A set of severities
///
/// Stored as a bit mask, so it is `Copy` and can be built in `const` context:
///
/// ```rust
/// use tierlog::{Severity, SeveritySet};
///
/// const LOUD: SeveritySet = SeveritySet::EMPTY.with(Severity::Panic).with(Severity::Fatal);
/// assert!(LOUD.contains(Severity::Fatal));
/// assert!(!LOUD.contains(Severity::Error));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SeveritySet(u8);

impl SeveritySet
{
    /// No severities
    pub const EMPTY: SeveritySet = SeveritySet(0);

    /// Every severity
    pub const ALL: SeveritySet = SeveritySet(0b0111_1111);

    /// A set holding exactly one severity
    #[must_use]
    pub const fn only(severity: Severity) -> Self
    {
        SeveritySet(severity.bit())
    }

    /// Every severity at least as severe as `threshold`
    #[must_use]
    pub const fn at_or_above(threshold: Severity) -> Self
    {
        SeveritySet((threshold.bit() << 1) - 1)
    }

    /// This set plus `severity`
    #[must_use]
    pub const fn with(self, severity: Severity) -> Self
    {
        SeveritySet(self.0 | severity.bit())
    }

    /// Adds `severity` in place
    pub fn insert(&mut self, severity: Severity)
    {
        self.0 |= severity.bit();
    }

    #[must_use]
    pub const fn contains(self, severity: Severity) -> bool
    {
        self.0 & severity.bit() != 0
    }

    #[must_use]
    pub const fn union(self, other: SeveritySet) -> Self
    {
        SeveritySet(self.0 | other.0)
    }

    #[must_use]
    pub const fn intersection(self, other: SeveritySet) -> Self
    {
        SeveritySet(self.0 & other.0)
    }

    /// Severities in `self` that are not in `other`
    #[must_use]
    pub const fn difference(self, other: SeveritySet) -> Self
    {
        SeveritySet(self.0 & !other.0)
    }

    #[must_use]
    pub const fn is_empty(self) -> bool
    {
        self.0 == 0
    }

    #[must_use]
    pub const fn len(self) -> usize
    {
        self.0.count_ones() as usize
    }

    /// Iterates the members, most severe first
    pub fn iter(self) -> impl Iterator<Item = Severity>
    {
        Severity::ALL.into_iter().filter(move |s| self.contains(*s))
    }
}

impl FromIterator<Severity> for SeveritySet
{
    fn from_iter<I: IntoIterator<Item = Severity>>(iter: I) -> Self
    {
        iter.into_iter().fold(SeveritySet::EMPTY, SeveritySet::with)
    }
}

impl From<Severity> for SeveritySet
{
    fn from(severity: Severity) -> Self
    {
        SeveritySet::only(severity)
    }
}

impl fmt::Debug for SeveritySet
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_severity_from_str()
    {
        assert_eq!("panic".parse::<Severity>().unwrap(), Severity::Panic);
        assert_eq!("FATAL".parse::<Severity>().unwrap(), Severity::Fatal);
        assert_eq!("Error".parse::<Severity>().unwrap(), Severity::Error);
        assert_eq!("warning".parse::<Severity>().unwrap(), Severity::Warn);
        assert_eq!(" info ".parse::<Severity>().unwrap(), Severity::Info);
        assert_eq!("debug".parse::<Severity>().unwrap(), Severity::Debug);
        assert_eq!("trace".parse::<Severity>().unwrap(), Severity::Trace);
        assert!(matches!("bogus".parse::<Severity>(), Err(LoggingError::InvalidLevel(s)) if s == "bogus"));
    }

    #[test]
    fn test_severity_order_is_most_severe_first()
    {
        assert!(Severity::Panic < Severity::Fatal);
        assert!(Severity::Error < Severity::Warn);
        assert!(Severity::Debug < Severity::Trace);
        assert!(Severity::Warn.is_enabled_at(Severity::Warn));
        assert!(Severity::Error.is_enabled_at(Severity::Warn));
        assert!(!Severity::Info.is_enabled_at(Severity::Warn));
    }

    #[test]
    fn test_severity_tracing_level_mapping()
    {
        assert_eq!(Severity::from(Level::ERROR), Severity::Error);
        assert_eq!(Severity::from(Level::TRACE), Severity::Trace);
        assert_eq!(Level::from(Severity::Fatal), Level::ERROR);
        assert_eq!(Level::from(Severity::Panic), Level::ERROR);
        assert_eq!(Severity::most_severe_for(Level::ERROR), Severity::Panic);
        assert_eq!(Severity::most_severe_for(Level::WARN), Severity::Warn);
        assert_eq!(LevelFilter::from(Severity::Warn), LevelFilter::WARN);
    }

    #[test]
    fn test_severity_set_operations()
    {
        let set: SeveritySet = [Severity::Error, Severity::Warn].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(Severity::Error));
        assert!(!set.contains(Severity::Info));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Severity::Error, Severity::Warn]);

        assert_eq!(SeveritySet::ALL.len(), Severity::ALL.len());
        assert!(SeveritySet::EMPTY.is_empty());
        assert_eq!(SeveritySet::ALL.difference(set).len(), 5);
        assert_eq!(SeveritySet::ALL.intersection(set), set);
    }

    #[test]
    fn test_severity_set_at_or_above()
    {
        let set = SeveritySet::at_or_above(Severity::Warn);
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![Severity::Panic, Severity::Fatal, Severity::Error, Severity::Warn]
        );
        assert_eq!(SeveritySet::at_or_above(Severity::Trace), SeveritySet::ALL);
        assert_eq!(SeveritySet::at_or_above(Severity::Panic), SeveritySet::only(Severity::Panic));
    }
}
