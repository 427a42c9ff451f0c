//! # Sink Set Builder
//!
//! Creates the per-bucket log files for an application and assembles the
//! [`Logger`] that routes into them.
//!
//! Two bucket layouts are supported:
//!
//! | Policy            | Files (`AppFirst` naming)                                  |
//! |-------------------|------------------------------------------------------------|
//! | `PerSeverityFile` | `svc.panic.log`, `svc.fatal.log`, ..., `svc.trace.log`     |
//! | `GroupedBucket`   | `svc.errors.log` (panic..warn), `svc.info.log` (info..trace) |
//!
//! Every build removes and recreates the files, so nothing from a previous run
//! survives.
//!
//! ```rust,no_run
//! use tierlog::{RoutePolicy, Severity, SinkSetBuilder};
//!
//! let logger = SinkSetBuilder::new("svc", "/tmp")
//!     .policy(RoutePolicy::GroupedBucket)
//!     .threshold(Severity::Debug)
//!     .build()
//!     .expect("Failed to create log files");
//! logger.emit(Severity::Warn, "disk almost full").unwrap();
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{LoggingError, LoggingResult};
use crate::format::LineFormat;
use crate::logger::Logger;
use crate::router::LevelRouter;
use crate::severity::{Severity, SeveritySet};
use crate::sink::{ConsoleSink, ConsoleTarget, FileSink, Sink};

/// How severities are grouped into files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoutePolicy
{
    /// One file per severity (default)
    #[default]
    PerSeverityFile,
    /// `errors` for panic..warn, `info` for info..trace
    GroupedBucket,
}

/// One file bucket: its name suffix and the severities written to it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket
{
    pub suffix: &'static str,
    pub levels: SeveritySet,
}

const GROUPED_BUCKETS: [Bucket; 2] = [
    Bucket {
        suffix: "errors",
        levels: SeveritySet::at_or_above(Severity::Warn),
    },
    Bucket {
        suffix: "info",
        levels: SeveritySet::ALL.difference(SeveritySet::at_or_above(Severity::Warn)),
    },
];

impl RoutePolicy
{
    /// The buckets of this policy, most severe first.
    ///
    /// The buckets of either policy partition the full severity set.
    #[must_use]
    pub fn buckets(self) -> Vec<Bucket>
    {
        match self {
            RoutePolicy::PerSeverityFile => Severity::ALL
                .into_iter()
                .map(|severity| Bucket {
                    suffix: severity.as_str(),
                    levels: SeveritySet::only(severity),
                })
                .collect(),
            RoutePolicy::GroupedBucket => GROUPED_BUCKETS.to_vec(),
        }
    }

    /// The bucket a severity is written to
    #[must_use]
    pub fn bucket_for(self, severity: Severity) -> Bucket
    {
        match self {
            RoutePolicy::PerSeverityFile => Bucket {
                suffix: severity.as_str(),
                levels: SeveritySet::only(severity),
            },
            RoutePolicy::GroupedBucket => {
                if GROUPED_BUCKETS[0].levels.contains(severity) {
                    GROUPED_BUCKETS[0]
                } else {
                    GROUPED_BUCKETS[1]
                }
            }
        }
    }
}

impl FromStr for RoutePolicy
{
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.trim().to_lowercase().as_str() {
            "per-severity" | "per_severity" | "all" | "levels" => Ok(RoutePolicy::PerSeverityFile),
            "grouped" | "buckets" | "two" => Ok(RoutePolicy::GroupedBucket),
            _ => Err(LoggingError::InvalidSetting {
                key: "layout".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for RoutePolicy
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self {
            RoutePolicy::PerSeverityFile => f.write_str("per-severity"),
            RoutePolicy::GroupedBucket => f.write_str("grouped"),
        }
    }
}

/// Order of application name and bucket suffix in file names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileNaming
{
    /// `<app>.<suffix>.log` (default)
    #[default]
    AppFirst,
    /// `<suffix>.<app>.log`
    SuffixFirst,
}

impl FileNaming
{
    #[must_use]
    pub fn file_name(self, app_name: &str, suffix: &str) -> String
    {
        match self {
            FileNaming::AppFirst => format!("{app_name}.{suffix}.log"),
            FileNaming::SuffixFirst => format!("{suffix}.{app_name}.log"),
        }
    }
}

impl FromStr for FileNaming
{
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.trim().to_lowercase().as_str() {
            "app-first" | "app_first" | "app" => Ok(FileNaming::AppFirst),
            "suffix-first" | "suffix_first" | "suffix" | "level-first" => Ok(FileNaming::SuffixFirst),
            _ => Err(LoggingError::InvalidSetting {
                key: "naming".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Builder for a file-backed [`Logger`]
#[derive(Debug, Clone)]
pub struct SinkSetBuilder
{
    app_name: String,
    dir: PathBuf,
    threshold: Severity,
    policy: RoutePolicy,
    naming: FileNaming,
    format: LineFormat,
    console: Option<Arc<dyn Sink>>,
}

impl SinkSetBuilder
{
    /// Start a builder for `app_name` writing into `dir`.
    ///
    /// Defaults: threshold `Info`, one file per severity, `AppFirst` naming,
    /// default line format, console on standard error.
    #[must_use]
    pub fn new(app_name: impl Into<String>, dir: impl Into<PathBuf>) -> Self
    {
        Self {
            app_name: app_name.into(),
            dir: dir.into(),
            threshold: Severity::Info,
            policy: RoutePolicy::default(),
            naming: FileNaming::default(),
            format: LineFormat::default(),
            console: Some(Arc::new(ConsoleSink::default())),
        }
    }

    #[must_use]
    pub fn threshold(mut self, threshold: Severity) -> Self
    {
        self.threshold = threshold;
        self
    }

    #[must_use]
    pub fn policy(mut self, policy: RoutePolicy) -> Self
    {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn naming(mut self, naming: FileNaming) -> Self
    {
        self.naming = naming;
        self
    }

    #[must_use]
    pub fn format(mut self, format: LineFormat) -> Self
    {
        self.format = format;
        self
    }

    #[must_use]
    pub fn console(self, target: ConsoleTarget) -> Self
    {
        self.console_sink(Arc::new(ConsoleSink::new(target)))
    }

    /// Use an arbitrary sink in place of the console
    #[must_use]
    pub fn console_sink(mut self, sink: Arc<dyn Sink>) -> Self
    {
        self.console = Some(sink);
        self
    }

    #[must_use]
    pub fn without_console(mut self) -> Self
    {
        self.console = None;
        self
    }

    #[must_use]
    pub fn dir(&self) -> &Path
    {
        &self.dir
    }

    /// The path of every file `build` will create, in bucket order
    #[must_use]
    pub fn file_paths(&self) -> Vec<PathBuf>
    {
        self.policy
            .buckets()
            .iter()
            .map(|bucket| self.path_for(bucket))
            .collect()
    }

    fn path_for(&self, bucket: &Bucket) -> PathBuf
    {
        self.dir.join(self.naming.file_name(&self.app_name, bucket.suffix))
    }

    fn validate_app_name(&self) -> LoggingResult<()>
    {
        let name = self.app_name.as_str();
        if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
            return Err(LoggingError::InvalidAppName(self.app_name.clone()));
        }
        Ok(())
    }

    /// Create every bucket file and return the routing logger.
    ///
    /// Existing files are removed first. The returned logger writes only to
    /// the console sink and the bucket files.
    ///
    /// ## Errors
    ///
    /// - [`LoggingError::InvalidAppName`] before anything is touched
    /// - [`LoggingError::CreateFile`] for the first file that cannot be
    ///   created; files opened before it are closed first
    pub fn build(self) -> LoggingResult<Logger>
    {
        self.validate_app_name()?;

        let buckets = self.policy.buckets();
        let mut opened: Vec<(Bucket, FileSink)> = Vec::with_capacity(buckets.len());
        for bucket in buckets {
            let path = self.path_for(&bucket);
            match FileSink::create(bucket.suffix, &path) {
                Ok(sink) => {
                    tracing::debug!(path = %path.display(), levels = ?bucket.levels, "log file created");
                    opened.push((bucket, sink));
                }
                Err(source) => {
                    // Dropping the FileSinks closes every file opened so far.
                    drop(opened);
                    tracing::error!(path = %path.display(), error = %source, "failed to create log file");
                    return Err(LoggingError::CreateFile { path, source });
                }
            }
        }

        let mut logger = Logger::new(self.threshold).with_format(self.format);
        if let Some(console) = self.console {
            logger = logger.with_console(console);
        }
        for (bucket, sink) in opened {
            logger.add_route(LevelRouter::new(bucket.levels, Arc::new(sink)));
        }

        tracing::trace!(threshold = %self.threshold, policy = %self.policy, "log routing configured");
        Ok(logger)
    }
}
