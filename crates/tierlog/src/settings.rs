//! # Environment Settings
//!
//! Configuration read from environment variables:
//!
//! - `TIERLOG_DIR`: directory for the log files. Unset or empty means console only.
//! - `TIERLOG_LEVEL`: minimum severity (`panic` .. `trace`, default `info`)
//! - `TIERLOG_LAYOUT`: `per-severity` (default) or `grouped`
//! - `TIERLOG_NAMING`: `app-first` (default) or `suffix-first`
//! - `TIERLOG_COLOR`: `always` (default) or `never`
//!
//! Every value is parsed before any file is touched, so a typo aborts setup
//! with nothing created.
//!
//! ```rust,no_run
//! use tierlog::settings::prepare_from_env;
//!
//! let logger = prepare_from_env("svc").expect("Failed to configure logging");
//! logger.emit(tierlog::Severity::Info, "hello").unwrap();
//! ```

use std::env;
use std::path::PathBuf;

use crate::builder::{FileNaming, RoutePolicy, SinkSetBuilder};
use crate::error::{LoggingError, LoggingResult};
use crate::format::LineFormat;
use crate::layer::install;
use crate::logger::Logger;
use crate::severity::Severity;
use crate::sink::ConsoleTarget;

pub const DIR_VAR: &str = "TIERLOG_DIR";
pub const LEVEL_VAR: &str = "TIERLOG_LEVEL";
pub const LAYOUT_VAR: &str = "TIERLOG_LAYOUT";
pub const NAMING_VAR: &str = "TIERLOG_NAMING";
pub const COLOR_VAR: &str = "TIERLOG_COLOR";

/// Parsed logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings
{
    /// Directory for log files; `None` disables file logging
    pub dir: Option<PathBuf>,
    pub threshold: Severity,
    pub policy: RoutePolicy,
    pub naming: FileNaming,
    pub color: bool,
}

impl Default for LogSettings
{
    fn default() -> Self
    {
        Self {
            dir: None,
            threshold: Severity::Info,
            policy: RoutePolicy::default(),
            naming: FileNaming::default(),
            color: true,
        }
    }
}

impl LogSettings
{
    /// Read the process environment
    ///
    /// ## Errors
    ///
    /// See [`LogSettings::from_lookup`].
    pub fn from_env() -> LoggingResult<Self>
    {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through `lookup`, which maps a variable name to its value.
    ///
    /// Empty values count as unset.
    ///
    /// ## Errors
    ///
    /// - [`LoggingError::InvalidLevel`] for an unknown `TIERLOG_LEVEL`
    /// - [`LoggingError::InvalidSetting`] for an unknown layout, naming or
    ///   color value
    pub fn from_lookup<F>(lookup: F) -> LoggingResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        Ok(Self {
            dir: get(DIR_VAR).map(PathBuf::from),
            threshold: get(LEVEL_VAR).map_or(Ok(defaults.threshold), |v| v.parse())?,
            policy: get(LAYOUT_VAR).map_or(Ok(defaults.policy), |v| v.parse().map_err(|_| invalid(LAYOUT_VAR, &v)))?,
            naming: get(NAMING_VAR).map_or(Ok(defaults.naming), |v| v.parse().map_err(|_| invalid(NAMING_VAR, &v)))?,
            color: get(COLOR_VAR).map_or(Ok(defaults.color), |v| parse_color(&v))?,
        })
    }

    /// Build the logger these settings describe for `app_name`.
    ///
    /// Without a directory this is a console-only logger and nothing is
    /// created on disk.
    ///
    /// ## Errors
    ///
    /// See [`SinkSetBuilder::build`].
    pub fn into_logger(self, app_name: &str) -> LoggingResult<Logger>
    {
        let format = LineFormat::default().with_color(self.color);
        match self.dir {
            Some(dir) => SinkSetBuilder::new(app_name, dir)
                .threshold(self.threshold)
                .policy(self.policy)
                .naming(self.naming)
                .format(format)
                .build(),
            None => Ok(Logger::console_only(self.threshold, ConsoleTarget::Stderr).with_format(format)),
        }
    }
}

/// Configure a logger for `app_name` from the environment
///
/// ## Errors
///
/// Returns parse errors before anything is created, then any file creation
/// error.
pub fn prepare_from_env(app_name: &str) -> LoggingResult<Logger>
{
    LogSettings::from_env()?.into_logger(app_name)
}

/// Configure from the environment and install as the global subscriber.
///
/// Calling this again replaces the previously installed logger.
///
/// ## Errors
///
/// See [`prepare_from_env`] and [`install`].
pub fn init_from_env(app_name: &str) -> LoggingResult<std::sync::Arc<Logger>>
{
    install(prepare_from_env(app_name)?)
}

fn parse_color(value: &str) -> LoggingResult<bool>
{
    match value.trim().to_lowercase().as_str() {
        "always" | "true" | "1" | "yes" | "on" => Ok(true),
        "never" | "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(invalid(COLOR_VAR, value)),
    }
}

fn invalid(key: &str, value: &str) -> LoggingError
{
    LoggingError::InvalidSetting {
        key: key.to_string(),
        value: value.to_string(),
    }
}
