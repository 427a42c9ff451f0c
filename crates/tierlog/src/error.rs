//! # Error Types
//!
//! Errors produced while configuring the router or writing records.
//!
//! We use `thiserror` to derive the `Error` implementations and messages.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Main error type for logging setup and dispatch
///
/// ## Error Categories
///
/// 1. **Configuration errors**: InvalidLevel, InvalidSetting, InvalidAppName,
///    InvalidTimestampFormat
/// 2. **Setup errors**: CreateFile, InitializationFailed
/// 3. **Dispatch errors**: Write
#[derive(Error, Debug)]
pub enum LoggingError
{
    /// A severity name could not be parsed
    ///
    /// Accepted names are `panic`, `fatal`, `error`, `warn` (or `warning`),
    /// `info`, `debug` and `trace`, in any case.
    #[error("Invalid log level: {0:?}")]
    InvalidLevel(String),

    /// A configuration value other than the level could not be parsed
    #[error("Invalid value {value:?} for {key}")]
    InvalidSetting
    {
        /// Name of the setting (usually the environment variable)
        key: String,
        /// The rejected value
        value: String,
    },

    /// The application name is empty or would escape the log directory
    #[error("Invalid application name: {0:?}")]
    InvalidAppName(String),

    /// The strftime pattern contains an unknown or malformed specifier
    #[error("Invalid timestamp format: {0:?}")]
    InvalidTimestampFormat(String),

    /// A log file could not be created
    ///
    /// Setup stops at the first failure. Files opened before the failure are
    /// closed before this error is returned.
    #[error("Failed to create log file {}: {source}", path.display())]
    CreateFile
    {
        /// Path of the file that could not be created
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// Writing a formatted record to a sink failed
    ///
    /// Writes are not retried.
    #[error("Failed to write to sink {sink}: {source}")]
    Write
    {
        /// Name of the sink that rejected the write
        sink: String,
        /// Underlying I/O error
        source: io::Error,
    },

    /// The global subscriber could not be installed
    #[error("Failed to initialize logging: {0}")]
    InitializationFailed(String),
}

/// Convenience type alias for `Result<T, LoggingError>`
pub type LoggingResult<T> = std::result::Result<T, LoggingError>;
