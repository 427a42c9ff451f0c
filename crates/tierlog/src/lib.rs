//! # tierlog
//!
//! Severity-routed logging on top of `tracing`.
//!
//! Records are written once to the console and to the file bucket of their
//! severity. Files are recreated on every start, one per severity or one per
//! severity group, named after the application:
//!
//! ```text
//! /var/log/svc/svc.error.log
//! /var/log/svc/svc.warn.log
//! ...
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tierlog::{Severity, SinkSetBuilder};
//!
//! let logger = SinkSetBuilder::new("svc", "/tmp")
//!     .threshold(Severity::Debug)
//!     .build()
//!     .expect("Failed to create log files");
//! tierlog::install(logger).expect("Failed to install logger");
//!
//! tracing::error!("boom");
//! tierlog::fatal!("cannot continue");
//! ```
//!
//! Or from the environment (`TIERLOG_DIR`, `TIERLOG_LEVEL`, ...), see
//! [`settings`].

pub mod builder;
pub mod error;
pub mod format;
pub mod layer;
pub mod logger;
pub mod record;
pub mod router;
pub mod settings;
pub mod severity;
pub mod sink;

pub use builder::{Bucket, FileNaming, RoutePolicy, SinkSetBuilder};
pub use error::{LoggingError, LoggingResult};
pub use format::LineFormat;
pub use layer::{RoutingLayer, install, installed};
pub use logger::Logger;
pub use record::Record;
pub use router::LevelRouter;
pub use settings::{LogSettings, init_from_env, prepare_from_env};
pub use severity::{Severity, SeveritySet};
pub use sink::{ConsoleSink, ConsoleTarget, FileSink, MemorySink, Sink, WriterSink};

#[doc(hidden)]
pub mod __private
{
    pub use tracing;
}

/// Emit an `ERROR` event routed as [`Severity::Fatal`].
///
/// Takes the same arguments as `tracing::error!`, without `target:` or
/// `parent:`. Only logs; exiting the process is up to the caller.
#[macro_export]
macro_rules! fatal {
    ($($arg:tt)+) => {
        $crate::__private::tracing::error!(severity = "fatal", $($arg)+)
    };
}

/// Emit an `ERROR` event routed as [`Severity::Panic`].
///
/// Takes the same arguments as `tracing::error!`, without `target:` or
/// `parent:`. Only logs; unwinding is up to the caller.
#[macro_export]
macro_rules! panic_log {
    ($($arg:tt)+) => {
        $crate::__private::tracing::error!(severity = "panic", $($arg)+)
    };
}
