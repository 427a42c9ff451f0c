//! # Tracing Integration
//!
//! [`RoutingLayer`] connects a [`Logger`] to `tracing`: every event becomes a
//! [`Record`] and goes through [`Logger::log`]. The layer does not write
//! anything itself, so a subscriber made of a `Registry` plus this layer has no
//! output besides the logger's sinks.
//!
//! ## Severity
//!
//! `tracing` has five levels. `Fatal` and `Panic` are carried on `ERROR`
//! events through a `severity` field, which the [`fatal!`](crate::fatal) and
//! [`panic_log!`](crate::panic_log) macros add for you.
//!
//! ## Write failures
//!
//! Instrumented code never sees a write failure. The layer reports it on
//! standard error and carries on; the failing record is not retried.
//!
//! ## Global installation
//!
//! [`install`] sets the process-wide subscriber the first time it runs and
//! swaps the logger on later calls, so configuring twice never stacks a
//! second set of outputs on top of the first.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use tracing::level_filters::LevelFilter;
use tracing::{Event, Metadata, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, Registry, reload};

use crate::error::{LoggingError, LoggingResult};
use crate::logger::Logger;
use crate::record::Record;
use crate::severity::Severity;

/// A `tracing` layer that feeds events into a [`Logger`]
#[derive(Debug, Clone)]
pub struct RoutingLayer
{
    logger: Arc<Logger>,
}

impl RoutingLayer
{
    #[must_use]
    pub fn new(logger: Arc<Logger>) -> Self
    {
        Self { logger }
    }

    #[must_use]
    pub fn logger(&self) -> &Arc<Logger>
    {
        &self.logger
    }
}

impl<S> Layer<S> for RoutingLayer
where
    S: Subscriber,
{
    fn enabled(&self, metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool
    {
        self.logger.enabled(Severity::most_severe_for(*metadata.level()))
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>)
    {
        let record = Record::from_event(event);
        if let Err(e) = self.logger.log(&record) {
            report(&e);
        }
    }

    fn max_level_hint(&self) -> Option<LevelFilter>
    {
        Some(LevelFilter::from(self.logger.threshold()))
    }
}

fn report(error: &LoggingError)
{
    // Best effort: standard error may be the sink that just failed.
    let _ = writeln!(io::stderr().lock(), "tierlog: dropped log record: {error}");
}

type InstalledHandle = reload::Handle<RoutingLayer, Registry>;

static INSTALLED: Mutex<Option<InstalledHandle>> = Mutex::new(None);

/// Install `logger` as the global `tracing` subscriber.
///
/// The first call registers a `Registry` with a reloadable [`RoutingLayer`];
/// later calls replace the logger inside that layer. Either way, events
/// emitted afterwards go through `logger` only.
///
/// Returns the shared logger so callers can also use it directly.
///
/// ## Errors
///
/// Returns [`LoggingError::InitializationFailed`] if a different global
/// subscriber was set by someone else, or if the replacement fails.
pub fn install(logger: Logger) -> LoggingResult<Arc<Logger>>
{
    let logger = Arc::new(logger);
    let layer = RoutingLayer::new(Arc::clone(&logger));

    let mut installed = INSTALLED
        .lock()
        .map_err(|e| LoggingError::InitializationFailed(e.to_string()))?;

    match installed.as_ref() {
        Some(handle) => {
            handle
                .reload(layer)
                .map_err(|e| LoggingError::InitializationFailed(e.to_string()))?;
        }
        None => {
            let (layer, handle) = reload::Layer::new(layer);
            Registry::default()
                .with(layer)
                .try_init()
                .map_err(|e| LoggingError::InitializationFailed(e.to_string()))?;
            *installed = Some(handle);
        }
    }

    tracing::trace!(threshold = %logger.threshold(), routes = logger.routes().len(), "logger installed");
    Ok(logger)
}

/// The logger currently installed by [`install`], if any
#[must_use]
pub fn installed() -> Option<Arc<Logger>>
{
    let installed = INSTALLED.lock().ok()?;
    installed
        .as_ref()?
        .with_current(|layer| Arc::clone(layer.logger()))
        .ok()
}
