//! # Sinks
//!
//! Write-only destinations for formatted lines.
//!
//! - [`FileSink`]: a file recreated at construction and owned until drop
//! - [`ConsoleSink`]: standard error or standard output
//! - [`WriterSink`]: any `io::Write` behind a mutex
//! - [`MemorySink`]: a shared in-memory buffer, handy for embedding and tests
//!
//! Every sink receives whole lines; one `write_line` call is one record.

use std::fmt;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

/// A named, write-only destination for formatted log lines
pub trait Sink: Send + Sync + fmt::Debug
{
    /// Human-readable name used in error messages
    fn name(&self) -> &str;

    /// Write one formatted line
    ///
    /// ## Errors
    ///
    /// Returns the underlying I/O error; callers do not retry.
    fn write_line(&self, line: &str) -> io::Result<()>;

    /// Flush buffered output, if any
    ///
    /// ## Errors
    ///
    /// Returns the underlying I/O error.
    fn flush(&self) -> io::Result<()>
    {
        Ok(())
    }
}

/// A log file exclusively owned by the sink
///
/// The file is closed when the sink is dropped.
#[derive(Debug)]
pub struct FileSink
{
    name: String,
    path: PathBuf,
    file: File,
}

impl FileSink
{
    /// Remove any existing file at `path` and create a fresh, empty one.
    ///
    /// A missing file is not an error; previous contents never survive.
    ///
    /// ## Errors
    ///
    /// Returns the I/O error if the old file cannot be removed or the new one
    /// cannot be created.
    pub fn create(name: impl Into<String>, path: impl Into<PathBuf>) -> io::Result<Self>
    {
        let path = path.into();
        match fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
        let file = File::create(&path)?;
        Ok(Self {
            name: name.into(),
            path,
            file,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path
    {
        &self.path
    }
}

impl Sink for FileSink
{
    fn name(&self) -> &str
    {
        &self.name
    }

    fn write_line(&self, line: &str) -> io::Result<()>
    {
        (&self.file).write_all(line.as_bytes())
    }

    fn flush(&self) -> io::Result<()>
    {
        (&self.file).flush()
    }
}

/// Which standard stream a [`ConsoleSink`] writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleTarget
{
    /// Standard error (default)
    #[default]
    Stderr,
    /// Standard output
    Stdout,
}

/// Standard error or standard output
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink
{
    target: ConsoleTarget,
}

impl ConsoleSink
{
    #[must_use]
    pub fn new(target: ConsoleTarget) -> Self
    {
        Self { target }
    }

    #[must_use]
    pub fn target(&self) -> ConsoleTarget
    {
        self.target
    }
}

impl Sink for ConsoleSink
{
    fn name(&self) -> &str
    {
        match self.target {
            ConsoleTarget::Stderr => "stderr",
            ConsoleTarget::Stdout => "stdout",
        }
    }

    fn write_line(&self, line: &str) -> io::Result<()>
    {
        // Lock for the whole line so concurrent records do not interleave.
        match self.target {
            ConsoleTarget::Stderr => io::stderr().lock().write_all(line.as_bytes()),
            ConsoleTarget::Stdout => io::stdout().lock().write_all(line.as_bytes()),
        }
    }

    fn flush(&self) -> io::Result<()>
    {
        match self.target {
            ConsoleTarget::Stderr => io::stderr().flush(),
            ConsoleTarget::Stdout => io::stdout().flush(),
        }
    }
}

/// Adapts any writer into a sink
pub struct WriterSink<W>
{
    name: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W>
{
    #[must_use]
    pub fn new(name: impl Into<String>, writer: W) -> Self
    {
        Self {
            name: name.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Consume the sink and return the writer
    ///
    /// ## Errors
    ///
    /// Fails if a previous write panicked while holding the lock.
    pub fn into_inner(self) -> io::Result<W>
    {
        self.writer.into_inner().map_err(|_| poisoned(&self.name))
    }

    fn lock(&self) -> io::Result<MutexGuard<'_, W>>
    {
        self.writer.lock().map_err(|_| poisoned(&self.name))
    }
}

impl<W> fmt::Debug for WriterSink<W>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.debug_struct("WriterSink").field("name", &self.name).finish_non_exhaustive()
    }
}

impl<W: Write + Send> Sink for WriterSink<W>
{
    fn name(&self) -> &str
    {
        &self.name
    }

    fn write_line(&self, line: &str) -> io::Result<()>
    {
        self.lock()?.write_all(line.as_bytes())
    }

    fn flush(&self) -> io::Result<()>
    {
        self.lock()?.flush()
    }
}

/// An in-memory sink whose clones share one buffer
#[derive(Debug, Clone)]
pub struct MemorySink
{
    name: String,
    buffer: Arc<Mutex<String>>,
}

impl MemorySink
{
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self
    {
        Self {
            name: name.into(),
            buffer: Arc::new(Mutex::new(String::new())),
        }
    }

    /// Everything written so far
    #[must_use]
    pub fn contents(&self) -> String
    {
        self.buffer.lock().map(|buffer| buffer.clone()).unwrap_or_default()
    }

    /// The written lines, without their terminators
    #[must_use]
    pub fn lines(&self) -> Vec<String>
    {
        self.contents().lines().map(str::to_string).collect()
    }

    /// Discard everything written so far
    pub fn clear(&self)
    {
        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.clear();
        }
    }
}

impl Sink for MemorySink
{
    fn name(&self) -> &str
    {
        &self.name
    }

    fn write_line(&self, line: &str) -> io::Result<()>
    {
        self.buffer.lock().map_err(|_| poisoned(&self.name))?.push_str(line);
        Ok(())
    }
}

fn poisoned(name: &str) -> io::Error
{
    io::Error::other(format!("sink {name} is poisoned"))
}
