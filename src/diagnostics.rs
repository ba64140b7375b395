//! Non-fatal diagnostics and the sinks they are written to
//!
//! Tree building and searching never print anything themselves. Every
//! recoverable problem becomes a [`Diagnostic`] handed to an injected
//! [`DiagnosticSink`], which serializes output from concurrent search threads.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;

/// A recoverable problem met while building or searching a tree.
#[derive(Debug, thiserror::Error)]
pub enum Diagnostic {
    /// A directory below the root could not be opened for listing.
    #[error("cannot open directory '{}': {source}", path.display())]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Listing a directory stopped yielding an entry.
    #[error("cannot read entry in '{}': {source}", parent.display())]
    EntryUnreadable {
        parent: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An entry was listed but its type could not be determined.
    #[error("cannot stat '{}': {source}", path.display())]
    FileTypeUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A search thread could not be started; the directory is scanned inline.
    #[error("cannot start search thread for '{}': {source}", path.display())]
    SpawnFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Diagnostic {
    /// The path the diagnostic is about.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Diagnostic::DirectoryUnreadable { path, .. }
            | Diagnostic::FileTypeUnreadable { path, .. }
            | Diagnostic::SpawnFailed { path, .. } => path,
            Diagnostic::EntryUnreadable { parent, .. } => parent,
        }
    }

    /// True when part of the tree may be missing because of this diagnostic.
    pub fn reduces_completeness(&self) -> bool {
        !matches!(self, Diagnostic::SpawnFailed { .. })
    }
}

/// Thread-safe, line-oriented destination for diagnostics.
pub trait DiagnosticSink: Send + Sync {
    /// Write one line. Implementations must not interleave concurrent lines.
    fn write_line(&self, line: &str);

    fn report(&self, diagnostic: &Diagnostic) {
        self.write_line(&diagnostic.to_string());
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &S {
    fn write_line(&self, line: &str) {
        (**self).write_line(line);
    }

    fn report(&self, diagnostic: &Diagnostic) {
        (**self).report(diagnostic);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for Arc<S> {
    fn write_line(&self, line: &str) {
        (**self).write_line(line);
    }

    fn report(&self, diagnostic: &Diagnostic) {
        (**self).report(diagnostic);
    }
}

/// Sink writing each line to a wrapped writer under a single lock.
pub struct WriterSink<W> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            prefix: String::new(),
            writer: Mutex::new(writer),
        }
    }

    /// Prepend `prefix` to every line written.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl WriterSink<io::Stderr> {
    /// Standard error with the program name in front of every line.
    pub fn stderr() -> Self {
        Self::new(io::stderr()).with_prefix("tfind: ")
    }
}

impl<W: Write + Send> DiagnosticSink for WriterSink<W> {
    fn write_line(&self, line: &str) {
        let mut writer = self.writer.lock();
        // A broken diagnostics stream must not take the search down with it.
        let _ = writeln!(writer, "{}{}", self.prefix, line).and_then(|()| writer.flush());
    }
}

/// Sink that keeps every line in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the lines written so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }
}

impl DiagnosticSink for MemorySink {
    fn write_line(&self, line: &str) {
        self.lines.lock().push(line.to_string());
    }
}

/// Sink forwarding every line to the `log` facade at warn level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn write_line(&self, line: &str) {
        log::warn!("{}", line);
    }
}

/// Sink that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn write_line(&self, _line: &str) {}
}
