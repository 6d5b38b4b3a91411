use std::{
    cell::RefCell,
    fs::{File, OpenOptions},
    io::{BufWriter, Write},
    path::PathBuf,
    rc::Rc,
};

use tracing::{debug, warn};

use crate::{config::Config, util::time::now_utc};

/// A sink for human-readable diagnostics.
///
/// The evaluator records one message per recoverable error. Recording never
/// affects evaluation: a sink that fails just returns `false`.
pub trait Diagnostics {
    /// Records one message. Returns `false` if it was dropped or could not be
    /// written.
    fn record(&mut self, message: &str) -> bool;

    /// Marks the start of a new input line.
    fn begin_line(&mut self) {}

    /// Pushes buffered records to their destination.
    fn flush(&mut self) -> bool {
        true
    }
}

/// Discards every record.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLog;

impl Diagnostics for NullLog {
    fn record(&mut self, _message: &str) -> bool {
        true
    }
}

/// Keeps records in memory.
///
/// Clones share the same buffer, so a clone handed to the evaluator can be
/// inspected through the original.
///
/// # Example
/// ```
/// use reckon::log::{Diagnostics, MemoryLog};
///
/// let log = MemoryLog::default();
/// let mut sink = log.clone();
/// sink.record("hello");
///
/// assert_eq!(log.entries(), ["hello"]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct MemoryLog {
    entries: Rc<RefCell<Vec<String>>>,
}

impl MemoryLog {
    /// Returns a copy of everything recorded so far.
    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }

    /// Returns `true` if any record contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.entries.borrow().iter().any(|entry| entry.contains(needle))
    }
}

impl Diagnostics for MemoryLog {
    fn record(&mut self, message: &str) -> bool {
        self.entries.borrow_mut().push(message.to_string());
        true
    }
}

/// Appends timestamped records to a file.
///
/// The file is opened on the first record and kept open. At most
/// `max_per_line` records are written per input line; the rest are counted
/// and summarized once the next line begins.
pub struct FileLog {
    path:         PathBuf,
    writer:       Option<BufWriter<File>>,
    flush_every:  usize,
    pending:      usize,
    max_per_line: usize,
    this_line:    usize,
    suppressed:   usize,
}

impl FileLog {
    /// Creates a log appending to `path`. Nothing is opened yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, flush_every: usize, max_per_line: usize) -> Self {
        Self { path: path.into(),
               writer: None,
               flush_every: flush_every.max(1),
               pending: 0,
               max_per_line,
               this_line: 0,
               suppressed: 0 }
    }

    /// Builds the log described by `config`, or `None` if logging is off.
    #[must_use]
    pub fn from_config(config: &Config) -> Option<Self> {
        config.log_path
              .as_ref()
              .map(|path| Self::new(path, config.flush_every, config.max_records_per_line))
    }

    fn write_entry(&mut self, message: &str) -> bool {
        if self.writer.is_none() {
            match OpenOptions::new().create(true).append(true).open(&self.path) {
                Ok(file) => self.writer = Some(BufWriter::new(file)),
                Err(e) => {
                    warn!(path = %self.path.display(), error = %e, "cannot open log file");
                    return false;
                },
            }
        }
        let Some(writer) = self.writer.as_mut() else {
            return false;
        };

        if let Err(e) = writeln!(writer, "-- {} -- {message}", now_utc()) {
            warn!(path = %self.path.display(), error = %e, "cannot write log record");
            return false;
        }

        self.pending += 1;
        if self.pending >= self.flush_every {
            return self.flush();
        }
        true
    }
}

impl Diagnostics for FileLog {
    fn record(&mut self, message: &str) -> bool {
        debug!(target: "reckon::diagnostics", "{message}");
        if self.this_line >= self.max_per_line {
            self.suppressed += 1;
            return false;
        }
        self.this_line += 1;
        self.write_entry(message)
    }

    fn begin_line(&mut self) {
        if self.suppressed > 0 {
            let summary = format!("{} further diagnostics suppressed", self.suppressed);
            self.write_entry(&summary);
        }
        self.this_line = 0;
        self.suppressed = 0;
    }

    fn flush(&mut self) -> bool {
        self.pending = 0;
        match self.writer.as_mut().map(Write::flush) {
            Some(Err(e)) => {
                warn!(path = %self.path.display(), error = %e, "cannot flush log file");
                false
            },
            _ => true,
        }
    }
}

impl Drop for FileLog {
    fn drop(&mut self) {
        self.begin_line();
        self.flush();
    }
}
