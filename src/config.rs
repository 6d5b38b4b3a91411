use std::path::PathBuf;

use crate::interpreter::environment::DEFAULT_CAPACITY;

/// Default size of the per-line string arena in bytes.
pub const DEFAULT_ARENA_CAPACITY: usize = 64 * 1024;
/// Default file the diagnostics log appends to.
pub const DEFAULT_LOG_PATH: &str = "log.txt";
/// Default upper bound, in bytes, for rendered values.
pub const DEFAULT_RENDER_LIMIT: usize = 1024;

/// Settings for one evaluator session.
///
/// The binary fills this from its command line; embedders usually start from
/// [`Config::default`] and override single fields.
///
/// # Example
/// ```
/// use reckon::config::Config;
///
/// let config = Config { arena_capacity: 256,
///                       ..Config::default() };
/// assert_eq!(config.env_capacity, 300);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Bytes available for transient strings while evaluating one line.
    pub arena_capacity:       usize,
    /// Number of variable slots.
    pub env_capacity:         usize,
    /// Where diagnostics are appended. `None` disables the file log.
    pub log_path:             Option<PathBuf>,
    /// Flush the log after this many records.
    pub flush_every:          usize,
    /// Records kept per line before further diagnostics are suppressed.
    pub max_records_per_line: usize,
    /// Maximum length of a rendered value.
    pub render_limit:         usize,
}

impl Default for Config {
    fn default() -> Self {
        Self { arena_capacity:       DEFAULT_ARENA_CAPACITY,
               env_capacity:         DEFAULT_CAPACITY,
               log_path:             Some(PathBuf::from(DEFAULT_LOG_PATH)),
               flush_every:          1,
               max_records_per_line: 64,
               render_limit:         DEFAULT_RENDER_LIMIT, }
    }
}
