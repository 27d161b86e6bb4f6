use crate::DawgError;

/// Default number of symbols between progress reports.
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 1000;

/// Default number of symbols between memory probes.
pub const DEFAULT_MEMORY_CHECK_INTERVAL: u64 = 1000;

/// Available-memory floor, in bytes, used when the memory guard is enabled without an explicit threshold.
pub const DEFAULT_MEMORY_GUARD_THRESHOLD: u64 = 2_000_000;

/// Inputs with more lines than this are considered large; front ends should offer to index only a prefix.
pub const LARGE_INPUT_LINES: usize = 5000;

/// Options controlling how text is fed into a [Dawg](crate::dawg::Dawg).
///
/// The defaults index every line, concatenated without a separator, quietly and without a memory guard.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IndexConfig {
    /// Emit a progress report every `progress_interval` symbols.
    verbose: bool,

    progress_interval: u64,

    /// Stop indexing once available memory drops to this many bytes or fewer.
    memory_guard_threshold_bytes: Option<u64>,

    memory_check_interval: u64,

    /// Symbol inserted between consecutive lines. `None` concatenates lines directly, so infixes may span a line
    /// boundary.
    line_separator: Option<char>,

    /// Index only the first `max_lines` lines.
    max_lines: Option<usize>,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            memory_guard_threshold_bytes: None,
            memory_check_interval: DEFAULT_MEMORY_CHECK_INTERVAL,
            line_separator: None,
            max_lines: None,
        }
    }
}

impl IndexConfig {
    /// Creates a configuration with the default options.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables periodic progress reports.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Sets how many symbols pass between progress reports.
    pub fn with_progress_interval(mut self, progress_interval: u64) -> Self {
        self.progress_interval = progress_interval;
        self
    }

    /// Sets the available-memory threshold that stops indexing, or disables the guard with `None`.
    pub fn with_memory_guard(mut self, threshold_bytes: Option<u64>) -> Self {
        self.memory_guard_threshold_bytes = threshold_bytes;
        self
    }

    /// Sets how many symbols pass between memory guard checks.
    pub fn with_memory_check_interval(mut self, memory_check_interval: u64) -> Self {
        self.memory_check_interval = memory_check_interval;
        self
    }

    /// Sets the symbol inserted between consecutive lines, if any.
    pub fn with_line_separator(mut self, line_separator: Option<char>) -> Self {
        self.line_separator = line_separator;
        self
    }

    /// Limits indexing to the first `max_lines` lines.
    pub fn with_max_lines(mut self, max_lines: Option<usize>) -> Self {
        self.max_lines = max_lines;
        self
    }

    /// Indicates whether progress reports are logged.
    #[inline]
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Returns the number of symbols between progress reports.
    #[inline]
    pub fn progress_interval(&self) -> u64 {
        self.progress_interval
    }

    /// Returns the memory guard threshold in bytes, if the guard is enabled.
    #[inline]
    pub fn memory_guard_threshold_bytes(&self) -> Option<u64> {
        self.memory_guard_threshold_bytes
    }

    /// Returns the number of symbols between memory guard checks.
    #[inline]
    pub fn memory_check_interval(&self) -> u64 {
        self.memory_check_interval
    }

    /// Returns the symbol inserted between consecutive lines, if any.
    #[inline]
    pub fn line_separator(&self) -> Option<char> {
        self.line_separator
    }

    /// Returns the line limit, if any.
    #[inline]
    pub fn max_lines(&self) -> Option<usize> {
        self.max_lines
    }

    /// Checks that the configuration can drive an indexing run.
    ///
    /// # Errors
    /// Returns [DawgError::InvalidConfig] if an interval that is in use is zero.
    pub fn validate(&self) -> Result<(), DawgError> {
        if self.verbose && self.progress_interval == 0 {
            return Err(DawgError::InvalidConfig("progress interval must be non-zero".to_string()));
        }

        if self.memory_guard_threshold_bytes.is_some() && self.memory_check_interval == 0 {
            return Err(DawgError::InvalidConfig("memory check interval must be non-zero".to_string()));
        }

        Ok(())
    }
}
