use {
    crate::{
        dawg::Dawg,
        indexer::{MemoryProbe, SystemMemoryProbe},
        io::TextSource,
        BoxResult, DawgError, IndexConfig,
    },
    chrono::{DateTime, Duration, Utc},
    log::{debug, info, warn},
    std::fmt::{Display, Formatter, Result as FmtResult},
};

/// How an indexing run ended.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IndexOutcome {
    /// Every symbol of the (possibly line-limited) input was indexed.
    Complete {
        /// Number of symbols indexed, including line separators.
        symbols: u64,
    },

    /// The memory guard stopped indexing early. The automaton is valid for the prefix that was indexed.
    Partial {
        /// Number of symbols indexed, including line separators.
        symbols: u64,

        /// The available-memory reading that stopped the run.
        available_bytes: u64,
    },
}

impl IndexOutcome {
    /// Returns the number of symbols indexed.
    pub fn symbols(&self) -> u64 {
        match self {
            Self::Complete { symbols } | Self::Partial { symbols, .. } => *symbols,
        }
    }

    /// Indicates whether every symbol of the input was indexed.
    #[inline]
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete { .. })
    }
}

impl Display for IndexOutcome {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Complete { symbols } => write!(f, "complete index of {symbols} symbols"),
            Self::Partial { symbols, available_bytes } => {
                write!(f, "partial index of the first {symbols} symbols ({available_bytes} bytes of memory left)")
            }
        }
    }
}

/// A [Dawg] built from lines of text, along with a summary of how it was built.
#[derive(Debug)]
pub struct DawgIndex {
    dawg: Dawg,
    outcome: IndexOutcome,

    /// Number of lines consumed, including a line cut short by the memory guard.
    lines: usize,

    elapsed: Duration,
}

impl DawgIndex {
    /// Indexes `lines` according to `config`, probing the system's available memory if the memory guard is enabled.
    ///
    /// # Errors
    /// Returns [DawgError::InvalidConfig] if `config` does not validate. Running low on memory is not an error; see
    /// [IndexOutcome::Partial].
    pub fn build<I, S>(lines: I, config: &IndexConfig) -> Result<Self, DawgError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::build_with_probe(lines, config, &mut SystemMemoryProbe)
    }

    /// Indexes `lines` according to `config`, taking memory readings from `probe`.
    ///
    /// # Errors
    /// Returns [DawgError::InvalidConfig] if `config` does not validate.
    pub fn build_with_probe<I, S>(lines: I, config: &IndexConfig, probe: &mut dyn MemoryProbe) -> Result<Self, DawgError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        config.validate()?;

        let mut monitor = Monitor {
            config,
            probe,
            start: Utc::now(),
        };
        let mut dawg = Dawg::new();
        let mut num_lines = 0;
        let mut stopped_at = None;

        'lines: for (i, line) in lines.into_iter().take(config.max_lines().unwrap_or(usize::MAX)).enumerate() {
            num_lines += 1;

            let separator = config.line_separator().filter(|_| i > 0);
            for symbol in separator.into_iter().chain(line.as_ref().chars()) {
                dawg.push(symbol);
                stopped_at = monitor.after_symbol(&dawg);
                if stopped_at.is_some() {
                    break 'lines;
                }
            }
        }

        let symbols = dawg.num_symbols();
        let outcome = match stopped_at {
            None => IndexOutcome::Complete { symbols },
            Some(available_bytes) => IndexOutcome::Partial { symbols, available_bytes },
        };

        let elapsed = monitor.elapsed();
        info!("Indexed {symbols} symbols in total. This took {} ms.", elapsed.num_milliseconds());
        debug!("Index has {} states and {} edges after {num_lines} lines", dawg.num_states(), dawg.num_edges());

        Ok(Self {
            dawg,
            outcome,
            lines: num_lines,
            elapsed,
        })
    }

    /// Reads every line from `source` and indexes it according to `config`.
    ///
    /// # Errors
    /// Returns an error if reading from `source` fails or `config` does not validate.
    pub async fn load<T: TextSource + ?Sized>(source: &mut T, config: &IndexConfig) -> BoxResult<Self> {
        let lines = source.read_lines().await?;
        Ok(Self::build(&lines, config)?)
    }

    /// Returns the automaton built from the indexed text.
    #[inline]
    pub fn dawg(&self) -> &Dawg {
        &self.dawg
    }

    /// Consumes the index and returns its automaton.
    #[inline]
    pub fn into_dawg(self) -> Dawg {
        self.dawg
    }

    /// Returns how the indexing run ended.
    #[inline]
    pub fn outcome(&self) -> IndexOutcome {
        self.outcome
    }

    /// Returns the number of lines that contributed symbols to the index.
    #[inline]
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Returns the wall-clock time spent indexing.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Indicates whether `text` is an infix of the indexed text.
    #[inline]
    pub fn contains_infix(&self, text: &str) -> bool {
        self.dawg.contains_infix(text)
    }
}

/// Progress reporting and the memory guard, consulted after every symbol.
struct Monitor<'a, P: MemoryProbe + ?Sized> {
    config: &'a IndexConfig,
    probe: &'a mut P,
    start: DateTime<Utc>,
}

impl<P: MemoryProbe + ?Sized> Monitor<'_, P> {
    fn elapsed(&self) -> Duration {
        Utc::now() - self.start
    }

    /// Returns the available-memory reading if indexing must stop after the symbol just added.
    fn after_symbol(&mut self, dawg: &Dawg) -> Option<u64> {
        let count = dawg.num_symbols();
        let report = self.config.verbose() && count % self.config.progress_interval() == 0;
        let threshold =
            self.config.memory_guard_threshold_bytes().filter(|_| count % self.config.memory_check_interval() == 0);

        if !report && threshold.is_none() {
            return None;
        }

        // One reading serves both the progress report and the guard.
        let available = self.probe.available_bytes();

        if report {
            let ms = self.elapsed().num_milliseconds();
            match available {
                Some(available) => info!("Indexed {count} symbols ... ({ms} ms; {available} bytes of memory left)"),
                None => info!("Indexed {count} symbols ... ({ms} ms; unknown memory left)"),
            }
        }

        let threshold = threshold?;
        let available = available?;
        if available > threshold {
            return None;
        }

        warn!(
            "Available memory ({available} bytes) is at or below {threshold} bytes; indexing stopped after {count} symbols"
        );
        Some(available)
    }
}
