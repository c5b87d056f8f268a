//! Conversion results and statistics.

/// Counters collected during a single conversion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionStats {
    /// Raw lines read from the input.
    pub input_lines: usize,
    /// Records recognized before any filtering.
    pub parsed: usize,
    /// Lines or records skipped (malformed, filtered, unparseable).
    pub skipped: usize,
    /// Rows in the final table.
    pub written: usize,
}

impl ConversionStats {
    pub fn new(input_lines: usize, parsed: usize, skipped: usize, written: usize) -> Self {
        Self {
            input_lines,
            parsed,
            skipped,
            written,
        }
    }

    /// Share of parsed records that made it into the output, in percent.
    pub fn yield_ratio(&self) -> f64 {
        if self.parsed == 0 {
            return 0.0;
        }
        (self.written as f64 / self.parsed as f64) * 100.0
    }
}

/// The rows produced by a converter together with its statistics.
#[derive(Debug, Clone)]
pub struct Conversion<R> {
    pub records: Vec<R>,
    pub stats: ConversionStats,
}

impl<R> Conversion<R> {
    pub fn new(records: Vec<R>, stats: ConversionStats) -> Self {
        Self { records, stats }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}
