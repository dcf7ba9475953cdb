use std::fmt;

/// Statistics from a completed write operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriterStats {
    /// Number of hit rows written, header excluded
    pub rows_written: usize,
    /// Number of spectra left out because they had no hits
    pub psms_skipped: usize,
}

impl fmt::Display for WriterStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wrote {} rows ({} spectra without hits skipped)",
            self.rows_written, self.psms_skipped
        )
    }
}
