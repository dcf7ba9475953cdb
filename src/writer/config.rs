use crate::schema::OutputSchema;

/// Rows between two progress log lines
pub const DEFAULT_PROGRESS_INTERVAL: usize = 1000;

/// Configuration for the hit list writer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriterConfig {
    /// Column set to write
    pub schema: OutputSchema,

    /// Log a progress line every this many rows
    pub progress_interval: usize,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            schema: OutputSchema::Extended,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl WriterConfig {
    /// Configuration for the legacy column set
    pub fn legacy() -> Self {
        Self {
            schema: OutputSchema::Legacy,
            ..Default::default()
        }
    }
}
