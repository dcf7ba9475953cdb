/// Errors that can occur during writing
#[derive(Debug, thiserror::Error)]
pub enum WriterError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from the csv library while writing records
    #[error("TSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Invalid writer configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
