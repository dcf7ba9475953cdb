use std::io::Write;
use std::path::Path;

use csv::{QuoteStyle, Terminator, WriterBuilder};
use log::info;
use tempfile::NamedTempFile;

use super::{WriterConfig, WriterError, WriterStats};
use crate::selector::BestHit;

/// Tab-separated writer for best-hit rows
pub struct HitListWriter<W: Write> {
    writer: csv::Writer<W>,
    config: WriterConfig,
    rows_written: usize,
}

impl<W: Write> HitListWriter<W> {
    /// Create a new writer and emit the header line
    pub fn new(inner: W, config: WriterConfig) -> Result<Self, WriterError> {
        if config.progress_interval == 0 {
            return Err(WriterError::InvalidConfig(
                "progress_interval must be at least 1".into(),
            ));
        }

        let mut writer = WriterBuilder::new()
            .delimiter(b'\t')
            .quote_style(QuoteStyle::Never)
            .terminator(Terminator::Any(b'\n'))
            .has_headers(false)
            .from_writer(inner);
        writer.write_record(config.schema.columns())?;

        Ok(Self {
            writer,
            config,
            rows_written: 0,
        })
    }

    /// Write one row
    pub fn write_row(&mut self, row: &BestHit) -> Result<(), WriterError> {
        let fields = self.format_row(row);
        self.writer.write_record(fields)?;
        self.rows_written += 1;
        Ok(())
    }

    /// Write rows, logging progress against `total` spectra
    pub fn write_rows(&mut self, rows: &[BestHit], total: usize) -> Result<(), WriterError> {
        for row in rows {
            self.write_row(row)?;
            if self.rows_written % self.config.progress_interval == 0 {
                info!("{} / {}", self.rows_written, total);
            }
        }
        Ok(())
    }

    /// Rows written so far
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Flush and return the underlying writer
    pub fn finish(self) -> Result<W, WriterError> {
        self.writer.into_inner().map_err(|e| {
            WriterError::IoError(std::io::Error::new(e.error().kind(), e.to_string()))
        })
    }

    fn format_row(&self, row: &BestHit) -> Vec<String> {
        let extended = self.config.schema.is_extended();
        let mut fields = Vec::with_capacity(self.config.schema.columns().len());
        fields.push(row.spectrum_id.clone());
        fields.push(row.charge.to_string());
        fields.push(format_float(row.neutral_mass));
        fields.push(row.peptide.clone());
        fields.push(row.protein.clone());
        fields.push(row.missed_cleavages.to_string());
        fields.push(format_float(row.xcorr));
        fields.push(format_float(row.deltacn));
        fields.push(format_float(row.deltacnstar));
        fields.push(row.rankxc.to_string());
        fields.push(format_float(row.xcratio));
        fields.push(row.ions_observed.to_string());
        if extended {
            fields.push(row.ions_matched.to_string());
        }
        fields.push(row.ions_expected.to_string());
        fields.push(row.num_tryptic_ends.to_string());
        fields.push(row.msgf_specprob.to_string());
        if extended {
            fields.push(format_float(row.expect));
        }
        fields.push(row.start_scan.to_string());
        fields.push(row.end_scan.to_string());
        fields.push(format_float(row.retention_time_sec));
        fields
    }
}

fn format_float(value: f64) -> String {
    format!("{:.6}", value)
}

/// Write a complete hit list to `path`.
///
/// Rows go to a temporary file next to `path` that replaces it only once
/// everything was written, so a failed run leaves no partial output.
pub fn write_hit_list_file<P: AsRef<Path>>(
    path: P,
    rows: &[BestHit],
    total_psms: usize,
    config: WriterConfig,
) -> Result<WriterStats, WriterError> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    let rows_written = {
        let mut writer = HitListWriter::new(&mut tmp, config)?;
        writer.write_rows(rows, total_psms)?;
        let rows_written = writer.rows_written();
        writer.finish()?;
        rows_written
    };
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| WriterError::IoError(e.error))?;

    Ok(WriterStats {
        rows_written,
        psms_skipped: total_psms.saturating_sub(rows_written),
    })
}
