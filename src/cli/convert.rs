use anyhow::{Context, Result};
use log::info;
use std::fs::File;
use std::path::{Path, PathBuf};

use pepxml_hits::pepxml::PepXmlParser;
use pepxml_hits::schema::OutputSchema;
use pepxml_hits::selector::select_all;
use pepxml_hits::writer::{write_hit_list_file, WriterConfig};

use super::config::Config;

const PEPXML_SUFFIXES: &[&str] = &[".pep.xml", ".pepxml"];

/// Whether `path` names a regular file that can be opened for reading
pub fn is_accessible(path: &Path) -> bool {
    File::open(path)
        .and_then(|f| f.metadata())
        .map(|m| m.is_file())
        .unwrap_or(false)
}

/// Output path for an input file: a trailing `.pepxml` or `.pep.xml`
/// (any case) is dropped and `.txt` appended.
pub fn derive_output_path(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let lower = name.to_ascii_lowercase();
    let stem = PEPXML_SUFFIXES
        .iter()
        .find(|suffix| lower.ends_with(*suffix))
        .map(|suffix| &name[..name.len() - suffix.len()])
        .unwrap_or(&name);
    input.with_file_name(format!("{}.txt", stem))
}

/// Parse a pepXML file and write its best hits next to it
pub fn run(input: PathBuf, legacy: bool, config_path: Option<PathBuf>) -> Result<()> {
    let config = match config_path.as_deref() {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    let mut writer_config = WriterConfig::default();
    if legacy || config.output.legacy.unwrap_or(false) {
        writer_config.schema = OutputSchema::Legacy;
    }
    if let Some(interval) = config.output.progress_interval {
        writer_config.progress_interval = interval;
    }

    let output = derive_output_path(&input);

    info!("pepxml2hits - pepXML to hit list");
    info!("================================");
    info!("Input:  {}", input.display());
    info!("Output: {}", output.display());
    info!("Columns: {}", writer_config.schema);

    info!("Reading {}", input.display());
    let parsed = PepXmlParser::open(&input)
        .and_then(|parser| parser.parse())
        .with_context(|| format!("Failed to parse {}", input.display()))?;

    let stats = &parsed.stats;
    info!("  Spectrum queries: {}", stats.spectrum_queries);
    info!("  Search hits: {}", stats.search_hits);
    if stats.duplicate_spectra > 0 {
        info!("  Duplicate spectra overwritten: {}", stats.duplicate_spectra);
    }
    if stats.ignored_scores > 0 {
        info!("  Unrecognised scores ignored: {}", stats.ignored_scores);
    }

    let rows = select_all(&parsed.store);

    info!("Writing {}", output.display());
    let written = write_hit_list_file(&output, &rows, parsed.store.len(), writer_config)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    info!("Conversion complete!");
    info!("  {}", written);

    Ok(())
}
