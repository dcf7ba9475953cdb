//! Integration tests for pepxml-hits
//!
//! These tests run the full pipeline from a pepXML file on disk to the
//! tab-separated hit list, through the library and through the binary.

use pepxml_hits::pepxml::{parse_file, PepXmlError, PepXmlParser};
use pepxml_hits::selector::select_all;
use pepxml_hits::writer::{write_hit_list_file, WriterConfig};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

// ============================================================================
// Helper Functions
// ============================================================================

fn search_hit(rank: u32, peptide: &str, scores: &[(&str, &str)]) -> String {
    let scores: String = scores
        .iter()
        .map(|(name, value)| {
            format!(
                "\n          <search_score name=\"{}\" value=\"{}\"/>",
                name, value
            )
        })
        .collect();
    format!(
        r#"
        <search_hit hit_rank="{}" peptide="{}" protein="PROT_{}" num_missed_cleavages="0" num_matched_ions="10" tot_num_ions="24">{}
        </search_hit>"#,
        rank, peptide, peptide, scores
    )
}

fn spectrum_query(spectrum: &str, charge: u32, hits: &[String]) -> String {
    format!(
        r#"
    <spectrum_query spectrum="{}" start_scan="10" end_scan="11" precursor_neutral_mass="1500.25" assumed_charge="{}" retention_time_sec="61.5">
      <search_result>{}
      </search_result>
    </spectrum_query>"#,
        spectrum,
        charge,
        hits.concat()
    )
}

fn pepxml(queries: &[String]) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<msms_pipeline_analysis date="2012-09-01T10:00:00" xmlns="http://regis-web.systemsbiology.net/pepXML">
  <msms_run_summary base_name="run01" raw_data=".raw">
    <search_summary search_engine="SEQUEST"/>{}
  </msms_run_summary>
</msms_pipeline_analysis>
"#,
        queries.concat()
    )
}

fn write_input(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn run_pipeline(input: &Path, output: &Path, config: WriterConfig) -> Vec<Vec<String>> {
    let parsed = PepXmlParser::open(input).unwrap().parse().unwrap();
    let rows = select_all(&parsed.store);
    write_hit_list_file(output, &rows, parsed.store.len(), config).unwrap();
    read_table(output)
}

fn read_table(path: &Path) -> Vec<Vec<String>> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| line.split('\t').map(str::to_string).collect())
        .collect()
}

fn column(table: &[Vec<String>], name: &str) -> usize {
    table[0].iter().position(|c| c == name).unwrap()
}

// ============================================================================
// Library Pipeline
// ============================================================================

/// xcorr decides when the engine reports neither probability nor E-value
#[test]
fn test_xcorr_selects_second_hit() {
    let dir = tempdir().unwrap();
    let doc = pepxml(&[spectrum_query(
        "run01.10.11.2",
        2,
        &[
            search_hit(1, "AAAK", &[("xcorr", "2.5")]),
            search_hit(2, "BBBK", &[("xcorr", "3.1")]),
        ],
    )]);
    let input = write_input(dir.path(), "run01.pepxml", &doc);
    let table = run_pipeline(&input, &dir.path().join("run01.txt"), WriterConfig::default());

    assert_eq!(table.len(), 2);
    let row = &table[1];
    assert_eq!(row[column(&table, "Peptide")], "BBBK");
    assert_eq!(row[column(&table, "Xcorr")], "3.100000");
    assert_eq!(row[column(&table, "MSGF_SpecProb")], "1");
    assert_eq!(row[column(&table, "EValue")], "1.000000");
}

/// A lower spectral probability wins even against a higher xcorr
#[test]
fn test_spec_prob_selects_second_hit() {
    let dir = tempdir().unwrap();
    let doc = pepxml(&[spectrum_query(
        "run01.10.11.2",
        2,
        &[
            search_hit(1, "AAAK", &[("msgf_specprob", "0.01"), ("xcorr", "4.0")]),
            search_hit(2, "BBBK", &[("msgf_specprob", "0.001"), ("xcorr", "1.0")]),
        ],
    )]);
    let input = write_input(dir.path(), "run01.pepxml", &doc);
    let table = run_pipeline(&input, &dir.path().join("run01.txt"), WriterConfig::default());

    let row = &table[1];
    assert_eq!(row[column(&table, "Peptide")], "BBBK");
    assert_eq!(row[column(&table, "MSGF_SpecProb")], "0.001");
    assert_eq!(row[column(&table, "Xcorr")], "1.000000");
}

#[test]
fn test_expect_selects_lowest() {
    let dir = tempdir().unwrap();
    let doc = pepxml(&[spectrum_query(
        "run01.10.11.2",
        2,
        &[
            search_hit(1, "AAAK", &[("expect", "0.05"), ("hyperscore", "30.1")]),
            search_hit(2, "BBBK", &[("expect", "0.0004"), ("hyperscore", "25.2")]),
            search_hit(3, "CCCK", &[("expect", "0.9"), ("hyperscore", "40.0")]),
        ],
    )]);
    let input = write_input(dir.path(), "run01.pepxml", &doc);
    let table = run_pipeline(&input, &dir.path().join("run01.txt"), WriterConfig::default());

    let row = &table[1];
    assert_eq!(row[column(&table, "Peptide")], "BBBK");
    assert_eq!(row[column(&table, "EValue")], "0.000400");
}

#[test]
fn test_spectrum_without_hits_is_excluded() {
    let dir = tempdir().unwrap();
    let doc = pepxml(&[
        spectrum_query("run01.10.11.2", 2, &[search_hit(1, "AAAK", &[("xcorr", "1.5")])]),
        spectrum_query("run01.12.12.3", 3, &[]),
        spectrum_query("run01.13.13.2", 2, &[search_hit(1, "CCCK", &[("xcorr", "2.5")])]),
    ]);
    let input = write_input(dir.path(), "run01.pepxml", &doc);
    let output = dir.path().join("run01.txt");

    let parsed = PepXmlParser::open(&input).unwrap().parse().unwrap();
    assert_eq!(parsed.store.len(), 3);
    let rows = select_all(&parsed.store);
    let stats =
        write_hit_list_file(&output, &rows, parsed.store.len(), WriterConfig::default()).unwrap();
    assert_eq!(stats.rows_written, 2);
    assert_eq!(stats.psms_skipped, 1);

    let table = read_table(&output);
    let ids: Vec<_> = table[1..].iter().map(|r| r[0].as_str()).collect();
    assert_eq!(ids, vec!["run01.10.11.2", "run01.13.13.2"]);
}

#[test]
fn test_unknown_score_is_ignored() {
    let dir = tempdir().unwrap();
    let doc = pepxml(&[spectrum_query(
        "run01.10.11.2",
        2,
        &[search_hit(
            1,
            "AAAK",
            &[("xcorr", "2.0"), ("my_custom_score", "99.9")],
        )],
    )]);
    let input = write_input(dir.path(), "run01.pepxml", &doc);

    let parsed = PepXmlParser::open(&input).unwrap().parse().unwrap();
    assert_eq!(parsed.stats.ignored_scores, 1);

    let output = dir.path().join("run01.txt");
    let table = run_pipeline(&input, &output, WriterConfig::default());
    assert_eq!(table[0].len(), 20);
    assert_eq!(table[1].len(), 20);
    assert!(!fs::read_to_string(&output).unwrap().contains("99.9"));
}

#[test]
fn test_duplicate_spectrum_keeps_last_occurrence() {
    let dir = tempdir().unwrap();
    let doc = pepxml(&[
        spectrum_query("run01.10.11.2", 2, &[search_hit(1, "FIRSTK", &[("xcorr", "5.0")])]),
        spectrum_query("run01.20.20.2", 2, &[search_hit(1, "OTHERK", &[("xcorr", "1.0")])]),
        spectrum_query("run01.10.11.2", 3, &[search_hit(1, "SECONDK", &[("xcorr", "1.0")])]),
    ]);
    let input = write_input(dir.path(), "run01.pepxml", &doc);

    let parsed = PepXmlParser::open(&input).unwrap().parse().unwrap();
    assert_eq!(parsed.stats.duplicate_spectra, 1);
    assert_eq!(parsed.store.len(), 2);

    let table = run_pipeline(&input, &dir.path().join("run01.txt"), WriterConfig::default());
    assert_eq!(table.len(), 3);
    assert_eq!(table[1][0], "run01.10.11.2");
    assert_eq!(table[1][column(&table, "Peptide")], "SECONDK");
    assert_eq!(table[1][column(&table, "Charge")], "3");
}

#[test]
fn test_blank_spec_prob_is_absent() {
    let dir = tempdir().unwrap();
    let doc = pepxml(&[spectrum_query(
        "run01.10.11.2",
        2,
        &[search_hit(1, "AAAK", &[("msgf_specprob", ""), ("xcorr", "2.0")])],
    )]);
    let input = write_input(dir.path(), "run01.pepxml", &doc);

    let store = parse_file(&input).unwrap();
    let psm = store.get("run01.10.11.2").unwrap();
    assert!(psm.hits[0].msgf_specprob.is_none());

    let table = run_pipeline(&input, &dir.path().join("run01.txt"), WriterConfig::default());
    assert_eq!(table[1][column(&table, "MSGF_SpecProb")], "1");
}

#[test]
fn test_missing_charge_is_fatal() {
    let dir = tempdir().unwrap();
    let doc = pepxml(&[]).replace(
        "</msms_run_summary>",
        r#"<spectrum_query spectrum="run01.10.11.2" precursor_neutral_mass="1500.25">
      <search_result/>
    </spectrum_query>
  </msms_run_summary>"#,
    );
    let input = write_input(dir.path(), "run01.pepxml", &doc);

    let err = parse_file(&input).unwrap_err();
    assert!(matches!(
        err,
        PepXmlError::MissingAttribute {
            element: "spectrum_query",
            attribute: "assumed_charge"
        }
    ));
}

#[test]
fn test_legacy_schema_file() {
    let dir = tempdir().unwrap();
    let doc = pepxml(&[spectrum_query(
        "run01.10.11.2",
        2,
        &[search_hit(1, "AAAK", &[("xcorr", "2.0"), ("expect", "0.01")])],
    )]);
    let input = write_input(dir.path(), "run01.pepxml", &doc);
    let table = run_pipeline(&input, &dir.path().join("run01.txt"), WriterConfig::legacy());

    assert_eq!(table[0].len(), 18);
    assert!(!table[0].iter().any(|c| c == "EValue" || c == "Ions_Matched"));
    assert_eq!(table[1][column(&table, "Ions_Observed")], "24");
}

#[test]
fn test_parsing_twice_is_identical() {
    let dir = tempdir().unwrap();
    let doc = pepxml(&[
        spectrum_query("run01.10.11.2", 2, &[search_hit(1, "AAAK", &[("xcorr", "1.5")])]),
        spectrum_query("run01.13.13.2", 2, &[search_hit(1, "CCCK", &[("expect", "1e-5")])]),
    ]);
    let input = write_input(dir.path(), "run01.pepxml", &doc);

    let first = parse_file(&input).unwrap();
    let second = parse_file(&input).unwrap();
    assert_eq!(first, second);
}

// ============================================================================
// Binary
// ============================================================================

fn pepxml2hits() -> Command {
    Command::new(env!("CARGO_BIN_EXE_pepxml2hits"))
}

#[test]
fn test_cli_writes_txt_next_to_input() {
    let dir = tempdir().unwrap();
    let doc = pepxml(&[spectrum_query(
        "run01.10.11.2",
        2,
        &[search_hit(1, "AAAK", &[("xcorr", "2.0")])],
    )]);
    let input = write_input(dir.path(), "run01.pep.xml", &doc);

    let status = pepxml2hits().arg(&input).status().unwrap();
    assert!(status.success());

    let table = read_table(&dir.path().join("run01.txt"));
    assert_eq!(table.len(), 2);
    assert_eq!(table[0].len(), 20);
}

#[test]
fn test_cli_legacy_flag() {
    let dir = tempdir().unwrap();
    let doc = pepxml(&[spectrum_query(
        "run01.10.11.2",
        2,
        &[search_hit(1, "AAAK", &[("xcorr", "2.0")])],
    )]);
    let input = write_input(dir.path(), "run01.pepxml", &doc);

    let status = pepxml2hits().arg("--legacy").arg(&input).status().unwrap();
    assert!(status.success());
    assert_eq!(read_table(&dir.path().join("run01.txt"))[0].len(), 18);
}

#[test]
fn test_cli_config_file() {
    let dir = tempdir().unwrap();
    let doc = pepxml(&[spectrum_query(
        "run01.10.11.2",
        2,
        &[search_hit(1, "AAAK", &[("xcorr", "2.0")])],
    )]);
    let input = write_input(dir.path(), "run01.pepxml", &doc);
    let config = write_input(
        dir.path(),
        "pepxml2hits.toml",
        "[output]\nlegacy = true\nprogress_interval = 1\n",
    );

    let status = pepxml2hits()
        .arg("--config")
        .arg(&config)
        .arg(&input)
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(read_table(&dir.path().join("run01.txt"))[0].len(), 18);
}

#[test]
fn test_cli_inaccessible_input() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("missing.pepxml");

    let output = pepxml2hits().arg(&input).output().unwrap();
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("is not accessible."));
    assert!(stderr.contains("Usage:"));
    assert!(!dir.path().join("missing.txt").exists());
}

#[test]
fn test_cli_wrong_arity() {
    let output = pepxml2hits().output().unwrap();
    assert!(!output.status.success());

    let output = pepxml2hits().args(["a.pepxml", "b.pepxml"]).output().unwrap();
    assert!(!output.status.success());
}

#[test]
fn test_cli_parse_error_leaves_no_output() {
    let dir = tempdir().unwrap();
    let doc = pepxml(&[]).replace(
        "</msms_run_summary>",
        r#"<spectrum_query spectrum="run01.10.11.2" assumed_charge="2">
      <search_result/>
    </spectrum_query>
  </msms_run_summary>"#,
    );
    let input = write_input(dir.path(), "run01.pepxml", &doc);

    let output = pepxml2hits().arg(&input).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("precursor_neutral_mass"));
    assert!(!dir.path().join("run01.txt").exists());
}
