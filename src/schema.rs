//! # Hit List Schema Definition
//!
//! Column layout of the tab-separated hit list.
//!
//! | Column | Type | Default | Extended | Legacy |
//! |--------|------|---------|----------|--------|
//! | Spectrum_ID | text | - | yes | yes |
//! | Charge | integer | - | yes | yes |
//! | NeutralMass | float | - | yes | yes |
//! | Peptide | text | - | yes | yes |
//! | Protein | text | - | yes | yes |
//! | MissedCleavages | integer | - | yes | yes |
//! | Xcorr | float | 0 | yes | yes |
//! | DeltaCn | float | 0 | yes | yes |
//! | DeltaCn2 | float | 0 | yes | yes |
//! | RankXc | integer | 0 | yes | yes |
//! | XcRatio | float | 0 | yes | yes |
//! | Ions_Observed | integer | 0 | yes | yes |
//! | Ions_Matched | integer | 0 | yes | no |
//! | Ions_Expected | integer | 0 | yes | yes |
//! | NumTrypticEnds | integer | 0 | yes | yes |
//! | MSGF_SpecProb | decimal | 1 | yes | yes |
//! | EValue | float | 1 | yes | no |
//! | Start_Scan | integer | 0 | yes | yes |
//! | End_Scan | integer | 0 | yes | yes |
//! | RetentionTime_Sec | float | 0 | yes | yes |
//!
//! Floats are written with six decimals. `DeltaCn2` carries `deltacnstar`.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Column names of the hit list
pub mod columns {
    /// Spectrum identifier
    pub const SPECTRUM_ID: &str = "Spectrum_ID";
    /// Assumed charge
    pub const CHARGE: &str = "Charge";
    /// Precursor neutral mass
    pub const NEUTRAL_MASS: &str = "NeutralMass";
    /// Peptide sequence
    pub const PEPTIDE: &str = "Peptide";
    /// Protein accession
    pub const PROTEIN: &str = "Protein";
    /// Missed cleavages
    pub const MISSED_CLEAVAGES: &str = "MissedCleavages";
    /// SEQUEST xcorr
    pub const XCORR: &str = "Xcorr";
    /// SEQUEST deltacn
    pub const DELTA_CN: &str = "DeltaCn";
    /// SEQUEST deltacnstar
    pub const DELTA_CN2: &str = "DeltaCn2";
    /// Rank by xcorr
    pub const RANK_XC: &str = "RankXc";
    /// xcorr ratio
    pub const XC_RATIO: &str = "XcRatio";
    /// Total fragment ions
    pub const IONS_OBSERVED: &str = "Ions_Observed";
    /// Matched fragment ions
    pub const IONS_MATCHED: &str = "Ions_Matched";
    /// Expected fragment ions
    pub const IONS_EXPECTED: &str = "Ions_Expected";
    /// Tryptic termini
    pub const NUM_TRYPTIC_ENDS: &str = "NumTrypticEnds";
    /// MSGF spectral probability
    pub const MSGF_SPEC_PROB: &str = "MSGF_SpecProb";
    /// Expectation value
    pub const EVALUE: &str = "EValue";
    /// First scan
    pub const START_SCAN: &str = "Start_Scan";
    /// Last scan
    pub const END_SCAN: &str = "End_Scan";
    /// Retention time in seconds
    pub const RETENTION_TIME_SEC: &str = "RetentionTime_Sec";
}

use columns::*;

const EXTENDED_COLUMNS: &[&str] = &[
    SPECTRUM_ID,
    CHARGE,
    NEUTRAL_MASS,
    PEPTIDE,
    PROTEIN,
    MISSED_CLEAVAGES,
    XCORR,
    DELTA_CN,
    DELTA_CN2,
    RANK_XC,
    XC_RATIO,
    IONS_OBSERVED,
    IONS_MATCHED,
    IONS_EXPECTED,
    NUM_TRYPTIC_ENDS,
    MSGF_SPEC_PROB,
    EVALUE,
    START_SCAN,
    END_SCAN,
    RETENTION_TIME_SEC,
];

const LEGACY_COLUMNS: &[&str] = &[
    SPECTRUM_ID,
    CHARGE,
    NEUTRAL_MASS,
    PEPTIDE,
    PROTEIN,
    MISSED_CLEAVAGES,
    XCORR,
    DELTA_CN,
    DELTA_CN2,
    RANK_XC,
    XC_RATIO,
    IONS_OBSERVED,
    IONS_EXPECTED,
    NUM_TRYPTIC_ENDS,
    MSGF_SPEC_PROB,
    START_SCAN,
    END_SCAN,
    RETENTION_TIME_SEC,
];

/// Column set of the hit list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputSchema {
    /// All columns, including matched ions and E-values
    #[default]
    Extended,
    /// The legacy column set, without `Ions_Matched` and `EValue`
    Legacy,
}

impl OutputSchema {
    /// Header columns in output order
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            OutputSchema::Extended => EXTENDED_COLUMNS,
            OutputSchema::Legacy => LEGACY_COLUMNS,
        }
    }

    /// Whether `Ions_Matched` and `EValue` are written
    pub fn is_extended(&self) -> bool {
        matches!(self, OutputSchema::Extended)
    }
}

impl fmt::Display for OutputSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputSchema::Extended => write!(f, "extended"),
            OutputSchema::Legacy => write!(f, "legacy"),
        }
    }
}

impl FromStr for OutputSchema {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "extended" | "default" => Ok(OutputSchema::Extended),
            "legacy" | "simple" => Ok(OutputSchema::Legacy),
            _ => Err(format!(
                "Unknown output schema '{}'. Valid options: extended, legacy",
                s
            )),
        }
    }
}
