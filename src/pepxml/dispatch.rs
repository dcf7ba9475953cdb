//! Attribute dispatch tables for pepXML
//!
//! Which elements the parser reacts to, and where each `search_score` lands, is
//! described here as data. Supporting another engine's score name means adding
//! a row to [`SCORE_RULES`]; the parser's control flow does not change.

use std::str::FromStr;

use bigdecimal::BigDecimal;

use super::error::PepXmlError;
use super::models::{Psm, SearchHit};

/// Significant digits kept for MSGF spectral probabilities
pub const SPEC_PROB_PRECISION: u64 = 32;

/// Largest decimal exponent, in either direction, accepted for an MSGF
/// spectral probability
pub const SPEC_PROB_MAX_EXPONENT: u64 = 100_000;

/// Role of an element the parser acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementRole {
    /// `msms_pipeline_analysis/msms_run_summary/spectrum_query`
    SpectrumQuery,
    /// `.../spectrum_query/search_result/search_hit`
    SearchHit,
    /// `.../search_hit/search_score`
    SearchScore,
    /// `.../search_hit/analysis_result/peptideprophet_result`
    PeptideProphetResult,
}

/// One row of the structural table: an element name at a fixed depth
#[derive(Debug, Clone, Copy)]
pub struct ElementRule {
    /// Nesting depth of the element, the document element being depth 1
    pub depth: usize,
    /// Local element name
    pub name: &'static str,
    /// What the parser does with it
    pub role: ElementRole,
}

/// Elements the parser acts on. Everything else only moves the depth counter.
pub static ELEMENT_RULES: &[ElementRule] = &[
    ElementRule {
        depth: 3,
        name: "spectrum_query",
        role: ElementRole::SpectrumQuery,
    },
    ElementRule {
        depth: 5,
        name: "search_hit",
        role: ElementRole::SearchHit,
    },
    ElementRule {
        depth: 6,
        name: "search_score",
        role: ElementRole::SearchScore,
    },
    ElementRule {
        depth: 7,
        name: "peptideprophet_result",
        role: ElementRole::PeptideProphetResult,
    },
];

/// Look up the role of an element opened or closed at `depth`
pub fn element_role(depth: usize, name: &str) -> Option<ElementRole> {
    ELEMENT_RULES
        .iter()
        .find(|rule| rule.depth == depth && rule.name == name)
        .map(|rule| rule.role)
}

/// Typed destination of a score value
#[derive(Clone, Copy)]
pub enum ScoreSetter {
    /// Floating point hit field
    HitF64(fn(&mut SearchHit, f64)),
    /// Integer hit field
    HitI32(fn(&mut SearchHit, i32)),
    /// Decimal hit field, rounded when longer than [`SPEC_PROB_PRECISION`] digits
    HitDecimal(fn(&mut SearchHit, BigDecimal)),
    /// Integer spectrum field, read from the first hit only and only when the
    /// query did not report it
    QueryI64(fn(&mut Psm, i64)),
    /// Floating point spectrum field, read from the first hit only and only
    /// when the query did not report it
    QueryF64(fn(&mut Psm, f64)),
}

impl ScoreSetter {
    /// Parse `raw` and store it. Blank text leaves the field untouched.
    pub fn apply(
        &self,
        name: &str,
        raw: &str,
        psm: &mut Psm,
        hit: &mut SearchHit,
    ) -> Result<(), PepXmlError> {
        match *self {
            ScoreSetter::HitF64(set) => {
                if let Some(value) = parse_text(SEARCH_SCORE, name, raw)? {
                    set(hit, value);
                }
            }
            ScoreSetter::HitI32(set) => {
                if let Some(value) = parse_text(SEARCH_SCORE, name, raw)? {
                    set(hit, value);
                }
            }
            ScoreSetter::HitDecimal(set) => {
                if let Some(value) = parse_text::<BigDecimal>(SEARCH_SCORE, name, raw)? {
                    set(hit, bounded_spec_prob(name, raw, value)?);
                }
            }
            // Hits are attached on close, so an empty list means the first hit
            ScoreSetter::QueryI64(set) => {
                if let Some(value) = parse_text(SEARCH_SCORE, name, raw)? {
                    if psm.hits.is_empty() {
                        set(psm, value);
                    }
                }
            }
            ScoreSetter::QueryF64(set) => {
                if let Some(value) = parse_text(SEARCH_SCORE, name, raw)? {
                    if psm.hits.is_empty() {
                        set(psm, value);
                    }
                }
            }
        }
        Ok(())
    }
}

/// A `search_score` name and where its value goes
#[derive(Clone, Copy)]
pub struct ScoreRule {
    /// Value of the `name` attribute, matched case-sensitively
    pub name: &'static str,
    /// Destination field
    pub setter: ScoreSetter,
}

const SEARCH_SCORE: &str = "search_score";

/// Known `search_score` names. Names not listed here are ignored.
#[rustfmt::skip]
pub static SCORE_RULES: &[ScoreRule] = &[
    // SEQUEST
    ScoreRule { name: "xcorr", setter: ScoreSetter::HitF64(|h, v| h.xcorr = Some(v)) },
    ScoreRule { name: "spscore", setter: ScoreSetter::HitF64(|h, v| h.spscore = Some(v)) },
    ScoreRule { name: "deltacn", setter: ScoreSetter::HitF64(|h, v| h.deltacn = Some(v)) },
    ScoreRule { name: "deltacnstar", setter: ScoreSetter::HitF64(|h, v| h.deltacnstar = Some(v)) },
    ScoreRule { name: "RankXc", setter: ScoreSetter::HitI32(|h, v| h.rankxc = Some(v)) },
    ScoreRule { name: "XcRatio", setter: ScoreSetter::HitF64(|h, v| h.xcratio = Some(v)) },
    ScoreRule { name: "Ions_Observed", setter: ScoreSetter::HitI32(|h, v| h.ions_observed = Some(v)) },
    ScoreRule { name: "Ions_Expected", setter: ScoreSetter::HitI32(|h, v| h.ions_expected = Some(v)) },
    ScoreRule { name: "NumTrypticEnds", setter: ScoreSetter::HitI32(|h, v| h.num_tryptic_ends = Some(v)) },
    // X!Tandem, MSFragger
    ScoreRule { name: "hyperscore", setter: ScoreSetter::HitF64(|h, v| h.hyperscore = Some(v)) },
    ScoreRule { name: "nextscore", setter: ScoreSetter::HitF64(|h, v| h.nextscore = Some(v)) },
    ScoreRule { name: "expect", setter: ScoreSetter::HitF64(|h, v| h.expect = Some(v)) },
    // MSGF+
    ScoreRule { name: "EValue", setter: ScoreSetter::HitF64(|h, v| h.expect = Some(v)) },
    ScoreRule { name: "msgf_specprob", setter: ScoreSetter::HitDecimal(|h, v| h.msgf_specprob = Some(v)) },
    ScoreRule { name: "msgfspecprob", setter: ScoreSetter::HitDecimal(|h, v| h.msgf_specprob = Some(v)) },
    // InsPecT
    ScoreRule { name: "mqscore", setter: ScoreSetter::HitF64(|h, v| h.mqscore = Some(v)) },
    ScoreRule { name: "fscore", setter: ScoreSetter::HitF64(|h, v| h.fscore = Some(v)) },
    ScoreRule { name: "deltascore", setter: ScoreSetter::HitF64(|h, v| h.deltascore = Some(v)) },
    // MyriMatch
    ScoreRule { name: "mvh", setter: ScoreSetter::HitF64(|h, v| h.mvh = Some(v)) },
    ScoreRule { name: "massError", setter: ScoreSetter::HitF64(|h, v| h.mass_error = Some(v)) },
    ScoreRule { name: "mzSSE", setter: ScoreSetter::HitF64(|h, v| h.mz_sse = Some(v)) },
    ScoreRule { name: "mzFidelity", setter: ScoreSetter::HitF64(|h, v| h.mz_fidelity = Some(v)) },
    ScoreRule { name: "newMZFidelity", setter: ScoreSetter::HitF64(|h, v| h.new_mz_fidelity = Some(v)) },
    ScoreRule { name: "mzMAE", setter: ScoreSetter::HitF64(|h, v| h.mz_mae = Some(v)) },
    // DirecTag / TagRecon
    ScoreRule { name: "numPTMs", setter: ScoreSetter::HitI32(|h, v| h.num_ptms = Some(v)) },
    // Scan bookkeeping some exporters write as scores
    ScoreRule {
        name: "start_scan",
        setter: ScoreSetter::QueryI64(|p, v| {
            p.start_scan.get_or_insert(v);
        }),
    },
    ScoreRule {
        name: "end_scan",
        setter: ScoreSetter::QueryI64(|p, v| {
            p.end_scan.get_or_insert(v);
        }),
    },
    ScoreRule {
        name: "retention_time_sec",
        setter: ScoreSetter::QueryF64(|p, v| {
            p.retention_time_sec.get_or_insert(v);
        }),
    },
];

/// Reject exponents the decimal arithmetic cannot handle and round long
/// values. Short values are stored exactly as written.
fn bounded_spec_prob(
    name: &str,
    raw: &str,
    value: BigDecimal,
) -> Result<BigDecimal, PepXmlError> {
    let (_, scale) = value.as_bigint_and_exponent();
    if scale.unsigned_abs() > SPEC_PROB_MAX_EXPONENT {
        return Err(PepXmlError::invalid_value(SEARCH_SCORE, name, raw));
    }
    if value.digits() > SPEC_PROB_PRECISION {
        Ok(value.with_prec(SPEC_PROB_PRECISION))
    } else {
        Ok(value)
    }
}

/// Find the setter for a `search_score` name
pub fn score_setter(name: &str) -> Option<&'static ScoreSetter> {
    SCORE_RULES
        .iter()
        .find(|rule| rule.name == name)
        .map(|rule| &rule.setter)
}

/// Parse numeric text, treating blank text as absent
pub(crate) fn parse_text<T: FromStr>(
    element: &'static str,
    field: &str,
    raw: &str,
) -> Result<Option<T>, PepXmlError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<T>()
        .map(Some)
        .map_err(|_| PepXmlError::invalid_value(element, field, raw))
}
