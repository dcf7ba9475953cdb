//! Best-hit selection
//!
//! Search engines report score families that cannot be compared with each
//! other, so the representative hit of a spectrum is picked by a cascade: a
//! real MSGF spectral probability dominates, then an expectation value, then
//! xcorr. The hits are walked once in document order; the first hit is the
//! initial baseline and later hits only replace it when they are strictly
//! better under the rule the current baseline selects.

use bigdecimal::BigDecimal;

use crate::pepxml::{Psm, PsmStore, SearchHit};

/// Value used for a missing MSGF spectral probability
pub fn default_spec_prob() -> BigDecimal {
    BigDecimal::from(1)
}

/// Value used for a missing expectation value
pub const DEFAULT_EXPECT: f64 = 1.0;

/// Value used for any other missing score
pub const DEFAULT_SCORE: f64 = 0.0;

/// The three comparison keys of a hit, with defaults filled in
#[derive(Debug, Clone, PartialEq)]
pub struct CascadeKeys {
    /// MSGF spectral probability, 1 when absent
    pub msgf_specprob: BigDecimal,
    /// Expectation value, 1 when absent
    pub expect: f64,
    /// xcorr, 0 when absent
    pub xcorr: f64,
}

impl CascadeKeys {
    /// Read the keys of a hit
    pub fn of(hit: &SearchHit) -> Self {
        Self {
            msgf_specprob: hit.msgf_specprob.clone().unwrap_or_else(default_spec_prob),
            expect: hit.expect.unwrap_or(DEFAULT_EXPECT),
            xcorr: hit.xcorr.unwrap_or(DEFAULT_SCORE),
        }
    }
}

/// Whether `candidate` should replace `baseline` as the best hit.
///
/// Only the first applicable rule is consulted.
pub fn should_replace(baseline: &CascadeKeys, candidate: &CascadeKeys) -> bool {
    if baseline.msgf_specprob < default_spec_prob() {
        candidate.msgf_specprob < baseline.msgf_specprob
    } else if baseline.expect < DEFAULT_EXPECT {
        candidate.expect < baseline.expect
    } else {
        candidate.xcorr > baseline.xcorr
    }
}

/// The representative hit of one spectrum, with every output field resolved
#[derive(Debug, Clone, PartialEq)]
pub struct BestHit {
    /// Spectrum identifier
    pub spectrum_id: String,
    /// Assumed precursor charge
    pub charge: i32,
    /// Precursor neutral mass
    pub neutral_mass: f64,
    /// Position of the selected hit in the spectrum's hit list
    pub hit_index: usize,
    /// Engine rank of the selected hit
    pub hit_rank: i32,
    /// Peptide sequence
    pub peptide: String,
    /// Protein accession
    pub protein: String,
    /// Missed cleavages
    pub missed_cleavages: i32,
    /// xcorr
    pub xcorr: f64,
    /// deltacn
    pub deltacn: f64,
    /// deltacnstar
    pub deltacnstar: f64,
    /// Rank by xcorr
    pub rankxc: i32,
    /// xcorr ratio
    pub xcratio: f64,
    /// Total fragment ions considered
    pub ions_observed: i32,
    /// Fragment ions matched
    pub ions_matched: i32,
    /// Fragment ions expected
    pub ions_expected: i32,
    /// Number of tryptic termini
    pub num_tryptic_ends: i32,
    /// MSGF spectral probability
    pub msgf_specprob: BigDecimal,
    /// Expectation value
    pub expect: f64,
    /// First scan
    pub start_scan: i64,
    /// Last scan
    pub end_scan: i64,
    /// Retention time in seconds
    pub retention_time_sec: f64,
}

impl BestHit {
    fn resolve(psm: &Psm, hit_index: usize, hit: &SearchHit) -> Self {
        let keys = CascadeKeys::of(hit);
        Self {
            spectrum_id: psm.spectrum_id.clone(),
            charge: psm.charge,
            neutral_mass: psm.neutral_mass,
            hit_index,
            hit_rank: hit.hit_rank,
            peptide: hit.peptide.clone(),
            protein: hit.protein.clone(),
            missed_cleavages: hit.missed_cleavages,
            xcorr: keys.xcorr,
            deltacn: hit.deltacn.unwrap_or(DEFAULT_SCORE),
            deltacnstar: hit.deltacnstar.unwrap_or(DEFAULT_SCORE),
            rankxc: hit.rankxc.unwrap_or(0),
            xcratio: hit.xcratio.unwrap_or(DEFAULT_SCORE),
            ions_observed: hit.ions_observed.unwrap_or(0),
            ions_matched: hit.ions_matched.unwrap_or(0),
            ions_expected: hit.ions_expected.unwrap_or(0),
            num_tryptic_ends: hit.num_tryptic_ends.unwrap_or(0),
            msgf_specprob: keys.msgf_specprob,
            expect: keys.expect,
            start_scan: psm.start_scan.unwrap_or(0),
            end_scan: psm.end_scan.unwrap_or(0),
            retention_time_sec: psm.retention_time_sec.unwrap_or(DEFAULT_SCORE),
        }
    }
}

/// Pick the representative hit of a spectrum; `None` when it has no hits
pub fn select_best_hit(psm: &Psm) -> Option<BestHit> {
    let mut hits = psm.hits.iter().enumerate();
    let (mut best_index, first) = hits.next()?;
    let mut best_keys = CascadeKeys::of(first);

    for (index, hit) in hits {
        let keys = CascadeKeys::of(hit);
        if should_replace(&best_keys, &keys) {
            best_index = index;
            best_keys = keys;
        }
    }

    Some(BestHit::resolve(psm, best_index, &psm.hits[best_index]))
}

/// Pick the representative hit of every spectrum, in store order.
///
/// Spectra without hits are left out.
pub fn select_all(store: &PsmStore) -> Vec<BestHit> {
    store.iter().filter_map(select_best_hit).collect()
}
