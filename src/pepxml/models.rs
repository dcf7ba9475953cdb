//! Data models for pepXML structures
//!
//! These models hold exactly what the parser saw. Scores that were not reported
//! for a hit stay `None`; default values are only substituted when a best hit
//! is selected for output.

use bigdecimal::BigDecimal;
use indexmap::IndexMap;

/// One `search_hit` element: a candidate peptide assignment for a spectrum
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchHit {
    /// Rank reported by the search engine (1 = top hit)
    pub hit_rank: i32,

    /// Unmodified peptide sequence
    pub peptide: String,

    /// Protein accession of the first matching protein
    pub protein: String,

    /// Number of missed enzymatic cleavages
    pub missed_cleavages: i32,

    /// Number of tolerable (tryptic) termini, 0-2
    pub num_tryptic_ends: Option<i32>,

    /// Number of fragment ions matched
    pub ions_matched: Option<i32>,

    /// Total number of fragment ions considered
    pub ions_observed: Option<i32>,

    /// Number of fragment ions expected
    pub ions_expected: Option<i32>,

    // SEQUEST
    /// Cross-correlation score
    pub xcorr: Option<f64>,
    /// Preliminary score
    pub spscore: Option<f64>,
    /// Normalized difference to the next best xcorr
    pub deltacn: Option<f64>,
    /// Normalized difference to the next best xcorr among distinct peptides
    pub deltacnstar: Option<f64>,
    /// Rank by xcorr
    pub rankxc: Option<i32>,
    /// Ratio of xcorr to the top xcorr
    pub xcratio: Option<f64>,

    // X!Tandem / MSFragger
    /// Hyperscore
    pub hyperscore: Option<f64>,
    /// Hyperscore of the next best hit
    pub nextscore: Option<f64>,
    /// Expectation value (also filled from `EValue`)
    pub expect: Option<f64>,

    // InsPecT
    /// MQScore
    pub mqscore: Option<f64>,
    /// F-score
    pub fscore: Option<f64>,
    /// Delta score
    pub deltascore: Option<f64>,

    // MyriMatch
    /// Multivariate hypergeometric score
    pub mvh: Option<f64>,
    /// Precursor mass error
    pub mass_error: Option<f64>,
    /// m/z sum of squared errors
    pub mz_sse: Option<f64>,
    /// m/z fidelity
    pub mz_fidelity: Option<f64>,
    /// Revised m/z fidelity
    pub new_mz_fidelity: Option<f64>,
    /// m/z mean absolute error
    pub mz_mae: Option<f64>,

    // TagRecon
    /// Number of post-translational modifications
    pub num_ptms: Option<i32>,

    /// MSGF spectral probability, kept as a decimal so that very small
    /// probabilities still order correctly
    pub msgf_specprob: Option<BigDecimal>,

    /// PeptideProphet probability
    pub tpp_pep_prob: Option<f64>,
}

/// One `spectrum_query` element and its hits
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Psm {
    /// Spectrum identifier (the `spectrum` attribute)
    pub spectrum_id: String,

    /// Assumed precursor charge
    pub charge: i32,

    /// Precursor neutral mass
    pub neutral_mass: f64,

    /// First scan number
    pub start_scan: Option<i64>,

    /// Last scan number
    pub end_scan: Option<i64>,

    /// Retention time in seconds
    pub retention_time_sec: Option<f64>,

    /// Hits in document order
    pub hits: Vec<SearchHit>,
}

impl Psm {
    /// Create a PSM with no hits
    pub fn new(spectrum_id: impl Into<String>, charge: i32, neutral_mass: f64) -> Self {
        Self {
            spectrum_id: spectrum_id.into(),
            charge,
            neutral_mass,
            ..Default::default()
        }
    }

    /// Whether the query produced any hit
    pub fn has_hits(&self) -> bool {
        !self.hits.is_empty()
    }
}

/// All PSMs from one parse, keyed by spectrum id in first-seen order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PsmStore {
    psms: IndexMap<String, Psm>,
}

impl PsmStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a PSM, returning the one it replaced if the id was already present.
    ///
    /// A replaced PSM keeps its original position in iteration order.
    pub fn insert(&mut self, psm: Psm) -> Option<Psm> {
        self.psms.insert(psm.spectrum_id.clone(), psm)
    }

    /// Look up a PSM by spectrum id
    pub fn get(&self, spectrum_id: &str) -> Option<&Psm> {
        self.psms.get(spectrum_id)
    }

    /// Number of PSMs
    pub fn len(&self) -> usize {
        self.psms.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.psms.is_empty()
    }

    /// Iterate over PSMs in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = &Psm> {
        self.psms.values()
    }

    /// Total number of hits across all PSMs
    pub fn hit_count(&self) -> usize {
        self.psms.values().map(|psm| psm.hits.len()).sum()
    }
}

impl<'a> IntoIterator for &'a PsmStore {
    type Item = &'a Psm;
    type IntoIter = indexmap::map::Values<'a, String, Psm>;

    fn into_iter(self) -> Self::IntoIter {
        self.psms.values()
    }
}
