//! # pepXML Parser Module
//!
//! This module provides streaming parsing of pepXML files, the Trans-Proteomic
//! Pipeline's XML format for peptide-spectrum matches.
//!
//! ## Design Goals
//!
//! - **Streaming**: markup is read element by element; only derived records are kept
//! - **Sparse**: a score the engine did not report stays absent, never zero
//! - **Engine-tolerant**: score names are dispatched through a data table, unknown
//!   names are skipped
//! - **Isolated**: every parse owns its state and result store
//!
//! ## pepXML Structure
//!
//! Only the elements marked with a depth are read; everything else only moves
//! the depth counter.
//!
//! ```text
//! msms_pipeline_analysis                        (1)
//! └── msms_run_summary                          (2)
//!     ├── search_summary
//!     └── spectrum_query*                       (3) spectrum, assumed_charge, ...
//!         └── search_result                     (4)
//!             └── search_hit*                   (5) hit_rank, peptide, protein, ...
//!                 ├── modification_info
//!                 ├── search_score*             (6) name, value
//!                 └── analysis_result           (6)
//!                     └── peptideprophet_result (7) probability
//! ```

pub mod dispatch;
mod error;
mod models;
mod parser;

pub use dispatch::{
    ElementRole, ScoreSetter, SCORE_RULES, SPEC_PROB_MAX_EXPONENT, SPEC_PROB_PRECISION,
};
pub use error::PepXmlError;
pub use models::{Psm, PsmStore, SearchHit};
pub use parser::{parse_file, ParseOutput, ParseStats, PepXmlParser, DEFAULT_INPUT_BUFFER_SIZE};
