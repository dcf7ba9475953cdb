//! # pepxml-hits - Best Peptide Hits from pepXML
//!
//! `pepxml_hits` reads peptide-spectrum matches from pepXML search results and
//! reduces every spectrum to a single representative hit, written as a
//! tab-separated table.
//!
//! ## Key Features
//!
//! - **Streaming parser**: pepXML is pulled element by element with `quick-xml`;
//!   only spectrum queries, search hits and their scores are materialised.
//!
//! - **Engine-agnostic scores**: SEQUEST, X!Tandem, MSGF, MyriMatch and
//!   Inspect score names are mapped onto one hit record through a static
//!   dispatch table. Unknown names are counted and skipped.
//!
//! - **Cross-engine selection**: the best hit is picked by MSGF spectral
//!   probability, then expectation value, then xcorr, depending on what the
//!   engine reported.
//!
//! - **Exact spectral probabilities**: `msgf_specprob` is kept as an
//!   arbitrary-precision decimal, so values far below `f64` resolution stay
//!   ordered.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pepxml_hits::pepxml::PepXmlParser;
//! use pepxml_hits::selector::select_all;
//! use pepxml_hits::writer::{write_hit_list_file, WriterConfig};
//!
//! let output = PepXmlParser::open("run.pep.xml")?.parse()?;
//! let rows = select_all(&output.store);
//! let stats = write_hit_list_file("run.txt", &rows, output.store.len(), WriterConfig::default())?;
//! println!("{}", stats);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Modules
//!
//! - [`pepxml`]: streaming parser and the PSM data model
//! - [`selector`]: best-hit cascade
//! - [`schema`]: output column layouts
//! - [`writer`]: tab-separated hit list writer

#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod pepxml;
pub mod schema;
pub mod selector;
pub mod writer;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::pepxml::{
        parse_file, ParseOutput, ParseStats, PepXmlError, PepXmlParser, Psm, PsmStore, SearchHit,
    };
    pub use crate::schema::{columns, OutputSchema};
    pub use crate::selector::{select_all, select_best_hit, should_replace, BestHit, CascadeKeys};
    pub use crate::writer::{
        write_hit_list_file, HitListWriter, WriterConfig, WriterError, WriterStats,
    };
}
