//! # Hit List Writer Module
//!
//! Writes best-hit rows as a tab-separated table with one header line.
//!
//! ## Format Rules
//!
//! 1. **Fixed columns**: the header comes from [`crate::schema::OutputSchema`].
//!
//! 2. **No nulls**: fields the search engine did not report were already
//!    defaulted by the selector (1 for probabilities and E-values, 0 otherwise).
//!
//! 3. **Fixed precision**: floats use six decimals; the MSGF spectral
//!    probability keeps its full decimal text.
//!
//! 4. **All or nothing**: [`write_hit_list_file`] only replaces the target
//!    file after every row was written.

mod config;
mod error;
mod stats;
mod writer_impl;


pub use config::{WriterConfig, DEFAULT_PROGRESS_INTERVAL};
pub use error::WriterError;
pub use stats::WriterStats;
pub use writer_impl::{write_hit_list_file, HitListWriter};
