//! # pepxml2hits
//!
//! A command-line tool that reduces pepXML search results to one best hit per
//! spectrum, written as a tab-separated hit list.
//!
//! ## Usage
//!
//! ```bash
//! # Writes run01.txt next to the input
//! pepxml2hits run01.pep.xml
//!
//! # Legacy column set, with progress logging
//! pepxml2hits --legacy -v run01.pepxml
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
