use anyhow::Result;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;

mod config;
mod convert;

/// pepxml2hits - Best peptide hit per spectrum from pepXML search results
#[derive(Parser)]
#[command(name = "pepxml2hits")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input pepXML file path
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Write the legacy column set (no Ions_Matched or EValue)
    #[arg(long)]
    legacy: bool,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

/// One-line usage string, as clap prints it.
pub fn usage() -> String {
    Cli::command().render_usage().to_string()
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    if !convert::is_accessible(&cli.input) {
        eprintln!("{} is not accessible.", cli.input.display());
        eprintln!("{}", usage());
        std::process::exit(1);
    }

    convert::run(cli.input, cli.legacy, cli.config)
}
