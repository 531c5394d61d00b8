use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

/// CLI arguments for the scaffolder.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Feature to generate; matched case-insensitively as a substring of
    /// the available feature names.
    #[arg(value_name = "FEATURE")]
    pub filter: Option<String>,

    /// Directory to resolve configuration and destinations from
    /// (defaults to the working directory).
    #[arg(long, value_name = "PATH")]
    pub root: Option<PathBuf>,

    /// Preview actions without touching the filesystem or running commands.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

/// Parse command line arguments.
pub fn parse_cli() -> Args {
    Args::parse()
}

/// Map the `--debug` flag to the appropriate log level.
pub fn get_log_level(debug: bool) -> LevelFilter {
    if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}
