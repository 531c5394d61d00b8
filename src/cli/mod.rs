pub mod args;
pub mod runner;

pub use args::{get_log_level, parse_cli, Args};
pub use runner::{run_with, Runner};
