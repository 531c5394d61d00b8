use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError { path: String, message: String },

    #[error("Invalid configuration in '{path}': {message}")]
    ConfigValidationError { path: String, message: String },

    #[error("Failed to parse glob pattern. Original error: {0}")]
    GlobSetParseError(#[from] globset::Error),

    #[error("Git operation failed. Original error: {0}")]
    Git2Error(#[from] git2::Error),

    #[error("Failed to render. Original error: {0}")]
    MinijinjaError(#[from] minijinja::Error),

    #[error("Cannot resolve source '{source_name}': {message}")]
    SourceResolveError { source_name: String, message: String },

    #[error("No feature matches '{filter}'.")]
    NoFeatureMatchesError { filter: String },

    #[error("Cannot proceed: destination '{destination}' already exists and is not empty.")]
    DestinationNotEmptyError { destination: String },

    #[error("Command '{command}' failed with status: {status}")]
    CommandFailedError { command: String, status: ExitStatus },

    #[error("Prompt cancelled.")]
    PromptCancelledError,

    #[error("Cannot generate '{feature}': {message}")]
    GenerationError { feature: String, message: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience type alias for Results with the scaffolder Error type.
///
/// # Type Parameters
/// * `T` - The type of the success value
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{}", err);
    std::process::exit(crate::constants::exit_codes::FAILURE);
}
