//! Constants used throughout the scaffolder application

/// Name of the per-project configuration subdirectory
pub const CONFIG_DIR_NAME: &str = ".scaffolder";

/// Name of the configuration file inside a config directory or feature directory
pub const CONFIG_FILE_NAME: &str = "config.yml";

/// Environment variable overriding the user-global configuration directory
pub const GLOBAL_DIR_ENV: &str = "SCAFFOLDER_HOME";

/// Directory under the global directory holding cached remote checkouts
pub const REMOTE_SOURCES_DIR: &str = ".remote-sources";

/// Default maximum age of a cached checkout before a network refresh, in seconds
pub const DEFAULT_UPDATE_THRESHOLD_SECS: u64 = 3600;

/// File extensions whose contents are copied verbatim instead of rendered.
/// These hold web-templating markup whose own delimiters must survive.
pub const MARKUP_EXTENSIONS: &[&str] = &["mustache", "hbs", "handlebars"];

/// Exit codes
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
}
