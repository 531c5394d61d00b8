//! Per-process session state.
//!
//! A `Session` is built once at startup and passed by reference to every
//! component, so nothing reads hidden global state and tests can run in
//! parallel with private global directories.

use std::path::{Path, PathBuf};

use crate::constants::{CONFIG_DIR_NAME, GLOBAL_DIR_ENV, REMOTE_SOURCES_DIR};
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct Session {
    /// Working directory of the invoking process.
    pub cwd: PathBuf,
    /// User-global configuration directory (`$SCAFFOLDER_HOME` or `~/.scaffolder`).
    pub global_dir: PathBuf,
    /// Nearest ancestor of `cwd` containing a config subdirectory, if any.
    pub project_root: Option<PathBuf>,
    /// Preview mode: log intended actions instead of performing them.
    pub dry_run: bool,
}

impl Session {
    /// Builds a session from the process environment.
    ///
    /// # Arguments
    /// * `root` - Optional override for the starting directory (`--root`)
    /// * `dry_run` - Whether side effects should be replaced by log output
    pub fn from_env(root: Option<PathBuf>, dry_run: bool) -> Result<Self> {
        let cwd = match root {
            Some(path) => path,
            None => std::env::current_dir()?,
        };
        let global_dir = default_global_dir();
        Ok(Self::new(cwd, global_dir, dry_run))
    }

    /// Builds a session with explicit directories. Used directly by tests.
    pub fn new(cwd: PathBuf, global_dir: PathBuf, dry_run: bool) -> Self {
        let project_root = find_project_root(&cwd);
        Self { cwd, global_dir, project_root, dry_run }
    }

    /// Directory the remote checkout cache lives under.
    pub fn remote_sources_dir(&self) -> PathBuf {
        self.global_dir.join(REMOTE_SOURCES_DIR)
    }

    /// Whether a project configuration distinct from the global default exists.
    ///
    /// Relative destinations resolve against the project root only when this
    /// holds; otherwise they resolve against the working directory.
    pub fn has_project_config(&self) -> bool {
        match &self.project_root {
            Some(root) => root.join(CONFIG_DIR_NAME) != self.global_dir,
            None => false,
        }
    }
}

/// The user-global configuration directory: `$SCAFFOLDER_HOME` when set,
/// `~/.scaffolder` otherwise.
pub fn default_global_dir() -> PathBuf {
    if let Ok(home) = std::env::var(GLOBAL_DIR_ENV) {
        if !home.is_empty() {
            return PathBuf::from(home);
        }
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    Path::new(&home).join(CONFIG_DIR_NAME)
}

/// Walks upward from `start` to the nearest directory containing a
/// config subdirectory.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        if dir.join(CONFIG_DIR_NAME).is_dir() {
            return Some(dir.to_path_buf());
        }
        current = dir.parent();
    }
    None
}
