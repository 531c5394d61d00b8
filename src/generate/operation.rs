use std::path::PathBuf;

/// A single planned file action, kept separate from its execution so the
/// same description serves both real runs and `--dry-run` previews.
#[derive(Debug)]
pub enum FileOperation {
    /// Render the source through the expression engine and write the result.
    Render { source: PathBuf, target: PathBuf },
    /// Copy the source verbatim (UI-markup extensions).
    Copy { source: PathBuf, target: PathBuf },
    /// Destination already exists; the file is left untouched.
    SkipExisting { target: PathBuf },
    /// The file's condition rendered falsy.
    SkipCondition { destination: String },
}

impl FileOperation {
    /// Gets a message describing the operation and its status.
    pub fn get_message(&self, dry_run: bool) -> String {
        let prefix = if dry_run { "[DRY RUN] " } else { "" };
        match self {
            FileOperation::Render { source, target } => {
                format!(
                    "{}Rendering '{}' to '{}'",
                    prefix,
                    source.display(),
                    target.display()
                )
            }
            FileOperation::Copy { source, target } => {
                format!(
                    "{}Copying '{}' to '{}'",
                    prefix,
                    source.display(),
                    target.display()
                )
            }
            FileOperation::SkipExisting { target } => {
                format!(
                    "{}Skipping '{}' (destination already exists)",
                    prefix,
                    target.display()
                )
            }
            FileOperation::SkipCondition { destination } => {
                format!("{prefix}Skipping '{destination}' (condition is falsy)")
            }
        }
    }
}
