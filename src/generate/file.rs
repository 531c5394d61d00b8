//! File-tree generator
//!
//! Renders templated files from a feature directory into their resolved
//! destinations. An existing destination is a recoverable per-file skip;
//! read, write and render failures abort the feature.

use globset::Glob;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::types::{FeatureFile, FeatureInput};
use crate::constants::MARKUP_EXTENSIONS;
use crate::error::Result;
use crate::generate::operation::FileOperation;
use crate::generate::resolve_destination;
use crate::ioutils::{self, absolutize};
use crate::renderer::{parse_falsy, ExpressionEngine};
use crate::session::Session;

#[derive(Debug)]
pub struct FileGenerator {
    pub feature_name: String,
    pub use_cwd: bool,
    pub files: Vec<FeatureFile>,
    /// Default base for relative `source` entries.
    pub feature_dir: PathBuf,
    pub inputs: Vec<FeatureInput>,
}

impl FileGenerator {
    pub fn invoke(
        &self,
        session: &Session,
        engine: &ExpressionEngine,
        context: &serde_json::Value,
    ) -> Result<()> {
        for file in &self.files {
            if let Some(condition) = &file.condition {
                let rendered = engine.render(condition, context)?;
                if parse_falsy(&serde_json::Value::String(rendered)) {
                    let op = FileOperation::SkipCondition {
                        destination: file.destination.clone(),
                    };
                    log::info!("{}", op.get_message(session.dry_run));
                    continue;
                }
            }

            let destination = engine.render(&file.destination, context)?;
            let dest_path = resolve_destination(session, self.use_cwd, &destination);
            let base = match &file.base {
                Some(base) => absolutize(&self.feature_dir, base),
                None => self.feature_dir.clone(),
            };

            let literal = base.join(&file.source);
            if literal.is_file() {
                // A literal source writes exactly to the rendered destination.
                self.emit(session, engine, context, &literal, &dest_path)?;
            } else {
                self.emit_glob(session, engine, context, file, &base, &dest_path)?;
            }
        }
        Ok(())
    }

    /// Expands `source` as a glob relative to `base`; matches keep their
    /// relative path under the destination directory.
    fn emit_glob(
        &self,
        session: &Session,
        engine: &ExpressionEngine,
        context: &serde_json::Value,
        file: &FeatureFile,
        base: &Path,
        dest_dir: &Path,
    ) -> Result<()> {
        let matcher = Glob::new(&file.source)?.compile_matcher();
        let mut matched = false;

        for entry in WalkDir::new(base).into_iter().filter_map(|e| e.ok()) {
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(base) else { continue };
            if !matcher.is_match(relative) {
                continue;
            }
            matched = true;
            self.emit(session, engine, context, entry.path(), &dest_dir.join(relative))?;
        }

        if !matched {
            log::warn!(
                "Source '{}' of feature '{}' matched no files under '{}'",
                file.source,
                self.feature_name,
                base.display()
            );
        }
        Ok(())
    }

    /// Writes one source file to one target, honoring the markup exclusion
    /// list and the dry-run duality.
    fn emit(
        &self,
        session: &Session,
        engine: &ExpressionEngine,
        context: &serde_json::Value,
        source: &Path,
        target: &Path,
    ) -> Result<()> {
        if target.exists() {
            let op = FileOperation::SkipExisting { target: target.to_path_buf() };
            log::error!("{}", op.get_message(session.dry_run));
            return Ok(());
        }

        let op = if is_markup(source) {
            FileOperation::Copy {
                source: source.to_path_buf(),
                target: target.to_path_buf(),
            }
        } else {
            FileOperation::Render {
                source: source.to_path_buf(),
                target: target.to_path_buf(),
            }
        };
        log::info!("{}", op.get_message(session.dry_run));
        if session.dry_run {
            return Ok(());
        }

        match op {
            FileOperation::Copy { source, target } => ioutils::copy_file(source, target),
            FileOperation::Render { source, target } => {
                let content = std::fs::read_to_string(source)?;
                let rendered = engine.render(&content, context)?;
                ioutils::write_file(&rendered, target)
            }
            _ => Ok(()),
        }
    }
}

/// Whether the file's contents must be copied verbatim because they carry
/// their own templating markup.
fn is_markup(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| MARKUP_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}
