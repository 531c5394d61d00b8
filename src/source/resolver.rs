//! Remote source resolution and the checkout cache
//!
//! Maps source specs to local directories: directory sources pass through,
//! remote sources land in a deterministic path under the global
//! `.remote-sources` cache and are cloned or refreshed in place.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use git2::Repository;

use crate::config::types::SourceSpec;
use crate::constants::DEFAULT_UPDATE_THRESHOLD_SECS;
use crate::error::{Error, Result};
use crate::ioutils::{absolutize, escape_path_segment};
use crate::session::Session;
use crate::source::git;
use crate::source::parse::{self, Provider, RemoteRepo};

pub struct SourceResolver<'a> {
    session: &'a Session,
}

impl<'a> SourceResolver<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Resolves a source spec to a local directory.
    ///
    /// # Arguments
    /// * `spec` - The source entry to resolve
    /// * `declaring_dir` - Directory of the configuration that declared the
    ///   source; relative directory sources resolve against it
    pub fn resolve_to_directory(
        &self,
        spec: &SourceSpec,
        declaring_dir: &Path,
    ) -> Result<PathBuf> {
        match spec {
            SourceSpec::Directory(dir) => {
                let base = match &dir.root {
                    Some(root) => absolutize(declaring_dir, root),
                    None => declaring_dir.to_path_buf(),
                };
                Ok(absolutize(base, &dir.directory))
            }
            SourceSpec::Plain(value) => {
                if parse::is_git_url(value) {
                    self.resolve_remote(&parse::parse_plain_remote(value)?)
                } else {
                    Ok(absolutize(declaring_dir, value))
                }
            }
            SourceSpec::Git(source) => self.resolve_remote(&parse::parse_git(&source.git)?),
            SourceSpec::Github(source) => {
                self.resolve_remote(&parse::parse_github(&source.github)?)
            }
        }
    }

    /// Deterministic cache location for a remote:
    /// `github/<org>/<repo>` or `git/<host>/<org>/<repo>`, segments escaped.
    pub fn cache_path(&self, remote: &RemoteRepo) -> PathBuf {
        let root = self.session.remote_sources_dir();
        match remote.provider {
            Provider::Github => root
                .join("github")
                .join(escape_path_segment(&remote.org))
                .join(escape_path_segment(&remote.repo)),
            Provider::Git => root
                .join("git")
                .join(escape_path_segment(&remote.host))
                .join(escape_path_segment(&remote.org))
                .join(escape_path_segment(&remote.repo)),
        }
    }

    /// Ensures a checkout of `remote` exists and is positioned correctly,
    /// returning its directory (including any requested subdirectory).
    fn resolve_remote(&self, remote: &RemoteRepo) -> Result<PathBuf> {
        let checkout_dir = self.cache_path(remote);

        if checkout_dir.exists() {
            self.refresh_checkout(remote, &checkout_dir)?;
        } else {
            self.create_checkout(remote, &checkout_dir)?;
        }

        let directory = match &remote.directory {
            Some(subdirectory) => {
                let dir = checkout_dir.join(subdirectory);
                if !dir.is_dir() {
                    return Err(Error::SourceResolveError {
                        source_name: remote.url.clone(),
                        message: format!(
                            "requested directory '{subdirectory}' does not exist in the checkout"
                        ),
                    });
                }
                dir
            }
            None => checkout_dir,
        };
        Ok(directory)
    }

    /// First resolution: clone and position on the pinned revision.
    fn create_checkout(&self, remote: &RemoteRepo, checkout_dir: &Path) -> Result<()> {
        if let Some(parent) = checkout_dir.parent() {
            crate::ioutils::create_dir_all(parent)?;
        }
        log::info!("Cloning '{}' into '{}'", remote.url, checkout_dir.display());
        let repository = git::clone(&remote.url, checkout_dir)?;
        if let Some(reference) = &remote.reference {
            git::checkout_reference(&repository, reference)?;
        }
        Ok(())
    }

    /// Subsequent resolution: clean, then either reposition onto the pinned
    /// revision (no network) or refresh the tracked branch when stale.
    fn refresh_checkout(&self, remote: &RemoteRepo, checkout_dir: &Path) -> Result<()> {
        let repository = Repository::open(checkout_dir)?;
        git::clean_working_tree(&repository)?;

        match &remote.reference {
            Some(reference) => {
                if !git::head_matches(&repository, reference)? {
                    log::debug!(
                        "Checkout '{}' not on '{reference}', repositioning",
                        checkout_dir.display()
                    );
                    git::checkout_reference(&repository, reference)?;
                }
            }
            None => {
                let threshold = Duration::from_secs(
                    remote.update_threshold.unwrap_or(DEFAULT_UPDATE_THRESHOLD_SECS),
                );
                if is_stale(checkout_dir, threshold)? {
                    log::info!("Refreshing '{}' from '{}'", checkout_dir.display(), remote.url);
                    git::refresh_tracked_branch(&repository)?;
                    touch(checkout_dir)?;
                } else {
                    log::debug!(
                        "Checkout '{}' is fresh, skipping fetch",
                        checkout_dir.display()
                    );
                }
            }
        }
        Ok(())
    }
}

/// Whether the checkout directory's mtime is older than `threshold`.
fn is_stale(checkout_dir: &Path, threshold: Duration) -> Result<bool> {
    let modified = std::fs::metadata(checkout_dir)?.modified()?;
    // A clock skewed into the future reads as fresh rather than erroring.
    let age = modified.elapsed().unwrap_or(Duration::ZERO);
    Ok(age > threshold)
}

/// Refreshes the directory mtime so the next resolution sees a fresh cache
/// even when the fetch brought no new content.
fn touch(checkout_dir: &Path) -> Result<()> {
    let dir = std::fs::File::open(checkout_dir)?;
    dir.set_modified(SystemTime::now())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::{GithubSource, GithubSpec};

    fn test_session(tmp: &Path) -> Session {
        Session::new(tmp.to_path_buf(), tmp.join("global"), false)
    }

    #[test]
    fn directory_source_passes_through() {
        let tmp = tempfile::tempdir().unwrap();
        let session = test_session(tmp.path());
        let resolver = SourceResolver::new(&session);

        let spec: SourceSpec = serde_yaml::from_str("{directory: ./features}").unwrap();
        let resolved = resolver.resolve_to_directory(&spec, tmp.path()).unwrap();
        assert_eq!(resolved, tmp.path().join("./features"));
    }

    #[test]
    fn directory_source_honors_root() {
        let tmp = tempfile::tempdir().unwrap();
        let session = test_session(tmp.path());
        let resolver = SourceResolver::new(&session);

        let spec: SourceSpec =
            serde_yaml::from_str("{directory: features, root: /srv/shared}").unwrap();
        let resolved = resolver.resolve_to_directory(&spec, tmp.path()).unwrap();
        assert_eq!(resolved, PathBuf::from("/srv/shared/features"));
    }

    #[test]
    fn plain_string_resolves_relative_to_declaring_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let session = test_session(tmp.path());
        let resolver = SourceResolver::new(&session);

        let spec = SourceSpec::Plain("../shared".to_string());
        let resolved = resolver.resolve_to_directory(&spec, tmp.path()).unwrap();
        assert_eq!(resolved, tmp.path().join("../shared"));
    }

    #[test]
    fn github_cache_path_escapes_segments() {
        let tmp = tempfile::tempdir().unwrap();
        let session = test_session(tmp.path());
        let resolver = SourceResolver::new(&session);

        let remote = parse::parse_github(&GithubSpec::Shorthand(
            "my.org/some_repo".to_string(),
        ))
        .unwrap();
        let path = resolver.cache_path(&remote);
        assert_eq!(
            path,
            tmp.path().join("global/.remote-sources/github/my-org/some-repo")
        );
    }

    #[test]
    fn git_cache_path_includes_host() {
        let tmp = tempfile::tempdir().unwrap();
        let session = test_session(tmp.path());
        let resolver = SourceResolver::new(&session);

        let spec: SourceSpec =
            serde_yaml::from_str("{git: 'https://code.example.com/team/tools.git'}")
                .unwrap();
        let SourceSpec::Git(git_source) = spec else { panic!("expected git source") };
        let remote = parse::parse_git(&git_source.git).unwrap();
        assert_eq!(
            resolver.cache_path(&remote),
            tmp.path()
                .join("global/.remote-sources/git/code-example-com/team/tools")
        );
    }

    #[test]
    fn malformed_remote_is_a_hard_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let session = test_session(tmp.path());
        let resolver = SourceResolver::new(&session);

        let source = GithubSource { github: GithubSpec::Shorthand("nonsense".into()) };
        let err = resolver
            .resolve_to_directory(&SourceSpec::Github(source), tmp.path())
            .unwrap_err();
        assert!(matches!(err, Error::SourceResolveError { .. }));
    }
}
