//! Shared git operations
//!
//! Clone, clean, checkout and refresh primitives used by the source
//! resolver and the repository generator, all driven through libgit2 with
//! progress surfaced via [`ProgressReporter`].

use git2::build::{CheckoutBuilder, RepoBuilder};
use git2::{FetchOptions, RemoteCallbacks, Repository};
use std::cell::RefCell;
use std::path::Path;

use crate::error::Result;
use crate::source::progress::{report_transfer, ProgressReporter};

/// Builds remote callbacks wiring transfer progress into `reporter` and SSH
/// key credentials for `git@` URLs.
fn remote_callbacks(reporter: &RefCell<ProgressReporter>) -> RemoteCallbacks<'_> {
    let mut callbacks = RemoteCallbacks::new();
    callbacks.transfer_progress(move |stats| {
        report_transfer(&mut reporter.borrow_mut(), &stats);
        true
    });
    callbacks.credentials(|_url, username_from_url, _allowed_types| {
        let home = std::env::var("HOME").unwrap_or_default();
        git2::Cred::ssh_key(
            username_from_url.unwrap_or("git"),
            None,
            &Path::new(&home).join(".ssh").join("id_rsa"),
            None,
        )
    });
    callbacks
}

/// Clones `url` into `dest`, reporting transfer and checkout progress.
pub fn clone(url: &str, dest: &Path) -> Result<Repository> {
    let reporter = RefCell::new(ProgressReporter::new());

    let mut fetch_opts = FetchOptions::new();
    fetch_opts.remote_callbacks(remote_callbacks(&reporter));

    let mut checkout = CheckoutBuilder::new();
    checkout.progress(|_path, current, total| {
        reporter.borrow_mut().update("Checking out files", current, total);
    });

    let repository =
        RepoBuilder::new().fetch_options(fetch_opts).with_checkout(checkout).clone(url, dest)?;

    reporter.borrow_mut().finish();
    Ok(repository)
}

/// Discards untracked and modified state so the working tree matches HEAD.
pub fn clean_working_tree(repo: &Repository) -> Result<()> {
    let mut checkout = CheckoutBuilder::new();
    checkout.force().remove_untracked(true);
    repo.checkout_head(Some(&mut checkout))?;
    Ok(())
}

/// Checks out `refname` (branch, tag or commit), detaching when the name
/// does not resolve to a reference.
///
/// Branch names that only exist as remote-tracking refs after a fresh clone
/// are retried under `origin/`.
pub fn checkout_reference(repo: &Repository, refname: &str) -> Result<()> {
    let (object, reference) = repo
        .revparse_ext(refname)
        .or_else(|_| repo.revparse_ext(&format!("origin/{refname}")))?;

    let mut checkout = CheckoutBuilder::new();
    checkout.force();
    repo.checkout_tree(&object, Some(&mut checkout))?;

    match reference.as_ref().and_then(git2::Reference::name) {
        Some(name) => repo.set_head(name)?,
        None => repo.set_head_detached(object.id())?,
    }
    Ok(())
}

/// Whether HEAD already points at the commit `refname` resolves to.
pub fn head_matches(repo: &Repository, refname: &str) -> Result<bool> {
    let target = repo
        .revparse_single(refname)
        .or_else(|_| repo.revparse_single(&format!("origin/{refname}")))?
        .peel_to_commit()?
        .id();
    let head = repo.head()?.peel_to_commit()?.id();
    Ok(head == target)
}

/// Fetches `origin` and moves the tracked branch to its upstream tip.
pub fn refresh_tracked_branch(repo: &Repository) -> Result<()> {
    let reporter = RefCell::new(ProgressReporter::new());
    {
        let mut remote = repo.find_remote("origin")?;
        let mut fetch_opts = FetchOptions::new();
        fetch_opts.remote_callbacks(remote_callbacks(&reporter));
        remote.fetch(&[] as &[&str], Some(&mut fetch_opts), None)?;
    }
    reporter.borrow_mut().finish();

    let head = repo.head()?;
    if !head.is_branch() {
        // Detached checkouts have no tracked branch to move.
        return Ok(());
    }
    let branch = match head.shorthand() {
        Some(name) => name.to_string(),
        None => return Ok(()),
    };

    let upstream = match repo.revparse_single(&format!("refs/remotes/origin/{branch}")) {
        Ok(object) => object.peel_to_commit()?.id(),
        Err(e) => {
            log::debug!("Branch '{branch}' has no upstream under origin: {e}");
            return Ok(());
        }
    };

    let mut reference = repo.find_reference(&format!("refs/heads/{branch}"))?;
    reference.set_target(upstream, "scaffolder: refresh to upstream")?;
    repo.set_head(&format!("refs/heads/{branch}"))?;

    let mut checkout = CheckoutBuilder::new();
    checkout.force();
    repo.checkout_head(Some(&mut checkout))?;
    Ok(())
}
