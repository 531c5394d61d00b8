#![allow(dead_code)]

use git2::{Commit, Oid, Repository, RepositoryInitOptions, Signature};
use std::path::Path;

use scaffolder::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};
use scaffolder::session::Session;

/// Builds a session rooted at `cwd` with a private global directory, so
/// tests never touch the invoking user's `~/.scaffolder`.
pub fn test_session(cwd: &Path, global_dir: &Path, dry_run: bool) -> Session {
    Session::new(cwd.to_path_buf(), global_dir.to_path_buf(), dry_run)
}

/// Writes a project configuration file under `<dir>/.scaffolder/config.yml`.
pub fn write_project_config(dir: &Path, content: &str) {
    let config_dir = dir.join(CONFIG_DIR_NAME);
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join(CONFIG_FILE_NAME), content).unwrap();
}

/// Writes a feature definition directory with its `config.yml` and any
/// template files.
pub fn write_feature(source_dir: &Path, dir_name: &str, config: &str, files: &[(&str, &str)]) {
    let feature_dir = source_dir.join(dir_name);
    std::fs::create_dir_all(&feature_dir).unwrap();
    std::fs::write(feature_dir.join(CONFIG_FILE_NAME), config).unwrap();
    for (name, content) in files {
        let path = feature_dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }
}

/// Initializes a bare-workdir origin repository with `main` as the initial
/// branch.
pub fn init_origin(path: &Path) -> Repository {
    std::fs::create_dir_all(path).unwrap();
    let mut options = RepositoryInitOptions::new();
    options.initial_head("main");
    Repository::init_opts(path, &options).unwrap()
}

/// Commits a file to the repository's current branch and returns the commit id.
pub fn commit_file(repo: &Repository, name: &str, content: &str, message: &str) -> Oid {
    let workdir = repo.workdir().unwrap();
    let file_path = workdir.join(name);
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(file_path, content).unwrap();

    let mut index = repo.index().unwrap();
    index.add_path(Path::new(name)).unwrap();
    index.write().unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();

    let signature = Signature::now("Tester", "tester@example.com").unwrap();
    let parent = repo.head().ok().and_then(|head| head.peel_to_commit().ok());
    let parents: Vec<&Commit> = parent.iter().collect();
    repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
        .unwrap()
}

/// Creates (or moves) a branch pointing at the current HEAD commit.
pub fn create_branch(repo: &Repository, name: &str) {
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    repo.branch(name, &head, true).unwrap();
}

/// The commit id a checkout's HEAD points at.
pub fn head_commit(path: &Path) -> Oid {
    let repo = Repository::open(path).unwrap();
    let id = repo.head().unwrap().peel_to_commit().unwrap().id();
    id
}

/// Rewinds a directory's mtime by `seconds`, aging the checkout cache.
pub fn age_directory(path: &Path, seconds: u64) {
    let target = std::time::SystemTime::now() - std::time::Duration::from_secs(seconds);
    std::fs::File::open(path).unwrap().set_modified(target).unwrap();
}
