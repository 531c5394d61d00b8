//! Subprocess execution for generators
//!
//! Post-commands and the composer invocation run with inherited standard
//! I/O; a non-zero exit fails the whole operation with the command and its
//! status.

use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{Error, Result};

/// Runs a shell command inside `cwd` with inherited standard I/O.
pub fn run_shell(command: &str, cwd: &Path) -> Result<()> {
    log::info!("Running '{command}' in '{}'", cwd.display());
    let status = Command::new("sh")
        .arg("-c")
        .arg(command)
        .current_dir(cwd)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()?;

    if !status.success() {
        return Err(Error::CommandFailedError { command: command.to_string(), status });
    }
    Ok(())
}

/// Runs a program with arguments inside `cwd` with inherited standard I/O.
pub fn run_program(program: &str, args: &[String], cwd: &Path) -> Result<()> {
    log::info!("Running '{program} {}' in '{}'", args.join(" "), cwd.display());
    let status = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()?;

    if !status.success() {
        return Err(Error::CommandFailedError {
            command: format!("{program} {}", args.join(" ")),
            status,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successful_command_is_ok() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(run_shell("true", tmp.path()).is_ok());
    }

    #[test]
    fn failing_command_reports_status() {
        let tmp = tempfile::tempdir().unwrap();
        let err = run_shell("exit 3", tmp.path()).unwrap_err();
        let Error::CommandFailedError { command, status } = err else {
            panic!("expected CommandFailedError");
        };
        assert_eq!(command, "exit 3");
        assert_eq!(status.code(), Some(3));
    }

    #[test]
    fn command_runs_in_given_directory() {
        let tmp = tempfile::tempdir().unwrap();
        run_shell("pwd > where.txt", tmp.path()).unwrap();
        let written = std::fs::read_to_string(tmp.path().join("where.txt")).unwrap();
        assert_eq!(
            std::fs::canonicalize(written.trim()).unwrap(),
            std::fs::canonicalize(tmp.path()).unwrap()
        );
    }
}
