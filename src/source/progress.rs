//! Clone/fetch progress reporting
//!
//! A single indicator is redrawn in place with `\r` and reset whenever the
//! underlying operation's named stage changes, so "Receiving objects" and
//! "Resolving deltas" never interleave on one line.

use std::io::Write;

#[derive(Debug, Default)]
pub struct ProgressReporter {
    stage: Option<String>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Redraws the indicator for `stage`, starting a fresh line when the
    /// stage differs from the previous call.
    pub fn update(&mut self, stage: &str, current: usize, total: usize) {
        if self.stage.as_deref() != Some(stage) {
            if self.stage.is_some() {
                eprintln!();
            }
            self.stage = Some(stage.to_string());
        }
        if total > 0 {
            let percent = current * 100 / total;
            eprint!("\r{stage}: {percent}% ({current}/{total})");
        } else {
            eprint!("\r{stage}: {current}");
        }
        let _ = std::io::stderr().flush();
    }

    /// Terminates the current line, if any stage was ever reported.
    pub fn finish(&mut self) {
        if self.stage.take().is_some() {
            eprintln!();
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        self.finish();
    }
}

/// Maps a git transfer snapshot onto the reporter's stages.
pub fn report_transfer(reporter: &mut ProgressReporter, stats: &git2::Progress<'_>) {
    if stats.received_objects() < stats.total_objects() {
        reporter.update(
            "Receiving objects",
            stats.received_objects(),
            stats.total_objects(),
        );
    } else if stats.total_deltas() > 0 {
        reporter.update("Resolving deltas", stats.indexed_deltas(), stats.total_deltas());
    }
}
