use super::StatusEmitter;
use crate::github_actions;
use crate::lines::Stream;
use crate::{Error, Summary};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Annotates the reference trace in github actions when the check fails.
/// Does nothing outside of github actions.
pub struct Gha {
    reference: PathBuf,
}

impl Gha {
    /// Annotations point into the trace at `reference`.
    pub fn new(reference: &Path) -> Self {
        Self {
            reference: reference.to_path_buf(),
        }
    }

    /// Points at the offending reference line, or the top of the trace if
    /// no reference line is involved.
    fn annotation(&self, error: &Error) -> github_actions::Error {
        let line = error
            .lines()
            .into_iter()
            .find(|line| line.stream == Stream::Reference)
            .map_or(0, |line| line.number);
        let mut err =
            github_actions::error(self.reference.display(), "iteration trace check failed")
                .line(line);
        writeln!(err, "{error}").ok();
        for line in error.lines() {
            writeln!(err, "{line}").ok();
        }
        err
    }
}

impl StatusEmitter for Gha {
    fn finalize(&self, result: &Result<Summary, Error>) {
        let Err(error) = result else { return };
        if github_actions::enabled() {
            drop(self.annotation(error));
        }
    }
}
