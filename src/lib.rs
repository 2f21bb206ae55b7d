#![allow(clippy::upper_case_acronyms)]
#![deny(missing_docs)]

//! Runs a card-game solver and checks the cumulative iteration counts it
//! reports against a previously recorded reference trace.

use color_eyre::eyre::{Result, WrapErr};
use std::fs::File;
use std::io::BufReader;

mod cmd;
pub mod comparator;
mod config;
mod diff;
mod error;
pub mod github_actions;
pub mod lines;
pub mod record;
pub mod solver;
pub mod status_emitter;

pub use cmd::CommandBuilder;
pub use color_eyre;
pub use comparator::{check_streams, Comparator, Pair, Phase, Summary};
pub use config::{Args, Config, Format, HELP};
pub use error::Error;
pub use lines::{Line, Stream};
use solver::Solver;
use status_emitter::StatusEmitter;

/// Spawn the solver as described by `config` and check its output against
/// the reference trace.
///
/// Progress and the verdict are reported to `emitter` before this returns.
pub fn run(config: &Config, emitter: &dyn StatusEmitter) -> Result<Summary> {
    let reference = File::open(&config.reference).wrap_err_with(|| {
        format!(
            "could not open reference trace `{}`",
            config.reference.display()
        )
    })?;
    let (solver, stdout) = Solver::spawn(&config.solver_command())?;
    let result = check_streams(
        stdout,
        BufReader::new(reference),
        config.start_board,
        emitter,
    );
    let reaped = solver.finish(result.is_err());
    verdict(result, reaped)
}

/// A failed check wins over a failure to reap the solver.
fn verdict(result: Result<Summary, Error>, reaped: Result<()>) -> Result<Summary> {
    let summary = result.wrap_err("iteration trace check failed")?;
    reaped?;
    Ok(summary)
}

/// The emitter matching `config.format`, plus github actions annotations
/// where enabled.
pub fn default_emitter(config: &Config) -> Box<dyn StatusEmitter> {
    let emitter: Box<dyn StatusEmitter> = match config.format {
        Format::JSON => Box::new(status_emitter::JSON {
            quiet: config.quiet,
        }),
        Format::Pretty => Box::new(status_emitter::Text::new(&config.reference, config.quiet)),
    };
    #[cfg(feature = "gha")]
    let emitter = Box::new((emitter, status_emitter::Gha::new(&config.reference)));
    emitter
}
