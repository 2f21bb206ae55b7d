use crate::CommandBuilder;
use std::{ffi::OsString, num::NonZeroUsize, path::PathBuf};

mod args;
pub use args::{Args, Format, HELP};

#[derive(Debug, Clone)]
/// Central datastructure containing all information to run a check.
pub struct Config {
    /// The solver binary and any environment changes for it.
    /// Its arguments go in front of the ones derived from the other fields.
    pub solver: CommandBuilder,
    /// The first board the solver works on. The reference trace is
    /// synchronized to the record right before it.
    pub start_board: i64,
    /// Second positional solver argument, bounding the run.
    pub limit: u64,
    /// Number of solver threads.
    pub threads: NonZeroUsize,
    /// Nesting depth for `--read-from-file`.
    pub read_depth: u32,
    /// Preset file for `--read-from-file`.
    pub preset: PathBuf,
    /// Value of `--scans-synergy`.
    pub scans_synergy: String,
    /// The reference trace.
    pub reference: PathBuf,
    /// How progress and the verdict are reported.
    pub format: Format,
    /// Whether to minimize output given to the user.
    pub quiet: bool,
}

impl Config {
    /// The configuration the recorded `nameless-simulation.txt` trace was
    /// produced with, taking the preset and trace from `presets_dir`.
    pub fn baseline(presets_dir: impl Into<PathBuf>) -> Self {
        let presets_dir = presets_dir.into();
        Self {
            solver: CommandBuilder::solver(),
            start_board: 11983,
            limit: 32000,
            threads: NonZeroUsize::MIN,
            read_depth: 4,
            preset: presets_dir.join("nameless-preset.bash"),
            scans_synergy: "none".into(),
            reference: presets_dir.join("nameless-simulation.txt"),
            format: Format::Pretty,
            quiet: false,
        }
    }

    /// Populate the config with the values from parsed command line arguments.
    pub fn with_args(&mut self, args: &Args) {
        let Args {
            ref solver,
            start_board,
            limit,
            threads,
            presets_dir: _,
            ref preset,
            read_depth,
            ref reference,
            ref scans_synergy,
            format,
            quiet,
            help: _,
        } = *args;
        if let Some(solver) = solver {
            self.solver.program = solver.clone();
        }
        if let Some(start_board) = start_board {
            self.start_board = start_board;
        }
        if let Some(limit) = limit {
            self.limit = limit;
        }
        if let Some(threads) = threads {
            self.threads = threads;
        }
        if let Some(preset) = preset {
            self.preset = preset.clone();
        }
        if let Some(read_depth) = read_depth {
            self.read_depth = read_depth;
        }
        if let Some(reference) = reference {
            self.reference = reference.clone();
        }
        if let Some(scans_synergy) = scans_synergy {
            self.scans_synergy = scans_synergy.clone();
        }
        self.format = format;
        self.quiet = quiet;
    }

    /// Build the full solver invocation:
    /// `<solver> <start> <limit> <threads> --read-from-file <depth>,<preset> --scans-synergy <mode>`
    pub fn solver_command(&self) -> CommandBuilder {
        let mut read_from_file = OsString::from(format!("{},", self.read_depth));
        read_from_file.push(&self.preset);
        let args: [OsString; 7] = [
            self.start_board.to_string().into(),
            self.limit.to_string().into(),
            self.threads.to_string().into(),
            "--read-from-file".into(),
            read_from_file,
            "--scans-synergy".into(),
            self.scans_synergy.clone().into(),
        ];
        self.solver.clone().args(args)
    }
}
