//! Command line processing of the `iters-oracle` binary.

use std::{borrow::Cow, num::NonZeroUsize, path::PathBuf, str::FromStr};

use color_eyre::eyre::{bail, Result};

/// Plain arguments of the `iters-oracle` binary.
#[derive(Debug, Default)]
pub struct Args {
    /// The solver binary to run.
    pub solver: Option<PathBuf>,

    /// The first board the solver works on.
    pub start_board: Option<i64>,

    /// Second positional solver argument, bounding the run.
    pub limit: Option<u64>,

    /// The number of solver threads.
    pub threads: Option<NonZeroUsize>,

    /// Directory containing the preset and the reference trace.
    pub presets_dir: Option<PathBuf>,

    /// Preset file passed via `--read-from-file`.
    pub preset: Option<PathBuf>,

    /// Nesting depth passed via `--read-from-file`.
    pub read_depth: Option<u32>,

    /// The reference trace to check against.
    pub reference: Option<PathBuf>,

    /// Passed to the solver's `--scans-synergy`.
    pub scans_synergy: Option<String>,

    /// How to report progress and the verdict.
    pub format: Format,

    /// Whether to minimize output given to the user.
    pub quiet: bool,

    /// Only print the available flags.
    pub help: bool,
}

/// Possible choices for styling the output.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Format {
    /// JSON format, one object per line.
    JSON,
    /// Human-readable format.
    #[default]
    Pretty,
}

impl FromStr for Format {
    type Err = color_eyre::eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "json" => Format::JSON,
            "text" | "pretty" => Format::Pretty,
            _ => bail!("unsupported format `{s}`, use `text` or `json`"),
        })
    }
}

/// Printed for `--help`.
pub const HELP: &str = "\
available flags:
  --solver PATH          solver binary (default ./freecell-solver-range-parallel-solve)
  --start-board N        first board to solve (default 11983)
  --limit N              second positional solver argument (default 32000)
  --threads N            solver threads (default 1)
  --presets-dir DIR      where the preset and reference live (default $FCS_PRESETS_DIR or .)
  --preset FILE          preset for --read-from-file (default DIR/nameless-preset.bash)
  --read-depth N         depth for --read-from-file (default 4)
  --reference FILE       reference trace (default DIR/nameless-simulation.txt)
  --scans-synergy MODE   passed through to the solver (default none)
  --format text|json     output style
  --quiet                only report the verdict";

impl Args {
    /// Parse the program arguments.
    pub fn from_env() -> Result<Self> {
        Self::default().parse_args(std::env::args().skip(1))
    }

    /// Parse arguments into an existing `Args` struct.
    pub fn parse_args(mut self, mut iter: impl Iterator<Item = String>) -> Result<Self> {
        while let Some(arg) = iter.next() {
            if arg == "--quiet" {
                self.quiet = true;
            } else if arg == "--help" || arg == "-h" {
                self.help = true;
            } else if let Some(v) = parse_value("--solver", &arg, &mut iter)? {
                self.solver = Some(PathBuf::from(v.into_owned()));
            } else if let Some(v) = parse_value("--start-board", &arg, &mut iter)? {
                self.start_board = Some(v.parse()?);
            } else if let Some(v) = parse_value("--limit", &arg, &mut iter)? {
                self.limit = Some(v.parse()?);
            } else if let Some(v) = parse_value("--threads", &arg, &mut iter)? {
                self.threads = Some(v.parse()?);
            } else if let Some(v) = parse_value("--presets-dir", &arg, &mut iter)? {
                self.presets_dir = Some(PathBuf::from(v.into_owned()));
            } else if let Some(v) = parse_value("--preset", &arg, &mut iter)? {
                self.preset = Some(PathBuf::from(v.into_owned()));
            } else if let Some(v) = parse_value("--read-depth", &arg, &mut iter)? {
                self.read_depth = Some(v.parse()?);
            } else if let Some(v) = parse_value("--reference", &arg, &mut iter)? {
                self.reference = Some(PathBuf::from(v.into_owned()));
            } else if let Some(v) = parse_value("--scans-synergy", &arg, &mut iter)? {
                self.scans_synergy = Some(v.into_owned());
            } else if let Some(v) = parse_value("--format", &arg, &mut iter)? {
                self.format = v.parse()?;
            } else if arg.starts_with("--") {
                bail!("unknown command line flag `{arg}`, see --help");
            } else {
                bail!("unexpected argument `{arg}`, see --help");
            }
        }
        Ok(self)
    }

    /// The presets directory: from the command line, then `FCS_PRESETS_DIR`,
    /// then the current directory.
    pub fn presets_dir(&self) -> PathBuf {
        self.presets_dir
            .clone()
            .or_else(|| std::env::var_os("FCS_PRESETS_DIR").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

fn parse_value<'a>(
    name: &str,
    arg: &'a str,
    iter: &mut impl Iterator<Item = String>,
) -> Result<Option<Cow<'a, str>>> {
    let with_eq = match arg.strip_prefix(name) {
        Some(s) => s,
        None => return Ok(None),
    };
    if let Some(n) = with_eq.strip_prefix('=') {
        Ok(Some(n.into()))
    } else if !with_eq.is_empty() {
        // A longer flag sharing this prefix, e.g. `--preset` vs `--presets-dir`.
        Ok(None)
    } else if let Some(next) = iter.next() {
        Ok(Some(next.into()))
    } else {
        bail!("`{name}` must be followed by a value")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args> {
        Args::default().parse_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn values_with_and_without_equals() {
        let args = parse(&["--start-board=5", "--limit", "10", "--format", "json"]).unwrap();
        assert_eq!(args.start_board, Some(5));
        assert_eq!(args.limit, Some(10));
        assert_eq!(args.format, Format::JSON);
    }

    #[test]
    fn preset_does_not_swallow_presets_dir() {
        let args = parse(&["--presets-dir", "/p", "--preset=x.bash"]).unwrap();
        assert_eq!(args.presets_dir, Some(PathBuf::from("/p")));
        assert_eq!(args.preset, Some(PathBuf::from("x.bash")));
    }

    #[test]
    fn rejects_junk() {
        assert!(parse(&["--frobnicate"]).is_err());
        assert!(parse(&["11983"]).is_err());
        assert!(parse(&["--threads", "0"]).is_err());
        assert!(parse(&["--limit"]).is_err());
        assert!(parse(&["--format=xml"]).is_err());
    }

    #[test]
    fn negative_start_board() {
        let args = parse(&["--start-board=-3"]).unwrap();
        assert_eq!(args.start_board, Some(-3));
    }
}
