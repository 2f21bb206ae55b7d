//! Running the solver whose output gets checked.

use color_eyre::eyre::{eyre, Result, WrapErr};
use std::io::BufReader;
use std::process::{Child, ChildStdout};

use crate::CommandBuilder;

/// A running solver process.
pub struct Solver {
    child: Child,
}

impl Solver {
    /// Start `cmd`, handing out its stdout for line-by-line reading.
    pub fn spawn(cmd: &CommandBuilder) -> Result<(Self, BufReader<ChildStdout>)> {
        let mut child = cmd
            .build()
            .spawn()
            .wrap_err_with(|| format!("could not spawn `{}` as a process", cmd.display()))?;
        let Some(stdout) = child.stdout.take() else {
            let _ = child.kill();
            return Err(eyre!("stdout of `{}` was not captured", cmd.display()));
        };
        Ok((Self { child }, BufReader::new(stdout)))
    }

    /// Reap the process. If `abort` is set, the solver is killed first,
    /// as nobody reads its output anymore.
    ///
    /// The exit status is not looked at.
    pub fn finish(mut self, abort: bool) -> Result<()> {
        if abort {
            // Fails if the child already exited, which is fine.
            let _ = self.child.kill();
        }
        self.child.wait().wrap_err("waiting for the solver to exit")?;
        Ok(())
    }
}
