use std::{
    ffi::OsString,
    path::PathBuf,
    process::{Command, Stdio},
};

#[derive(Debug, Clone)]
/// A command, its arguments and the environment variables to set for it.
pub struct CommandBuilder {
    /// Path to the binary.
    pub program: PathBuf,
    /// Arguments to the binary.
    pub args: Vec<OsString>,
    /// Environment variables passed to the binary that is executed.
    /// The environment variable is removed if the second tuple field is `None`
    pub envs: Vec<(OsString, Option<OsString>)>,
}

impl CommandBuilder {
    /// Uses the range solver from the current directory, like the recorded
    /// baseline runs did.
    pub fn solver() -> Self {
        Self::cmd("./freecell-solver-range-parallel-solve")
    }

    /// Create a command without any arguments or environment variables.
    pub fn cmd(cmd: impl Into<PathBuf>) -> Self {
        Self {
            program: cmd.into(),
            args: vec![],
            envs: vec![],
        }
    }

    /// Add more arguments.
    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<OsString>>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Render the command line for error messages.
    pub fn display(&self) -> impl std::fmt::Display + '_ {
        struct Display<'a>(&'a CommandBuilder);
        impl std::fmt::Display for Display<'_> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                for (var, val) in &self.0.envs {
                    match val {
                        Some(val) => write!(f, "{}={} ", var.to_string_lossy(), val.to_string_lossy())?,
                        None => write!(f, "-u {} ", var.to_string_lossy())?,
                    }
                }
                write!(f, "{}", self.0.program.display())?;
                for arg in &self.0.args {
                    write!(f, " {}", arg.to_string_lossy())?;
                }
                Ok(())
            }
        }
        Display(self)
    }

    /// Create a [`Command`] whose stdout can be read line by line.
    /// Stderr is passed through untouched.
    pub fn build(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        for (var, val) in &self.envs {
            match val {
                Some(val) => cmd.env(var, val),
                None => cmd.env_remove(var),
            };
        }
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());
        cmd
    }
}
