use crate::{
    comparator::Phase,
    lines::{Line, Stream},
};
use std::fmt::Display;

/// All the ways in which a trace check can fail.
#[derive(Debug)]
#[must_use]
pub enum Error {
    /// A stream ended before the protocol allowed it to.
    EndOfInput {
        /// The stream that ran dry.
        stream: Stream,
        /// What the comparator was doing at the time.
        phase: Phase,
        /// How many lines the stream produced before ending.
        lines: usize,
    },
    /// A reference line did not end in `:<digits>`.
    MalformedReferenceLine(Line),
    /// A solver output line had no `(total_num_iters=<digits>)`.
    MalformedOutputLine(Line),
    /// The solver reported a different total than the reference trace adds up to.
    IterationMismatch {
        /// The running total of the reference deltas.
        expected: u64,
        /// The total the solver reported.
        actual: u64,
        /// The reference line whose delta was added last.
        reference: Line,
        /// The solver line that reported `actual`.
        output: Line,
    },
    /// Adding a delta overflowed the running total.
    TotalOverflow {
        /// The running total before the failing addition.
        total: u64,
        /// The reference line whose delta could not be added.
        reference: Line,
    },
    /// Reading from a stream failed.
    Io {
        /// The stream the read was performed on.
        stream: Stream,
        /// The underlying error.
        error: std::io::Error,
    },
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::EndOfInput {
                stream,
                phase,
                lines,
            } => write!(f, "{stream} ended after {lines} lines while {phase}"),
            Error::MalformedReferenceLine(line) => {
                write!(f, "incorrect expected format at line <<{}>>", line.lossy())
            }
            Error::MalformedOutputLine(line) => {
                write!(f, "incorrect output format at line <<{}>>", line.lossy())
            }
            Error::IterationMismatch {
                expected,
                actual,
                reference,
                output,
            } => write!(
                f,
                "wrong iteration count (expected {expected}, got {actual}) at <<{}>> and <<{}>>",
                reference.lossy(),
                output.lossy()
            ),
            Error::TotalOverflow { total, reference } => write!(
                f,
                "running total {total} overflows when adding <<{}>>",
                reference.lossy()
            ),
            Error::Io { stream, error } => write!(f, "failed to read {stream}: {error}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl Error {
    /// The lines this error is about, in the order reference, output.
    pub fn lines(&self) -> Vec<&Line> {
        match self {
            Error::MalformedReferenceLine(line) | Error::MalformedOutputLine(line) => vec![line],
            Error::IterationMismatch {
                reference, output, ..
            } => vec![reference, output],
            Error::TotalOverflow { reference, .. } => vec![reference],
            Error::EndOfInput { .. } | Error::Io { .. } => vec![],
        }
    }
}
