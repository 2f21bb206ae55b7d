//! The lockstep walk over solver output and reference trace.

use std::fmt::Display;
use std::io::BufRead;

use crate::lines::{Line, LineReader, Stream};
use crate::record::{anchor_prefix, is_anchor, reference_delta, reported_total};
use crate::status_emitter::StatusEmitter;
use crate::Error;

/// Where in the check a [`Comparator`] is.
#[derive(Copy, Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Skipping the banner and the reference lines before the start board.
    Synchronizing,
    /// Comparing one output line against one reference line at a time.
    Comparing,
    /// The solver output ended, every pair matched.
    Done,
    /// A check failed. Nothing more is read.
    Failed,
}

impl Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Synchronizing => write!(f, "synchronizing"),
            Phase::Comparing => write!(f, "comparing"),
            Phase::Done => write!(f, "done"),
            Phase::Failed => write!(f, "failed"),
        }
    }
}

/// One successfully compared pair of lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pair {
    /// The reference line.
    pub reference: Line,
    /// The solver output line.
    pub output: Line,
    /// The delta taken from `reference`.
    pub delta: u64,
    /// The running total after adding `delta`, which `output` reported as well.
    pub total: u64,
}

/// The outcome of a passing check.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct Summary {
    /// Reference lines discarded before the anchor, the anchor not included.
    pub skipped: usize,
    /// Number of compared pairs.
    pub compared: usize,
    /// The final running total.
    pub total: u64,
}

/// Walks the solver output and the reference trace in lockstep.
///
/// A comparator is good for exactly one pass. Once it reaches
/// [`Phase::Done`] or [`Phase::Failed`] it does not read anything anymore.
pub struct Comparator<O, R> {
    output: LineReader<O>,
    reference: LineReader<R>,
    anchor: i128,
    phase: Phase,
    summary: Summary,
}

impl<O: BufRead, R: BufRead> Comparator<O, R> {
    /// Prepare a check of `output` against `reference`, where the solver was
    /// started at `start_board`.
    pub fn new(output: O, reference: R, start_board: i64) -> Self {
        Self {
            output: LineReader::new(output, Stream::Output),
            reference: LineReader::new(reference, Stream::Reference),
            anchor: i128::from(start_board) - 1,
            phase: Phase::Synchronizing,
            summary: Summary::default(),
        }
    }

    /// The current state.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Sum of all deltas consumed since synchronization.
    pub fn running_total(&self) -> u64 {
        self.summary.total
    }

    /// What has been done so far.
    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    fn failing<T>(&mut self, result: Result<T, Error>) -> Result<T, Error> {
        if result.is_err() {
            self.phase = Phase::Failed;
        }
        result
    }

    /// Drop the solver's banner line and skip the reference trace past the
    /// anchor record. Returns the anchor line.
    /// Only valid in [`Phase::Synchronizing`].
    pub(crate) fn synchronize(&mut self) -> Result<Line, Error> {
        let result = self.skip_to_anchor();
        let anchor = self.failing(result)?;
        self.phase = Phase::Comparing;
        Ok(anchor)
    }

    fn skip_to_anchor(&mut self) -> Result<Line, Error> {
        self.output.expect_line(Phase::Synchronizing)?;
        let prefix = anchor_prefix(self.anchor);
        loop {
            let line = self.reference.expect_line(Phase::Synchronizing)?;
            if is_anchor(&line, &prefix) {
                return Ok(line);
            }
            self.summary.skipped += 1;
        }
    }

    /// Compare the next pair of lines. `Ok(None)` means the solver output
    /// ended and the check passed.
    ///
    /// Synchronizes first if that has not happened yet.
    pub fn step(&mut self) -> Result<Option<Pair>, Error> {
        match self.phase {
            Phase::Synchronizing => {
                self.synchronize()?;
            }
            Phase::Comparing => {}
            Phase::Done | Phase::Failed => return Ok(None),
        }
        let result = self.compare_next();
        let pair = self.failing(result)?;
        if pair.is_none() {
            self.phase = Phase::Done;
        }
        Ok(pair)
    }

    fn compare_next(&mut self) -> Result<Option<Pair>, Error> {
        let Some(output) = self.output.next_line()? else {
            return Ok(None);
        };
        let reference = self.reference.expect_line(Phase::Comparing)?;
        let Some(delta) = reference_delta(&reference) else {
            return Err(Error::MalformedReferenceLine(reference));
        };
        let total = self.summary.total;
        let Some(expected) = total.checked_add(delta) else {
            return Err(Error::TotalOverflow { total, reference });
        };
        self.summary.total = expected;
        let Some(actual) = reported_total(&output) else {
            return Err(Error::MalformedOutputLine(output));
        };
        if actual != expected {
            return Err(Error::IterationMismatch {
                expected,
                actual,
                reference,
                output,
            });
        }
        self.summary.compared += 1;
        Ok(Some(Pair {
            reference,
            output,
            delta,
            total: expected,
        }))
    }

    /// Run the whole check, reporting progress to `emitter`.
    pub fn run(mut self, emitter: &dyn StatusEmitter) -> Result<Summary, Error> {
        let result = self.run_inner(emitter);
        emitter.finalize(&result);
        result
    }

    fn run_inner(&mut self, emitter: &dyn StatusEmitter) -> Result<Summary, Error> {
        let anchor = self.synchronize()?;
        emitter.synchronized(&anchor, self.summary.skipped);
        while let Some(pair) = self.step()? {
            emitter.compared(&pair);
        }
        Ok(self.summary.clone())
    }
}

/// Check `output` against `reference` in one go.
pub fn check_streams(
    output: impl BufRead,
    reference: impl BufRead,
    start_board: i64,
    emitter: &dyn StatusEmitter,
) -> Result<Summary, Error> {
    Comparator::new(output, reference, start_board).run(emitter)
}
