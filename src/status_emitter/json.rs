use super::StatusEmitter;
use crate::comparator::Pair;
use crate::lines::{Line, Stream};
use crate::{Error, Summary};

use serde::Serialize;
use std::borrow::Cow;

#[derive(Serialize)]
struct JsonLine<'a> {
    stream: Stream,
    number: usize,
    text: Cow<'a, str>,
}

impl<'a> From<&'a Line> for JsonLine<'a> {
    fn from(line: &'a Line) -> Self {
        Self {
            stream: line.stream,
            number: line.number,
            text: line.lossy(),
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum Event<'a> {
    Synchronized {
        anchor: JsonLine<'a>,
        skipped: usize,
    },
    Compared {
        reference: usize,
        output: usize,
        delta: u64,
        total: u64,
    },
    Ok(&'a Summary),
    Failed {
        kind: &'static str,
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        expected: Option<u64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        actual: Option<u64>,
        lines: Vec<JsonLine<'a>>,
    },
}

fn emit(event: &Event<'_>) {
    match serde_json::to_string(event) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("could not serialize event: {err}"),
    }
}

/// The event reporting the outcome of a check.
fn finished(result: &Result<Summary, Error>) -> Event<'_> {
    let error = match result {
        Ok(summary) => return Event::Ok(summary),
        Err(error) => error,
    };
    let kind = match error {
        Error::EndOfInput { .. } => "end_of_input",
        Error::MalformedReferenceLine(_) => "malformed_reference_line",
        Error::MalformedOutputLine(_) => "malformed_output_line",
        Error::IterationMismatch { .. } => "iteration_mismatch",
        Error::TotalOverflow { .. } => "total_overflow",
        Error::Io { .. } => "io",
    };
    let (expected, actual) = match *error {
        Error::IterationMismatch {
            expected, actual, ..
        } => (Some(expected), Some(actual)),
        _ => (None, None),
    };
    Event::Failed {
        kind,
        message: error.to_string(),
        expected,
        actual,
        lines: error.lines().into_iter().map(JsonLine::from).collect(),
    }
}

/// A JSON output emitter, one object per line on stdout.
#[derive(Clone)]
pub struct JSON {
    /// Do not emit an object for every compared pair.
    pub quiet: bool,
}

impl StatusEmitter for JSON {
    fn synchronized(&self, anchor: &Line, skipped: usize) {
        emit(&Event::Synchronized {
            anchor: anchor.into(),
            skipped,
        });
    }

    fn compared(&self, pair: &Pair) {
        if self.quiet {
            return;
        }
        emit(&Event::Compared {
            reference: pair.reference.number,
            output: pair.output.number,
            delta: pair.delta,
            total: pair.total,
        });
    }

    fn finalize(&self, result: &Result<Summary, Error>) {
        emit(&finished(result));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn line(stream: Stream, number: usize, text: &str) -> Line {
        Line {
            stream,
            number,
            text: text.as_bytes().to_vec(),
        }
    }

    fn to_value(event: &Event<'_>) -> Value {
        serde_json::to_value(event).unwrap()
    }

    #[test]
    fn mismatch_event() {
        let result = Err(Error::IterationMismatch {
            expected: 8,
            actual: 9,
            reference: line(Stream::Reference, 4, "101:3"),
            output: line(Stream::Output, 3, "y(total_num_iters=9)"),
        });
        let value = to_value(&finished(&result));
        assert_eq!(value["event"], "failed");
        assert_eq!(value["kind"], "iteration_mismatch");
        assert_eq!(value["expected"], 8);
        assert_eq!(value["actual"], 9);
        assert_eq!(
            value["lines"],
            json!([
                { "stream": "reference", "number": 4, "text": "101:3" },
                { "stream": "output", "number": 3, "text": "y(total_num_iters=9)" },
            ])
        );
    }

    #[test]
    fn end_of_input_event_has_no_totals() {
        let result = Err(Error::EndOfInput {
            stream: Stream::Output,
            phase: crate::Phase::Synchronizing,
            lines: 0,
        });
        let value = to_value(&finished(&result));
        assert_eq!(value["kind"], "end_of_input");
        assert!(value.get("expected").is_none());
        assert!(value.get("actual").is_none());
        assert_eq!(value["lines"], json!([]));
    }

    #[test]
    fn ok_event() {
        let result = Ok(Summary {
            skipped: 1,
            compared: 2,
            total: 8,
        });
        assert_eq!(
            to_value(&finished(&result)),
            json!({ "event": "ok", "skipped": 1, "compared": 2, "total": 8 })
        );
    }

    #[test]
    fn synchronized_event() {
        let anchor = line(Stream::Reference, 2, "99:2");
        let value = to_value(&Event::Synchronized {
            anchor: (&anchor).into(),
            skipped: 1,
        });
        assert_eq!(
            value,
            json!({
                "event": "synchronized",
                "anchor": { "stream": "reference", "number": 2, "text": "99:2" },
                "skipped": 1,
            })
        );
    }
}
