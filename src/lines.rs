//! Line-at-a-time reading of the two compared streams.

use bstr::ByteSlice;
use std::fmt::Display;
use std::io::BufRead;

use crate::comparator::Phase;
use crate::Error;

/// Which of the two compared streams something came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stream {
    /// The standard output of the solver.
    Output,
    /// The recorded reference trace.
    Reference,
}

impl Display for Stream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stream::Output => write!(f, "solver output"),
            Stream::Reference => write!(f, "reference trace"),
        }
    }
}

/// A single line of either stream, without its terminator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line {
    /// The stream the line was read from.
    pub stream: Stream,
    /// 1-based position of the line in its stream.
    pub number: usize,
    /// The raw content. Not required to be UTF-8.
    pub text: Vec<u8>,
}

impl Line {
    /// The line content with invalid UTF-8 replaced.
    pub fn lossy(&self) -> std::borrow::Cow<'_, str> {
        self.text.to_str_lossy()
    }
}

impl Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}: {}", self.stream, self.number, self.text.as_bstr())
    }
}

/// Reads lines from a [`BufRead`], strictly forward, counting them as it goes.
pub struct LineReader<T> {
    read: T,
    stream: Stream,
    number: usize,
}

impl<T: BufRead> LineReader<T> {
    /// Wrap `read`, tagging every produced line with `stream`.
    pub fn new(read: T, stream: Stream) -> Self {
        Self {
            read,
            stream,
            number: 0,
        }
    }

    /// How many lines have been read so far.
    pub fn lines_read(&self) -> usize {
        self.number
    }

    /// The next line, or `None` once the stream is exhausted.
    pub fn next_line(&mut self) -> Result<Option<Line>, Error> {
        let mut text = vec![];
        let n = self
            .read
            .read_until(b'\n', &mut text)
            .map_err(|error| Error::Io {
                stream: self.stream,
                error,
            })?;
        if n == 0 {
            return Ok(None);
        }
        chomp(&mut text);
        self.number += 1;
        Ok(Some(Line {
            stream: self.stream,
            number: self.number,
            text,
        }))
    }

    /// Like [`next_line`](Self::next_line), but running out of input is an error.
    pub fn expect_line(&mut self, phase: Phase) -> Result<Line, Error> {
        match self.next_line()? {
            Some(line) => Ok(line),
            None => Err(Error::EndOfInput {
                stream: self.stream,
                phase,
                lines: self.number,
            }),
        }
    }
}

/// Strip a trailing `\n`, `\r\n` or `\r`.
fn chomp(text: &mut Vec<u8>) {
    if text.last() == Some(&b'\n') {
        text.pop();
    }
    if text.last() == Some(&b'\r') {
        text.pop();
    }
}
