//! Various schemes for reporting progress and the verdict of a check.

use crate::{comparator::Pair, lines::Line, Error, Summary};

#[cfg(feature = "gha")]
mod gha;
mod json;
mod text;
#[cfg(feature = "gha")]
pub use gha::Gha;
pub use json::JSON;
pub use text::Text;

/// A generic way to handle the output of this crate.
pub trait StatusEmitter {
    /// The reference trace was skipped up to and including `anchor`.
    fn synchronized(&self, _anchor: &Line, _skipped: usize) {}

    /// A pair of lines agreed on the running total.
    fn compared(&self, _pair: &Pair) {}

    /// The check is over, report its outcome.
    fn finalize(&self, _result: &Result<Summary, Error>) {}
}

/// Emit nothing
impl StatusEmitter for () {}

impl<T: StatusEmitter + ?Sized> StatusEmitter for Box<T> {
    fn synchronized(&self, anchor: &Line, skipped: usize) {
        (**self).synchronized(anchor, skipped)
    }

    fn compared(&self, pair: &Pair) {
        (**self).compared(pair)
    }

    fn finalize(&self, result: &Result<Summary, Error>) {
        (**self).finalize(result)
    }
}

impl<T: StatusEmitter, U: StatusEmitter> StatusEmitter for (T, U) {
    fn synchronized(&self, anchor: &Line, skipped: usize) {
        self.0.synchronized(anchor, skipped);
        self.1.synchronized(anchor, skipped);
    }

    fn compared(&self, pair: &Pair) {
        self.0.compared(pair);
        self.1.compared(pair);
    }

    fn finalize(&self, result: &Result<Summary, Error>) {
        self.0.finalize(result);
        self.1.finalize(result);
    }
}
