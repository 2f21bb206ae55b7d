//! Extraction of the numbers the comparison is about.

use regex::bytes::Regex;
use std::sync::OnceLock;

use crate::lines::Line;

fn delta_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r":([0-9]+)\z").unwrap())
}

fn total_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\(total_num_iters=([0-9]+)\)").unwrap())
}

fn capture_u64(re: &Regex, text: &[u8]) -> Option<u64> {
    let digits = re.captures(text)?.get(1)?.as_bytes();
    // Only ASCII digits can match, so this is always valid UTF-8.
    std::str::from_utf8(digits).ok()?.parse().ok()
}

/// The iteration delta of a reference line of the form `<index>:<delta>`.
///
/// Returns `None` if the line does not end in `:<digits>`, or if the
/// number does not fit into a `u64`.
pub fn reference_delta(line: &Line) -> Option<u64> {
    capture_u64(delta_regex(), &line.text)
}

/// The cumulative total a solver output line reports via
/// `(total_num_iters=<count>)`.
pub fn reported_total(line: &Line) -> Option<u64> {
    capture_u64(total_regex(), &line.text)
}

/// The prefix a reference line must start with to be the synchronization anchor.
///
/// Takes an `i128` so the record before board `i64::MIN` can still be named.
pub fn anchor_prefix(anchor: i128) -> Vec<u8> {
    format!("{anchor}:").into_bytes()
}

/// Whether `line` is the anchor record.
pub fn is_anchor(line: &Line, prefix: &[u8]) -> bool {
    line.text.starts_with(prefix)
}

/// The solver line as it would read had it reported `total`.
pub fn with_total(line: &Line, total: u64) -> Vec<u8> {
    let replacement = format!("(total_num_iters={total})");
    total_regex()
        .replace(&line.text, regex::bytes::NoExpand(replacement.as_bytes()))
        .into_owned()
}
