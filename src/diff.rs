use bstr::ByteSlice;
use colored::*;
use prettydiff::{basic::DiffOp, diff_words};
use std::fmt::Write as _;

use crate::lines::Line;
use crate::record::with_total;

/// Show how the solver line differs from what it should have reported.
/// The expected line comes first, prefixed by `-`, then the actual one with `+`.
pub fn render_mismatch(output: &Line, expected: u64) -> String {
    let expected_line = with_total(output, expected);
    let expected_str = expected_line.to_str_lossy();
    let actual_str = output.lossy();

    let diff = diff_words(&expected_str, &actual_str);
    let diff = diff.diff();

    let mut out = String::new();
    write!(out, "{}", "-".red()).ok();
    for op in &diff {
        match *op {
            DiffOp::Replace(l, _) | DiffOp::Remove(l) => {
                for l in l {
                    write!(out, "{}", l.to_string().on_red()).ok();
                }
            }
            DiffOp::Insert(_) => {}
            DiffOp::Equal(l) => {
                for l in l {
                    out.push_str(l);
                }
            }
        }
    }
    out.push('\n');
    write!(out, "{}", "+".green()).ok();
    for op in diff {
        match op {
            DiffOp::Remove(_) => {}
            DiffOp::Replace(_, r) | DiffOp::Insert(r) => {
                for r in r {
                    write!(out, "{}", r.to_string().on_green()).ok();
                }
            }
            DiffOp::Equal(r) => {
                for r in r {
                    out.push_str(r);
                }
            }
        }
    }
    out.push('\n');
    out
}
