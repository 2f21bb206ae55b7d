use super::StatusEmitter;
use crate::comparator::Pair;
use crate::diff::render_mismatch;
use crate::lines::{Line, Stream};
use crate::Error;
use crate::Summary;
use annotate_snippets::Renderer;
use annotate_snippets::Snippet;
use colored::Colorize;
#[cfg(feature = "indicatif")]
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::fmt::Write as _;
use std::path::Path;

/// A human readable output emitter.
pub struct Text {
    reference: String,
    quiet: bool,
    #[cfg(feature = "indicatif")]
    spinner: ProgressBar,
}

impl Text {
    /// Print progress and the verdict for a check against the trace at `reference`.
    pub fn new(reference: &Path, quiet: bool) -> Self {
        Self {
            reference: reference.display().to_string(),
            quiet,
            #[cfg(feature = "indicatif")]
            spinner: if quiet {
                ProgressBar::with_draw_target(None, ProgressDrawTarget::hidden())
            } else {
                ProgressBar::new_spinner().with_style(
                    ProgressStyle::with_template("{spinner} {pos} boards checked{msg}").unwrap(),
                )
            },
        }
    }

    fn origin(&self, line: &Line) -> String {
        match line.stream {
            Stream::Output => "solver output".into(),
            Stream::Reference => self.reference.clone(),
        }
    }

    fn write_line(&self, out: &mut String, line: &Line) {
        writeln!(
            out,
            "{} {}:{}: {}",
            "-->".bright_blue(),
            self.origin(line),
            line.number,
            line.lossy()
        )
        .ok();
    }

    fn write_annotated(&self, out: &mut String, title: &str, line: &Line, label: &str) {
        let source = line.lossy();
        if source.is_empty() {
            writeln!(out, "{}: {title}", "error".red().bold()).ok();
            self.write_line(out, line);
            return;
        }
        let origin = self.origin(line);
        let msg = annotate_snippets::Level::Error.title(title).snippet(
            Snippet::source(&source)
                .line_start(line.number)
                .origin(&origin)
                .annotation(
                    annotate_snippets::Level::Error
                        .span(0..source.len())
                        .label(label),
                ),
        );
        let renderer = if colored::control::SHOULD_COLORIZE.should_colorize() {
            Renderer::styled()
        } else {
            Renderer::plain()
        };
        writeln!(out, "{}", renderer.render(msg)).ok();
    }

    fn write_error(&self, out: &mut String, error: &Error) {
        match error {
            Error::EndOfInput {
                stream,
                phase,
                lines,
            } => {
                writeln!(out, "{}: {stream} ended early", "error".red().bold()).ok();
                writeln!(out, "{lines} lines were read from it while {phase}").ok();
                if *stream == Stream::Reference {
                    writeln!(
                        out,
                        "the trace at {} is shorter than the solver run",
                        self.reference
                    )
                    .ok();
                }
            }
            Error::MalformedReferenceLine(line) => self.write_annotated(
                out,
                "incorrect expected format",
                line,
                "expected a trailing `:<iterations>`",
            ),
            Error::MalformedOutputLine(line) => self.write_annotated(
                out,
                "incorrect output format",
                line,
                "expected `(total_num_iters=<count>)`",
            ),
            Error::IterationMismatch {
                expected,
                actual,
                reference,
                output,
            } => {
                writeln!(
                    out,
                    "{}: wrong iteration count, expected {} but the solver reported {}",
                    "error".red().bold(),
                    expected.to_string().green(),
                    actual.to_string().red()
                )
                .ok();
                self.write_line(out, reference);
                self.write_line(out, output);
                out.push_str(&render_mismatch(output, *expected));
            }
            Error::TotalOverflow { total, reference } => {
                writeln!(out, "{}: running total {total} overflows", "error".red().bold()).ok();
                self.write_line(out, reference);
            }
            Error::Io { .. } => {
                writeln!(out, "{}: {error}", "error".red().bold()).ok();
            }
        }
    }

    /// The final report for `result`, as printed by [`StatusEmitter::finalize`].
    fn verdict(&self, result: &Result<Summary, Error>) -> String {
        let mut out = String::new();
        match result {
            Ok(Summary {
                skipped: _,
                compared,
                total,
            }) => {
                writeln!(
                    out,
                    "check result: {}. {compared} boards compared, total_num_iters={total}",
                    "ok".green()
                )
                .ok();
            }
            Err(error) => {
                writeln!(out, "{}", "FAILED".bright_red().bold()).ok();
                self.write_error(&mut out, error);
            }
        }
        out
    }
}

impl StatusEmitter for Text {
    fn synchronized(&self, anchor: &Line, skipped: usize) {
        if !self.quiet {
            println!(
                "{} {} reference lines, starting after {}:{}",
                "Skipped".green(),
                skipped,
                self.reference,
                anchor.number
            );
        }
    }

    #[cfg(feature = "indicatif")]
    fn compared(&self, pair: &Pair) {
        self.spinner.inc(1);
        self.spinner
            .set_message(format!(", total_num_iters={}", pair.total));
    }

    #[cfg(not(feature = "indicatif"))]
    fn compared(&self, _pair: &Pair) {}

    fn finalize(&self, result: &Result<Summary, Error>) {
        #[cfg(feature = "indicatif")]
        self.spinner.finish_and_clear();
        print!("{}", self.verdict(result));
    }
}
