#![cfg(unix)]

use std::path::{Path, PathBuf};

use iters_oracle::{run, CommandBuilder, Config, Error, Summary};

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// A config whose "solver" is a shell script printing `output`.
/// The solver's own arguments end up in `$1` and following.
fn config(script: &str) -> Config {
    let mut config = Config::baseline(fixtures());
    config.reference = fixtures().join("simulation.txt");
    config.solver = CommandBuilder::cmd("sh").args(["-c", script, "sh"]);
    config
}

#[test]
fn totals_matching_the_trace() {
    let config = config(
        r#"echo "Solving $1 to $2 with $3 threads"
echo "11983 = Verdict: Solved ; Iters: 15 (total_num_iters=15)"
echo "11984 = Verdict: Solved ; Iters: 2210 (total_num_iters=2225)"
echo "11985 = Verdict: Solved ; Iters: 96 (total_num_iters=2321)""#,
    );
    let summary = run(&config, &()).unwrap();
    assert_eq!(
        summary,
        Summary {
            skipped: 2,
            compared: 3,
            total: 2321,
        }
    );
}

#[test]
fn solver_receives_the_baseline_arguments() {
    let config = config(
        r#"echo banner
if [ "$1 $2 $3 $4 $6 $7" = "11983 32000 1 --read-from-file --scans-synergy none" ]; then
    echo "(total_num_iters=15)"
else
    echo "unexpected arguments: $*"
fi"#,
    );
    run(&config, &()).unwrap();
}

#[test]
fn wrong_total_is_reported() {
    let config = config(
        r#"echo banner
echo "(total_num_iters=15)"
echo "(total_num_iters=2226)""#,
    );
    let err = run(&config, &()).unwrap_err();
    match err.downcast_ref::<Error>() {
        Some(Error::IterationMismatch {
            expected, actual, ..
        }) => assert_eq!((*expected, *actual), (2225, 2226)),
        other => panic!("{other:?}"),
    }
}

#[test]
fn endless_solver_is_stopped_on_failure() {
    let config = config("echo banner; while :; do echo garbage; done");
    let err = run(&config, &()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::MalformedOutputLine(_))
    ));
}

#[test]
fn missing_reference_trace() {
    let mut config = config("echo banner");
    config.reference = fixtures().join("does-not-exist.txt");
    let err = run(&config, &()).unwrap_err();
    assert!(
        err.to_string().contains("could not open reference trace"),
        "{err:?}"
    );
}

#[test]
fn missing_solver() {
    let mut config = config("");
    config.solver = CommandBuilder::cmd(fixtures().join("no-such-solver"));
    let err = run(&config, &()).unwrap_err();
    assert!(err.to_string().contains("could not spawn"), "{err:?}");
}
