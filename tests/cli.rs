//! Command-line tests for the non-interactive `--print` mode.

use assert_cmd::Command;
use predicates::prelude::*;

fn exprplot() -> Command {
    Command::cargo_bin("exprplot").unwrap()
}

#[test]
fn prints_line_data_as_tsv() {
    let output = exprplot()
        .args(["--print", "--samples", "11", "x**2 + 2*x - 3"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("x\ty\n-10\t77\n"))
        .get_output()
        .stdout
        .clone();

    let text = String::from_utf8(output).unwrap();
    assert_eq!(text.lines().count(), 12);
    assert!(text.contains("\n0\t-3\n"));
}

#[test]
fn prints_surface_data_as_tsv() {
    let output = exprplot()
        .args(["--print", "--mode", "3d", "--grid", "5", "x + 1"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("x\ty\tz\n"))
        .get_output()
        .stdout
        .clone();

    let text = String::from_utf8(output).unwrap();
    assert_eq!(text.lines().count(), 26);
}

#[test]
fn gaps_are_written_as_nan() {
    exprplot()
        .args(["--print", "--samples", "3", "--", "1/x"])
        .assert()
        .success()
        .stdout("x\ty\n-10\t-0.1\n0\tNaN\n10\t0.1\n");
}

#[test]
fn disallowed_variable_fails() {
    exprplot()
        .args(["--print", "y + 1"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(
            predicate::str::starts_with("Error plotting graph:")
                .and(predicate::str::contains("'y'")),
        );
}

#[test]
fn undefined_everywhere_fails() {
    exprplot()
        .args(["--print", "sqrt(-1 - x**2)"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no valid points to plot"));
}

#[test]
fn zero_samples_fails_without_panicking() {
    exprplot()
        .args(["--print", "--samples", "0", "x"])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("Error plotting graph:"));
}

#[test]
fn invalid_mode_is_rejected() {
    exprplot()
        .args(["--print", "--mode", "4D", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("4D"));
}

#[test]
fn print_requires_an_expression() {
    exprplot().arg("--print").assert().failure();
}

#[test]
fn log_file_records_the_plot() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("exprplot.log");

    exprplot()
        .args(["--print", "sin(x)", "--log"])
        .arg(&log)
        .assert()
        .success();

    let contents = std::fs::read_to_string(&log).unwrap();
    assert!(contents.contains("Starting exprplot"));
    assert!(contents.contains("Plotted expression"));
}
