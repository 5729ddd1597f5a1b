//! End-to-end runs over small client logs.

use std::io::{Cursor, Write};

use fibcheck_core::{verify_file, verify_reader, Mismatch, Outcome, Reported, VerifyError};
use tempfile::NamedTempFile;

fn reading(k: usize, f: u128) -> String {
    format!(
        "Reading from /dev/fibonacci at offset {}, returned the sequence {}.\n",
        k, f
    )
}

fn report(outcome: &Outcome) -> String {
    let mut buf = Vec::new();
    if let Some(mismatch) = outcome.mismatch() {
        mismatch.write_report(&mut buf).unwrap();
    }
    String::from_utf8(buf).unwrap()
}

#[test]
fn test_wrong_value_reports_three_lines() {
    let outcome = verify_reader(Cursor::new(reading(5, 8))).unwrap();

    assert_eq!(report(&outcome), "f(5) fail\ninput: 8\nexpected: 5\n");
}

#[test]
fn test_correct_value_is_silent() {
    let outcome = verify_reader(Cursor::new(reading(10, 55))).unwrap();

    assert_eq!(outcome, Outcome::Succeeded { checked: 1 });
    assert_eq!(report(&outcome), "");
}

#[test]
fn test_empty_log_succeeds() {
    let outcome = verify_reader(Cursor::new("")).unwrap();

    assert_eq!(outcome, Outcome::Succeeded { checked: 0 });
}

#[test]
fn test_only_first_failure_is_reported() {
    let log = format!("{}{}{}", reading(0, 0), reading(1, 2), reading(2, 7));
    let outcome = verify_reader(Cursor::new(log)).unwrap();

    assert_eq!(
        outcome,
        Outcome::Failed {
            mismatch: Mismatch {
                index: 1,
                reported: Reported::Int(2),
                expected: 1,
                line: 2,
            }
        }
    );
    assert_eq!(report(&outcome), "f(1) fail\ninput: 2\nexpected: 1\n");
}

#[test]
fn test_missing_log_is_fatal() {
    let result = verify_file("no/such/directory/out");

    assert!(matches!(result, Err(VerifyError::Io(_))));
}

#[test]
fn test_malformed_line_after_mismatch_is_not_read() {
    let log = format!("{}Reading garbage\n", reading(3, 3));
    let outcome = verify_reader(Cursor::new(log)).unwrap();

    assert_eq!(outcome.mismatch().map(|m| m.index), Some(3));
}

#[test]
fn test_malformed_line_before_mismatch_is_fatal() {
    let log = format!("Reading garbage\n{}", reading(3, 3));
    let result = verify_reader(Cursor::new(log));

    assert!(matches!(result, Err(VerifyError::Shape { line: 1, .. })));
}

#[test]
fn test_repeated_runs_agree() {
    let mut contents = String::from("Writing to /dev/fibonacci, returned the sequence 1\n");
    contents.push_str(&reading(20, 6765));
    contents.push_str(&reading(21, 10945));
    let mut log = NamedTempFile::new().unwrap();
    log.write_all(contents.as_bytes()).unwrap();
    log.flush().unwrap();

    let first = verify_file(log.path()).unwrap();
    let second = verify_file(log.path()).unwrap();

    assert_eq!(first, second);
    assert_eq!(report(&first), report(&second));
    assert_eq!(report(&first), "f(21) fail\ninput: 10945\nexpected: 10946\n");
}

#[test]
fn test_value_too_large_for_u128_is_reported() {
    let digits = "9".repeat(45);
    let log = format!(
        "{}Reading from /dev/fibonacci at offset 5, returned the sequence {}.\n",
        reading(4, 3),
        digits
    );
    let outcome = verify_reader(Cursor::new(log)).unwrap();

    assert_eq!(
        report(&outcome),
        format!("f(5) fail\ninput: {}\nexpected: 5\n", digits)
    );
}
