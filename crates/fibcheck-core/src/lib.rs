//! # fibcheck-core
//!
//! Verifies Fibonacci results reported in a fibdrv client log.
//!
//! The client prints one line per read of `/dev/fibonacci`:
//!
//! ```text
//! Reading from /dev/fibonacci at offset 7, returned the sequence 13.
//! ```
//!
//! Each such line is checked against an independently computed table of
//! F(0)..F(100). The run stops at the first disagreement.
//!
//! ## Key Guarantees
//!
//! 1. **Fail-fast**: the first mismatch ends the run, nothing after it is read
//! 2. **Strict**: a malformed qualifying line is an error, never a guess
//! 3. **Deterministic**: the same log always gives the same outcome
//!
//! ## Example
//!
//! ```rust,ignore
//! use fibcheck_core::{verify_file, Outcome, DEFAULT_LOG_PATH};
//!
//! match verify_file(DEFAULT_LOG_PATH)? {
//!     Outcome::Succeeded { .. } => {}
//!     Outcome::Failed { mismatch } => println!("{}", mismatch),
//! }
//! ```

pub mod log;
pub mod reference;
pub mod verifier;

// Re-export main types at crate root
pub use log::{Field, LineShape, LogReader, Record, Reported, ShapeError, DEFAULT_LOG_PATH};
pub use reference::{Reference, REFERENCE_LEN};
pub use verifier::{Mismatch, Outcome, Verifier};

use std::io::BufRead;
use std::path::Path;
use thiserror::Error;

/// Errors that abort a verification run.
///
/// A mismatch is not one of these; it is reported as [`Outcome::Failed`].
#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("Failed to read log: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed line {line}: {source}")]
    Shape { line: usize, source: ShapeError },

    #[error("Index {index} on line {line} is outside the reference table (0..{len})")]
    IndexOutOfRange { index: usize, line: usize, len: usize },
}

/// Verify the log at `path`.
///
/// The file is opened before anything is checked, so a missing log fails
/// with [`VerifyError::Io`] without a single comparison.
pub fn verify_file(path: impl AsRef<Path>) -> Result<Outcome, VerifyError> {
    let reader = LogReader::open(path)?;
    verify_records(reader)
}

/// Verify a log held in any buffered reader.
pub fn verify_reader<R: BufRead>(reader: R) -> Result<Outcome, VerifyError> {
    verify_records(LogReader::new(reader))
}

fn verify_records<R: BufRead>(mut reader: LogReader<R>) -> Result<Outcome, VerifyError> {
    let verifier = Verifier::new();
    let outcome = verifier.run(reader.by_ref())?;

    tracing::info!(
        lines = reader.lines_read(),
        records = reader.records_seen(),
        success = outcome.is_success(),
        "Verification finished"
    );

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_client_log_passes() {
        let mut log = String::new();
        for k in 0..=100usize {
            log.push_str("Writing to /dev/fibonacci, returned the sequence 1\n");
            let f = Reference::new().get(k).unwrap();
            log.push_str(&format!(
                "Reading from /dev/fibonacci at offset {}, returned the sequence {}.\n",
                k, f
            ));
        }

        let outcome = verify_reader(Cursor::new(log)).unwrap();
        assert_eq!(outcome, Outcome::Succeeded { checked: 101 });
    }

    #[test]
    fn test_offset_past_table_is_error() {
        let log = "Reading from /dev/fibonacci at offset 101, returned the sequence 573147844013817084101.\n";
        let result = verify_reader(Cursor::new(log));
        assert!(matches!(
            result,
            Err(VerifyError::IndexOutOfRange { index: 101, .. })
        ));
    }

    #[test]
    fn test_error_messages() {
        let err = VerifyError::Shape {
            line: 4,
            source: ShapeError::MissingToken {
                position: 9,
                found: 3,
            },
        };
        assert_eq!(
            err.to_string(),
            "Malformed line 4: Missing token at position 9 (line has 3 tokens)"
        );
    }
}
