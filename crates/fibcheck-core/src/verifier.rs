//! Verifier: compares records against the reference table.
//!
//! The policy is fixed:
//! 1. An index past the table is an error, the table is never extended
//! 2. The first record whose value differs from the table ends the run as FAILED
//! 3. Running out of records ends the run as SUCCEEDED
//!
//! Nothing after the first mismatch is read.

use std::fmt;
use std::io::{self, Write};

use crate::log::{Record, Reported};
use crate::reference::Reference;
use crate::VerifyError;

/// A reported value that disagrees with the reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub index: usize,
    pub reported: Reported,
    pub expected: u128,
    pub line: usize,
}

impl Mismatch {
    /// Write the three-line failure report.
    pub fn write_report<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", self)
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "f({}) fail", self.index)?;
        writeln!(f, "input: {}", self.reported)?;
        write!(f, "expected: {}", self.expected)
    }
}

/// Terminal state of a verification run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Every record matched
    Succeeded { checked: usize },

    /// Stopped at the first mismatch
    Failed { mismatch: Mismatch },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded { .. })
    }

    pub fn mismatch(&self) -> Option<&Mismatch> {
        match self {
            Outcome::Failed { mismatch } => Some(mismatch),
            Outcome::Succeeded { .. } => None,
        }
    }
}

/// Checks records against a [`Reference`].
pub struct Verifier {
    reference: Reference,
}

impl Verifier {
    pub fn new() -> Self {
        Self::with_reference(Reference::new())
    }

    pub fn with_reference(reference: Reference) -> Self {
        Self { reference }
    }

    pub fn reference(&self) -> &Reference {
        &self.reference
    }

    /// Check one record.
    ///
    /// # Returns
    ///
    /// * `Ok(None)` - the value matches
    /// * `Ok(Some(mismatch))` - the value differs, including values too
    ///   large to be any reference entry
    /// * `Err(IndexOutOfRange)` - the index has no reference entry
    pub fn check(&self, record: &Record) -> Result<Option<Mismatch>, VerifyError> {
        let expected =
            self.reference
                .get(record.index)
                .ok_or(VerifyError::IndexOutOfRange {
                    index: record.index,
                    line: record.line,
                    len: self.reference.len(),
                })?;

        if record.value.as_u128() == Some(expected) {
            return Ok(None);
        }

        Ok(Some(Mismatch {
            index: record.index,
            reported: record.value.clone(),
            expected,
            line: record.line,
        }))
    }

    /// Check records in order, stopping at the first mismatch or error.
    pub fn run<I>(&self, records: I) -> Result<Outcome, VerifyError>
    where
        I: IntoIterator<Item = Result<Record, VerifyError>>,
    {
        let mut checked = 0;

        for record in records {
            let record = record?;
            checked += 1;

            if let Some(mismatch) = self.check(&record)? {
                tracing::debug!(
                    index = mismatch.index,
                    reported = %mismatch.reported,
                    expected = %mismatch.expected,
                    line = mismatch.line,
                    "Reported value does not match reference"
                );
                return Ok(Outcome::Failed { mismatch });
            }
        }

        Ok(Outcome::Succeeded { checked })
    }
}

impl Default for Verifier {
    fn default() -> Self {
        Self::new()
    }
}
