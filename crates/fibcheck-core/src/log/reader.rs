//! Lazy record stream over a log file.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use super::shape::{LineShape, Reported};
use crate::VerifyError;

/// Where the client's output is expected, relative to the working directory.
pub const DEFAULT_LOG_PATH: &str = "out";

/// One reported result pulled from a qualifying line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Fibonacci index the client asked for
    pub index: usize,

    /// Value the client says it got back
    pub value: Reported,

    /// 1-based line number in the log
    pub line: usize,
}

/// Iterator over the records of a log, in file order.
///
/// Lines are read one at a time and never collected. The first I/O or
/// parse error is yielded once and ends the stream. The underlying file is
/// closed when the reader is dropped.
pub struct LogReader<R> {
    lines: Lines<R>,
    shape: LineShape,
    lines_read: usize,
    records_seen: usize,
    done: bool,
}

impl LogReader<BufReader<File>> {
    /// Open a log file for reading.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, VerifyError> {
        let file = File::open(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), "Opened log");
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> LogReader<R> {
    /// Read records from any buffered source using the default line shape.
    pub fn new(reader: R) -> Self {
        Self::with_shape(reader, LineShape::default())
    }

    pub fn with_shape(reader: R, shape: LineShape) -> Self {
        Self {
            lines: reader.lines(),
            shape,
            lines_read: 0,
            records_seen: 0,
            done: false,
        }
    }

    /// Lines consumed so far, qualifying or not.
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    /// Records yielded so far.
    pub fn records_seen(&self) -> usize {
        self.records_seen
    }

    pub fn shape(&self) -> &LineShape {
        &self.shape
    }
}

impl<R: BufRead> Iterator for LogReader<R> {
    type Item = Result<Record, VerifyError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let text = match self.lines.next()? {
                Ok(text) => text,
                Err(e) => {
                    self.done = true;
                    return Some(Err(VerifyError::Io(e)));
                }
            };
            self.lines_read += 1;
            let line = self.lines_read;

            match self.shape.extract(&text) {
                Ok(None) => {
                    tracing::trace!(line, "Skipping line without marker");
                }
                Ok(Some((index, value))) => {
                    self.records_seen += 1;
                    tracing::debug!(line, index, value = %value, "Extracted record");
                    return Some(Ok(Record { index, value, line }));
                }
                Err(source) => {
                    self.done = true;
                    return Some(Err(VerifyError::Shape { line, source }));
                }
            }
        }
    }
}
