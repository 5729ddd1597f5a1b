//! Log reading and record extraction.
//!
//! The fibdrv client prints one line per read of the character device.
//! This module knows where in such a line the offset and the returned
//! value live, and turns a log file into a lazy stream of records.

mod reader;
mod shape;

pub use reader::{LogReader, Record, DEFAULT_LOG_PATH};
pub use shape::{Field, LineShape, Reported, ShapeError};
