//! The positional line format shared with the log producer.
//!
//! A qualifying line looks like
//! `Reading from /dev/fibonacci at offset 7, returned the sequence 13.`
//! Token 5 carries the offset followed by a comma, token 9 carries the
//! returned value followed by a period. Any change to the producer's
//! printf has to be mirrored here and nowhere else.

use std::fmt;

use thiserror::Error;

/// Which of the two extracted fields a parse error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Index,
    Value,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Index => write!(f, "index"),
            Field::Value => write!(f, "value"),
        }
    }
}

/// Errors from extracting fields out of a qualifying line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("Missing token at position {position} (line has {found} tokens)")]
    MissingToken { position: usize, found: usize },

    #[error("Invalid {field} field: '{token}' is not an unsigned integer")]
    InvalidInteger { field: Field, token: String },
}

/// A value as the client printed it.
///
/// Digit strings too large for `u128` are still well-formed integers. They
/// cannot equal any reference entry, so they are kept as text for the
/// report instead of being rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reported {
    Int(u128),

    /// Decimal digits without leading zeros, larger than `u128::MAX`
    Oversized(String),
}

impl Reported {
    pub fn as_u128(&self) -> Option<u128> {
        match self {
            Reported::Int(v) => Some(*v),
            Reported::Oversized(_) => None,
        }
    }
}

impl From<u128> for Reported {
    fn from(value: u128) -> Self {
        Reported::Int(value)
    }
}

impl fmt::Display for Reported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reported::Int(v) => write!(f, "{}", v),
            Reported::Oversized(digits) => f.write_str(digits),
        }
    }
}

/// Marker, token positions and delimiters of a qualifying line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineShape {
    /// Substring that makes a line eligible for extraction
    pub marker: String,

    /// 0-based token holding the Fibonacci index
    pub index_position: usize,

    /// The index token is cut at the first occurrence of this character
    pub index_delimiter: char,

    /// 0-based token holding the reported value
    pub value_position: usize,

    /// The value token is cut at the first occurrence of this character
    pub value_delimiter: char,
}

impl Default for LineShape {
    fn default() -> Self {
        Self {
            marker: "Reading".to_string(),
            index_position: 5,
            index_delimiter: ',',
            value_position: 9,
            value_delimiter: '.',
        }
    }
}

impl LineShape {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the marker substring.
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    /// Set the index token position and its delimiter.
    pub fn with_index(mut self, position: usize, delimiter: char) -> Self {
        self.index_position = position;
        self.index_delimiter = delimiter;
        self
    }

    /// Set the value token position and its delimiter.
    pub fn with_value(mut self, position: usize, delimiter: char) -> Self {
        self.value_position = position;
        self.value_delimiter = delimiter;
        self
    }

    /// Whether the line carries a result at all.
    pub fn qualifies(&self, line: &str) -> bool {
        line.contains(self.marker.as_str())
    }

    /// Extract `(index, value)` from a line.
    ///
    /// Returns `Ok(None)` for lines without the marker. A qualifying line
    /// that is too short or has a non-numeric field is an error; the format
    /// is never guessed at.
    pub fn extract(&self, line: &str) -> Result<Option<(usize, Reported)>, ShapeError> {
        if !self.qualifies(line) {
            return Ok(None);
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();

        let index_token = token_at(&tokens, self.index_position)?;
        let value_token = token_at(&tokens, self.value_position)?;

        let index_text = digits(strip_from(index_token, self.index_delimiter), Field::Index)?;
        let index = index_text
            .parse::<usize>()
            .map_err(|_| invalid(index_text, Field::Index))?;

        let value_text = digits(strip_from(value_token, self.value_delimiter), Field::Value)?;
        let value = match value_text.parse::<u128>() {
            Ok(v) => Reported::Int(v),
            // digits only, so the one possible failure is overflow
            Err(_) => Reported::Oversized(value_text.trim_start_matches('0').to_string()),
        };

        Ok(Some((index, value)))
    }
}

fn token_at<'a>(tokens: &[&'a str], position: usize) -> Result<&'a str, ShapeError> {
    tokens
        .get(position)
        .copied()
        .ok_or(ShapeError::MissingToken {
            position,
            found: tokens.len(),
        })
}

/// Everything before the first `delimiter`, or the whole token.
fn strip_from(token: &str, delimiter: char) -> &str {
    token
        .split_once(delimiter)
        .map_or(token, |(head, _)| head)
}

/// Digits only. Signs, whitespace and empty fields are rejected.
fn digits(text: &str, field: Field) -> Result<&str, ShapeError> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(text, field));
    }
    Ok(text)
}

fn invalid(text: &str, field: Field) -> ShapeError {
    ShapeError::InvalidInteger {
        field,
        token: text.to_string(),
    }
}
