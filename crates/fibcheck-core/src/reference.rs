//! Reference Fibonacci table.
//!
//! The table is the ground truth every reported value is compared against.
//! It is built once with the plain recurrence and never extended.

/// Number of entries in the reference table: F(0) through F(100).
pub const REFERENCE_LEN: usize = 101;

/// The first [`REFERENCE_LEN`] Fibonacci numbers, indexed by position.
///
/// Stored as `u128`: F(100) = 354224848179261915075 does not fit in `u64`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    values: Vec<u128>,
}

impl Reference {
    /// Build the table seeded with F(0) = 0, F(1) = 1.
    pub fn new() -> Self {
        let mut values = Vec::with_capacity(REFERENCE_LEN);
        values.push(0u128);
        values.push(1u128);

        for i in 2..REFERENCE_LEN {
            let next = values[i - 1] + values[i - 2];
            values.push(next);
        }

        Self { values }
    }

    /// Expected value for index `k`, or `None` past the end of the table.
    pub fn get(&self, k: usize) -> Option<u128> {
        self.values.get(k).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[u128] {
        &self.values
    }
}

impl Default for Reference {
    fn default() -> Self {
        Self::new()
    }
}
