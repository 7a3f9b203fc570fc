//! Result-count limit for list endpoints.

use serde::{Deserialize, Serialize};

/// Limit applied when the caller passes zero or nothing.
pub const DEFAULT_LIST_LIMIT: u32 = 10;

/// Maximum number of summaries a list call returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<u32>")]
pub struct ListLimit(u32);

impl ListLimit {
    /// Build a limit, substituting the default for zero.
    pub fn new(limit: u32) -> Self {
        match limit {
            0 => Self(DEFAULT_LIST_LIMIT),
            n => Self(n),
        }
    }

    /// The effective limit.
    pub fn get(&self) -> u32 {
        self.0
    }

    /// The limit as a `usize` for slicing.
    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }
}

impl Default for ListLimit {
    fn default() -> Self {
        Self(DEFAULT_LIST_LIMIT)
    }
}

impl From<Option<u32>> for ListLimit {
    fn from(value: Option<u32>) -> Self {
        Self::new(value.unwrap_or(0))
    }
}
