//! Radio scheduler operating priority.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Operating priority granted to the driver by the radio scheduler.
///
/// Higher values win arbitration. [`Priority::IDLE`] means the driver holds
/// no radio access at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Priority(pub u32);

impl Priority {
    /// No radio access.
    pub const IDLE: Self = Self(0);
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Priority {
    fn from(value: u32) -> Self {
        Self(value)
    }
}
