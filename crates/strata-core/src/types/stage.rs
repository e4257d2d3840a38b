//! Versioning stages for logical files.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which view of a logical file's history a query targets.
///
/// Every repository lookup names its stage explicitly; there is no global
/// "current stage" mode that gets flipped and restored around queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// The latest saved edit, visible only to privileged callers
    Draft,
    /// The last published, publicly visible edit
    Live,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Draft => write!(f, "draft"),
            Stage::Live => write!(f, "live"),
        }
    }
}
