//! `[feed]` retention configuration.

use serde::{Deserialize, Serialize};

/// Bounds applied on every merge.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RetentionConfig {
    /// Maximum number of items kept in the feed.
    pub max_items: usize,
    /// Incoming records older than this many days are not admitted.
    pub max_age_days: u32,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            max_items: 50,
            max_age_days: 30,
        }
    }
}
