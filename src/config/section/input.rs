//! `[input]` configuration: the rewritten-article directory.

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Directory scanned for records (relative to the config file).
    pub dir: PathBuf,
    /// Only files whose name ends with this suffix are read.
    pub suffix: String,
    /// Skip records with a malformed `processed_at` instead of aborting.
    pub skip_invalid: bool,
}

impl InputConfig {
    pub const SUFFIX: FieldPath = FieldPath::new("input.suffix");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.suffix.is_empty() {
            diag.error_with_hint(
                Self::SUFFIX,
                "must not be empty",
                "e.g. \"_rewritten.json\"",
            );
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            dir: "rewritten".into(),
            suffix: "_rewritten.json".into(),
            skip_invalid: false,
        }
    }
}
