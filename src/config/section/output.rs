//! `[output]` configuration: the feed document location.

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Feed file path (relative to the config file).
    pub path: PathBuf,
}

impl OutputConfig {
    pub const PATH: FieldPath = FieldPath::new("output.path");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.path.file_name().is_none() {
            diag.error_with_hint(
                Self::PATH,
                format!("`{}` does not name a file", self.path.display()),
                "e.g. \"uglyfeeds/uglyfeed.xml\"",
            );
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("uglyfeeds").join("uglyfeed.xml"),
        }
    }
}
