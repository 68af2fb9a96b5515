//! `[labels]` configuration: literal text placed into feed items.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelsConfig {
    /// Title used when a record has none.
    pub no_title: String,
    /// Description body used when a record has no content.
    pub no_content: String,
    /// Heading above the list of source links.
    pub sources: String,
    /// Prefix of the attribution line.
    pub attribution: String,
    /// Stand-in for a missing model or provider name.
    pub unknown: String,
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            no_title: "No Title".into(),
            no_content: "No Content".into(),
            sources: "Sources:".into(),
            attribution: "Generated by".into(),
            unknown: "Unknown".into(),
        }
    }
}
