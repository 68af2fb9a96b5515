//! `[channel]` configuration.
//!
//! Metadata written into a feed the first time it is created. An existing
//! feed keeps its own channel metadata; these values are not re-applied.

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

/// Channel metadata and identifier base for new feeds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    /// Channel title.
    pub title: String,

    /// Project URL shown as the channel link.
    pub link: String,

    /// Channel description.
    pub description: String,

    /// Language code (e.g., "it", "en").
    pub language: String,

    /// Public URL of the feed itself, emitted as `atom:link rel="self"`.
    pub self_link: String,

    /// Prefix of every item guid; the percent-encoded title is appended.
    pub guid_base: String,
}

impl ChannelConfig {
    pub const TITLE: FieldPath = FieldPath::new("channel.title");
    pub const LINK: FieldPath = FieldPath::new("channel.link");
    pub const LANGUAGE: FieldPath = FieldPath::new("channel.language");
    pub const SELF_LINK: FieldPath = FieldPath::new("channel.self_link");
    pub const GUID_BASE: FieldPath = FieldPath::new("channel.guid_base");

    /// Validate channel configuration.
    ///
    /// # Checks
    /// - `title` and `language` are non-empty
    /// - `link`, `self_link` and `guid_base` are http(s) URLs with a host
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.title.trim().is_empty() {
            diag.error(Self::TITLE, "must not be empty");
        }
        if self.language.trim().is_empty() {
            diag.error_with_hint(Self::LANGUAGE, "must not be empty", "e.g. \"it\" or \"en\"");
        }

        for (field, value) in [
            (Self::LINK, &self.link),
            (Self::SELF_LINK, &self.self_link),
            (Self::GUID_BASE, &self.guid_base),
        ] {
            validate_http_url(field, value, diag);
        }
    }
}

/// Report `value` unless it parses as an http(s) URL with a host.
fn validate_http_url(field: FieldPath, value: &str, diag: &mut ConfigDiagnostics) {
    match url::Url::parse(value) {
        Ok(parsed) => {
            if !matches!(parsed.scheme(), "http" | "https") {
                diag.error_with_hint(
                    field,
                    format!(
                        "scheme '{}' not supported, must be http or https",
                        parsed.scheme()
                    ),
                    "use format like https://example.com",
                );
            }
            if parsed.host_str().is_none() {
                diag.error_with_hint(
                    field,
                    "URL must have a valid host",
                    "use format like https://example.com",
                );
            }
        }
        Err(e) => {
            diag.error_with_hint(
                field,
                format!("invalid URL: {}", e),
                "use format like https://example.com",
            );
        }
    }
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            title: "Feed di Notizie UglyCitizen".into(),
            link: "https://github.com/fabriziosalmi/UglyFeed".into(),
            description: "Feed di notizie aggregato e riscritto da UglyCitizen".into(),
            language: "it".into(),
            self_link: "https://github.com/fabriziosalmi/UglyFeed/uglyfeeds/uglyfeed.xml".into(),
            guid_base: "https://github.com/fabriziosalmi/UglyFeed/".into(),
        }
    }
}
