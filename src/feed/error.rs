//! Feed generation errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading records or reading/writing the feed.
///
/// All of them abort the run; nothing is written once one occurs.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("IO error at `{path}`")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in `{path}`")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid processed_at `{value}` in {origin}, expected `YYYY-MM-DD HH:MM:SS`")]
    Timestamp {
        value: String,
        origin: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("failed to parse existing feed `{path}`")]
    Document {
        path: PathBuf,
        #[source]
        source: rss::Error,
    },

    #[error("failed to serialize feed")]
    Serialize(#[source] rss::Error),

    #[error("feed validation failed: {0}")]
    Validation(String),
}

impl FeedError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}
