//! Rewritten-article records, the input side of the feed.

use super::FeedError;
use crate::utils::date::{format_processed_at, parse_processed_at};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One rewritten article as stored in a `*_rewritten.json` file.
///
/// Every field is optional; `null` counts as absent and unknown keys are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub title: Option<String>,
    pub content: Option<String>,
    pub links: Option<Vec<String>>,
    /// `YYYY-MM-DD HH:MM:SS`, UTC.
    pub processed_at: Option<String>,
    /// Provider that generated the rewrite.
    pub api: Option<String>,
    /// Model that generated the rewrite.
    pub model: Option<String>,

    /// File the record was read from, for error messages.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl ArticleRecord {
    /// Title, or `placeholder` when missing or empty.
    pub fn title_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => placeholder,
        }
    }

    /// Content, or `placeholder` when missing.
    pub fn content_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        self.content.as_deref().unwrap_or(placeholder)
    }

    /// Source links; empty when the record has none.
    pub fn links(&self) -> &[String] {
        self.links.as_deref().unwrap_or_default()
    }

    /// Parsed `processed_at`, or `now` when the record has none.
    pub fn published_at(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>, FeedError> {
        let value = match &self.processed_at {
            Some(value) => value.clone(),
            None => format_processed_at(now),
        };
        parse_processed_at(&value).map_err(|source| FeedError::Timestamp {
            value,
            origin: self.origin(),
            source,
        })
    }

    /// Human-readable origin for log and error messages.
    pub fn origin(&self) -> String {
        match &self.source {
            Some(path) => format!("`{}`", path.display()),
            None => "record".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn test_deserialize_full_record() {
        let json = r#"{
            "title": "Titolo",
            "content": "Testo",
            "links": ["https://a.example/1", "https://b.example/2"],
            "processed_at": "2024-06-15 14:30:45",
            "api": "groq",
            "model": "llama3-8b-8192",
            "similarity": 0.92
        }"#;
        let record: ArticleRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.title.as_deref(), Some("Titolo"));
        assert_eq!(record.links().len(), 2);
        assert_eq!(record.api.as_deref(), Some("groq"));
        assert_eq!(record.source, None);
    }

    #[test]
    fn test_deserialize_nulls_and_missing() {
        let record: ArticleRecord =
            serde_json::from_str(r#"{"title": null, "links": null}"#).unwrap();
        assert_eq!(record, ArticleRecord::default());
        assert!(record.links().is_empty());
    }

    #[test]
    fn test_title_placeholder() {
        let mut record = ArticleRecord::default();
        assert_eq!(record.title_or("No Title"), "No Title");

        record.title = Some(String::new());
        assert_eq!(record.title_or("No Title"), "No Title");

        record.title = Some("Real".into());
        assert_eq!(record.title_or("No Title"), "Real");
    }

    #[test]
    fn test_content_placeholder() {
        let mut record = ArticleRecord::default();
        assert_eq!(record.content_or("No Content"), "No Content");

        record.content = Some("Body".into());
        assert_eq!(record.content_or("No Content"), "Body");
    }

    #[test]
    fn test_published_at_defaults_to_now() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 14, 30, 45).unwrap()
            + chrono::TimeDelta::milliseconds(250);
        let record = ArticleRecord::default();
        let published = record.published_at(now).unwrap();
        // second precision
        assert_eq!(published, now.with_nanosecond(0).unwrap());
    }

    #[test]
    fn test_published_at_invalid_names_source() {
        let record = ArticleRecord {
            processed_at: Some("2024-06-15T14:30:45Z".into()),
            source: Some(PathBuf::from("x_rewritten.json")),
            ..ArticleRecord::default()
        };
        let err = record.published_at(Utc::now()).unwrap_err();
        assert!(matches!(err, FeedError::Timestamp { .. }));
        assert!(err.to_string().contains("x_rewritten.json"));
    }
}
