//! Turns an [`ArticleRecord`] into a feed item.

use super::{ArticleRecord, FeedError};
use crate::{
    config::{GeneratorConfig, LabelsConfig},
    utils::date::to_rfc822,
};
use chrono::{DateTime, Utc};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use rss::{GuidBuilder, ItemBuilder, validation::Validate};

/// Characters escaped in the guid title: everything except ASCII
/// alphanumerics and `_ . - ~ /`.
const TITLE_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b'/');

/// Settings shared by every item of one run.
#[derive(Debug, Clone, Copy)]
pub struct ItemTemplate<'a> {
    pub guid_base: &'a str,
    pub labels: &'a LabelsConfig,
}

impl<'a> ItemTemplate<'a> {
    pub fn from_config(config: &'a GeneratorConfig) -> Self {
        Self {
            guid_base: &config.channel.guid_base,
            labels: &config.labels,
        }
    }
}

/// A feed entry built from one record. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub title: String,
    pub description: String,
    pub pub_date: DateTime<Utc>,
    pub guid: String,
}

impl FeedItem {
    /// Parse the record's timestamp and build the item.
    #[cfg(test)]
    pub fn from_record(
        record: &ArticleRecord,
        template: ItemTemplate<'_>,
        now: DateTime<Utc>,
    ) -> Result<Self, FeedError> {
        let published = record.published_at(now)?;
        Ok(Self::build(record, published, template))
    }

    /// Build the item for an already parsed publish instant.
    pub fn build(
        record: &ArticleRecord,
        published: DateTime<Utc>,
        template: ItemTemplate<'_>,
    ) -> Self {
        let labels = template.labels;
        let title = record.title_or(&labels.no_title).to_string();

        Self {
            guid: guid_for(template.guid_base, &title),
            description: render_description(record, labels),
            pub_date: published,
            title,
        }
    }

    /// Convert into an `rss` item, checking the result is valid RSS.
    pub fn into_rss(self) -> Result<rss::Item, FeedError> {
        let item = ItemBuilder::default()
            .title(self.title)
            .description(self.description)
            .pub_date(to_rfc822(self.pub_date))
            .guid(GuidBuilder::default().permalink(true).value(self.guid).build())
            .build();

        item.validate()
            .map_err(|e| FeedError::Validation(e.to_string()))?;
        Ok(item)
    }
}

/// `base` followed by the URL-quoted title.
pub fn guid_for(base: &str, title: &str) -> String {
    format!("{}{}", base, utf8_percent_encode(title, TITLE_ENCODE_SET))
}

/// Content, then the source list (if any), then the attribution line.
fn render_description(record: &ArticleRecord, labels: &LabelsConfig) -> String {
    let mut out = record.content_or(&labels.no_content).to_string();

    let links = record.links();
    if !links.is_empty() {
        out.push_str(&format!("<br/><br/><small>{}</small><br/>", labels.sources));
        for link in links {
            out.push_str(&format!(
                r#"<small><a href="{link}" target="_blank">{link}</a></small><br/>"#
            ));
        }
    }

    let model = record.model.as_deref().unwrap_or(&labels.unknown);
    let api = record.api.as_deref().unwrap_or(&labels.unknown);
    out.push_str(&format!(
        "<br/><small>{} {} ({})</small>",
        labels.attribution, model, api
    ));

    out
}
