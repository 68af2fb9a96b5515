//! Channel for a feed that does not exist yet.

use super::FeedError;
use crate::config::ChannelConfig;
use rss::{
    Channel, ChannelBuilder,
    extension::atom::{AtomExtension, Link},
    validation::Validate,
};
use std::collections::BTreeMap;

/// Namespace bound to the `atom` prefix in the document root.
pub const ATOM_NAMESPACE: &str = "http://www.w3.org/2005/Atom";

/// MIME type advertised by the self link.
const RSS_MIME_TYPE: &str = "application/rss+xml";

/// Build an empty channel from configured metadata, with an
/// `atom:link rel="self"` pointing at the feed's public URL.
///
/// Channels parsed from an existing feed keep whatever metadata they carry;
/// this is only used when there is no feed yet.
pub fn new_channel(config: &ChannelConfig) -> Result<Channel, FeedError> {
    let mut self_link = Link::default();
    self_link.set_href(config.self_link.clone());
    self_link.set_rel("self");
    self_link.set_mime_type(RSS_MIME_TYPE.to_string());

    let mut atom = AtomExtension::default();
    atom.set_links(vec![self_link]);

    let channel = ChannelBuilder::default()
        .title(&config.title)
        .link(&config.link)
        .description(&config.description)
        .language(Some(config.language.clone()))
        .namespaces(BTreeMap::from([(
            "atom".to_string(),
            ATOM_NAMESPACE.to_string(),
        )]))
        .atom_ext(Some(atom))
        .build();

    channel
        .validate()
        .map_err(|e| FeedError::Validation(e.to_string()))?;
    Ok(channel)
}
