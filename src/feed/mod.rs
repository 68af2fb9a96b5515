//! Feed generation from rewritten-article records.
//!
//! Pipeline:
//!
//! - **Load**: read `*_rewritten.json` records from the input directory
//! - **Open**: parse the existing feed, or start from a fresh channel
//! - **Merge**: admit recent records, sort newest first, cap the item count
//! - **Write**: replace the feed file

mod document;
mod error;
mod item;
mod loader;
mod merge;
mod record;
mod skeleton;

pub use document::{read_channel, write_channel};
pub use error::FeedError;
pub use item::{FeedItem, ItemTemplate};
pub use loader::load_records;
pub use merge::{MergeSummary, Merger};
pub use record::ArticleRecord;
pub use skeleton::new_channel;

use crate::{config::GeneratorConfig, debug, log};
use anyhow::Result;
use chrono::{DateTime, Utc};

/// What a build run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    /// No records found; the feed file was not touched.
    NoInput,
    /// The feed file was written.
    Written(MergeSummary),
}

/// Build or update the feed described by `config`.
pub fn build_feed(config: &GeneratorConfig) -> Result<BuildOutcome> {
    let outcome = generate(config, Utc::now())?;

    let output = config.root_relative(&config.output.path);
    match outcome {
        BuildOutcome::NoInput => {
            log!("input"; "no JSON files found in {}", config.root_relative(&config.input.dir).display());
        }
        BuildOutcome::Written(summary) => {
            log!("feed"; "{}", summary);
            log!("feed"; "RSS feed successfully created at {}", output.display());
        }
    }
    Ok(outcome)
}

/// Run the pipeline with an explicit clock.
pub fn generate(config: &GeneratorConfig, now: DateTime<Utc>) -> Result<BuildOutcome> {
    let records = load_records(&config.input.dir, &config.input.suffix)?;
    if records.is_empty() {
        return Ok(BuildOutcome::NoInput);
    }
    debug!("input"; "loaded {} records", records.len());

    let path = &config.output.path;
    let mut channel = match read_channel(path)? {
        Some(channel) => {
            debug!("feed"; "updating {} ({} items)", path.display(), channel.items().len());
            channel
        }
        None => {
            debug!("feed"; "creating {}", path.display());
            new_channel(&config.channel)?
        }
    };

    let summary = Merger::from_config(config, now).merge_into(&mut channel, &records)?;
    write_channel(&channel, path)?;

    Ok(BuildOutcome::Written(summary))
}
