//! Merges new records into a feed's item list.
//!
//! Steps, in order:
//!
//! 1. `cutoff = now - max_age_days`
//! 2. Records published before the cutoff are dropped silently
//! 3. Existing items (untouched) are followed by the new items
//! 4. Stable sort by publish date, newest first
//! 5. Drop later items whose guid was already seen
//! 6. Keep the first `max_items`
//!
//! Existing items are never age-checked again; only the cap trims them.

use super::{ArticleRecord, FeedError, FeedItem, ItemTemplate};
use crate::{
    config::{GeneratorConfig, RetentionConfig},
    debug, log,
    utils::date::{days_before, parse_pub_date},
};
use chrono::{DateTime, Utc};
use rss::{Channel, Item};
use std::{collections::HashSet, fmt};

/// Counts describing one merge, for the run log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeSummary {
    /// Items present before the merge.
    pub existing: usize,
    /// Records admitted as new items.
    pub admitted: usize,
    /// Records older than the cutoff.
    pub too_old: usize,
    /// Records skipped for a malformed timestamp (`skip_invalid` only).
    pub invalid: usize,
    /// Items removed because a newer item has the same guid.
    pub duplicates: usize,
    /// Items removed by the cap.
    pub dropped: usize,
    /// Items in the feed after the merge.
    pub total: usize,
}

impl fmt::Display for MergeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} existing + {} new = {} items",
            self.existing, self.admitted, self.total
        )?;
        if self.too_old > 0 {
            write!(f, ", {} too old", self.too_old)?;
        }
        if self.invalid > 0 {
            write!(f, ", {} invalid", self.invalid)?;
        }
        if self.duplicates > 0 {
            write!(f, ", {} duplicate guids", self.duplicates)?;
        }
        if self.dropped > 0 {
            write!(f, ", {} over the cap", self.dropped)?;
        }
        Ok(())
    }
}

/// Feed merger bound to one run's settings and clock.
#[derive(Debug, Clone, Copy)]
pub struct Merger<'a> {
    template: ItemTemplate<'a>,
    retention: RetentionConfig,
    skip_invalid: bool,
    now: DateTime<Utc>,
}

impl<'a> Merger<'a> {
    pub fn new(
        template: ItemTemplate<'a>,
        retention: RetentionConfig,
        skip_invalid: bool,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            template,
            retention,
            skip_invalid,
            now,
        }
    }

    pub fn from_config(config: &'a GeneratorConfig, now: DateTime<Utc>) -> Self {
        Self::new(
            ItemTemplate::from_config(config),
            config.feed,
            config.input.skip_invalid,
            now,
        )
    }

    /// Replace the channel's items with the merged list.
    ///
    /// Channel metadata is left as it is.
    pub fn merge_into(
        &self,
        channel: &mut Channel,
        records: &[ArticleRecord],
    ) -> Result<MergeSummary, FeedError> {
        let existing = channel.items().to_vec();
        let (items, summary) = self.merge(existing, records)?;
        channel.set_items(items);
        Ok(summary)
    }

    /// Merge `records` into `existing` and return the final item list.
    pub fn merge(
        &self,
        existing: Vec<Item>,
        records: &[ArticleRecord],
    ) -> Result<(Vec<Item>, MergeSummary), FeedError> {
        let mut summary = MergeSummary {
            existing: existing.len(),
            ..MergeSummary::default()
        };

        let fresh = self.admit(records, &mut summary)?;
        summary.admitted = fresh.len();

        let mut dated: Vec<(Option<DateTime<Utc>>, Item)> = existing
            .into_iter()
            .map(|item| (item.pub_date().and_then(parse_pub_date), item))
            .collect();
        for item in fresh {
            let published = item.pub_date;
            dated.push((Some(published), item.into_rss()?));
        }

        // Stable: equal dates keep existing-then-new input order.
        // `None` orders below every date, so undated items sink to the end.
        dated.sort_by(|a, b| b.0.cmp(&a.0));

        let before = dated.len();
        let mut seen = HashSet::new();
        dated.retain(|(_, item)| match item.guid() {
            Some(guid) => seen.insert(guid.value().to_string()),
            None => true,
        });
        summary.duplicates = before - dated.len();

        summary.dropped = dated.len().saturating_sub(self.retention.max_items);
        dated.truncate(self.retention.max_items);
        summary.total = dated.len();

        Ok((dated.into_iter().map(|(_, item)| item).collect(), summary))
    }

    /// Build items for records published at or after the cutoff.
    fn admit(
        &self,
        records: &[ArticleRecord],
        summary: &mut MergeSummary,
    ) -> Result<Vec<FeedItem>, FeedError> {
        let cutoff = days_before(self.now, self.retention.max_age_days);
        let mut admitted = Vec::with_capacity(records.len());

        for record in records {
            let published = match record.published_at(self.now) {
                Ok(published) => published,
                Err(e) if self.skip_invalid => {
                    log!("warning"; "skipping {}: {}", record.origin(), e);
                    summary.invalid += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };

            if published < cutoff {
                debug!("merge"; "{} is older than {} days", record.origin(), self.retention.max_age_days);
                summary.too_old += 1;
                continue;
            }

            admitted.push(FeedItem::build(record, published, self.template));
        }

        Ok(admitted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::LabelsConfig, utils::date::format_processed_at};
    use chrono::{TimeDelta, TimeZone};
    use rss::ItemBuilder;

    const BASE: &str = "https://example.com/";

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn merger(labels: &LabelsConfig, max_items: usize, max_age_days: u32) -> Merger<'_> {
        Merger::new(
            ItemTemplate {
                guid_base: BASE,
                labels,
            },
            RetentionConfig {
                max_items,
                max_age_days,
            },
            false,
            now(),
        )
    }

    fn days_ago(days: i64) -> DateTime<Utc> {
        now() - TimeDelta::days(days)
    }

    fn record(title: &str, at: DateTime<Utc>) -> ArticleRecord {
        ArticleRecord {
            title: Some(title.into()),
            processed_at: Some(format_processed_at(at)),
            ..ArticleRecord::default()
        }
    }

    fn existing(title: &str, at: DateTime<Utc>) -> Item {
        ItemBuilder::default()
            .title(title.to_string())
            .pub_date(crate::utils::date::to_rfc822(at))
            .build()
    }

    fn titles(items: &[Item]) -> Vec<&str> {
        items.iter().filter_map(Item::title).collect()
    }

    fn is_non_increasing(items: &[Item]) -> bool {
        let dates: Vec<_> = items
            .iter()
            .map(|i| i.pub_date().and_then(parse_pub_date))
            .collect();
        dates.windows(2).all(|w| w[0] >= w[1])
    }

    #[test]
    fn test_new_item_sorted_before_existing_and_capped() {
        // existing day-1 and day-40, new today, cap 2
        let labels = LabelsConfig::default();
        let old = vec![existing("day-40", days_ago(40)), existing("day-1", days_ago(1))];
        let records = [record("today", now())];

        let (items, summary) = merger(&labels, 2, 30).merge(old, &records).unwrap();

        assert_eq!(titles(&items), ["today", "day-1"]);
        assert_eq!(
            summary,
            MergeSummary {
                existing: 2,
                admitted: 1,
                too_old: 0,
                invalid: 0,
                duplicates: 0,
                dropped: 1,
                total: 2,
            }
        );
    }

    #[test]
    fn test_existing_items_not_age_filtered() {
        let labels = LabelsConfig::default();
        let old = vec![existing("ancient", days_ago(400))];

        let (items, _) = merger(&labels, 10, 30).merge(old, &[]).unwrap();
        assert_eq!(titles(&items), ["ancient"]);
    }

    #[test]
    fn test_old_records_dropped_silently() {
        let labels = LabelsConfig::default();
        let records = [
            record("fresh", days_ago(2)),
            record("stale", days_ago(31)),
            record("edge", days_ago(30)),
        ];

        let (items, summary) = merger(&labels, 10, 30).merge(Vec::new(), &records).unwrap();
        assert_eq!(titles(&items), ["fresh", "edge"]);
        assert_eq!(summary.too_old, 1);
        assert_eq!(summary.admitted, 2);
    }

    #[test]
    fn test_zero_age_admits_only_now_or_later() {
        let labels = LabelsConfig::default();
        let records = [
            record("now", now()),
            record("a second ago", now() - TimeDelta::seconds(1)),
        ];
        let (items, _) = merger(&labels, 10, 0).merge(Vec::new(), &records).unwrap();
        assert_eq!(titles(&items), ["now"]);
    }

    #[test]
    fn test_idempotent_without_new_records() {
        let labels = LabelsConfig::default();
        let old = vec![
            existing("b", days_ago(5)),
            existing("a", days_ago(1)),
            existing("c", days_ago(9)),
        ];

        let m = merger(&labels, 3, 30);
        let (once, _) = m.merge(old, &[]).unwrap();
        assert_eq!(titles(&once), ["a", "b", "c"]);

        let (twice, summary) = m.merge(once.clone(), &[]).unwrap();
        assert_eq!(twice, once);
        assert_eq!(summary.dropped, 0);
    }

    #[test]
    fn test_cap_and_order_invariants() {
        let labels = LabelsConfig::default();
        for max_items in [0, 1, 3, 7, 20] {
            let old: Vec<_> = (0..6)
                .map(|i| existing(&format!("old-{i}"), days_ago(i * 3)))
                .collect();
            let records: Vec<_> = (0..6)
                .map(|i| record(&format!("new-{i}"), days_ago(i * 7)))
                .collect();

            let (items, summary) = merger(&labels, max_items, 30).merge(old, &records).unwrap();
            assert!(items.len() <= max_items);
            assert_eq!(summary.total, items.len());
            assert!(is_non_increasing(&items));
        }
    }

    #[test]
    fn test_ties_keep_existing_before_new() {
        let labels = LabelsConfig::default();
        let at = days_ago(1);
        let old = vec![existing("old", at)];
        let records = [record("new-1", at), record("new-2", at)];

        let (items, _) = merger(&labels, 10, 30).merge(old, &records).unwrap();
        assert_eq!(titles(&items), ["old", "new-1", "new-2"]);
    }

    fn existing_with_guid(title: &str, at: DateTime<Utc>) -> Item {
        let mut item = existing(title, at);
        item.set_guid(
            rss::GuidBuilder::default()
                .permalink(true)
                .value(super::super::item::guid_for(BASE, title))
                .build(),
        );
        item
    }

    fn guids(items: &[Item]) -> Vec<&str> {
        items.iter().filter_map(|i| i.guid().map(|g| g.value())).collect()
    }

    #[test]
    fn test_same_guid_kept_once_newest_wins() {
        let labels = LabelsConfig::default();
        let old = vec![existing_with_guid("a", days_ago(3)), existing_with_guid("b", days_ago(2))];
        let records = [record("a", days_ago(1)), record("b", days_ago(2))];

        let (items, summary) = merger(&labels, 50, 30).merge(old, &records).unwrap();

        assert_eq!(guids(&items), [format!("{BASE}a"), format!("{BASE}b")]);
        // "a" comes from the new record; "b" ties, so the existing entry stays
        assert_eq!(items[0].pub_date(), Some(crate::utils::date::to_rfc822(days_ago(1)).as_str()));
        assert_eq!(summary.duplicates, 2);
        assert_eq!(summary.total, 2);
    }

    #[test]
    fn test_remerging_same_records_adds_nothing() {
        let labels = LabelsConfig::default();
        let records = [record("a", days_ago(1)), record("b", days_ago(2))];
        let m = merger(&labels, 50, 30);

        let (first, _) = m.merge(Vec::new(), &records).unwrap();
        let (second, _) = m.merge(first.clone(), &records).unwrap();
        let (third, summary) = m.merge(second, &records).unwrap();

        assert_eq!(third, first);
        assert_eq!(summary.duplicates, 2);
    }

    #[test]
    fn test_items_without_guid_are_not_deduplicated() {
        let labels = LabelsConfig::default();
        let old = vec![existing("same", days_ago(1)), existing("same", days_ago(1))];

        let (items, summary) = merger(&labels, 50, 30).merge(old, &[]).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(summary.duplicates, 0);
    }

    #[test]
    fn test_undated_existing_items_sort_last() {
        let labels = LabelsConfig::default();
        let undated = ItemBuilder::default().title("undated".to_string()).build();
        let garbled = ItemBuilder::default()
            .title("garbled".to_string())
            .pub_date("yesterday".to_string())
            .build();
        let old = vec![undated, existing("dated", days_ago(3)), garbled];

        let (items, _) = merger(&labels, 10, 30).merge(old, &[]).unwrap();
        assert_eq!(titles(&items), ["dated", "undated", "garbled"]);
    }

    #[test]
    fn test_invalid_timestamp_aborts() {
        let labels = LabelsConfig::default();
        let mut bad = record("bad", now());
        bad.processed_at = Some("June 15th".into());
        let records = [record("good", now()), bad];

        let result = merger(&labels, 10, 30).merge(Vec::new(), &records);
        assert!(matches!(result, Err(FeedError::Timestamp { .. })));
    }

    #[test]
    fn test_invalid_timestamp_skipped_when_enabled() {
        let labels = LabelsConfig::default();
        let mut bad = record("bad", now());
        bad.processed_at = Some("June 15th".into());
        let records = [record("good", now()), bad];

        let mut m = merger(&labels, 10, 30);
        m.skip_invalid = true;
        let (items, summary) = m.merge(Vec::new(), &records).unwrap();
        assert_eq!(titles(&items), ["good"]);
        assert_eq!(summary.invalid, 1);
    }

    #[test]
    fn test_missing_timestamp_uses_now() {
        let labels = LabelsConfig::default();
        let rec = ArticleRecord {
            title: Some("undated".into()),
            ..ArticleRecord::default()
        };
        let (items, _) = merger(&labels, 10, 0).merge(Vec::new(), &[rec]).unwrap();
        assert_eq!(items[0].pub_date(), Some("Sat, 15 Jun 2024 12:00:00 GMT"));
    }

    #[test]
    fn test_merge_into_keeps_channel_metadata() {
        let labels = LabelsConfig::default();
        let mut channel = rss::ChannelBuilder::default()
            .title("Kept")
            .link("https://example.com")
            .description("Kept too")
            .items(vec![existing("old", days_ago(2))])
            .build();

        let summary = merger(&labels, 10, 30)
            .merge_into(&mut channel, &[record("new", days_ago(1))])
            .unwrap();

        assert_eq!(channel.title(), "Kept");
        assert_eq!(channel.description(), "Kept too");
        assert_eq!(titles(channel.items()), ["new", "old"]);
        assert_eq!(summary.to_string(), "1 existing + 1 new = 2 items");
    }

    #[test]
    fn test_summary_display_mentions_drops() {
        let summary = MergeSummary {
            existing: 5,
            admitted: 2,
            too_old: 1,
            invalid: 0,
            duplicates: 2,
            dropped: 3,
            total: 4,
        };
        assert_eq!(
            summary.to_string(),
            "5 existing + 2 new = 4 items, 1 too old, 2 duplicate guids, 3 over the cap"
        );
    }
}
