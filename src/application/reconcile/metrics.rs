//! Creator growth section merge.

use indexmap::IndexMap;

use crate::domain::{CreatorGrowth, Snapshot};

/// Merge month-by-month category totals into the metrics section.
///
/// Each fetched month replaces the stored one (labels translated) and its
/// aggregate growth is recomputed as the sum of the categories. The
/// "current" categories are taken from the most recent fetched month only.
#[must_use]
pub fn merge_metrics(mut snapshot: Snapshot, growth: &CreatorGrowth) -> Snapshot {
    let metrics = &mut snapshot.metrics;

    for (month, stats) in growth.months() {
        let labelled: IndexMap<String, u64> = stats
            .iter()
            .map(|(channel, total)| (channel.label().to_string(), *total))
            .collect();

        metrics
            .growth
            .insert(month.to_string(), stats.values().sum::<u64>());
        metrics
            .category_growth
            .insert(month.to_string(), labelled);
    }

    if let Some((_, latest)) = growth.latest() {
        for (channel, total) in latest {
            metrics
                .categories
                .insert(channel.label().to_string(), *total);
        }
    }

    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Channel, GrowthRecord};

    fn growth(entries: &[(Channel, &str, u64)]) -> CreatorGrowth {
        let mut growth = CreatorGrowth::new();
        for (channel, date, total) in entries {
            growth.fold(
                *channel,
                vec![GrowthRecord {
                    date: (*date).to_string(),
                    total: *total,
                }],
            );
        }
        growth
    }

    #[test]
    fn youtube_is_translated_to_display_label() {
        let merged = merge_metrics(
            Snapshot::empty(),
            &growth(&[(Channel::Youtube, "2024-05-31", 42)]),
        );

        assert_eq!(merged.metrics.categories["YouTube"], 42);
        assert_eq!(merged.metrics.category_growth["2024-05"]["YouTube"], 42);
        assert!(!merged.metrics.categories.contains_key("youtube"));
    }

    #[test]
    fn growth_is_the_sum_of_categories() {
        let merged = merge_metrics(
            Snapshot::empty(),
            &growth(&[
                (Channel::Website, "2024-05-31", 100),
                (Channel::Twitter, "2024-05-31", 20),
                (Channel::Twitch, "2024-05-31", 3),
            ]),
        );
        assert_eq!(merged.metrics.growth["2024-05"], 123);
    }

    #[test]
    fn current_categories_come_from_latest_month_only() {
        let mut snapshot = Snapshot::empty();
        snapshot.metrics.categories.insert("Reddit".into(), 7);

        let merged = merge_metrics(
            snapshot,
            &growth(&[
                (Channel::Github, "2024-04-30", 50),
                (Channel::Github, "2024-05-31", 55),
                (Channel::Reddit, "2024-04-30", 9),
            ]),
        );

        assert_eq!(merged.metrics.categories["GitHub"], 55);
        // Reddit has no figure in the latest month, so the stored value stays.
        assert_eq!(merged.metrics.categories["Reddit"], 7);
        assert_eq!(merged.metrics.growth["2024-04"], 59);
    }

    #[test]
    fn revised_older_month_overwrites_stored_month() {
        let mut snapshot = Snapshot::empty();
        snapshot.metrics.growth.insert("2024-01".into(), 1);

        let merged = merge_metrics(snapshot, &growth(&[(Channel::Vimeo, "2024-01-10", 8)]));

        assert_eq!(merged.metrics.growth["2024-01"], 8);
        assert_eq!(merged.metrics.growth.len(), 1);
    }
}
