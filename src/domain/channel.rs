//! Creator channel categories and their month-keyed growth totals.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A creator channel category tracked in the growth metrics.
///
/// Declaration order is the order categories appear in the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Website,
    Twitter,
    Youtube,
    Reddit,
    Github,
    Vimeo,
    Twitch,
}

impl Channel {
    /// Every tracked channel.
    pub const ALL: [Self; 7] = [
        Self::Website,
        Self::Twitter,
        Self::Youtube,
        Self::Reddit,
        Self::Github,
        Self::Vimeo,
        Self::Twitch,
    ];

    /// Raw key used by the creator-stats provider.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Website => "website",
            Self::Twitter => "twitter",
            Self::Youtube => "youtube",
            Self::Reddit => "reddit",
            Self::Github => "github",
            Self::Vimeo => "vimeo",
            Self::Twitch => "twitch",
        }
    }

    /// Display label stored in the snapshot.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Website => "Websites",
            Self::Twitter => "Twitter",
            Self::Youtube => "YouTube",
            Self::Reddit => "Reddit",
            Self::Github => "GitHub",
            Self::Vimeo => "Vimeo",
            Self::Twitch => "Twitch",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One daily total from the creator-stats provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrowthRecord {
    /// Record date, `YYYY-MM-DD`.
    pub date: String,
    /// Running total of verified creators on that date.
    pub total: u64,
}

/// Creator totals keyed by month (`YYYY-MM`), then by channel.
///
/// Months iterate in ascending order, so the last entry is the most recent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreatorGrowth {
    months: BTreeMap<String, BTreeMap<Channel, u64>>,
}

impl CreatorGrowth {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a channel's daily series into the month table.
    ///
    /// Records are sorted chronologically first so that each month keeps the
    /// latest daily total observed in it.
    pub fn fold(&mut self, channel: Channel, mut records: Vec<GrowthRecord>) {
        records.sort_by(|a, b| a.date.cmp(&b.date));

        for record in records {
            let month = month_of(&record.date).to_string();
            self.months
                .entry(month)
                .or_default()
                .insert(channel, record.total);
        }
    }

    /// Months in ascending order with their per-channel totals.
    pub fn months(&self) -> impl Iterator<Item = (&str, &BTreeMap<Channel, u64>)> {
        self.months.iter().map(|(month, stats)| (month.as_str(), stats))
    }

    /// The most recent month's per-channel totals.
    #[must_use]
    pub fn latest(&self) -> Option<(&str, &BTreeMap<Channel, u64>)> {
        self.months
            .last_key_value()
            .map(|(month, stats)| (month.as_str(), stats))
    }
}

/// First seven characters of a date (`YYYY-MM`), or the whole string if shorter.
#[must_use]
pub fn month_of(date: &str) -> &str {
    date.get(..7).unwrap_or(date)
}
