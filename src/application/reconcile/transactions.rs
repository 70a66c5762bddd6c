//! Transaction section merge: watermark planning, upsert and resort.

use tracing::warn;

use crate::domain::{Exchange, OrderSet, Snapshot, Watermark};

/// Which watermark each venue should be queried with this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPlan {
    /// True when the snapshot held no transactions and everything is refetched.
    pub full: bool,
    /// Watermark per venue, in query order.
    pub watermarks: Vec<(Exchange, Watermark)>,
}

impl FetchPlan {
    /// Plan the fetch for `venues` against the already-persisted records.
    ///
    /// An empty section triggers a full rebuild with a zero watermark for
    /// every venue. Otherwise each venue's watermark is derived from its own
    /// records only.
    #[must_use]
    pub fn for_existing(existing: &OrderSet, venues: &[Exchange]) -> Self {
        let full = existing.is_empty();
        let watermarks = venues
            .iter()
            .map(|&exchange| {
                let watermark = if full {
                    Watermark::full()
                } else {
                    Watermark::from_existing(existing, exchange)
                };
                (exchange, watermark)
            })
            .collect();

        Self { full, watermarks }
    }

    /// Watermark planned for `exchange`.
    #[must_use]
    pub fn watermark(&self, exchange: Exchange) -> Option<&Watermark> {
        self.watermarks
            .iter()
            .find(|(venue, _)| *venue == exchange)
            .map(|(_, watermark)| watermark)
    }
}

/// Counts describing one transaction merge. Informational only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransactionSummary {
    /// Transactions present before the merge.
    pub existing: usize,
    /// Ids that were not present before.
    pub added: usize,
    /// Ids that were present and got overwritten.
    pub replaced: usize,
}

/// Upsert freshly fetched orders and resort the section newest first.
///
/// Keys are overwritten, never duplicated, so merging the same fetch twice
/// leaves the section unchanged. When two venues report the same id the
/// later one wins.
#[must_use]
pub fn merge_transactions(
    mut snapshot: Snapshot,
    fetched: Vec<(Exchange, OrderSet)>,
) -> (Snapshot, TransactionSummary) {
    let mut summary = TransactionSummary {
        existing: snapshot.transactions.len(),
        ..TransactionSummary::default()
    };

    for (exchange, orders) in fetched {
        for (id, order) in orders {
            match snapshot.transactions.get(&id) {
                Some(previous) if previous.source != order.source => {
                    warn!(
                        id = %id,
                        existing = %previous.source,
                        incoming = %exchange,
                        "Order id reported by two venues, keeping the latest"
                    );
                    summary.replaced += 1;
                }
                Some(_) => summary.replaced += 1,
                None => summary.added += 1,
            }
            snapshot.transactions.insert(id, order);
        }
    }

    sort_newest_first(&mut snapshot.transactions);
    (snapshot, summary)
}

/// Sort by `date` descending; ties are broken by id for a stable document.
pub fn sort_newest_first(transactions: &mut OrderSet) {
    transactions.sort_by(|a_id, a, b_id, b| b.date.cmp(&a.date).then_with(|| a_id.cmp(b_id)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TransactionOrder;
    use rust_decimal_macros::dec;

    fn order(source: Exchange, date: i64) -> TransactionOrder {
        TransactionOrder::new(source, date, dec!(10))
    }

    fn set(entries: &[(&str, Exchange, i64)]) -> OrderSet {
        entries
            .iter()
            .map(|(id, source, date)| ((*id).to_string(), order(*source, *date)))
            .collect()
    }

    #[test]
    fn empty_section_plans_a_full_fetch() {
        let plan = FetchPlan::for_existing(&OrderSet::new(), &Exchange::ALL);

        assert!(plan.full);
        assert!(plan.watermarks.iter().all(|(_, wm)| wm.is_full()));
        assert_eq!(plan.watermark(Exchange::Uphold), Some(&Watermark::Since(0)));
    }

    #[test]
    fn populated_section_plans_per_venue_watermarks() {
        let existing = set(&[
            ("g", Exchange::Gemini, 200),
            ("c", Exchange::Coinbase, 700),
            ("u", Exchange::Uphold, 50),
        ]);
        let plan = FetchPlan::for_existing(&existing, &Exchange::ALL);

        assert!(!plan.full);
        assert_eq!(plan.watermark(Exchange::Gemini), Some(&Watermark::Since(200)));
        assert_eq!(plan.watermark(Exchange::Coinbase), Some(&Watermark::Since(700)));
        assert!(matches!(
            plan.watermark(Exchange::Uphold),
            Some(Watermark::Known(ids)) if ids.len() == 1
        ));
    }

    #[test]
    fn merging_into_empty_section_yields_exactly_the_fetch() {
        let fetched = set(&[("a", Exchange::Gemini, 1), ("b", Exchange::Gemini, 2)]);
        let (merged, summary) =
            merge_transactions(Snapshot::empty(), vec![(Exchange::Gemini, fetched.clone())]);

        assert_eq!(merged.transactions.len(), 2);
        for (id, order) in &fetched {
            assert_eq!(merged.transactions.get(id), Some(order));
        }
        assert_eq!(summary.added, 2);
        assert_eq!(summary.existing, 0);
    }

    #[test]
    fn merge_is_idempotent() {
        let fetched = vec![(
            Exchange::Coinbase,
            set(&[("x", Exchange::Coinbase, 5), ("y", Exchange::Coinbase, 9)]),
        )];

        let (once, _) = merge_transactions(Snapshot::empty(), fetched.clone());
        let (twice, summary) = merge_transactions(once.clone(), fetched);

        assert_eq!(once.transactions, twice.transactions);
        assert_eq!(summary.added, 0);
        assert_eq!(summary.replaced, 2);
    }

    #[test]
    fn section_is_resorted_by_date_descending() {
        let fetched = set(&[
            ("first", Exchange::Uphold, 100),
            ("third", Exchange::Uphold, 300),
            ("second", Exchange::Uphold, 200),
        ]);
        let (merged, _) = merge_transactions(Snapshot::empty(), vec![(Exchange::Uphold, fetched)]);

        let dates: Vec<_> = merged.transactions.values().map(|o| o.date).collect();
        assert_eq!(dates, vec![300, 200, 100]);
    }

    #[test]
    fn colliding_id_from_later_venue_wins() {
        let (merged, summary) = merge_transactions(
            Snapshot::empty(),
            vec![
                (Exchange::Gemini, set(&[("dup", Exchange::Gemini, 1)])),
                (Exchange::Coinbase, set(&[("dup", Exchange::Coinbase, 2)])),
            ],
        );

        assert_eq!(merged.transactions.len(), 1);
        assert_eq!(merged.transactions["dup"].source, Exchange::Coinbase);
        assert_eq!(summary.added, 1);
        assert_eq!(summary.replaced, 1);
    }
}
