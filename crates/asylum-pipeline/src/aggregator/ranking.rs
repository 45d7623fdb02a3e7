//! Top-N ranking of aggregated totals.

use super::grouping::{AggregateEntry, Totals};
use log::debug;
use std::hash::Hash;

/// Rank totals descending and keep the first `top_n`
///
/// The sort is stable: equal totals keep the order in which their keys were
/// first seen during aggregation. Asking for more entries than exist returns
/// all of them.
///
/// # Example
/// ```ignore
/// let hosts = rank_top_n(&totals, DEFAULT_TOP_N);
/// ```
pub fn rank_top_n<K>(totals: &Totals<K>, top_n: usize) -> Vec<AggregateEntry<K>>
where
    K: Hash + Eq + Clone,
{
    debug!("Ranking top {} of {} keys", top_n, totals.len());

    let mut entries = totals.to_entries();
    entries.sort_by(|a, b| b.total.total_cmp(&a.total));
    entries.truncate(top_n);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ties() -> Totals<&'static str> {
        let mut totals = Totals::new();
        totals.add("A", 10.0);
        totals.add("B", 10.0);
        totals.add("C", 5.0);
        totals
    }

    fn keys(entries: &[AggregateEntry<&'static str>]) -> Vec<&'static str> {
        entries.iter().map(|e| e.key).collect()
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        assert_eq!(keys(&rank_top_n(&ties(), 10)), vec!["A", "B", "C"]);
        assert_eq!(keys(&rank_top_n(&ties(), 2)), vec!["A", "B"]);
    }

    #[test]
    fn test_tie_order_follows_first_encounter_not_value_updates() {
        let mut totals = Totals::new();
        totals.add("late", 4.0);
        totals.add("early", 10.0);
        totals.add("late", 6.0);
        assert_eq!(keys(&rank_top_n(&totals, 10)), vec!["late", "early"]);
    }

    #[test]
    fn test_descending() {
        let mut totals = Totals::new();
        totals.add("small", 1.0);
        totals.add("big", 100.0);
        totals.add("mid", 50.0);
        let ranked = rank_top_n(&totals, 10);
        assert_eq!(keys(&ranked), vec!["big", "mid", "small"]);
        assert_eq!(ranked[0].total, 100.0);
    }

    #[test]
    fn test_n_edge_cases() {
        assert!(rank_top_n(&ties(), 0).is_empty());
        assert_eq!(rank_top_n(&ties(), 1000).len(), 3);
        assert!(rank_top_n(&Totals::<String>::new(), 10).is_empty());
    }
}
