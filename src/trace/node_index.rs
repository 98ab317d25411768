//! Node index construction.
//!
//! Maps every strictly numeric node id referenced by the trace (as source or
//! destination) to a vertical display row. Ids are sorted descending, so the
//! numerically largest id gets row 0. Sentinel endpoints such as `all` and
//! `client` never enter the index; looking them up yields `None` and the
//! caller decides what to do with the event.

use std::collections::{BTreeSet, HashMap};

use super::types::Trace;

/// Bijective map from numeric node id to display row `0..len`.
#[derive(Debug, Clone, Default)]
pub struct NodeIndex {
    /// Ids in display order: index == row, largest id first.
    ordered_ids: Vec<u32>,
    row_by_id: HashMap<u32, usize>,
}

impl NodeIndex {
    /// Build the index from every distinct numeric source/destination value.
    pub fn from_trace(trace: &Trace) -> Self {
        let mut ids: BTreeSet<u32> = BTreeSet::new();
        for event in &trace.events {
            if let Some(id) = parse_node_id(&event.source) {
                ids.insert(id);
            }
            if let Some(id) = parse_node_id(&event.destination) {
                ids.insert(id);
            }
        }

        let ordered_ids: Vec<u32> = ids.into_iter().rev().collect();
        let row_by_id = ordered_ids
            .iter()
            .enumerate()
            .map(|(row, id)| (*id, row))
            .collect();
        Self {
            ordered_ids,
            row_by_id,
        }
    }

    /// Display row for a raw source/destination value.
    ///
    /// Total over arbitrary input: sentinels, malformed ids, and ids absent
    /// from the trace all yield `None`.
    pub fn row_of(&self, raw: &str) -> Option<usize> {
        self.row_by_id.get(&parse_node_id(raw)?).copied()
    }

    /// Rows in display order as `(row, node_id)` pairs, row 0 first.
    pub fn iter_rows(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.ordered_ids.iter().copied().enumerate()
    }

    pub fn len(&self) -> usize {
        self.ordered_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered_ids.is_empty()
    }
}

/// Parse a raw endpoint value as a node id.
///
/// A node id is strictly numeric: every character an ASCII digit. This
/// rejects sentinels (`all`, `client`), signs, and embedded whitespace.
pub fn parse_node_id(raw: &str) -> Option<u32> {
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::types::EventRecord;
    use chrono::{TimeZone, Utc};

    fn event(source: &str, destination: &str) -> EventRecord {
        EventRecord {
            timestamp: Utc.timestamp_opt(0, 0).unwrap(),
            source: source.to_string(),
            destination: destination.to_string(),
            action: "RECV".to_string(),
            proposal_num: None,
            proposal_val: None,
        }
    }

    #[test]
    fn test_largest_id_gets_row_zero() {
        let trace = Trace::new(vec![event("1", "2"), event("3", "1")]);
        let index = NodeIndex::from_trace(&trace);
        assert_eq!(index.row_of("3"), Some(0));
        assert_eq!(index.row_of("2"), Some(1));
        assert_eq!(index.row_of("1"), Some(2));
    }

    #[test]
    fn test_index_is_a_bijection() {
        let trace = Trace::new(vec![event("5", "12"), event("7", "5"), event("12", "7")]);
        let index = NodeIndex::from_trace(&trace);
        let mut rows: Vec<usize> = index.iter_rows().map(|(row, _)| row).collect();
        rows.sort_unstable();
        assert_eq!(rows, (0..index.len()).collect::<Vec<_>>());
    }

    #[test]
    fn test_sentinels_are_excluded() {
        let trace = Trace::new(vec![event("1", "all"), event("client", "2")]);
        let index = NodeIndex::from_trace(&trace);
        assert_eq!(index.len(), 2);
        assert_eq!(index.row_of("all"), None);
        assert_eq!(index.row_of("client"), None);
    }

    #[test]
    fn test_empty_index_for_sentinel_only_trace() {
        let trace = Trace::new(vec![event("all", "client")]);
        let index = NodeIndex::from_trace(&trace);
        assert!(index.is_empty());
        assert_eq!(index.iter_rows().count(), 0);
    }

    #[test]
    fn test_leading_zeros_name_the_same_node() {
        let trace = Trace::new(vec![event("007", "7")]);
        let index = NodeIndex::from_trace(&trace);
        assert_eq!(index.len(), 1);
        assert_eq!(index.row_of("007"), index.row_of("7"));
    }

    #[test]
    fn test_parse_node_id_rejects_non_digits() {
        assert_eq!(parse_node_id("42"), Some(42));
        assert_eq!(parse_node_id("all"), None);
        assert_eq!(parse_node_id("+3"), None);
        assert_eq!(parse_node_id("-3"), None);
        assert_eq!(parse_node_id("3 "), None);
        assert_eq!(parse_node_id(""), None);
    }
}
