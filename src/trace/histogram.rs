//! Dense time-bucketed event counts.
//!
//! Each event timestamp is floored to the start of its containing bucket
//! (a fixed number of whole seconds on the unix-second grid) and counted per
//! (bucket, action) pair. The grid is dense: every bucket present in the data
//! has a count for every action present anywhere in the data, zero-filled
//! where no events match. Buckets are chronological, actions alphabetical.

use chrono::{DateTime, Utc};
use std::collections::{BTreeSet, HashMap};

use super::types::Trace;

/// Per-action event counts over the chronological bucket sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramGrid {
    bucket_width_secs: i64,
    /// Bucket start times, ascending, one entry per bucket present in the data.
    buckets: Vec<DateTime<Utc>>,
    /// Action labels, ascending.
    actions: Vec<String>,
    /// counts[action_idx][bucket_idx]
    counts: Vec<Vec<u64>>,
}

impl HistogramGrid {
    /// Aggregate a trace into the dense grid.
    ///
    /// `bucket_width_secs` must be at least 1; config validation enforces
    /// this before the grid is ever built.
    pub fn build(trace: &Trace, bucket_width_secs: i64) -> Self {
        let width = bucket_width_secs.max(1);

        let mut bucket_keys: BTreeSet<i64> = BTreeSet::new();
        let mut action_set: BTreeSet<String> = BTreeSet::new();
        let mut tally: HashMap<(i64, String), u64> = HashMap::new();
        for event in &trace.events {
            let key = floor_to_bucket(event.timestamp, width);
            bucket_keys.insert(key);
            action_set.insert(event.action.clone());
            *tally.entry((key, event.action.clone())).or_insert(0) += 1;
        }

        let bucket_keys: Vec<i64> = bucket_keys.into_iter().collect();
        let actions: Vec<String> = action_set.into_iter().collect();
        let counts = actions
            .iter()
            .map(|action| {
                bucket_keys
                    .iter()
                    .map(|key| tally.get(&(*key, action.clone())).copied().unwrap_or(0))
                    .collect()
            })
            .collect();
        let buckets = bucket_keys
            .into_iter()
            .map(|key| DateTime::from_timestamp(key, 0).unwrap_or(DateTime::UNIX_EPOCH))
            .collect();

        Self {
            bucket_width_secs: width,
            buckets,
            actions,
            counts,
        }
    }

    pub fn bucket_width_secs(&self) -> i64 {
        self.bucket_width_secs
    }

    pub fn buckets(&self) -> &[DateTime<Utc>] {
        &self.buckets
    }

    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    /// Counts for one action across all buckets, in bucket order.
    pub fn series(&self, action_idx: usize) -> &[u64] {
        &self.counts[action_idx]
    }

    /// Largest single (bucket, action) count, 0 for an empty grid.
    pub fn max_count(&self) -> u64 {
        self.counts
            .iter()
            .flat_map(|series| series.iter().copied())
            .max()
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Floor a timestamp to the start of its containing bucket, as unix seconds.
pub fn floor_to_bucket(timestamp: DateTime<Utc>, width_secs: i64) -> i64 {
    let secs = timestamp.timestamp();
    secs - secs.rem_euclid(width_secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::types::EventRecord;
    use chrono::TimeZone;

    fn event(secs: i64, millis: u32, action: &str) -> EventRecord {
        EventRecord {
            timestamp: Utc.timestamp_opt(secs, millis * 1_000_000).unwrap(),
            source: "1".to_string(),
            destination: "2".to_string(),
            action: action.to_string(),
            proposal_num: None,
            proposal_val: None,
        }
    }

    #[test]
    fn test_floor_drops_subseconds() {
        let ts = Utc.timestamp_opt(100, 400_000_000).unwrap();
        assert_eq!(floor_to_bucket(ts, 1), 100);
    }

    #[test]
    fn test_floor_wider_bucket() {
        let ts = Utc.timestamp_opt(103, 0).unwrap();
        assert_eq!(floor_to_bucket(ts, 5), 100);
    }

    #[test]
    fn test_grid_is_dense() {
        // RECV appears only in the first bucket, SEND only in the second;
        // both series still cover both buckets.
        let trace = Trace::new(vec![
            event(10, 100, "RECV"),
            event(10, 900, "RECV"),
            event(12, 0, "SEND"),
        ]);
        let grid = HistogramGrid::build(&trace, 1);

        assert_eq!(grid.actions(), ["RECV", "SEND"]);
        assert_eq!(grid.buckets().len(), 2);
        assert_eq!(grid.series(0), [2, 0]);
        assert_eq!(grid.series(1), [0, 1]);
        assert_eq!(grid.max_count(), 2);
    }

    #[test]
    fn test_buckets_are_chronological() {
        let trace = Trace::new(vec![event(30, 0, "SEND"), event(10, 0, "SEND")]);
        let grid = HistogramGrid::build(&trace, 1);
        let buckets = grid.buckets();
        assert_eq!(buckets[0], Utc.timestamp_opt(10, 0).unwrap());
        assert_eq!(buckets[1], Utc.timestamp_opt(30, 0).unwrap());
    }

    #[test]
    fn test_events_in_same_wide_bucket_merge() {
        let trace = Trace::new(vec![event(10, 0, "SEND"), event(13, 0, "SEND")]);
        let grid = HistogramGrid::build(&trace, 5);
        assert_eq!(grid.buckets().len(), 1);
        assert_eq!(grid.series(0), [2]);
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let trace = Trace::new(vec![
            event(10, 0, "RECV"),
            event(11, 0, "SEND"),
            event(11, 500, "ELECT"),
        ]);
        assert_eq!(
            HistogramGrid::build(&trace, 1),
            HistogramGrid::build(&trace, 1)
        );
    }

    #[test]
    fn test_empty_trace_builds_empty_grid() {
        let grid = HistogramGrid::build(&Trace::default(), 1);
        assert!(grid.is_empty());
        assert_eq!(grid.max_count(), 0);
        assert!(grid.actions().is_empty());
    }
}
