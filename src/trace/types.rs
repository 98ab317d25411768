//! Type definitions for the loaded event trace.

use chrono::{DateTime, Utc};

/// A single protocol event as recorded by the monitor.
///
/// `source` and `destination` are kept in their textual form: most entries
/// are numeric node ids, but the monitor also records sentinel endpoints such
/// as `all` (broadcast) and `client`. The two proposal columns are empty for
/// actions that carry no payload.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub timestamp: DateTime<Utc>,
    pub source: String,
    pub destination: String,
    pub action: String,
    pub proposal_num: Option<i64>,
    pub proposal_val: Option<i64>,
}

/// The full event log, in file order. File order is not guaranteed to be
/// chronological (UDP reordering at the monitor), so time bounds are computed
/// over all events rather than taken from the first and last rows.
#[derive(Debug, Clone, Default)]
pub struct Trace {
    pub events: Vec<EventRecord>,
}

impl Trace {
    pub fn new(events: Vec<EventRecord>) -> Self {
        Self { events }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Minimum and maximum timestamp over all events, `None` for an empty trace.
    pub fn time_range(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let first = self.events.first()?.timestamp;
        let (min, max) = self
            .events
            .iter()
            .fold((first, first), |(min, max), event| {
                (min.min(event.timestamp), max.max(event.timestamp))
            });
        Some((min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event_at(secs: i64) -> EventRecord {
        EventRecord {
            timestamp: Utc.timestamp_opt(secs, 0).unwrap(),
            source: "1".to_string(),
            destination: "2".to_string(),
            action: "RECV".to_string(),
            proposal_num: None,
            proposal_val: None,
        }
    }

    #[test]
    fn test_time_range_empty() {
        assert!(Trace::default().time_range().is_none());
    }

    #[test]
    fn test_time_range_unordered_events() {
        let trace = Trace::new(vec![event_at(50), event_at(10), event_at(30)]);
        let (min, max) = trace.time_range().unwrap();
        assert_eq!(min, Utc.timestamp_opt(10, 0).unwrap());
        assert_eq!(max, Utc.timestamp_opt(50, 0).unwrap());
    }
}
