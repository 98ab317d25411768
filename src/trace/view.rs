//! Render-ready view model.
//!
//! Assembled once after loading; the UI re-renders it each frame without
//! recomputing anything. Delivery events whose endpoints cannot be resolved
//! to node rows (sentinel or malformed ids) are skipped here and counted, so
//! rendering never fails mid-chart.

use chrono::{DateTime, Utc};

use crate::config::ViewerConfig;
use crate::trace::histogram::HistogramGrid;
use crate::trace::node_index::NodeIndex;
use crate::trace::types::Trace;

/// One delivery event with both endpoints resolved to display rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeliveryArrow {
    pub at: DateTime<Utc>,
    pub from_row: usize,
    pub to_row: usize,
}

/// Everything the UI needs to draw both charts and the metrics panel.
pub struct TraceView {
    pub trace: Trace,
    pub node_index: NodeIndex,
    pub histogram: HistogramGrid,
    /// Resolved delivery arrows, in file order.
    pub arrows: Vec<DeliveryArrow>,
    /// Delivery events dropped because an endpoint had no display row.
    pub unresolved_deliveries: usize,
    pub delivery_action: String,
}

impl TraceView {
    pub fn build(trace: Trace, config: &ViewerConfig) -> Self {
        let node_index = NodeIndex::from_trace(&trace);
        let histogram = HistogramGrid::build(&trace, config.bucket_width_secs);

        let mut arrows = Vec::new();
        let mut unresolved_deliveries = 0;
        for event in &trace.events {
            if event.action != config.delivery_action {
                continue;
            }
            match (
                node_index.row_of(&event.source),
                node_index.row_of(&event.destination),
            ) {
                (Some(from_row), Some(to_row)) => arrows.push(DeliveryArrow {
                    at: event.timestamp,
                    from_row,
                    to_row,
                }),
                _ => {
                    unresolved_deliveries += 1;
                    log::debug!(
                        "Skipping {} event with unresolved endpoint: {} -> {}",
                        event.action,
                        event.source,
                        event.destination
                    );
                }
            }
        }
        if unresolved_deliveries > 0 {
            log::warn!(
                "{} {} events reference endpoints outside the node index",
                unresolved_deliveries,
                config.delivery_action
            );
        }

        Self {
            trace,
            node_index,
            histogram,
            arrows,
            unresolved_deliveries,
            delivery_action: config.delivery_action.clone(),
        }
    }

    /// Time bounds of the full trace (not just the delivery events).
    pub fn time_range(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        self.trace.time_range()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::types::EventRecord;
    use chrono::TimeZone;

    fn event(secs: i64, source: &str, destination: &str, action: &str) -> EventRecord {
        EventRecord {
            timestamp: Utc.timestamp_opt(secs, 0).unwrap(),
            source: source.to_string(),
            destination: destination.to_string(),
            action: action.to_string(),
            proposal_num: None,
            proposal_val: None,
        }
    }

    #[test]
    fn test_two_node_scenario_resolves_both_arrows() {
        // Nodes 1 and 2 plus the broadcast sentinel; both RECV events have
        // numeric endpoints, so nothing is dropped.
        let trace = Trace::new(vec![
            event(0, "1", "all", "SEND"),
            event(0, "1", "2", "RECV"),
            event(1, "2", "1", "RECV"),
        ]);
        let view = TraceView::build(trace, &ViewerConfig::default());

        assert_eq!(view.node_index.row_of("2"), Some(0));
        assert_eq!(view.node_index.row_of("1"), Some(1));
        assert_eq!(view.arrows.len(), 2);
        assert_eq!(view.unresolved_deliveries, 0);

        assert_eq!(view.arrows[0].from_row, 1);
        assert_eq!(view.arrows[0].to_row, 0);
        assert_eq!(view.arrows[1].from_row, 0);
        assert_eq!(view.arrows[1].to_row, 1);
    }

    #[test]
    fn test_sentinel_delivery_is_skipped_and_counted() {
        let trace = Trace::new(vec![
            event(0, "1", "2", "RECV"),
            event(1, "all", "2", "RECV"),
        ]);
        let view = TraceView::build(trace, &ViewerConfig::default());
        assert_eq!(view.arrows.len(), 1);
        assert_eq!(view.unresolved_deliveries, 1);
    }

    #[test]
    fn test_non_delivery_actions_draw_no_arrows() {
        let trace = Trace::new(vec![
            event(0, "1", "2", "SEND"),
            event(1, "2", "1", "ELECT"),
        ]);
        let view = TraceView::build(trace, &ViewerConfig::default());
        assert!(view.arrows.is_empty());
        assert_eq!(view.unresolved_deliveries, 0);
        // The histogram still covers every action.
        assert_eq!(view.histogram.actions(), ["ELECT", "SEND"]);
    }

    #[test]
    fn test_delivery_action_is_configurable() {
        let config = ViewerConfig {
            delivery_action: "RECV_PREPARE".to_string(),
            ..ViewerConfig::default()
        };
        let trace = Trace::new(vec![
            event(0, "1", "2", "RECV_PREPARE"),
            event(1, "2", "1", "RECV"),
        ]);
        let view = TraceView::build(trace, &config);
        assert_eq!(view.arrows.len(), 1);
        assert_eq!(view.arrows[0].from_row, 1);
    }

    #[test]
    fn test_same_input_builds_same_view() {
        let events = vec![
            event(0, "1", "2", "RECV"),
            event(1, "2", "1", "RECV"),
            event(2, "1", "all", "SEND"),
        ];
        let config = ViewerConfig::default();
        let a = TraceView::build(Trace::new(events.clone()), &config);
        let b = TraceView::build(Trace::new(events), &config);
        assert_eq!(a.arrows, b.arrows);
        assert_eq!(a.histogram, b.histogram);
        assert_eq!(a.unresolved_deliveries, b.unresolved_deliveries);
    }
}
