//! Event-trace loading and aggregation.
//!
//! Provides the data side of the viewer:
//! - Loading the monitor's CSV event log into an in-memory trace
//! - Building the node index (numeric ids mapped to display rows)
//! - Aggregating events into the dense time-bucketed histogram grid
//! - Assembling the render-ready view model consumed by the UI

pub mod histogram;
pub mod loader;
pub mod node_index;
pub mod types;
pub mod view;

pub use types::{EventRecord, Trace};
pub use view::TraceView;
