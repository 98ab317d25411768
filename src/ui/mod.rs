// UI module for the Paxos Trace Viewer
//
// This module organizes the UI into separate components:
// - `app_state`: Application state management and main update loop
// - `top_panel`: Trace metrics panel
// - `sequence`: Central sequence diagram of delivery events
// - `histogram`: Bottom per-action message-count chart

pub mod app_state;
pub mod histogram;
pub mod sequence;
pub mod top_panel;

pub use app_state::{AppState, color_for_action};
