//! # Application State Management
//!
//! Implements the central `AppState` struct and its `eframe::App` impl. The
//! view model is immutable once built; the update loop only handles the
//! initial file selection, the alert modal, and panel orchestration.
//!
//! When no event log path was supplied on the command line or in the config
//! file, the first frame opens a native file dialog. A failed load shows an
//! alert modal and re-prompts after the user dismisses it, so a bad pick
//! never kills the application.

use eframe::egui;
use egui::Color32;
use rfd::FileDialog;
use serde::{Deserialize, Serialize};

use crate::config::ViewerConfig;
use crate::trace::TraceView;
use crate::trace::loader::load_trace;
use crate::ui::{histogram, sequence, top_panel};

/// Central application state: configuration, the loaded view model, and the
/// small amount of UI-only state (alert, dialog bookkeeping).
pub struct AppState {
    /// Optional alert message to display in a modal dialog.
    pub alert: Option<String>,
    pub config: ViewerConfig,
    /// Loaded trace artifacts; `None` until a log has been loaded.
    pub view: Option<TraceView>,
    /// Whether the file dialog has already produced a file this attempt.
    pub trace_file_selected: bool,
    // Persistence: last directory used for the event log chooser
    pub last_open_dir: Option<String>,
}

/// Settings persisted across application sessions.
#[derive(Default, Serialize, Deserialize)]
struct PersistedSettings {
    last_open_dir: Option<String>,
}

impl AppState {
    /// Create a new AppState, loading persisted settings if available.
    ///
    /// # Parameters
    ///
    /// * `config` - Validated viewer configuration
    /// * `view` - View model preloaded in `main`, if a path was given
    /// * `storage` - Optional persistent storage for saved settings
    pub fn new(config: ViewerConfig, view: Option<TraceView>, storage: Option<&dyn eframe::Storage>) -> Self {
        let persisted: PersistedSettings = storage.and_then(|s| eframe::get_value(s, "app_settings")).unwrap_or_default();

        let trace_file_selected = view.is_some();
        Self {
            alert: None,
            config,
            view,
            trace_file_selected,
            last_open_dir: persisted.last_open_dir,
        }
    }

    /// Open the native file dialog and load the picked event log.
    ///
    /// Cancelling the dialog closes the application; there is nothing to
    /// show without an event log.
    fn prompt_for_trace(&mut self, ctx: &egui::Context) {
        let mut dialog = FileDialog::new().add_filter("csv", &["csv"]);
        if let Some(dir) = &self.last_open_dir {
            dialog = dialog.set_directory(dir);
        }
        let Some(file) = dialog.pick_file() else {
            log::info!("No event log selected, exiting");
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        };

        // Remember directory for next time
        if let Some(parent) = file.parent() {
            self.last_open_dir = Some(parent.to_string_lossy().to_string());
        }
        self.trace_file_selected = true;

        let path = file.to_string_lossy().to_string();
        match load_trace(&path) {
            Ok(trace) => {
                self.view = Some(TraceView::build(trace, &self.config));
            }
            Err(e) => {
                log::error!("Failed to load event log {}: {}", path, e);
                self.alert = Some(format!("Failed to load event log: {}", e));
                // Re-prompt once the alert is dismissed
                self.trace_file_selected = false;
            }
        }
    }
}

impl eframe::App for AppState {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let settings = PersistedSettings {
            last_open_dir: self.last_open_dir.clone(),
        };
        eframe::set_value(storage, "app_settings", &settings);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.view.is_none() && !self.trace_file_selected && self.alert.is_none() {
            self.prompt_for_trace(ctx);
        }

        if let Some(alert_msg) = self.alert.clone() {
            egui::Window::new("Alert")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(20.0);
                        ui.label(alert_msg);
                        ui.add_space(20.0);

                        if ui.button("OK").clicked() {
                            self.alert = None; // Reset alert state
                        }
                        ui.add_space(10.0);
                    });
                });
        }

        // Panels layout: top (fixed metrics), bottom (fixed histogram),
        // sequence diagram fills the remaining space using CentralPanel
        top_panel::render(ctx, self);
        histogram::render(ctx, self);
        sequence::render(ctx, self);
    }
}

/// Color for an action series, keyed by the action's index in the sorted
/// action list so colors are stable across frames and both charts.
pub fn color_for_action(action_idx: usize, alpha: f32) -> Color32 {
    const PALETTE: [(u8, u8, u8); 9] = [
        (0, 255, 0),     // Green
        (255, 255, 0),   // Yellow
        (200, 100, 50),  // Red-brown
        (0, 128, 255),   // Blue
        (255, 0, 255),   // Magenta
        (255, 165, 0),   // Orange
        (0, 255, 255),   // Cyan
        (128, 0, 128),   // Purple
        (255, 192, 203), // Pink
    ];
    let (r, g, b) = PALETTE[action_idx % PALETTE.len()];
    Color32::from_rgba_unmultiplied(r, g, b, (alpha * 255.0) as u8)
}
