//! # Top Panel - Trace Metrics
//!
//! Renders the fixed-height top panel displaying:
//! - Column 1: Trace facts (event count, node count, observed time range)
//! - Column 2: Delivery stats (arrow count, unresolved deliveries, proposals)
//! - Column 3: Per-action message totals table
//!
//! Everything here is derived once at load time; the panel only formats it.

use eframe::egui;
use egui_extras::{Column, TableBuilder};

use crate::ui::{AppState, color_for_action};

/// Render the top panel with trace metrics.
///
/// # Parameters
///
/// * `ctx` - egui context
/// * `state` - Application state holding the loaded view model
pub fn render(ctx: &egui::Context, state: &AppState) {
    egui::TopBottomPanel::top("top_metrics").exact_height(150.0).show(ctx, |ui| {
        let Some(view) = &state.view else {
            ui.centered_and_justified(|ui| {
                ui.label("No event log loaded.");
            });
            return;
        };

        ui.columns(3, |cols| {
            // Column 1: Trace facts
            cols[0].vertical(|ui| {
                ui.heading("Trace");
                ui.separator();
                ui.horizontal(|ui| {
                    ui.label("Events:");
                    ui.label(egui::RichText::new(view.trace.len().to_string()).strong());
                    ui.label("  Nodes:");
                    ui.label(egui::RichText::new(view.node_index.len().to_string()).strong());
                });
                match view.time_range() {
                    Some((min, max)) => {
                        ui.horizontal(|ui| {
                            ui.label("From:");
                            ui.label(egui::RichText::new(min.format("%H:%M:%S%.3f").to_string()).monospace().strong());
                        });
                        ui.horizontal(|ui| {
                            ui.label("To:  ");
                            ui.label(egui::RichText::new(max.format("%H:%M:%S%.3f").to_string()).monospace().strong());
                        });
                        ui.horizontal(|ui| {
                            ui.label("Span:");
                            ui.label(egui::RichText::new(format!("{} s", (max - min).num_seconds())).strong());
                        });
                    }
                    None => {
                        ui.label("Trace is empty");
                    }
                }
            });

            // Column 2: Deliveries and proposals
            cols[1].vertical(|ui| {
                ui.heading("Deliveries");
                ui.separator();
                ui.horizontal(|ui| {
                    ui.label("Action:");
                    ui.label(egui::RichText::new(&view.delivery_action).monospace().strong());
                });
                ui.horizontal(|ui| {
                    ui.label("Arrows:");
                    ui.label(egui::RichText::new(view.arrows.len().to_string()).strong());
                });
                if view.unresolved_deliveries > 0 {
                    let warn_text = format!("{} deliveries reference endpoints outside the node index", view.unresolved_deliveries);
                    ui.label(egui::RichText::new(warn_text).color(egui::Color32::RED));
                }
                ui.horizontal(|ui| {
                    ui.label("Bucket width:");
                    ui.label(egui::RichText::new(format!("{} s", view.histogram.bucket_width_secs())).strong());
                });

                let highest_proposal = view.trace.events.iter().filter_map(|e| e.proposal_num).max();
                let last_value = view.trace.events.iter().rev().find_map(|e| e.proposal_val);
                ui.horizontal(|ui| {
                    ui.label("Highest proposal:");
                    ui.label(egui::RichText::new(format_opt(highest_proposal)).strong());
                    ui.label("  Last value:");
                    ui.label(egui::RichText::new(format_opt(last_value)).strong());
                });
            });

            // Column 3: Per-action totals
            cols[2].vertical(|ui| {
                ui.heading("Messages by Action");
                ui.separator();
                render_action_totals(ui, view);
            });
        });
    });
}

fn format_opt(value: Option<i64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "-".to_string(),
    }
}

/// Per-action totals table, one row per action in the histogram's order so
/// row colors line up with the chart series.
fn render_action_totals(ui: &mut egui::Ui, view: &crate::trace::TraceView) {
    let row_height = ui.text_style_height(&egui::TextStyle::Body) * 1.3;
    TableBuilder::new(ui)
        .striped(true)
        .vscroll(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::remainder()) // Action
        .column(Column::initial(60.0).at_least(40.0)) // Total
        .header(row_height, |mut header| {
            header.col(|ui| {
                ui.strong("Action");
            });
            header.col(|ui| {
                ui.strong("Total");
            });
        })
        .body(|mut body| {
            for (idx, action) in view.histogram.actions().iter().enumerate() {
                let total: u64 = view.histogram.series(idx).iter().sum();
                body.row(row_height, |mut row| {
                    row.col(|ui| {
                        ui.colored_label(color_for_action(idx, 1.0), action);
                    });
                    row.col(|ui| {
                        ui.label(total.to_string());
                    });
                });
            }
        });
}
