//! # Sequence Diagram Panel
//!
//! Central panel showing one dotted horizontal lifeline per indexed node,
//! spanning the full observed time range, and one vertical arrow per
//! delivery event from the source node's lifeline to the destination node's
//! lifeline at the event's timestamp.
//!
//! ## Coordinate Mapping
//!
//! Timestamps are linearly mapped to x positions over [min, max] of the full
//! trace using `egui::lerp`; node rows are spread evenly over the chart
//! height, row 0 (the numerically largest id) at the top. A degenerate time
//! range (all events at one instant) collapses to the chart center.

use chrono::{DateTime, TimeDelta, Utc};
use eframe::egui;
use egui::Color32;

use crate::trace::TraceView;
use crate::ui::AppState;

/// Horizontal space reserved on the left for `Node {id}` labels.
const LABEL_GUTTER: f32 = 90.0;
/// Vertical padding above the first and below the last lifeline.
const ROW_MARGIN: f32 = 26.0;
/// Number of vertical time gridline intervals.
const TIME_GRID_STEPS: usize = 4;

/// Render the central sequence diagram panel.
pub fn render(ctx: &egui::Context, state: &AppState) {
    egui::CentralPanel::default().show(ctx, |ui| {
        match &state.view {
            Some(view) => ui.heading(format!("Sequence Diagram ({} events)", view.delivery_action)),
            None => ui.heading("Sequence Diagram"),
        };
        ui.separator();

        let Some(view) = &state.view else {
            ui.centered_and_justified(|ui| {
                ui.label("Waiting for an event log...");
            });
            return;
        };
        let Some((t_min, t_max)) = view.time_range() else {
            ui.centered_and_justified(|ui| {
                ui.label("The event log contains no events.");
            });
            return;
        };
        if view.node_index.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label("No numeric node ids in this trace - nothing to draw.");
            });
            return;
        }

        let avail_rect = ui.available_rect_before_wrap();
        let painter = ui.painter_at(avail_rect);
        painter.rect_filled(avail_rect, 4.0, ui.visuals().extreme_bg_color);

        // Chart area: label gutter on the left, axis margin at the bottom
        let chart = egui::Rect::from_min_max(
            egui::pos2(avail_rect.left() + LABEL_GUTTER, avail_rect.top() + ROW_MARGIN),
            egui::pos2(avail_rect.right() - 16.0, avail_rect.bottom() - ROW_MARGIN),
        );

        draw_time_grid(&painter, chart, t_min, t_max);
        draw_lifelines(&painter, chart, view, ui);
        draw_arrows(&painter, chart, view, t_min, t_max);
    });
}

/// Vertical y position of a node row, rows spread evenly over the chart.
fn row_y(chart: egui::Rect, row: usize, row_count: usize) -> f32 {
    if row_count <= 1 {
        return chart.center().y;
    }
    let t = row as f32 / (row_count - 1) as f32;
    egui::lerp(chart.top()..=chart.bottom(), t)
}

/// Horizontal x position of a timestamp within [t_min, t_max].
fn time_x(chart: egui::Rect, at: DateTime<Utc>, t_min: DateTime<Utc>, t_max: DateTime<Utc>) -> f32 {
    let span_ms = (t_max - t_min).num_milliseconds();
    if span_ms <= 0 {
        return chart.center().x;
    }
    let t = (at - t_min).num_milliseconds() as f32 / span_ms as f32;
    egui::lerp(chart.left()..=chart.right(), t)
}

/// Draw faint vertical gridlines with `%H:%M:%S` labels along the bottom.
fn draw_time_grid(painter: &egui::Painter, chart: egui::Rect, t_min: DateTime<Utc>, t_max: DateTime<Utc>) {
    let grid_color = Color32::from_rgb(0, 0, 100);
    let grid_stroke = egui::Stroke::new(1.0, grid_color);
    let span_ms = (t_max - t_min).num_milliseconds();

    for step in 0..=TIME_GRID_STEPS {
        let frac = step as f32 / TIME_GRID_STEPS as f32;
        let x = egui::lerp(chart.left()..=chart.right(), frac);
        painter.line_segment([egui::pos2(x, chart.top()), egui::pos2(x, chart.bottom())], grid_stroke);

        let at = t_min + TimeDelta::milliseconds((span_ms as f64 * frac as f64) as i64);
        painter.text(
            egui::pos2(x, chart.bottom() + 6.0),
            egui::Align2::CENTER_TOP,
            at.format("%H:%M:%S").to_string(),
            egui::FontId::monospace(10.0),
            Color32::GRAY,
        );
    }
}

/// Draw one dotted lifeline per node with its label in the left gutter.
fn draw_lifelines(painter: &egui::Painter, chart: egui::Rect, view: &TraceView, ui: &egui::Ui) {
    let row_count = view.node_index.len();
    let stroke = egui::Stroke::new(0.8, ui.visuals().weak_text_color());
    let label_color = Color32::from_rgb(40, 200, 255);

    for (row, node_id) in view.node_index.iter_rows() {
        let y = row_y(chart, row, row_count);
        painter.extend(egui::Shape::dashed_line(
            &[egui::pos2(chart.left(), y), egui::pos2(chart.right(), y)],
            stroke,
            2.0,
            4.0,
        ));
        painter.text(
            egui::pos2(chart.left() - 8.0, y),
            egui::Align2::RIGHT_CENTER,
            format!("Node {}", node_id),
            egui::FontId::monospace(12.0),
            label_color,
        );
    }
}

/// Draw one arrow per resolved delivery event.
fn draw_arrows(painter: &egui::Painter, chart: egui::Rect, view: &TraceView, t_min: DateTime<Utc>, t_max: DateTime<Utc>) {
    let row_count = view.node_index.len();
    let stroke = egui::Stroke::new(1.0, Color32::from_rgb(40, 200, 255));

    for arrow in &view.arrows {
        let x = time_x(chart, arrow.at, t_min, t_max);
        let y_from = row_y(chart, arrow.from_row, row_count);
        let y_to = row_y(chart, arrow.to_row, row_count);
        if arrow.from_row == arrow.to_row {
            // A self-delivery has no vertical extent; mark it with a dot
            painter.circle_filled(egui::pos2(x, y_to), 2.5, stroke.color);
        } else {
            painter.arrow(egui::pos2(x, y_from), egui::vec2(0.0, y_to - y_from), stroke);
        }
    }
}
