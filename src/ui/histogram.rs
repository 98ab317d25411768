//! # Histogram Panel
//!
//! Bottom panel drawing one line series per action type over the
//! chronological sequence of time buckets, with a color legend and a
//! max-count y-axis label. Bucket timestamps map linearly to x positions,
//! so gaps in the data appear as straight segments across the gap, and
//! counts map linearly to y with zero on the baseline.

use chrono::{DateTime, Utc};
use eframe::egui;
use egui::Color32;

use crate::ui::{AppState, color_for_action};

const PANEL_HEIGHT: f32 = 220.0;
/// Horizontal space reserved on the left for count labels.
const COUNT_GUTTER: f32 = 48.0;

/// Render the bottom histogram panel.
pub fn render(ctx: &egui::Context, state: &AppState) {
    egui::TopBottomPanel::bottom("histogram_panel").exact_height(PANEL_HEIGHT).show(ctx, |ui| {
        ui.heading("Message Counts by Action over Time");

        let Some(view) = &state.view else {
            return;
        };
        if view.histogram.is_empty() {
            ui.label("No events to aggregate.");
            return;
        }

        // Legend: one colored label per action, matching the series colors
        ui.horizontal(|ui| {
            for (idx, action) in view.histogram.actions().iter().enumerate() {
                ui.colored_label(color_for_action(idx, 1.0), action);
            }
        });

        let avail_rect = ui.available_rect_before_wrap();
        let painter = ui.painter_at(avail_rect);
        painter.rect_filled(avail_rect, 4.0, ui.visuals().extreme_bg_color);

        let chart = egui::Rect::from_min_max(
            egui::pos2(avail_rect.left() + COUNT_GUTTER, avail_rect.top() + 8.0),
            egui::pos2(avail_rect.right() - 16.0, avail_rect.bottom() - 18.0),
        );

        let buckets = view.histogram.buckets();
        let (Some(&first), Some(&last)) = (buckets.first(), buckets.last()) else {
            return;
        };
        let max_count = view.histogram.max_count().max(1);

        draw_axes(&painter, chart, max_count, first, last);

        for (idx, _) in view.histogram.actions().iter().enumerate() {
            let color = color_for_action(idx, 1.0);
            let points: Vec<egui::Pos2> = buckets
                .iter()
                .zip(view.histogram.series(idx))
                .map(|(bucket, count)| {
                    egui::pos2(bucket_x(chart, *bucket, first, last), count_y(chart, *count, max_count))
                })
                .collect();
            if points.len() == 1 {
                // A single bucket has no line to draw
                painter.circle_filled(points[0], 2.5, color);
            } else {
                painter.add(egui::Shape::line(points, egui::Stroke::new(1.5, color)));
            }
        }
    });
}

/// Horizontal position of a bucket within [first, last].
fn bucket_x(chart: egui::Rect, bucket: DateTime<Utc>, first: DateTime<Utc>, last: DateTime<Utc>) -> f32 {
    let span_secs = (last - first).num_seconds();
    if span_secs <= 0 {
        return chart.center().x;
    }
    let t = (bucket - first).num_seconds() as f32 / span_secs as f32;
    egui::lerp(chart.left()..=chart.right(), t)
}

/// Vertical position of a count, zero on the baseline, max at the top.
fn count_y(chart: egui::Rect, count: u64, max_count: u64) -> f32 {
    let t = count as f32 / max_count as f32;
    egui::lerp(chart.bottom()..=chart.top(), t)
}

/// Count labels on the left edge, bucket timestamps on the bottom corners.
fn draw_axes(painter: &egui::Painter, chart: egui::Rect, max_count: u64, first: DateTime<Utc>, last: DateTime<Utc>) {
    let axis_color = Color32::GRAY;
    let font = egui::FontId::monospace(10.0);

    painter.text(
        egui::pos2(chart.left() - 6.0, chart.top()),
        egui::Align2::RIGHT_CENTER,
        max_count.to_string(),
        font.clone(),
        axis_color,
    );
    painter.text(
        egui::pos2(chart.left() - 6.0, chart.bottom()),
        egui::Align2::RIGHT_CENTER,
        "0",
        font.clone(),
        axis_color,
    );
    painter.text(
        egui::pos2(chart.left(), chart.bottom() + 4.0),
        egui::Align2::LEFT_TOP,
        first.format("%H:%M:%S").to_string(),
        font.clone(),
        axis_color,
    );
    painter.text(
        egui::pos2(chart.right(), chart.bottom() + 4.0),
        egui::Align2::RIGHT_TOP,
        last.format("%H:%M:%S").to_string(),
        font,
        axis_color,
    );
}
