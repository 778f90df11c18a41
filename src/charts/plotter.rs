//! Chart Plotter Module
//! Water level charts, statistics tables and data grids using egui_plot.

use crate::dashboard::{ChartKind, ChartSeries, TableView};
use crate::stats::SummaryStatistics;
use egui::{Color32, RichText, ScrollArea};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};

/// Series color
pub const LEVEL_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue

const TABLE_ROW_HEIGHT: f32 = 18.0;
const TABLE_COL_WIDTH: f32 = 140.0;

/// Draws dashboard visuals.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Format an x-axis value: Unix seconds for time axes, row number otherwise.
    pub fn format_x(value: f64, time_axis: bool) -> String {
        if !time_axis {
            return format!("{}", value.round() as i64);
        }
        chrono::DateTime::from_timestamp(value.floor() as i64, 0)
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default()
    }

    /// Bar width that leaves a small gap between neighbouring readings.
    pub fn bar_width(points: &[[f64; 2]]) -> f64 {
        let mut gaps: Vec<f64> = points
            .windows(2)
            .map(|w| (w[1][0] - w[0][0]).abs())
            .filter(|g| *g > 0.0)
            .collect();
        if gaps.is_empty() {
            return 0.8;
        }
        gaps.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        gaps[gaps.len() / 2] * 0.8
    }

    /// Draw the water level chart in the selected style.
    pub fn draw_level_chart(ui: &mut egui::Ui, series: &ChartSeries, height: f32) {
        let time_axis = series.time_axis;

        Plot::new("nivel_agua_chart")
            .height(height)
            .legend(Legend::default())
            .x_axis_label(if time_axis { "Time" } else { "Registro" })
            .y_axis_label("nivel_agua")
            .x_axis_formatter(move |mark, _range| Self::format_x(mark.value, time_axis))
            .label_formatter(move |_name, point| {
                format!(
                    "{}\n{:.2}",
                    Self::format_x(point.x, time_axis),
                    point.y
                )
            })
            .show(ui, |plot_ui| match series.kind {
                ChartKind::Line => {
                    let points: PlotPoints = series.points.iter().copied().collect();
                    plot_ui.line(
                        Line::new(points)
                            .color(LEVEL_COLOR)
                            .width(1.5)
                            .name("nivel_agua"),
                    );
                }
                ChartKind::Area => {
                    let points: PlotPoints = series.points.iter().copied().collect();
                    plot_ui.line(
                        Line::new(points)
                            .color(LEVEL_COLOR)
                            .fill(0.0)
                            .width(1.5)
                            .name("nivel_agua"),
                    );
                }
                ChartKind::Bar => {
                    let width = Self::bar_width(&series.points);
                    let bars: Vec<Bar> = series
                        .points
                        .iter()
                        .map(|&[x, y]| Bar::new(x, y).width(width))
                        .collect();
                    plot_ui.bar_chart(BarChart::new(bars).color(LEVEL_COLOR).name("nivel_agua"));
                }
            });
    }

    /// Draw the describe-style statistics table.
    pub fn draw_stats_table(ui: &mut egui::Ui, stats: &SummaryStatistics) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("summary_statistics")
                    .striped(true)
                    .min_col_width(80.0)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new("").strong());
                        ui.label(RichText::new("nivel_agua").strong());
                        ui.end_row();

                        for (label, value) in stats.rows() {
                            ui.label(RichText::new(label).strong());
                            let text = if label == "count" {
                                format!("{}", stats.count)
                            } else {
                                format!("{:.6}", value)
                            };
                            ui.label(RichText::new(text).monospace());
                            ui.end_row();
                        }
                    });
            });
    }

    /// Draw a single headline number.
    pub fn draw_metric(ui: &mut egui::Ui, label: &str, value: f64) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.set_min_width(220.0);
                ui.label(RichText::new(label).size(12.0).color(Color32::GRAY));
                ui.label(RichText::new(format!("{:.2} unidades", value)).size(22.0));
            });
        ui.add_space(6.0);
    }

    /// Draw a scrollable data grid. Only visible rows are laid out.
    pub fn draw_table(ui: &mut egui::Ui, id: &str, table: &TableView, max_height: f32) {
        if table.columns.is_empty() {
            return;
        }

        egui::Grid::new(format!("{id}_header"))
            .min_col_width(TABLE_COL_WIDTH)
            .max_col_width(TABLE_COL_WIDTH)
            .show(ui, |ui| {
                for column in &table.columns {
                    ui.label(RichText::new(column).strong());
                }
                ui.end_row();
            });
        ui.separator();

        if table.is_empty() {
            ui.label(RichText::new("Sin registros").color(Color32::GRAY));
            return;
        }

        ScrollArea::vertical()
            .id_salt(id)
            .max_height(max_height)
            .auto_shrink([false, true])
            .show_rows(ui, TABLE_ROW_HEIGHT, table.len(), |ui, row_range| {
                egui::Grid::new(format!("{id}_rows"))
                    .striped(true)
                    .min_col_width(TABLE_COL_WIDTH)
                    .max_col_width(TABLE_COL_WIDTH)
                    .min_row_height(TABLE_ROW_HEIGHT)
                    .show(ui, |ui| {
                        for row in &table.rows[row_range] {
                            for cell in row {
                                ui.label(RichText::new(cell).monospace());
                            }
                            ui.end_row();
                        }
                    });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_axis_labels_are_integers() {
        assert_eq!(ChartPlotter::format_x(3.0, false), "3");
        assert_eq!(ChartPlotter::format_x(2.6, false), "3");
    }

    #[test]
    fn time_axis_labels_are_dates() {
        // 2024-03-01 08:00:00 UTC
        assert_eq!(
            ChartPlotter::format_x(1_709_280_000.0, true),
            "2024-03-01 08:00"
        );
    }

    #[test]
    fn bar_width_follows_median_spacing() {
        let points = [[0.0, 1.0], [60.0, 2.0], [120.0, 3.0], [600.0, 4.0]];
        assert_eq!(ChartPlotter::bar_width(&points), 48.0);
        assert_eq!(ChartPlotter::bar_width(&[[0.0, 1.0]]), 0.8);
    }
}
