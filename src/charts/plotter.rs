//! Chart Plotter Module
//! Creates interactive visualizations of a [`DisplayBundle`] using egui_plot.

use crate::dashboard::{DisplayBundle, GrowthRow};
use crate::data::Row;
use crate::stats::{ColumnSummary, DescriptiveSummary};
use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, Legend, Line, LineStyle, Plot, PlotPoints, Points};

pub const LINE_COLOR: Color32 = Color32::from_rgb(31, 119, 180); // Blue
pub const GROWTH_COLOR: Color32 = Color32::from_rgb(214, 39, 40); // Red

pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(31, 119, 180),  // Blue
    Color32::from_rgb(255, 127, 14),  // Orange
    Color32::from_rgb(44, 160, 44),   // Green
    Color32::from_rgb(214, 39, 40),   // Red
    Color32::from_rgb(148, 103, 189), // Purple
    Color32::from_rgb(140, 86, 75),   // Brown
    Color32::from_rgb(227, 119, 194), // Pink
    Color32::from_rgb(127, 127, 127), // Grey
    Color32::from_rgb(188, 189, 34),  // Olive
    Color32::from_rgb(23, 190, 207),  // Cyan
];

const PLOT_HEIGHT: f32 = 280.0;

/// Draws the dashboard charts and tables.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Color for the n-th tree of the comparison chart.
    pub fn tree_color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    /// Circumference against age, markers on every measurement.
    pub fn draw_growth_plot(ui: &mut egui::Ui, bundle: &DisplayBundle) {
        Plot::new("growth_plot")
            .height(PLOT_HEIGHT)
            .allow_scroll(false)
            .x_axis_label("Age (days)")
            .y_axis_label("Circumference (cm)")
            .show(ui, |plot_ui| {
                let points = &bundle.circumference_series;
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(points.iter().copied()))
                        .color(LINE_COLOR)
                        .width(1.5),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(points.iter().copied()))
                        .radius(3.5)
                        .color(LINE_COLOR),
                );
            });
    }

    /// Circumference frequency distribution.
    pub fn draw_histogram(ui: &mut egui::Ui, bundle: &DisplayBundle) {
        let bars: Vec<Bar> = bundle
            .histogram
            .bins
            .iter()
            .map(|b| Bar::new(b.center(), b.count as f64).width(b.width()))
            .collect();

        Plot::new("circumference_histogram")
            .height(PLOT_HEIGHT)
            .allow_scroll(false)
            .x_axis_label("Circumference (cm)")
            .y_axis_label("Frequency")
            .include_y(0.0)
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .color(Color32::BLUE.gamma_multiply(0.7))
                        .name("Circumference"),
                );
            });
    }

    /// One line per selected tree.
    pub fn draw_comparison(ui: &mut egui::Ui, bundle: &DisplayBundle) {
        Plot::new("tree_comparison")
            .height(PLOT_HEIGHT)
            .allow_scroll(false)
            .legend(Legend::default())
            .x_axis_label("Age (days)")
            .y_axis_label("Circumference (cm)")
            .show(ui, |plot_ui| {
                for (i, series) in bundle.per_tree.iter().enumerate() {
                    plot_ui.line(
                        Line::new(PlotPoints::from_iter(series.points.iter().copied()))
                            .color(Self::tree_color(i))
                            .width(2.0)
                            .name(format!("Tree {}", series.tree)),
                    );
                }
            });
    }

    /// Growth rate against age, dashed red with markers.
    pub fn draw_growth_rate(ui: &mut egui::Ui, bundle: &DisplayBundle) {
        Plot::new("growth_rate")
            .height(PLOT_HEIGHT)
            .allow_scroll(false)
            .x_axis_label("Age (days)")
            .y_axis_label("Growth Rate (cm/day)")
            .show(ui, |plot_ui| {
                let points = &bundle.growth_series;
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(points.iter().copied()))
                        .color(GROWTH_COLOR)
                        .style(LineStyle::dashed_loose())
                        .width(1.5),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(points.iter().copied()))
                        .radius(3.5)
                        .color(GROWTH_COLOR),
                );
            });
    }

    /// Filtered rows with their growth rate.
    pub fn draw_growth_table(ui: &mut egui::Ui, rows: &[GrowthRow]) {
        Self::table_frame(ui, "growth_table", |ui| {
            Self::header(ui, &["", "Tree", "age", "circumference", "Growth Rate"]);
            for gr in rows {
                Self::row_cells(ui, &gr.row);
                ui.label(RichText::new(format!("{:.4}", gr.growth_rate)).size(11.0));
                ui.end_row();
            }
        });
    }

    /// Plain rows, used for the age query result.
    pub fn draw_rows_table(ui: &mut egui::Ui, id: &str, rows: &[Row]) {
        Self::table_frame(ui, id, |ui| {
            Self::header(ui, &["", "Tree", "age", "circumference"]);
            for row in rows {
                Self::row_cells(ui, row);
                ui.end_row();
            }
        });
    }

    /// Draw statistics table (one column per measurement).
    pub fn draw_stats_table(ui: &mut egui::Ui, summary: &DescriptiveSummary) {
        Self::table_frame(ui, "stats_table", |ui| {
            Self::header(ui, &["", "age", "circumference"]);
            let age = summary.age.labeled();
            let circ = summary.circumference.labeled();
            for ((label, a), (_, c)) in age.iter().zip(circ.iter()) {
                ui.label(RichText::new(*label).strong().size(11.0));
                ui.label(RichText::new(Self::format_stat(*a)).size(11.0));
                ui.label(RichText::new(Self::format_stat(*c)).size(11.0));
                ui.end_row();
            }
        });
    }

    /// Six decimal places like `describe()`; NaN stays visible as "NaN".
    pub fn format_stat(value: f64) -> String {
        format!("{:.6}", value)
    }

    /// Row count summary used under a table heading.
    pub fn count_label(summary: &ColumnSummary) -> String {
        format!("{} rows", summary.count)
    }

    fn table_frame(ui: &mut egui::Ui, id: &str, add_rows: impl FnOnce(&mut egui::Ui)) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt(id)
                    .max_height(260.0)
                    .show(ui, |ui| {
                        egui::Grid::new(ui.make_persistent_id(id))
                            .striped(true)
                            .min_col_width(55.0)
                            .spacing([12.0, 4.0])
                            .show(ui, add_rows);
                    });
            });
    }

    fn header(ui: &mut egui::Ui, labels: &[&str]) {
        for label in labels {
            ui.label(RichText::new(*label).strong().size(11.0));
        }
        ui.end_row();
    }

    fn row_cells(ui: &mut egui::Ui, row: &Row) {
        ui.label(RichText::new(&row.index).size(11.0).color(Color32::GRAY));
        ui.label(RichText::new(&row.tree).size(11.0));
        ui.label(RichText::new(format!("{}", row.age)).size(11.0));
        ui.label(RichText::new(format!("{}", row.circumference)).size(11.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_colors_cycle() {
        assert_eq!(ChartPlotter::tree_color(0), ChartPlotter::tree_color(10));
        assert_ne!(ChartPlotter::tree_color(0), ChartPlotter::tree_color(1));
    }

    #[test]
    fn test_format_stat_nan() {
        assert_eq!(ChartPlotter::format_stat(f64::NAN), "NaN");
        assert_eq!(ChartPlotter::format_stat(1.5), "1.500000");
        assert_eq!(ChartPlotter::format_stat(12.3456789), "12.345679");
    }
}
