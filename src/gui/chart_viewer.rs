//! Chart Viewer Widget
//! Central scrollable panel: data table, charts, statistical summary and the age query.

use crate::charts::ChartPlotter;
use crate::dashboard::DisplayBundle;
use egui::{Color32, RichText, ScrollArea};

const SECTION_SPACING: f32 = 18.0;

/// Renders one [`DisplayBundle`] and owns the age slider.
pub struct ChartViewer {
    /// Slider range, taken from the full dataset.
    pub age_bounds: Option<(f64, f64)>,
    pub age_query: f64,
}

impl Default for ChartViewer {
    fn default() -> Self {
        Self {
            age_bounds: None,
            age_query: 0.0,
        }
    }
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_age_bounds(&mut self, bounds: Option<(f64, f64)>, age_query: f64) {
        self.age_bounds = bounds;
        self.age_query = age_query;
    }

    /// Draw every section. Returns true when the slider moved.
    pub fn show(&mut self, ui: &mut egui::Ui, title: &str, bundle: &DisplayBundle) -> bool {
        let mut query_changed = false;

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading(RichText::new(title).size(24.0).strong());
                for warning in &bundle.warnings {
                    ui.label(
                        RichText::new(format!("⚠ {warning}"))
                            .color(Color32::from_rgb(255, 193, 7)),
                    );
                }
                ui.add_space(SECTION_SPACING);

                Self::section(ui, "Orange Data Table");
                ChartPlotter::draw_growth_table(ui, &bundle.filtered);
                ui.label(
                    RichText::new(ChartPlotter::count_label(&bundle.summary.age))
                        .size(11.0)
                        .color(Color32::GRAY),
                );
                ui.add_space(SECTION_SPACING);

                Self::section(ui, "Growth Plot");
                ChartPlotter::draw_growth_plot(ui, bundle);
                ui.add_space(SECTION_SPACING);

                Self::section(ui, "Circumference Distribution");
                ChartPlotter::draw_histogram(ui, bundle);
                ui.add_space(SECTION_SPACING);

                Self::section(ui, "Compare and See Growth of Trees Over Time");
                ChartPlotter::draw_comparison(ui, bundle);
                ui.add_space(SECTION_SPACING);

                Self::section(ui, "Statistical Summary");
                ChartPlotter::draw_stats_table(ui, &bundle.summary);
                ui.add_space(SECTION_SPACING);

                Self::section(ui, "Growth Rate Over Time");
                ChartPlotter::draw_growth_rate(ui, bundle);
                ui.add_space(SECTION_SPACING);

                Self::section(ui, "Tree Growth By Age");
                if let Some((lo, hi)) = self.age_bounds {
                    let slider = egui::Slider::new(&mut self.age_query, lo..=hi)
                        .step_by(1.0)
                        .text("age (days)");
                    ui.label("Select age to query selected trees that are less than or equal to:");
                    query_changed = ui.add(slider).changed();
                }
                ChartPlotter::draw_rows_table(ui, "age_query_table", &bundle.queried);
            });

        query_changed
    }

    fn section(ui: &mut egui::Ui, title: &str) {
        ui.label(RichText::new(title).size(18.0).strong());
        ui.add_space(6.0);
    }
}
