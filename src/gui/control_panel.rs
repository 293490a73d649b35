//! Control Panel Widget
//! Left side panel with the data source, tree selection and export controls.

use crate::data::SelectionSet;
use crate::stats::GrowthMode;
use egui::{Color32, RichText, ScrollArea};
use std::path::PathBuf;

/// Sidebar state owned by the presentation layer.
pub struct ControlPanel {
    pub csv_path: Option<PathBuf>,
    pub trees: Vec<String>,
    pub selection: SelectionSet,
    pub growth_mode: GrowthMode,
    pub status: String,
    pub export_enabled: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            csv_path: None,
            trees: Vec::new(),
            selection: SelectionSet::default(),
            growth_mode: GrowthMode::default(),
            status: "Ready".to_string(),
            export_enabled: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the tree list and selection after a dataset load.
    pub fn update_trees(&mut self, trees: Vec<String>, selection: SelectionSet) {
        self.export_enabled = !trees.is_empty();
        self.trees = trees;
        self.selection = selection;
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🌳 Orchard View")
                    .size(22.0)
                    .color(Color32::from_rgb(255, 140, 0)),
            );
            ui.label(RichText::new("Tree Growth Explorer").size(11.0).color(Color32::GRAY));
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .csv_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file loaded".to_string());
                    ui.label(RichText::new(&path_text).size(12.0));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Open").clicked() {
                            action = ControlPanelAction::OpenCsv;
                        }
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Tree Selection Section =====
        ui.label(RichText::new("Select a Tree:").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                ScrollArea::vertical().max_height(200.0).show(ui, |ui| {
                    for tree in &self.trees {
                        let mut checked = self.selection.contains(tree);
                        if ui.checkbox(&mut checked, format!("Tree {tree}")).changed() {
                            self.selection.toggle(tree);
                            action = ControlPanelAction::SelectionChanged;
                        }
                    }
                });
            });

        ui.add_space(5.0);
        ui.horizontal(|ui| {
            if ui.small_button("Select All").clicked() {
                self.selection = SelectionSet::new(self.trees.iter().cloned());
                action = ControlPanelAction::SelectionChanged;
            }
            if ui.small_button("Clear All").clicked() {
                self.selection = SelectionSet::default();
                action = ControlPanelAction::SelectionChanged;
            }
        });

        if self.selection.is_empty() && !self.trees.is_empty() {
            ui.label(
                RichText::new("⚠ Select at least one tree")
                    .size(11.0)
                    .color(Color32::from_rgb(255, 193, 7)),
            );
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Growth Rate Section =====
        ui.label(RichText::new("⚙️ Growth Rate").size(14.0).strong());
        ui.add_space(5.0);

        let before = self.growth_mode;
        ui.radio_value(&mut self.growth_mode, GrowthMode::Sequential, "Table order");
        ui.radio_value(&mut self.growth_mode, GrowthMode::PerEntity, "Per tree, sorted by age");
        if self.growth_mode != before {
            action = ControlPanelAction::GrowthModeChanged;
        }
        if self.growth_mode == GrowthMode::Sequential && self.selection.len() > 1 {
            ui.label(
                RichText::new("Rates at the first row of each later tree span two trees.")
                    .size(10.0)
                    .color(Color32::GRAY),
            );
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.export_enabled, |ui| {
                let button = egui::Button::new(RichText::new("🖼 Export Charts").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::Export;
                }
            });
        });

        ui.add_space(10.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Exported") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    OpenCsv,
    SelectionChanged,
    GrowthModeChanged,
    Export,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_trees_resets_selection() {
        let mut panel = ControlPanel::new();
        assert!(!panel.export_enabled);
        panel.update_trees(vec!["1".into(), "2".into()], SelectionSet::new(["1"]));
        assert!(panel.export_enabled);
        assert!(panel.selection.contains("1"));
        assert_eq!(panel.trees.len(), 2);
    }
}
