//! Orchard View Main Application
//! Main window with control panel and chart viewer.

use crate::charts::StaticChartRenderer;
use crate::config::DashboardConfig;
use crate::dashboard::{recompute, DisplayBundle, InteractionContext};
use crate::data::{DataLoader, Table};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::SidePanel;
use std::path::PathBuf;

/// Main application window.
pub struct OrchardApp {
    config: DashboardConfig,
    loader: DataLoader,
    table: Table,
    context: InteractionContext,
    bundle: DisplayBundle,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
    export_dir: PathBuf,
}

impl OrchardApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: DashboardConfig,
        table: Table,
        csv_path: PathBuf,
        export_dir: PathBuf,
    ) -> Self {
        Self::with_table(config, table, csv_path, export_dir)
    }

    fn with_table(
        config: DashboardConfig,
        table: Table,
        csv_path: PathBuf,
        export_dir: PathBuf,
    ) -> Self {
        let context = InteractionContext::initial(&table);
        let bundle = recompute(&table, &context, &config);
        let mut app = Self {
            loader: DataLoader::new(&config),
            config,
            table,
            context,
            bundle,
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
            export_dir,
        };
        app.control_panel.growth_mode = app.config.growth_mode;
        app.sync_widgets(csv_path);
        app
    }

    /// Swap in a newly loaded table and reset the interaction state.
    fn replace_table(&mut self, table: Table, csv_path: PathBuf) {
        self.table = table;
        self.context = InteractionContext::initial(&self.table);
        self.refresh();
        self.sync_widgets(csv_path);
    }

    /// Point the widgets at the current table and context.
    fn sync_widgets(&mut self, csv_path: PathBuf) {
        self.control_panel.csv_path = Some(csv_path);
        self.control_panel
            .update_trees(self.table.distinct_trees(), self.context.selection.clone());
        self.chart_viewer
            .set_age_bounds(self.table.age_bounds(), self.context.age_threshold);
        self.control_panel.set_status(&format!(
            "Loaded {} rows, {} trees",
            self.table.len(),
            self.control_panel.trees.len()
        ));
    }

    /// Rebuild the context from the widgets and recompute every output.
    fn apply_inputs(&mut self) {
        self.config.growth_mode = self.control_panel.growth_mode;
        self.context = InteractionContext {
            selection: self.control_panel.selection.clone(),
            age_threshold: self.table.clamp_age(self.chart_viewer.age_query),
        };
        self.refresh();
    }

    fn refresh(&mut self) {
        self.bundle = recompute(&self.table, &self.context, &self.config);
    }

    /// Handle CSV file selection
    fn handle_open_csv(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        else {
            return;
        };

        match self.loader.load_csv(&path) {
            Ok(table) => {
                self.replace_table(table, path);
            }
            Err(e) => {
                log::error!("Failed to load {}: {}", path.display(), e);
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }

    /// Render charts to PNG and open the export folder
    fn handle_export(&mut self) {
        match StaticChartRenderer::export_all(
            &self.bundle,
            &self.export_dir,
            self.config.export_width,
            self.config.export_height,
        ) {
            Ok(files) => {
                self.control_panel.set_status(&format!(
                    "Exported {} files to {}",
                    files.len(),
                    self.export_dir.display()
                ));
                if let Err(e) = open::that(&self.export_dir) {
                    log::warn!("Could not open {}: {}", self.export_dir.display(), e);
                }
            }
            Err(e) => {
                log::error!("Export failed: {}", e);
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }
}

impl eframe::App for OrchardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlPanelAction::OpenCsv => self.handle_open_csv(),
                        ControlPanelAction::SelectionChanged
                        | ControlPanelAction::GrowthModeChanged => self.apply_inputs(),
                        ControlPanelAction::Export => self.handle_export(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            if self
                .chart_viewer
                .show(ui, &self.config.window_title, &self.bundle)
            {
                self.apply_inputs();
            }
        });
    }
}
