//! Orchard View - Tree Growth Data Explorer
//!
//! Loads the dataset once at startup and opens the interactive dashboard.

use anyhow::{anyhow, Context};
use clap::Parser;
use eframe::egui;
use orchard_view::config::DashboardConfig;
use orchard_view::data::DataLoader;
use orchard_view::gui::OrchardApp;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "orchard-view")]
#[command(about = "Interactive explorer for longitudinal tree growth measurements")]
struct Cli {
    /// CSV file with index, tree, age and circumference columns
    #[arg(default_value = "Orange.csv")]
    dataset: PathBuf,

    /// JSON file overriding column names and chart settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for exported chart images
    #[arg(long, default_value = "orchard_export")]
    export_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => DashboardConfig::from_file(path)?,
        None => DashboardConfig::default(),
    };

    let table = DataLoader::new(&config)
        .load_csv(&cli.dataset)
        .inspect_err(|e| log::error!("{e}"))
        .with_context(|| format!("could not start with dataset {}", cli.dataset.display()))?;

    let title = config.window_title.clone();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1300.0, 900.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title(&title),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            Ok(Box::new(OrchardApp::new(
                cc,
                config,
                table,
                cli.dataset,
                cli.export_dir,
            )))
        }),
    )
    .map_err(|e| anyhow!("{e}"))
}
