//! Static Chart Renderer
//! Renders the dashboard charts to PNG files with plotters, one image per chart:
//!
//! 1. Tree Circumference Over Time (line + markers)
//! 2. Histogram of Circumferences (20 buckets)
//! 3. Comparative Growth of Trees (one line per tree, legend)
//! 4. Growth Rate Over Time (dashed red line + markers)
//!
//! The display bundle is written next to the images as `summary.json`.

use crate::dashboard::DisplayBundle;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use std::ops::Range;
use std::path::{Path, PathBuf};
use thiserror::Error;

type DrawResult = Result<(), Box<dyn std::error::Error>>;

const FONT: &str = "sans-serif";
const HIST_COLOR: RGBColor = RGBColor(0, 0, 255);

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Plot error: {0}")]
    Plot(String),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The four exported charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Growth,
    Histogram,
    Comparison,
    GrowthRate,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::Growth,
        ChartKind::Histogram,
        ChartKind::Comparison,
        ChartKind::GrowthRate,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ChartKind::Growth => "Tree Circumference Over Time",
            ChartKind::Histogram => "Histogram of Circumferences",
            ChartKind::Comparison => "Comparative Growth of Trees",
            ChartKind::GrowthRate => "Growth Rate Over Time",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            ChartKind::Growth => "growth_plot.png",
            ChartKind::Histogram => "circumference_histogram.png",
            ChartKind::Comparison => "tree_comparison.png",
            ChartKind::GrowthRate => "growth_rate.png",
        }
    }
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Write every chart plus `summary.json` into `dir`, returning the written paths.
    pub fn export_all(
        bundle: &DisplayBundle,
        dir: &Path,
        width: u32,
        height: u32,
    ) -> Result<Vec<PathBuf>, ExportError> {
        std::fs::create_dir_all(dir)?;
        let mut written = Vec::with_capacity(ChartKind::ALL.len() + 1);

        for kind in ChartKind::ALL {
            let png = Self::render_chart_to_bytes(kind, bundle, width, height)?;
            let path = dir.join(kind.file_name());
            std::fs::write(&path, png)?;
            written.push(path);
        }

        let summary_path = dir.join("summary.json");
        std::fs::write(&summary_path, bundle.to_json()?)?;
        written.push(summary_path);

        log::info!("Exported {} files to {}", written.len(), dir.display());
        Ok(written)
    }

    /// Render one chart into in-memory PNG bytes.
    pub fn render_chart_to_bytes(
        kind: ChartKind,
        bundle: &DisplayBundle,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, ExportError> {
        let mut buffer = vec![0u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            let drawn = match kind {
                ChartKind::Growth => Self::draw_growth(&root, bundle),
                ChartKind::Histogram => Self::draw_histogram(&root, bundle),
                ChartKind::Comparison => Self::draw_comparison(&root, bundle),
                ChartKind::GrowthRate => Self::draw_growth_rate(&root, bundle),
            };
            drawn
                .and_then(|_| root.present().map_err(Into::into))
                .map_err(|e| ExportError::Plot(e.to_string()))?;
        }

        let img = image::RgbImage::from_raw(width, height, buffer)
            .ok_or_else(|| ExportError::Plot("bitmap size mismatch".to_string()))?;
        let mut png = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)?;
        Ok(png)
    }

    fn draw_growth(root: &DrawingArea<BitMapBackend, plotters::coord::Shift>, bundle: &DisplayBundle) -> DrawResult {
        root.fill(&WHITE)?;
        let points = &bundle.circumference_series;
        let mut chart = ChartBuilder::on(root)
            .caption(ChartKind::Growth.title(), (FONT, 26))
            .margin(20)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(
                Self::padded_range(points.iter().map(|p| p[0])),
                Self::padded_range(points.iter().map(|p| p[1])),
            )?;
        chart
            .configure_mesh()
            .x_desc("Age (days)")
            .y_desc("Circumference (cm)")
            .draw()?;

        chart.draw_series(LineSeries::new(points.iter().map(|p| (p[0], p[1])), BLUE.stroke_width(2)))?;
        chart.draw_series(points.iter().map(|p| Circle::new((p[0], p[1]), 4, BLUE.filled())))?;
        Ok(())
    }

    fn draw_histogram(root: &DrawingArea<BitMapBackend, plotters::coord::Shift>, bundle: &DisplayBundle) -> DrawResult {
        root.fill(&WHITE)?;
        let bins = &bundle.histogram.bins;
        let x_range = match (bins.first(), bins.last()) {
            (Some(first), Some(last)) => first.lower..last.upper,
            _ => 0.0..1.0,
        };
        let max_count = bins.iter().map(|b| b.count).max().unwrap_or(0).max(1) as f64;

        let mut chart = ChartBuilder::on(root)
            .caption(ChartKind::Histogram.title(), (FONT, 26))
            .margin(20)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(x_range, 0.0..max_count * 1.1)?;
        chart
            .configure_mesh()
            .x_desc("Circumference (cm)")
            .y_desc("Frequency")
            .draw()?;

        chart.draw_series(bins.iter().map(|b| {
            Rectangle::new(
                [(b.lower, 0.0), (b.upper, b.count as f64)],
                HIST_COLOR.mix(0.7).filled(),
            )
        }))?;
        Ok(())
    }

    fn draw_comparison(root: &DrawingArea<BitMapBackend, plotters::coord::Shift>, bundle: &DisplayBundle) -> DrawResult {
        root.fill(&WHITE)?;
        let all = bundle.per_tree.iter().flat_map(|s| s.points.iter());
        let mut chart = ChartBuilder::on(root)
            .caption(ChartKind::Comparison.title(), (FONT, 26))
            .margin(20)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(
                Self::padded_range(all.clone().map(|p| p[0])),
                Self::padded_range(all.map(|p| p[1])),
            )?;
        chart
            .configure_mesh()
            .x_desc("Age (days)")
            .y_desc("Circumference (cm)")
            .draw()?;

        for (i, series) in bundle.per_tree.iter().enumerate() {
            let color = Palette99::pick(i);
            chart
                .draw_series(LineSeries::new(
                    series.points.iter().map(|p| (p[0], p[1])),
                    color.stroke_width(2),
                ))?
                .label(format!("Tree {}", series.tree))
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], Palette99::pick(i).stroke_width(2))
                });
        }

        if !bundle.per_tree.is_empty() {
            chart
                .configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()?;
        }
        Ok(())
    }

    fn draw_growth_rate(root: &DrawingArea<BitMapBackend, plotters::coord::Shift>, bundle: &DisplayBundle) -> DrawResult {
        root.fill(&WHITE)?;
        let points = &bundle.growth_series;
        let mut chart = ChartBuilder::on(root)
            .caption(ChartKind::GrowthRate.title(), (FONT, 26))
            .margin(20)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(
                Self::padded_range(points.iter().map(|p| p[0])),
                Self::padded_range(points.iter().map(|p| p[1])),
            )?;
        chart
            .configure_mesh()
            .x_desc("Age (days)")
            .y_desc("Growth Rate (cm/day)")
            .draw()?;

        chart.draw_series(DashedLineSeries::new(
            points.iter().map(|p| (p[0], p[1])),
            8,
            6,
            RED.stroke_width(2),
        ))?;
        chart.draw_series(points.iter().map(|p| Circle::new((p[0], p[1]), 4, RED.filled())))?;
        Ok(())
    }

    /// Axis range with 5% padding; degenerate inputs get a unit-wide range.
    fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
        let (lo, hi) = values
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
        if lo > hi {
            return 0.0..1.0;
        }
        if lo == hi {
            return (lo - 1.0)..(hi + 1.0);
        }
        let pad = (hi - lo) * 0.05;
        (lo - pad)..(hi + pad)
    }
}
