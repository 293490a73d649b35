//! Stats module - descriptive statistics, growth rates and histograms

mod calculator;
mod histogram;

pub use calculator::{ColumnSummary, DescriptiveSummary, GrowthMode, StatsCalculator};
pub use histogram::{Histogram, HistogramBin};
