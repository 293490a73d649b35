//! Orchard View - Tree Growth Data Explorer
//!
//! Loads a longitudinal tree-growth table, filters it by the selected trees,
//! and derives the statistics and chart series shown by the dashboard.

pub mod charts;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod gui;
pub mod stats;
