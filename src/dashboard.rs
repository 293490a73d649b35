//! Dashboard Module
//! Turns the loaded table plus the current interaction context into everything
//! the presentation layer draws. Recomputed from scratch on every change.

use crate::config::DashboardConfig;
use crate::data::{query_by_age, select_entities, Row, SelectionSet, Table};
use crate::stats::{DescriptiveSummary, Histogram, StatsCalculator};
use serde::Serialize;
use std::fmt;

/// User input for one interaction cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InteractionContext {
    pub selection: SelectionSet,
    /// Inclusive upper bound for the age query.
    pub age_threshold: f64,
}

impl InteractionContext {
    /// First tree selected, threshold at the youngest age in the dataset.
    pub fn initial(table: &Table) -> Self {
        Self {
            selection: SelectionSet::default_for(table),
            age_threshold: table.age_bounds().map(|(lo, _)| lo).unwrap_or(0.0),
        }
    }
}

/// A filtered row with its derived growth rate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthRow {
    #[serde(flatten)]
    pub row: Row,
    pub growth_rate: f64,
}

/// Age/circumference points of a single tree for the comparison chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeSeries {
    pub tree: String,
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardWarning {
    EmptySelection,
}

impl fmt::Display for DashboardWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashboardWarning::EmptySelection => write!(f, "No trees selected"),
        }
    }
}

/// Everything shown for one interaction context.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayBundle {
    pub context: InteractionContext,
    pub filtered: Vec<GrowthRow>,
    /// Age vs circumference in table order.
    pub circumference_series: Vec<[f64; 2]>,
    pub histogram: Histogram,
    pub per_tree: Vec<TreeSeries>,
    pub summary: DescriptiveSummary,
    /// Age vs growth rate in table order.
    pub growth_series: Vec<[f64; 2]>,
    pub queried: Vec<Row>,
    pub warnings: Vec<DashboardWarning>,
}

impl DisplayBundle {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Recompute every derived output from the full table.
pub fn recompute(table: &Table, context: &InteractionContext, config: &DashboardConfig) -> DisplayBundle {
    let filtered = select_entities(table, &context.selection);
    let growth = StatsCalculator::growth_rate_with(&filtered, config.growth_mode);

    let mut warnings = Vec::new();
    if context.selection.is_empty() {
        log::warn!("Empty tree selection, dashboard outputs are empty");
        warnings.push(DashboardWarning::EmptySelection);
    }

    let per_tree = filtered
        .distinct_trees()
        .into_iter()
        .map(|tree| {
            let points = filtered
                .rows()
                .iter()
                .filter(|r| r.tree == tree)
                .map(|r| [r.age, r.circumference])
                .collect();
            TreeSeries { tree, points }
        })
        .collect();

    let bundle = DisplayBundle {
        context: context.clone(),
        circumference_series: filtered
            .rows()
            .iter()
            .map(|r| [r.age, r.circumference])
            .collect(),
        histogram: Histogram::from_values(&filtered.circumferences(), config.histogram_bins),
        per_tree,
        summary: StatsCalculator::describe(&filtered),
        growth_series: filtered
            .rows()
            .iter()
            .zip(&growth)
            .map(|(r, &g)| [r.age, g])
            .collect(),
        queried: query_by_age(&filtered, context.age_threshold).rows().to_vec(),
        filtered: filtered
            .rows()
            .iter()
            .cloned()
            .zip(growth)
            .map(|(row, growth_rate)| GrowthRow { row, growth_rate })
            .collect(),
        warnings,
    };

    log::debug!(
        "Recomputed dashboard: {} selected trees, {} rows, {} queried",
        context.selection.len(),
        bundle.filtered.len(),
        bundle.queried.len()
    );
    bundle
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::GrowthMode;

    fn sample() -> Table {
        Table::new(vec![
            Row::new("1", "T1", 118.0, 30.0),
            Row::new("2", "T1", 484.0, 58.0),
            Row::new("3", "T2", 118.0, 33.0),
        ])
    }

    #[test]
    fn test_initial_context() {
        let ctx = InteractionContext::initial(&sample());
        assert_eq!(ctx.selection, SelectionSet::new(["T1"]));
        assert_eq!(ctx.age_threshold, 118.0);
    }

    #[test]
    fn test_single_tree_bundle() {
        let ctx = InteractionContext {
            selection: SelectionSet::new(["T1"]),
            age_threshold: 484.0,
        };
        let bundle = recompute(&sample(), &ctx, &DashboardConfig::default());
        assert_eq!(bundle.filtered.len(), 2);
        assert_eq!(bundle.filtered[0].growth_rate, 0.0);
        assert!((bundle.filtered[1].growth_rate - 28.0 / 366.0).abs() < 1e-12);
        assert_eq!(bundle.circumference_series, vec![[118.0, 30.0], [484.0, 58.0]]);
        assert_eq!(bundle.growth_series.len(), 2);
        assert_eq!(bundle.histogram.bins.len(), 20);
        assert_eq!(bundle.histogram.total(), 2);
        assert_eq!(bundle.per_tree.len(), 1);
        assert_eq!(bundle.summary.age.count, 2);
        assert_eq!(bundle.queried.len(), 2);
        assert!(bundle.warnings.is_empty());
    }

    #[test]
    fn test_two_trees_query_at_threshold() {
        let ctx = InteractionContext {
            selection: SelectionSet::new(["T1", "T2"]),
            age_threshold: 118.0,
        };
        let bundle = recompute(&sample(), &ctx, &DashboardConfig::default());
        assert_eq!(
            bundle.queried,
            vec![Row::new("1", "T1", 118.0, 30.0), Row::new("3", "T2", 118.0, 33.0)]
        );
        let trees: Vec<&str> = bundle.per_tree.iter().map(|s| s.tree.as_str()).collect();
        assert_eq!(trees, vec!["T1", "T2"]);
    }

    #[test]
    fn test_per_entity_mode_from_config() {
        let ctx = InteractionContext {
            selection: SelectionSet::new(["T1", "T2"]),
            age_threshold: 118.0,
        };
        let config = DashboardConfig {
            growth_mode: GrowthMode::PerEntity,
            ..DashboardConfig::default()
        };
        let bundle = recompute(&sample(), &ctx, &config);
        assert_eq!(bundle.filtered[2].growth_rate, 0.0);
    }

    #[test]
    fn test_empty_selection_degrades() {
        let ctx = InteractionContext {
            selection: SelectionSet::default(),
            age_threshold: 1000.0,
        };
        let bundle = recompute(&sample(), &ctx, &DashboardConfig::default());
        assert_eq!(bundle.warnings, vec![DashboardWarning::EmptySelection]);
        assert!(bundle.filtered.is_empty());
        assert!(bundle.histogram.is_empty());
        assert!(bundle.per_tree.is_empty());
        assert!(bundle.queried.is_empty());
        assert_eq!(bundle.summary.age.count, 0);
        assert!(bundle.summary.age.mean.is_nan());
    }

    #[test]
    fn test_json_flattens_growth_rows() {
        let ctx = InteractionContext::initial(&sample());
        let json = recompute(&sample(), &ctx, &DashboardConfig::default())
            .to_json()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["filtered"][0]["tree"], "T1");
        assert_eq!(value["filtered"][0]["growth_rate"], 0.0);
    }
}
