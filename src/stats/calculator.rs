//! Statistics Calculator Module
//! Descriptive summaries and finite-difference growth rates over a filtered table.

use crate::data::{Row, Table};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::collections::BTreeMap;

/// `describe()`-style statistics for one numeric column.
///
/// Undefined values (std with fewer than two rows, anything on an empty
/// column) are NaN rather than errors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub max: f64,
}

impl Default for ColumnSummary {
    fn default() -> Self {
        Self {
            count: 0,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            p25: f64::NAN,
            p50: f64::NAN,
            p75: f64::NAN,
            max: f64::NAN,
        }
    }
}

impl ColumnSummary {
    /// (label, value) pairs in display order. Count is reported as a float.
    pub fn labeled(&self) -> [(&'static str, f64); 8] {
        [
            ("count", self.count as f64),
            ("mean", self.mean),
            ("std", self.std),
            ("min", self.min),
            ("25%", self.p25),
            ("50%", self.p50),
            ("75%", self.p75),
            ("max", self.max),
        ]
    }
}

/// Summary of the age and circumference columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DescriptiveSummary {
    pub age: ColumnSummary,
    pub circumference: ColumnSummary,
}

/// How adjacent rows are paired when differencing circumference over age.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthMode {
    /// Adjacent rows of the filtered table, across tree boundaries.
    #[default]
    Sequential,
    /// Within each tree after sorting by age; each tree's first row is 0.
    PerEntity,
}

/// Handles the statistical calculations behind the dashboard.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute descriptive statistics for an array of values.
    pub fn compute_descriptive_stats(values: &[f64]) -> ColumnSummary {
        let n = values.len();
        if n == 0 {
            return ColumnSummary::default();
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        ColumnSummary {
            count: n,
            mean: Statistics::mean(values),
            std: Statistics::std_dev(values),
            min: Statistics::min(values),
            p25: Self::percentile(&sorted, 25.0),
            p50: Self::percentile(&sorted, 50.0),
            p75: Self::percentile(&sorted, 75.0),
            max: Statistics::max(values),
        }
    }

    /// Summarize both measurement columns of a table.
    pub fn describe(table: &Table) -> DescriptiveSummary {
        DescriptiveSummary {
            age: Self::compute_descriptive_stats(&table.ages()),
            circumference: Self::compute_descriptive_stats(&table.circumferences()),
        }
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    /// Growth rate for every row using the given pairing mode.
    pub fn growth_rate_with(table: &Table, mode: GrowthMode) -> Vec<f64> {
        match mode {
            GrowthMode::Sequential => Self::growth_rate(table),
            GrowthMode::PerEntity => Self::growth_rate_per_entity(table),
        }
    }

    /// `Δcircumference / Δage` between each row and the one before it in table order.
    ///
    /// Row 0 and undefined ratios (equal ages) are 0. With several trees in the
    /// table the first row of each later tree is differenced against the
    /// previous tree's last row.
    pub fn growth_rate(table: &Table) -> Vec<f64> {
        let rows = table.rows();
        let mut rates = Vec::with_capacity(rows.len());
        if let Some(first) = rows.first() {
            rates.push(0.0);
            let mut prev = first;
            for row in &rows[1..] {
                rates.push(Self::finite_difference(prev, row));
                prev = row;
            }
        }
        rates
    }

    /// Growth rate differenced within each tree after sorting its rows by age.
    ///
    /// The output is aligned with the table's row order.
    pub fn growth_rate_per_entity(table: &Table) -> Vec<f64> {
        let rows = table.rows();
        let mut by_tree: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
        for (i, row) in rows.iter().enumerate() {
            by_tree.entry(row.tree.as_str()).or_default().push(i);
        }

        let mut rates = vec![0.0; rows.len()];
        for indices in by_tree.values_mut() {
            indices.sort_by(|&a, &b| rows[a].age.total_cmp(&rows[b].age));
            for pair in indices.windows(2) {
                rates[pair[1]] = Self::finite_difference(&rows[pair[0]], &rows[pair[1]]);
            }
        }
        rates
    }

    fn finite_difference(prev: &Row, cur: &Row) -> f64 {
        let rate = (cur.circumference - prev.circumference) / (cur.age - prev.age);
        if rate.is_finite() {
            rate
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_percentile_linear_interpolation() {
        let sorted = vec![1.0, 2.0, 3.0, 4.0];
        assert!(close(StatsCalculator::percentile(&sorted, 25.0), 1.75));
        assert!(close(StatsCalculator::percentile(&sorted, 50.0), 2.5));
        assert!(close(StatsCalculator::percentile(&sorted, 75.0), 3.25));
        assert!(StatsCalculator::percentile(&[], 50.0).is_nan());
    }

    #[test]
    fn test_descriptive_stats() {
        let s = StatsCalculator::compute_descriptive_stats(&[30.0, 58.0, 87.0, 115.0]);
        assert_eq!(s.count, 4);
        assert!(close(s.mean, 72.5));
        // Sample std (n - 1 denominator)
        let var = ((42.5f64).powi(2) + 14.5f64.powi(2) + 14.5f64.powi(2) + 42.5f64.powi(2)) / 3.0;
        assert!(close(s.std, var.sqrt()));
        assert_eq!(s.min, 30.0);
        assert_eq!(s.max, 115.0);
        assert!(close(s.p25, 51.0));
        assert!(close(s.p50, 72.5));
        assert!(close(s.p75, 94.0));
    }

    #[test]
    fn test_single_value_summary() {
        let s = StatsCalculator::compute_descriptive_stats(&[42.0]);
        assert_eq!(s.count, 1);
        assert_eq!(s.mean, 42.0);
        assert!(s.std.is_nan());
        assert_eq!(s.min, 42.0);
        assert_eq!(s.max, 42.0);
        assert_eq!(s.p50, 42.0);
    }

    #[test]
    fn test_empty_summary() {
        let s = StatsCalculator::compute_descriptive_stats(&[]);
        assert_eq!(s.count, 0);
        assert!(s.mean.is_nan() && s.std.is_nan() && s.min.is_nan() && s.max.is_nan());
    }

    #[test]
    fn test_growth_rate_example() {
        let table = Table::new(vec![
            Row::new("1", "T1", 118.0, 30.0),
            Row::new("2", "T1", 484.0, 58.0),
        ]);
        let rates = StatsCalculator::growth_rate(&table);
        assert_eq!(rates.len(), 2);
        assert_eq!(rates[0], 0.0);
        assert!(close(rates[1], 28.0 / 366.0));
    }

    #[test]
    fn test_growth_rate_small_tables() {
        assert!(StatsCalculator::growth_rate(&Table::default()).is_empty());
        let one = Table::new(vec![Row::new("1", "T1", 118.0, 30.0)]);
        assert_eq!(StatsCalculator::growth_rate(&one), vec![0.0]);
        assert_eq!(StatsCalculator::growth_rate_per_entity(&one), vec![0.0]);
    }

    #[test]
    fn test_growth_rate_zero_age_difference() {
        let table = Table::new(vec![
            Row::new("1", "T1", 118.0, 30.0),
            Row::new("2", "T2", 118.0, 33.0),
            Row::new("3", "T3", 118.0, 33.0),
        ]);
        assert_eq!(StatsCalculator::growth_rate(&table), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_sequential_crosses_tree_boundary() {
        let table = Table::new(vec![
            Row::new("1", "T1", 118.0, 30.0),
            Row::new("2", "T1", 484.0, 58.0),
            Row::new("3", "T2", 118.0, 33.0),
            Row::new("4", "T2", 484.0, 69.0),
        ]);
        let rates = StatsCalculator::growth_rate(&table);
        assert!(close(rates[2], (33.0 - 58.0) / (118.0 - 484.0)));

        let per_tree = StatsCalculator::growth_rate_per_entity(&table);
        assert_eq!(per_tree[0], 0.0);
        assert!(close(per_tree[1], 28.0 / 366.0));
        assert_eq!(per_tree[2], 0.0);
        assert!(close(per_tree[3], 36.0 / 366.0));
    }

    #[test]
    fn test_per_entity_sorts_by_age() {
        let table = Table::new(vec![
            Row::new("1", "T1", 484.0, 58.0),
            Row::new("2", "T1", 118.0, 30.0),
        ]);
        let rates = StatsCalculator::growth_rate_per_entity(&table);
        assert!(close(rates[0], 28.0 / 366.0));
        assert_eq!(rates[1], 0.0);
    }
}
