//! Equal-width histogram used for the circumference distribution chart.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Buckets spanning `[min, max]` of the input; the last bucket is closed on the right.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    /// Bucket `values` into `bin_count` equal-width bins. NaNs are skipped.
    ///
    /// Edges depend only on the min, max and bin count. A constant input is
    /// spread over `[v - 0.5, v + 0.5]`.
    pub fn from_values(values: &[f64], bin_count: usize) -> Self {
        let finite: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        if finite.is_empty() || bin_count == 0 {
            return Self::default();
        }

        let mut lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let mut hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let edges = Self::edges(lo, hi, bin_count);
        let mut counts = vec![0usize; bin_count];
        for v in finite {
            counts[Self::bucket_of(v, lo, hi, &edges)] += 1;
        }

        Self {
            bins: edges
                .windows(2)
                .zip(counts)
                .map(|(e, count)| HistogramBin {
                    lower: e[0],
                    upper: e[1],
                    count,
                })
                .collect(),
        }
    }

    fn edges(lo: f64, hi: f64, bin_count: usize) -> Vec<f64> {
        let step = (hi - lo) / bin_count as f64;
        (0..=bin_count)
            .map(|i| if i == bin_count { hi } else { lo + step * i as f64 })
            .collect()
    }

    fn bucket_of(v: f64, lo: f64, hi: f64, edges: &[f64]) -> usize {
        let n = edges.len() - 1;
        let mut idx = (((v - lo) / (hi - lo)) * n as f64).floor().max(0.0) as usize;
        idx = idx.min(n - 1);
        // Correct for rounding at bucket edges.
        if idx > 0 && v < edges[idx] {
            idx -= 1;
        } else if idx + 1 < n && v >= edges[idx + 1] {
            idx += 1;
        }
        idx
    }

    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twenty_bins_cover_range() {
        let values: Vec<f64> = (0..=100).map(|v| v as f64).collect();
        let hist = Histogram::from_values(&values, 20);
        assert_eq!(hist.bins.len(), 20);
        assert_eq!(hist.bins[0].lower, 0.0);
        assert_eq!(hist.bins[19].upper, 100.0);
        assert_eq!(hist.total(), 101);
        // 100 lands in the closed last bucket
        assert_eq!(hist.bins[19].count, 6);
        assert_eq!(hist.bins[0].count, 5);
    }

    #[test]
    fn test_order_independent() {
        let values = vec![30.0, 58.0, 87.0, 115.0, 120.0, 142.0, 145.0, 33.0];
        let mut reversed = values.clone();
        reversed.reverse();
        assert_eq!(
            Histogram::from_values(&values, 20),
            Histogram::from_values(&reversed, 20)
        );
    }

    #[test]
    fn test_constant_values() {
        let hist = Histogram::from_values(&[42.0, 42.0], 20);
        assert_eq!(hist.bins[0].lower, 41.5);
        assert_eq!(hist.bins[19].upper, 42.5);
        assert_eq!(hist.total(), 2);
        assert_eq!(hist.bins[10].count, 2);
    }

    #[test]
    fn test_empty() {
        assert!(Histogram::from_values(&[], 20).is_empty());
        assert!(Histogram::from_values(&[1.0], 0).is_empty());
    }
}
