// src/report/histogram.rs

//! Equal-width histogram of actual-cost values.

use tracing::debug;

pub const MAX_BINS: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct Bin {
    pub label: String,
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Histogram {
    pub bins: Vec<Bin>,
}

/// `clamp(floor(sqrt(n)), 1, MAX_BINS)`.
pub fn bin_count(samples: usize) -> usize {
    ((samples as f64).sqrt().floor() as usize).clamp(1, MAX_BINS)
}

impl Histogram {
    /// Bucket the finite, positive values. Others are ignored.
    ///
    /// The last bin is closed so the maximum lands in it. When every value
    /// is equal the histogram collapses to one bin labelled with that value.
    pub fn build(values: &[f64]) -> Self {
        let costs: Vec<f64> = values
            .iter()
            .copied()
            .filter(|c| c.is_finite() && *c > 0.0)
            .collect();

        if costs.is_empty() {
            debug!("no positive cost values; histogram is empty");
            return Self::default();
        }

        let min = costs.iter().copied().fold(f64::INFINITY, f64::min);
        let max = costs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let width = max - min;

        if width <= 0.0 {
            return Self {
                bins: vec![Bin {
                    label: format!("${min:.0}"),
                    lower: min,
                    upper: max,
                    count: costs.len(),
                }],
            };
        }

        let n_bins = bin_count(costs.len());
        let size = width / n_bins as f64;

        let mut bins: Vec<Bin> = (0..n_bins)
            .map(|i| {
                let lower = min + i as f64 * size;
                let upper = min + (i + 1) as f64 * size;
                Bin {
                    label: format!("${}-${}", lower.round(), upper.round()),
                    lower,
                    upper,
                    count: 0,
                }
            })
            .collect();

        for cost in costs {
            let idx = (((cost - min) / size).floor() as usize).min(n_bins - 1);
            bins[idx].count += 1;
        }

        debug!(bins = n_bins, size, "histogram built");
        Self { bins }
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}
