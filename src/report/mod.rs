// src/report/mod.rs

//! Summary report: synthetic outcome rows, their means and a cost
//! histogram.

use rand::Rng;
use tracing::info;

pub mod generator;
pub mod histogram;
pub mod render;
pub mod stats;

pub use generator::{generate, OutcomeRow};
pub use histogram::{bin_count, Bin, Histogram};
pub use stats::Summary;

#[derive(Debug, Clone)]
pub struct Report {
    pub rows: Vec<OutcomeRow>,
    pub summary: Summary,
    pub histogram: Histogram,
}

impl Report {
    pub fn build<R: Rng + ?Sized>(runs: u32, max_steps: u32, rng: &mut R) -> Self {
        let rows = generate(runs, max_steps, rng);
        let summary = Summary::from_rows(&rows);
        let costs: Vec<f64> = rows.iter().map(|r| r.actual_cost).collect();
        let histogram = Histogram::build(&costs);

        info!(
            runs,
            max_steps,
            bins = histogram.bins.len(),
            mean_cpi = summary.mean_cpi,
            "report generated"
        );

        Self {
            rows,
            summary,
            histogram,
        }
    }

    /// Full text rendering: summary, results table and histogram.
    pub fn to_text(&self) -> String {
        let mut out = render::summary_table(&self.summary);
        out.push('\n');
        out.push_str(&render::results_table(&self.rows));
        out.push('\n');
        out.push_str(&render::histogram_chart(&self.histogram));
        out
    }
}
