// src/report/render.rs

//! Text tables for the report subcommand.

use std::fmt::Write as _;

use crate::report::generator::OutcomeRow;
use crate::report::histogram::Histogram;
use crate::report::stats::Summary;

const HISTOGRAM_BAR_MAX: usize = 40;

pub const CSV_PLACEHOLDER: &str =
    "CSV export is not available in this prototype; no file was written.";

pub fn summary_table(summary: &Summary) -> String {
    let rows = [
        ("Runs considered", summary.runs.to_string()),
        ("Mean final steps", format!("{:.0}", summary.mean_time)),
        ("Mean final completion", format!("{:.1}%", summary.mean_completion)),
        ("Mean final EV ($)", format!("{:.2}", summary.mean_earned_value)),
        ("Mean final AC ($)", format!("{:.2}", summary.mean_actual_cost)),
        ("Mean final CPI", format!("{:.2}", summary.mean_cpi)),
    ];

    let mut out = String::from("Summary\n");
    for (label, value) in rows {
        let _ = writeln!(out, "  {label:<24}{value:>14}");
    }
    out
}

pub fn results_table(rows: &[OutcomeRow]) -> String {
    let mut out = String::from("Results\n");
    let _ = writeln!(
        out,
        "  {:>4} {:>6} {:>8} {:>12} {:>12} {:>6}",
        "#", "steps", "done %", "EV ($)", "AC ($)", "CPI"
    );
    for r in rows {
        let _ = writeln!(
            out,
            "  {:>4} {:>6} {:>8.1} {:>12.2} {:>12.2} {:>6.2}",
            r.sim_id, r.time, r.completion, r.earned_value, r.actual_cost, r.cpi
        );
    }
    out
}

/// Horizontal bar chart; bars are scaled to the fullest bin.
pub fn histogram_chart(histogram: &Histogram) -> String {
    let mut out = String::from("Actual cost distribution\n");
    if histogram.is_empty() {
        out.push_str("  not enough data to chart cost distribution\n");
        return out;
    }

    let peak = histogram.bins.iter().map(|b| b.count).max().unwrap_or(0).max(1);
    let label_width = histogram.bins.iter().map(|b| b.label.len()).max().unwrap_or(0);

    for bin in &histogram.bins {
        let bar = bin.count * HISTOGRAM_BAR_MAX / peak;
        let _ = writeln!(
            out,
            "  {:<label_width$} | {:<HISTOGRAM_BAR_MAX$} {}",
            bin.label,
            "#".repeat(bar),
            bin.count
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_histogram_prints_notice() {
        let text = histogram_chart(&Histogram::default());
        assert!(text.contains("not enough data"));
    }

    #[test]
    fn chart_lists_every_bin() {
        let h = Histogram::build(&[1.0, 2.0, 3.0, 4.0]);
        let text = histogram_chart(&h);
        assert!(text.contains("$1-$3"));
        assert!(text.contains("$3-$4"));
    }

    #[test]
    fn summary_formats_values() {
        let s = Summary {
            runs: 3,
            mean_time: 150.4,
            mean_completion: 85.25,
            mean_earned_value: 10.0,
            mean_actual_cost: 12.0,
            mean_cpi: 0.833,
        };
        let text = summary_table(&s);
        assert!(text.contains("150"));
        assert!(text.contains("85.2%") || text.contains("85.3%"));
        assert!(text.contains("0.83"));
    }
}
