// src/report/stats.rs

use crate::report::generator::OutcomeRow;

/// Arithmetic means over the generated rows.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    pub runs: usize,
    pub mean_time: f64,
    pub mean_completion: f64,
    pub mean_earned_value: f64,
    pub mean_actual_cost: f64,
    /// Mean over rows whose CPI is finite and positive; 0 when there are none.
    pub mean_cpi: f64,
}

impl Summary {
    pub fn from_rows(rows: &[OutcomeRow]) -> Self {
        if rows.is_empty() {
            return Self::default();
        }

        let valid_cpi: Vec<f64> = rows
            .iter()
            .map(|r| r.cpi)
            .filter(|c| c.is_finite() && *c > 0.0)
            .collect();
        let mean_cpi = if valid_cpi.is_empty() {
            0.0
        } else {
            valid_cpi.iter().sum::<f64>() / valid_cpi.len() as f64
        };

        Self {
            runs: rows.len(),
            mean_time: mean_of(rows, |r| f64::from(r.time)),
            mean_completion: mean_of(rows, |r| r.completion),
            mean_earned_value: mean_of(rows, |r| r.earned_value),
            mean_actual_cost: mean_of(rows, |r| r.actual_cost),
            mean_cpi,
        }
    }
}

fn mean_of(rows: &[OutcomeRow], field: impl Fn(&OutcomeRow) -> f64) -> f64 {
    rows.iter().map(field).sum::<f64>() / rows.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(time: u32, ac: f64, ev: f64, cpi: f64) -> OutcomeRow {
        OutcomeRow {
            sim_id: 1,
            time,
            completion: 80.0,
            earned_value: ev,
            actual_cost: ac,
            cpi,
        }
    }

    #[test]
    fn means_over_all_rows() {
        let s = Summary::from_rows(&[row(100, 10.0, 8.0, 0.8), row(200, 30.0, 36.0, 1.2)]);
        assert_eq!(s.runs, 2);
        assert_eq!(s.mean_time, 150.0);
        assert_eq!(s.mean_actual_cost, 20.0);
        assert_eq!(s.mean_earned_value, 22.0);
        assert!((s.mean_cpi - 1.0).abs() < 1e-12);
    }

    #[test]
    fn cpi_mean_skips_invalid_rows() {
        let s = Summary::from_rows(&[
            row(100, 0.0, 5.0, 0.0),
            row(100, 10.0, 5.0, 0.5),
            row(100, 10.0, 5.0, f64::INFINITY),
        ]);
        assert_eq!(s.mean_cpi, 0.5);
    }

    #[test]
    fn no_valid_cpi_means_zero() {
        let s = Summary::from_rows(&[row(100, 0.0, 5.0, 0.0)]);
        assert_eq!(s.mean_cpi, 0.0);
    }

    #[test]
    fn empty_rows_give_default() {
        assert_eq!(Summary::from_rows(&[]), Summary::default());
    }
}
