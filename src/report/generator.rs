// src/report/generator.rs

//! Synthetic outcome rows for the summary report.
//!
//! Rows are drawn straight from randomized formulas. They do not come from
//! running the step engine.

use rand::Rng;

use crate::sim::unit_sample;

/// One synthetic simulation outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutcomeRow {
    /// 1-based row number.
    pub sim_id: u32,
    /// Steps taken before the run stopped.
    pub time: u32,
    /// Completion percentage, in `[70, 100)`.
    pub completion: f64,
    pub earned_value: f64,
    pub actual_cost: f64,
    /// `earned_value / actual_cost`, or 0 when the cost is not positive.
    pub cpi: f64,
}

pub fn generate<R: Rng + ?Sized>(count: u32, max_steps: u32, rng: &mut R) -> Vec<OutcomeRow> {
    (1..=count)
        .map(|sim_id| {
            let time = (f64::from(max_steps) * (0.7 + unit_sample(rng) * 0.3)).floor() as u32;
            let completion = 70.0 + unit_sample(rng) * 30.0;
            let base = (20.0 + unit_sample(rng) * 10.0) * (3.0 + unit_sample(rng) * 2.0);
            let planned = f64::from(time) * base;
            let actual_cost = planned * (1.0 + (unit_sample(rng) - 0.5) * 0.4);
            let earned_value = completion / 100.0 * planned * (1.0 + (unit_sample(rng) - 0.5) * 0.2);
            let cpi = if actual_cost > 0.0 {
                earned_value / actual_cost
            } else {
                0.0
            };

            OutcomeRow {
                sim_id,
                time,
                completion,
                earned_value,
                actual_cost,
                cpi,
            }
        })
        .collect()
}
