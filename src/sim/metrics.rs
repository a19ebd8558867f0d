// src/sim/metrics.rs

//! Aggregate progress, cost and earned-value figures.

use crate::sim::state::TaskState;
use crate::sim::TaskStatus;

/// EV may not exceed `EV_AC_MULTIPLIER * AC + EV_BUDGET_SHARE * total`.
pub const EV_AC_MULTIPLIER: f64 = 1.5;
pub const EV_BUDGET_SHARE: f64 = 0.05;

/// Below this overall progress (percent) EV is further held to
/// `EARLY_EV_AC_SHARE * AC`.
pub const EARLY_PROGRESS_THRESHOLD: f64 = 5.0;
pub const EARLY_EV_AC_SHARE: f64 = 0.3;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Metrics {
    pub time_step: u32,
    /// Duration-weighted percent complete, `0.0..=100.0`.
    pub overall_progress: f64,
    /// Actual cost (AC).
    pub actual_cost: f64,
    /// Earned value (EV), capped.
    pub earned_value: f64,
    /// Agents that held a task during the last tick.
    pub active_agents: usize,
}

impl Metrics {
    /// Cost performance index `EV / AC`; `None` while nothing has been spent.
    pub fn cpi(&self) -> Option<f64> {
        if self.actual_cost > 0.0 {
            Some(self.earned_value / self.actual_cost)
        } else {
            None
        }
    }
}

/// Duration-weighted mean of task progress, in percent.
pub fn weighted_progress(tasks: &[TaskState]) -> f64 {
    let total: f64 = tasks.iter().map(|t| t.est_duration).sum();
    if total <= 0.0 {
        let done = !tasks.is_empty()
            && tasks.iter().all(|t| t.status == TaskStatus::Completed);
        return if done { 100.0 } else { 0.0 };
    }

    let weighted: f64 = tasks.iter().map(|t| (t.progress / 100.0) * t.est_duration).sum();
    ((weighted / total) * 100.0).min(100.0)
}

/// Earned value from progress, with the guardrail caps applied.
///
/// These caps are a heuristic rather than a standard EVM formula; they keep
/// early EV from running far ahead of spend.
pub fn capped_earned_value(overall_progress: f64, actual_cost: f64, total_estimated_cost: f64) -> f64 {
    let mut ev = (overall_progress / 100.0) * total_estimated_cost;
    ev = ev.min(actual_cost * EV_AC_MULTIPLIER + total_estimated_cost * EV_BUDGET_SHARE);
    if overall_progress < EARLY_PROGRESS_THRESHOLD && actual_cost > 0.0 {
        ev = ev.min(actual_cost * EARLY_EV_AC_SHARE);
    }
    ev
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(progress: f64, est_duration: f64) -> TaskState {
        TaskState {
            id: "t".into(),
            name: "T".into(),
            progress,
            status: if progress >= 100.0 {
                TaskStatus::Completed
            } else {
                TaskStatus::Pending
            },
            assigned_agent: None,
            dependencies_met: true,
            est_duration,
            cost_factor: 1.0,
            dependencies: vec![],
        }
    }

    #[test]
    fn progress_is_weighted_by_duration() {
        let tasks = vec![task(100.0, 30.0), task(0.0, 10.0)];
        assert!((weighted_progress(&tasks) - 75.0).abs() < 1e-9);
    }

    #[test]
    fn early_cap_holds_ev_to_thirty_percent_of_ac() {
        // 4 % progress on a 10_000 budget would be 400 EV.
        let ev = capped_earned_value(4.0, 100.0, 10_000.0);
        assert!((ev - 30.0).abs() < 1e-9);
    }

    #[test]
    fn ceiling_applies_after_early_phase() {
        // 50 % of 10_000 = 5_000; ceiling = 1.5 * 1_000 + 500 = 2_000.
        let ev = capped_earned_value(50.0, 1_000.0, 10_000.0);
        assert!((ev - 2_000.0).abs() < 1e-9);
    }

    #[test]
    fn uncapped_when_spend_is_high() {
        let ev = capped_earned_value(50.0, 10_000.0, 10_000.0);
        assert!((ev - 5_000.0).abs() < 1e-9);
    }

    #[test]
    fn cpi_undefined_without_cost() {
        let m = Metrics::default();
        assert_eq!(m.cpi(), None);
        let m = Metrics {
            actual_cost: 200.0,
            earned_value: 100.0,
            ..Metrics::default()
        };
        assert_eq!(m.cpi(), Some(0.5));
    }
}
