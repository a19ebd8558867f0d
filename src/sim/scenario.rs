// src/sim/scenario.rs

use rand::Rng;

use crate::config::model::{AgentConfig, ScenarioFile, TaskConfig};
use crate::sim::{unit_sample, AgentId, TaskId};

/// Static description of a task; the per-session duration and cost factor
/// are sampled from it on every reset.
#[derive(Debug, Clone)]
pub struct TaskTemplate {
    pub id: TaskId,
    pub name: String,
    pub base_duration: u32,
    pub duration_spread: u32,
    pub min_duration: u32,
    pub cost_weight: f64,
    pub dependencies: Vec<TaskId>,
}

impl TaskTemplate {
    fn from_config(cfg: &TaskConfig) -> Self {
        Self {
            id: cfg.id.clone(),
            name: cfg.display_name(),
            base_duration: cfg.base_duration,
            duration_spread: cfg.duration_spread,
            min_duration: cfg.min_duration,
            cost_weight: cfg.cost_weight,
            dependencies: cfg.dependencies.clone(),
        }
    }

    /// `max(min, base + floor(u * spread) - spread / 2)`, always >= 1.
    pub fn sample_duration<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let spread = f64::from(self.duration_spread);
        let jitter = (unit_sample(rng) * spread).floor() - f64::from(self.duration_spread / 2);
        let duration = f64::from(self.base_duration) + jitter;
        duration.max(f64::from(self.min_duration)).max(1.0)
    }

    /// Cost weight scaled to the run length.
    pub fn cost_factor(&self, max_steps: u32) -> f64 {
        self.cost_weight * (f64::from(max_steps) / 200.0)
    }
}

#[derive(Debug, Clone)]
pub struct AgentTemplate {
    pub id: AgentId,
    pub name: String,
    pub capabilities: Vec<TaskId>,
}

impl AgentTemplate {
    fn from_config(cfg: &AgentConfig) -> Self {
        Self {
            id: cfg.id.clone(),
            name: cfg.display_name(),
            capabilities: cfg.capabilities.clone(),
        }
    }
}

/// The plan a session is rebuilt from, in declared order.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub tasks: Vec<TaskTemplate>,
    pub agents: Vec<AgentTemplate>,
}

impl Scenario {
    pub fn from_config(cfg: &ScenarioFile) -> Self {
        Self {
            tasks: cfg.tasks().iter().map(TaskTemplate::from_config).collect(),
            agents: cfg.agents().iter().map(AgentTemplate::from_config).collect(),
        }
    }

    pub fn demo() -> Self {
        Self::from_config(&ScenarioFile::demo())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn demo_durations_stay_in_window() {
        let scenario = Scenario::demo();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        // t1: 30 + [-5, 4], t4: 60 + [-10, 9]
        for _ in 0..200 {
            let t1 = scenario.tasks[0].sample_duration(&mut rng);
            assert!((25.0..=34.0).contains(&t1), "t1 duration {t1}");
            let t4 = scenario.tasks[3].sample_duration(&mut rng);
            assert!((50.0..=69.0).contains(&t4), "t4 duration {t4}");
        }
    }

    #[test]
    fn min_duration_wins_over_negative_jitter() {
        let template = TaskTemplate {
            id: "x".into(),
            name: "X".into(),
            base_duration: 2,
            duration_spread: 20,
            min_duration: 5,
            cost_weight: 1.0,
            dependencies: vec![],
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..100 {
            assert!(template.sample_duration(&mut rng) >= 5.0);
        }
    }

    #[test]
    fn cost_factor_scales_with_max_steps() {
        let scenario = Scenario::demo();
        assert_eq!(scenario.tasks[0].cost_factor(200), 10.0);
        assert_eq!(scenario.tasks[0].cost_factor(400), 20.0);
    }
}
