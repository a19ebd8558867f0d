#![allow(dead_code)]

use pmsim::config::{AgentConfig, RawScenarioFile, ScenarioFile, TaskConfig};
use pmsim::sim::{Scenario, Session, SessionParams};

/// Builder for `ScenarioFile` to simplify test setup.
pub struct ScenarioBuilder {
    raw: RawScenarioFile,
}

impl ScenarioBuilder {
    pub fn new() -> Self {
        Self {
            raw: RawScenarioFile::default(),
        }
    }

    pub fn with_task(mut self, task: TaskConfig) -> Self {
        self.raw.task.push(task);
        self
    }

    pub fn with_agent(mut self, id: &str, capabilities: &[&str]) -> Self {
        self.raw.agent.push(AgentConfig {
            id: id.to_string(),
            name: None,
            capabilities: capabilities.iter().map(|c| c.to_string()).collect(),
        });
        self
    }

    pub fn raw(self) -> RawScenarioFile {
        self.raw
    }

    pub fn build(self) -> ScenarioFile {
        ScenarioFile::try_from(self.raw).expect("Failed to build valid scenario from builder")
    }

    pub fn scenario(self) -> Scenario {
        Scenario::from_config(&self.build())
    }
}

impl Default for ScenarioBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `TaskConfig`.
pub struct TaskConfigBuilder {
    task: TaskConfig,
}

impl TaskConfigBuilder {
    /// A task with a fixed duration (no spread) and the default weight.
    pub fn new(id: &str, base_duration: u32) -> Self {
        Self {
            task: TaskConfig {
                id: id.to_string(),
                name: None,
                base_duration,
                duration_spread: 0,
                min_duration: 1,
                cost_weight: 10.0,
                dependencies: vec![],
            },
        }
    }

    pub fn after(mut self, dep: &str) -> Self {
        self.task.dependencies.push(dep.to_string());
        self
    }

    pub fn spread(mut self, spread: u32, min_duration: u32) -> Self {
        self.task.duration_spread = spread;
        self.task.min_duration = min_duration;
        self
    }

    pub fn weight(mut self, weight: f64) -> Self {
        self.task.cost_weight = weight;
        self
    }

    pub fn build(self) -> TaskConfig {
        self.task
    }
}

/// Session parameters with sensible test defaults.
pub fn params(max_steps: u32, seed: u64) -> SessionParams {
    SessionParams {
        max_steps,
        error_margin: 0.1,
        file_name: "Test Plan.xml".to_string(),
        seed,
    }
}

/// Demo-plan session.
pub fn demo_session(max_steps: u32, seed: u64) -> Session {
    Session::new(Scenario::demo(), params(max_steps, seed))
}
