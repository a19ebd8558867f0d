// src/config/model.rs

use serde::Deserialize;

/// Scenario file as read from TOML, before semantic validation.
///
/// ```toml
/// [[task]]
/// id = "t1"
/// name = "Requirements"
/// base_duration = 30
/// duration_spread = 10
/// min_duration = 10
/// cost_weight = 10.0
///
/// [[task]]
/// id = "t2"
/// base_duration = 50
/// dependencies = ["t1"]
///
/// [[agent]]
/// id = "a1"
/// capabilities = ["t1", "t2"]
/// ```
///
/// Arrays of tables are used instead of keyed tables so that the declared
/// order survives parsing: agents are visited in this order on every tick.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawScenarioFile {
    #[serde(default)]
    pub task: Vec<TaskConfig>,

    #[serde(default)]
    pub agent: Vec<AgentConfig>,
}

/// A validated scenario.
///
/// Only obtainable through `TryFrom<RawScenarioFile>` (see `validate.rs`) or
/// the built-in [`ScenarioFile::demo`] plan.
#[derive(Debug, Clone)]
pub struct ScenarioFile {
    task: Vec<TaskConfig>,
    agent: Vec<AgentConfig>,
}

impl ScenarioFile {
    pub(crate) fn new_unchecked(task: Vec<TaskConfig>, agent: Vec<AgentConfig>) -> Self {
        Self { task, agent }
    }

    pub fn tasks(&self) -> &[TaskConfig] {
        &self.task
    }

    pub fn agents(&self) -> &[AgentConfig] {
        &self.agent
    }

    /// The four-task, three-agent plan shown on the original dashboard.
    pub fn demo() -> Self {
        let task = vec![
            TaskConfig::demo("t1", "Task 1", 30, 10, 10, 10.0, &[]),
            TaskConfig::demo("t2", "Task 2", 50, 15, 15, 15.0, &["t1"]),
            TaskConfig::demo("t3", "Task 3", 40, 12, 12, 20.0, &[]),
            TaskConfig::demo("t4", "Task 4", 60, 20, 20, 12.0, &["t2"]),
        ];
        let agent = vec![
            AgentConfig::demo("a1", "Agent 1", &["t1", "t2"]),
            AgentConfig::demo("a2", "Agent 2", &["t4"]),
            AgentConfig::demo("a3", "Agent 3", &["t3"]),
        ];
        Self::new_unchecked(task, agent)
    }
}

/// `[[task]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskConfig {
    pub id: String,

    /// Display name; defaults to the upper-cased id.
    #[serde(default)]
    pub name: Option<String>,

    /// Nominal duration in steps before jitter.
    pub base_duration: u32,

    /// Width of the integer jitter window applied on every reset:
    /// `floor(u * spread) - spread / 2`.
    #[serde(default)]
    pub duration_spread: u32,

    /// Lower bound for the jittered duration. Defaults to 1.
    #[serde(default = "default_min_duration")]
    pub min_duration: u32,

    /// Cost weight, scaled by `max_steps / 200` to obtain the cost factor.
    #[serde(default = "default_cost_weight")]
    pub cost_weight: f64,

    /// Tasks that must be completed before this one can start.
    #[serde(default)]
    pub dependencies: Vec<String>,
}

fn default_min_duration() -> u32 {
    1
}

fn default_cost_weight() -> f64 {
    10.0
}

impl TaskConfig {
    fn demo(
        id: &str,
        name: &str,
        base_duration: u32,
        duration_spread: u32,
        min_duration: u32,
        cost_weight: f64,
        dependencies: &[&str],
    ) -> Self {
        Self {
            id: id.to_string(),
            name: Some(name.to_string()),
            base_duration,
            duration_spread,
            min_duration,
            cost_weight,
            dependencies: dependencies.iter().map(|d| d.to_string()).collect(),
        }
    }

    pub fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.id.to_uppercase())
    }
}

/// `[[agent]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentConfig {
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    /// Task ids this agent may work on, scanned in this order.
    #[serde(default)]
    pub capabilities: Vec<String>,
}

impl AgentConfig {
    fn demo(id: &str, name: &str, capabilities: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            name: Some(name.to_string()),
            capabilities: capabilities.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.id.to_uppercase())
    }
}
