// src/sim/state.rs

//! Per-session task and agent state.

use std::collections::HashMap;

use rand::Rng;
use tracing::warn;

use crate::sim::scenario::Scenario;
use crate::sim::{AgentId, TaskId, TaskStatus};

#[derive(Debug, Clone, PartialEq)]
pub struct TaskState {
    pub id: TaskId,
    pub name: String,
    /// Percent complete, `0.0..=100.0`.
    pub progress: f64,
    pub status: TaskStatus,
    pub assigned_agent: Option<AgentId>,
    pub dependencies_met: bool,
    pub est_duration: f64,
    pub cost_factor: f64,
    pub dependencies: Vec<TaskId>,
}

impl TaskState {
    /// Can an idle agent pick this task up right now?
    pub fn is_assignable(&self) -> bool {
        self.status == TaskStatus::Pending && self.assigned_agent.is_none() && self.dependencies_met
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgentState {
    pub id: AgentId,
    pub name: String,
    pub current_task: Option<TaskId>,
    pub capabilities: Vec<TaskId>,
}

impl AgentState {
    pub fn is_idle(&self) -> bool {
        self.current_task.is_none()
    }
}

/// Task and agent maps, both kept in declared order.
#[derive(Debug, Clone, Default)]
pub struct StateStore {
    pub(crate) tasks: Vec<TaskState>,
    pub(crate) agents: Vec<AgentState>,
    index: HashMap<TaskId, usize>,
}

impl StateStore {
    /// Build fresh state from the scenario: every task `Pending` at 0 %,
    /// every agent idle. Durations are sampled here.
    pub fn from_scenario<R: Rng + ?Sized>(scenario: &Scenario, max_steps: u32, rng: &mut R) -> Self {
        let tasks: Vec<TaskState> = scenario
            .tasks
            .iter()
            .map(|t| TaskState {
                id: t.id.clone(),
                name: t.name.clone(),
                progress: 0.0,
                status: TaskStatus::Pending,
                assigned_agent: None,
                dependencies_met: t.dependencies.is_empty(),
                est_duration: t.sample_duration(rng),
                cost_factor: t.cost_factor(max_steps),
                dependencies: t.dependencies.clone(),
            })
            .collect();

        let agents = scenario
            .agents
            .iter()
            .map(|a| AgentState {
                id: a.id.clone(),
                name: a.name.clone(),
                current_task: None,
                capabilities: a.capabilities.clone(),
            })
            .collect();

        let index = tasks
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id.clone(), i))
            .collect();

        Self {
            tasks,
            agents,
            index,
        }
    }

    pub fn tasks(&self) -> &[TaskState] {
        &self.tasks
    }

    pub fn agents(&self) -> &[AgentState] {
        &self.agents
    }

    pub fn task(&self, id: &str) -> Option<&TaskState> {
        self.index.get(id).map(|&i| &self.tasks[i])
    }

    pub fn agent(&self, id: &str) -> Option<&AgentState> {
        self.agents.iter().find(|a| a.id == id)
    }

    pub(crate) fn task_index(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn all_completed(&self) -> bool {
        self.tasks.iter().all(|t| t.status == TaskStatus::Completed)
    }

    /// A dependency is met only when it is `Completed`; unknown ids never are.
    pub fn dependencies_completed(&self, task: &TaskState) -> bool {
        task.dependencies.iter().all(|dep| match self.task(dep) {
            Some(d) => d.status == TaskStatus::Completed,
            None => {
                warn!(task = %task.id, dep = %dep, "dependency missing from task map");
                false
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn fresh_store_is_all_pending_and_idle() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let store = StateStore::from_scenario(&Scenario::demo(), 200, &mut rng);

        assert_eq!(store.tasks().len(), 4);
        assert_eq!(store.agents().len(), 3);
        assert!(store.tasks().iter().all(|t| t.status == TaskStatus::Pending && t.progress == 0.0));
        assert!(store.agents().iter().all(|a| a.is_idle()));

        // Only tasks without dependencies start unlocked.
        assert!(store.task("t1").unwrap().dependencies_met);
        assert!(!store.task("t2").unwrap().dependencies_met);
    }

    #[test]
    fn lookup_preserves_declared_order() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let store = StateStore::from_scenario(&Scenario::demo(), 200, &mut rng);
        let ids: Vec<_> = store.tasks().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t1", "t2", "t3", "t4"]);
        assert_eq!(store.task_index("t3"), Some(2));
    }
}
