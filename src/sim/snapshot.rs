// src/sim/snapshot.rs

use crate::sim::metrics::Metrics;
use crate::sim::state::{AgentState, TaskState};

/// Read-only copy of a session, published after every controller event.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub file_name: String,
    pub max_steps: u32,
    pub metrics: Metrics,
    pub total_estimated_cost: f64,
    pub tasks: Vec<TaskState>,
    pub agents: Vec<AgentState>,
}
