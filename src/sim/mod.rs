// src/sim/mod.rs

//! Task/agent simulation.
//!
//! - [`scenario`] turns a validated scenario file into task/agent templates.
//! - [`state`] holds the per-session task and agent maps.
//! - [`session`] owns the state, the metrics and the RNG of one dashboard.
//! - [`engine`] advances a session by exactly one tick.
//! - [`metrics`] holds the aggregate progress/cost/earned-value formulas.
//! - [`snapshot`] is the read-only view handed to renderers.

use std::fmt;

use rand::Rng;

/// Canonical task identifier (`"t1"`, `"design"`, ...).
pub type TaskId = String;

/// Canonical agent identifier.
pub type AgentId = String;

/// Lifecycle of a task within one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Completed => "completed",
        };
        f.write_str(s)
    }
}

/// Uniform sample in `[0, 1)`.
pub(crate) fn unit_sample<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(0.0..1.0)
}

pub mod engine;
pub mod metrics;
pub mod scenario;
pub mod session;
pub mod snapshot;
pub mod state;

pub use engine::{step, StepEvent, StepOutcome, StepReport};
pub use metrics::Metrics;
pub use scenario::{AgentTemplate, Scenario, TaskTemplate};
pub use session::{Session, SessionParams};
pub use snapshot::Snapshot;
pub use state::{AgentState, StateStore, TaskState};
