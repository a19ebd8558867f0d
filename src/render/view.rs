// src/render/view.rs

//! Projection of a controller [`Frame`] into a view model.
//!
//! The view model is what a screen shows, independent of how it is drawn:
//! task panels with a bar width and a state class, agent markers parked at
//! home or at a task, and the stat fields. [`project`] is pure; the
//! terminal renderer only formats its output.

use tracing::warn;

use crate::controller::{Frame, RunState};
use crate::sim::{AgentId, Scenario, TaskId, TaskStatus};

/// Which panels and markers exist on screen.
///
/// A task without a panel, or an agent without a marker, is skipped during
/// projection with a warning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    pub task_panels: Vec<TaskId>,
    pub agent_markers: Vec<AgentId>,
}

impl Layout {
    pub fn new(task_panels: Vec<TaskId>, agent_markers: Vec<AgentId>) -> Self {
        Self {
            task_panels,
            agent_markers,
        }
    }

    /// One panel per task and one marker per agent, in declared order.
    pub fn for_scenario(scenario: &Scenario) -> Self {
        Self {
            task_panels: scenario.tasks.iter().map(|t| t.id.clone()).collect(),
            agent_markers: scenario.agents.iter().map(|a| a.id.clone()).collect(),
        }
    }

    fn has_panel(&self, task: &str) -> bool {
        self.task_panels.iter().any(|t| t == task)
    }

    fn has_marker(&self, agent: &str) -> bool {
        self.agent_markers.iter().any(|a| a == agent)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskPanel {
    pub id: TaskId,
    pub name: String,
    /// Progress bar width in percent, clamped to `[0, 100]`.
    pub bar_width: f64,
    pub state_class: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerPosition {
    Home,
    AtTask(TaskId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentMarker {
    pub id: AgentId,
    pub name: String,
    pub position: MarkerPosition,
    pub working: bool,
}

/// Aggregate stats, already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatFields {
    pub time_step: String,
    pub progress: String,
    pub actual_cost: String,
    pub earned_value: String,
    pub cpi: String,
    pub active_agents: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub file_name: String,
    pub run_state: RunState,
    pub report_unlocked: bool,
    pub panels: Vec<TaskPanel>,
    pub markers: Vec<AgentMarker>,
    pub stats: StatFields,
}

pub fn state_class(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "task-pending",
        TaskStatus::InProgress => "task-in-progress",
        TaskStatus::Completed => "task-completed",
    }
}

pub fn project(frame: &Frame, layout: &Layout) -> DashboardView {
    let snapshot = &frame.snapshot;

    let panels = snapshot
        .tasks
        .iter()
        .filter_map(|task| {
            if !layout.has_panel(&task.id) {
                warn!(task = %task.id, "no panel for task; skipping");
                return None;
            }
            Some(TaskPanel {
                id: task.id.clone(),
                name: task.name.clone(),
                bar_width: task.progress.clamp(0.0, 100.0),
                state_class: state_class(task.status),
            })
        })
        .collect();

    let markers = snapshot
        .agents
        .iter()
        .filter_map(|agent| {
            if !layout.has_marker(&agent.id) {
                warn!(agent = %agent.id, "no marker for agent; skipping");
                return None;
            }

            let position = match &agent.current_task {
                Some(task) if layout.has_panel(task) => MarkerPosition::AtTask(task.clone()),
                Some(task) => {
                    warn!(agent = %agent.id, task = %task, "agent works on a task without a panel; leaving marker home");
                    MarkerPosition::Home
                }
                None => MarkerPosition::Home,
            };
            let working = matches!(position, MarkerPosition::AtTask(_));

            Some(AgentMarker {
                id: agent.id.clone(),
                name: agent.name.clone(),
                position,
                working,
            })
        })
        .collect();

    DashboardView {
        file_name: snapshot.file_name.clone(),
        run_state: frame.run_state,
        report_unlocked: frame.report_unlocked,
        panels,
        markers,
        stats: stat_fields(frame),
    }
}

fn stat_fields(frame: &Frame) -> StatFields {
    let snapshot = &frame.snapshot;
    let m = &snapshot.metrics;

    StatFields {
        time_step: format!("{} / {}", m.time_step, snapshot.max_steps),
        progress: format!("{:.1}%", m.overall_progress),
        actual_cost: format!("${:.2}", m.actual_cost),
        earned_value: format!("${:.2}", m.earned_value),
        cpi: m.cpi().map_or_else(|| "N/A".to_string(), |cpi| format!("{cpi:.2}")),
        active_agents: format!("{} / {}", m.active_agents, snapshot.agents.len()),
    }
}
