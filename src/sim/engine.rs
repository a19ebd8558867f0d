// src/sim/engine.rs

//! One discrete tick of the simulation.
//!
//! [`step`] is a pure state transition on a [`Session`]: it never touches
//! the terminal or the timer. What happened during the tick is returned as
//! a list of [`StepEvent`]s so the controller can log and render it.

use tracing::{debug, error, trace};

use crate::sim::metrics::{capped_earned_value, weighted_progress};
use crate::sim::session::Session;
use crate::sim::{unit_sample, AgentId, TaskId, TaskStatus};

/// Something notable that happened during a tick.
#[derive(Debug, Clone, PartialEq)]
pub enum StepEvent {
    /// An idle agent picked up a task.
    Assigned {
        agent: AgentId,
        agent_name: String,
        task: TaskId,
        task_name: String,
    },
    /// A task reached 100 % and its agent was released.
    Completed {
        agent: AgentId,
        agent_name: String,
        task: TaskId,
        task_name: String,
    },
}

/// Result of a tick that actually advanced time.
#[derive(Debug, Clone)]
pub struct StepReport {
    pub time_step: u32,
    pub events: Vec<StepEvent>,
    /// Whether the session is now finished (all tasks done or limit hit).
    pub finished: bool,
}

#[derive(Debug, Clone)]
pub enum StepOutcome {
    Advanced(StepReport),
    /// The session was already finished; nothing changed.
    Finished,
}

/// Advance the session by exactly one tick.
///
/// Calling this on a finished session is a no-op that returns
/// [`StepOutcome::Finished`] again.
pub fn step(session: &mut Session) -> StepOutcome {
    if session.is_finished() {
        debug!(
            time_step = session.metrics.time_step,
            "step requested on finished session"
        );
        return StepOutcome::Finished;
    }

    session.metrics.time_step += 1;
    let mut events = Vec::new();

    refresh_dependencies(session);
    assignment_pass(session, &mut events);
    let active = progress_pass(session, &mut events);
    recompute_metrics(session, active);

    let finished = session.is_finished();
    trace!(
        time_step = session.metrics.time_step,
        progress = session.metrics.overall_progress,
        ac = session.metrics.actual_cost,
        ev = session.metrics.earned_value,
        active,
        "tick complete"
    );

    StepOutcome::Advanced(StepReport {
        time_step: session.metrics.time_step,
        events,
        finished,
    })
}

/// Recompute `dependencies_met` for every task.
fn refresh_dependencies(session: &mut Session) {
    let met: Vec<bool> = session
        .store
        .tasks
        .iter()
        .map(|t| session.store.dependencies_completed(t))
        .collect();

    for (task, met) in session.store.tasks.iter_mut().zip(met) {
        task.dependencies_met = met;
    }
}

/// Greedy first-match assignment: each idle agent takes the first task in
/// its capability list that is pending, unassigned and unlocked.
fn assignment_pass(session: &mut Session, events: &mut Vec<StepEvent>) {
    let store = &mut session.store;

    for agent_idx in 0..store.agents.len() {
        if !store.agents[agent_idx].is_idle() {
            continue;
        }

        let candidate = store.agents[agent_idx]
            .capabilities
            .iter()
            .filter_map(|id| store.task_index(id))
            .find(|&i| store.tasks[i].is_assignable());

        let Some(task_idx) = candidate else {
            continue;
        };

        let agent = &mut store.agents[agent_idx];
        let task = &mut store.tasks[task_idx];

        task.assigned_agent = Some(agent.id.clone());
        task.status = TaskStatus::InProgress;
        agent.current_task = Some(task.id.clone());

        debug!(agent = %agent.id, task = %task.id, "agent assigned to task");
        events.push(StepEvent::Assigned {
            agent: agent.id.clone(),
            agent_name: agent.name.clone(),
            task: task.id.clone(),
            task_name: task.name.clone(),
        });
    }
}

/// Advance every held task. Returns the number of agents that were active
/// during this tick (including those that finished their task).
fn progress_pass(session: &mut Session, events: &mut Vec<StepEvent>) -> usize {
    let error_margin = session.params().error_margin;
    let Session { store, rng, .. } = session;
    let mut active = 0;

    for agent_idx in 0..store.agents.len() {
        let Some(task_id) = store.agents[agent_idx].current_task.clone() else {
            continue;
        };
        active += 1;

        let Some(task_idx) = store.task_index(&task_id) else {
            let agent = &mut store.agents[agent_idx];
            error!(agent = %agent.id, task = %task_id, "agent holds a task missing from the task map; releasing");
            agent.current_task = None;
            continue;
        };

        let agent = &mut store.agents[agent_idx];
        let task = &mut store.tasks[task_idx];

        let jitter = 1.0 + (unit_sample(rng) - 0.5) * 2.0 * error_margin;
        let increment = ((100.0 / task.est_duration) * jitter).max(0.1 / task.est_duration);
        task.progress = (task.progress + increment).clamp(0.0, 100.0);

        if task.progress >= 100.0 {
            task.progress = 100.0;
            task.status = TaskStatus::Completed;
            agent.current_task = None;

            debug!(agent = %agent.id, task = %task.id, "task completed");
            events.push(StepEvent::Completed {
                agent: agent.id.clone(),
                agent_name: agent.name.clone(),
                task: task.id.clone(),
                task_name: task.name.clone(),
            });
        }
    }

    active
}

fn recompute_metrics(session: &mut Session, active: usize) {
    let error_margin = session.params().error_margin;
    let base_rate = session.base_cost_per_hour();
    let total = session.total_estimated_cost();

    let overall = weighted_progress(session.store.tasks());
    let cost_jitter = 1.0 + (unit_sample(&mut session.rng) - 0.5) * error_margin;

    let metrics = &mut session.metrics;
    metrics.active_agents = active;
    metrics.overall_progress = overall;
    metrics.actual_cost += active as f64 * base_rate * cost_jitter;
    metrics.earned_value = capped_earned_value(metrics.overall_progress, metrics.actual_cost, total);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::scenario::Scenario;
    use crate::sim::session::SessionParams;

    fn session(max_steps: u32, seed: u64) -> Session {
        Session::new(
            Scenario::demo(),
            SessionParams {
                max_steps,
                error_margin: 0.1,
                file_name: "plan.xml".into(),
                seed,
            },
        )
    }

    #[test]
    fn first_tick_assigns_unlocked_tasks_only() {
        let mut s = session(200, 5);
        let StepOutcome::Advanced(report) = step(&mut s) else {
            panic!("fresh session must advance");
        };

        assert_eq!(report.time_step, 1);
        // a1 -> t1, a3 -> t3; a2 only knows t4 which waits on t2.
        let assigned: Vec<_> = report
            .events
            .iter()
            .filter_map(|e| match e {
                StepEvent::Assigned { agent, task, .. } => Some((agent.as_str(), task.as_str())),
                _ => None,
            })
            .collect();
        assert_eq!(assigned, vec![("a1", "t1"), ("a3", "t3")]);
        assert_eq!(s.store().task("t4").unwrap().status, TaskStatus::Pending);
        assert_eq!(s.metrics().active_agents, 2);
        assert!(s.metrics().actual_cost > 0.0);
    }

    #[test]
    fn runs_to_completion_within_limit() {
        let mut s = session(1_000, 9);
        let mut ticks = 0;
        while let StepOutcome::Advanced(_) = step(&mut s) {
            ticks += 1;
            assert!(ticks <= 1_000);
        }
        assert!(s.store().all_completed());
        assert!(s.store().tasks().iter().all(|t| t.progress == 100.0));
        assert!(s.store().agents().iter().all(|a| a.is_idle()));
    }

    #[test]
    fn finished_session_is_not_mutated() {
        let mut s = session(2, 1);
        step(&mut s);
        step(&mut s);
        let before = s.snapshot();

        assert!(matches!(step(&mut s), StepOutcome::Finished));
        assert!(matches!(step(&mut s), StepOutcome::Finished));
        assert_eq!(s.snapshot(), before);
    }
}
