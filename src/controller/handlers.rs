// src/controller/handlers.rs

//! Event handling logic for the controller core.

use std::time::Duration;

use tracing::{debug, info};

use crate::controller::{tick_period, ControllerOptions, Frame, RunState, ViewUpdate};
use crate::render::log::LogEntry;
use crate::sim::{self, Session, StepEvent, StepOutcome};

/// Command produced by the pure core, to be executed by the outer IO shell.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlCommand {
    /// Start a repeating tick tagged with `generation`.
    StartTimer { generation: u64, period: Duration },
    /// Cancel the active timer, if any.
    CancelTimer,
    /// Forward an update to the snapshot sink.
    View(ViewUpdate),
    /// The operator asked for the report; the dashboard loop ends.
    OpenReport,
}

/// Decision returned by the core after handling a single event.
#[derive(Debug, Clone)]
pub struct ControlStep {
    pub commands: Vec<ControlCommand>,
    /// Whether the outer loop should keep running.
    pub keep_running: bool,
}

impl ControlStep {
    fn new() -> Self {
        Self {
            commands: Vec::new(),
            keep_running: true,
        }
    }

    fn log(&mut self, entry: LogEntry) {
        self.commands.push(ControlCommand::View(ViewUpdate::Log(entry)));
    }
}

/// Mutable controller state shared by all handlers.
#[derive(Debug)]
pub struct ControllerState {
    pub session: Session,
    pub run_state: RunState,
    pub report_unlocked: bool,
    /// Generation of the current (or last) timer. Ticks carrying any other
    /// value are stale and ignored.
    pub timer_generation: u64,
}

impl ControllerState {
    pub fn frame(&self) -> Frame {
        Frame {
            snapshot: self.session.snapshot(),
            run_state: self.run_state,
            report_unlocked: self.report_unlocked,
        }
    }

    fn publish(&self, step: &mut ControlStep) {
        step.commands
            .push(ControlCommand::View(ViewUpdate::Frame(Box::new(self.frame()))));
    }

    /// Stop the timer (if running) and bump the generation so that ticks
    /// already in flight are discarded.
    fn stop_timer(&mut self, step: &mut ControlStep) {
        self.timer_generation += 1;
        step.commands.push(ControlCommand::CancelTimer);
    }
}

pub fn handle_reset(state: &mut ControllerState) -> ControlStep {
    let mut step = ControlStep::new();

    state.stop_timer(&mut step);
    state.session.reset();
    state.run_state = RunState::Idle;
    state.report_unlocked = false;

    let params = state.session.params();
    info!(file = %params.file_name, max_steps = params.max_steps, "simulation reset");

    step.commands.push(ControlCommand::View(ViewUpdate::ClearLog));
    step.log(LogEntry::info(format!(
        "Simulation for '{}' reset. Limit: {} steps.",
        params.file_name, params.max_steps
    )));
    state.publish(&mut step);
    step
}

pub fn handle_start(
    state: &mut ControllerState,
    options: &ControllerOptions,
    speed: Option<u8>,
) -> ControlStep {
    let mut step = ControlStep::new();

    match state.run_state {
        RunState::Running => {
            debug!("start requested while already running; ignoring");
        }
        RunState::Finished => {
            step.log(LogEntry::info("The run has finished. Reset to simulate again."));
        }
        RunState::Idle | RunState::Paused => {
            let speed = speed.unwrap_or(options.default_speed);
            let period = tick_period(speed);

            state.timer_generation += 1;
            state.run_state = RunState::Running;
            state.report_unlocked = false;

            info!(speed, period_ms = period.as_millis() as u64, "simulation started");
            step.commands.push(ControlCommand::StartTimer {
                generation: state.timer_generation,
                period,
            });
            step.log(LogEntry::info("Simulation started/resumed..."));
            state.publish(&mut step);
        }
    }

    step
}

pub fn handle_pause(state: &mut ControllerState) -> ControlStep {
    let mut step = ControlStep::new();

    if state.run_state != RunState::Running {
        debug!(run_state = ?state.run_state, "pause requested while not running; ignoring");
        return step;
    }

    state.stop_timer(&mut step);
    state.run_state = RunState::Paused;
    info!("simulation paused");

    step.log(LogEntry::info("Simulation paused."));
    state.publish(&mut step);
    step
}

pub fn handle_manual_step(state: &mut ControllerState, options: &ControllerOptions) -> ControlStep {
    let mut step = ControlStep::new();

    match state.run_state {
        RunState::Running => {
            step.log(LogEntry::info("Pause the simulation to advance step by step."));
        }
        RunState::Finished => {
            // Re-signal completion; the session is not touched.
            advance_one(state, options, &mut step);
        }
        RunState::Idle | RunState::Paused => {
            step.log(LogEntry::info("Advancing one step..."));
            state.run_state = RunState::Paused;
            advance_one(state, options, &mut step);
        }
    }

    step
}

pub fn handle_tick(
    state: &mut ControllerState,
    options: &ControllerOptions,
    generation: u64,
) -> ControlStep {
    let mut step = ControlStep::new();

    if state.run_state != RunState::Running || generation != state.timer_generation {
        debug!(
            generation,
            current = state.timer_generation,
            run_state = ?state.run_state,
            "discarding stale tick"
        );
        return step;
    }

    advance_one(state, options, &mut step);
    step
}

pub fn handle_view_report(state: &mut ControllerState) -> ControlStep {
    let mut step = ControlStep::new();

    if !state.report_unlocked {
        step.log(LogEntry::warning(
            "The report becomes available once the run has finished.",
        ));
        return step;
    }

    state.stop_timer(&mut step);
    info!("opening report");
    step.commands.push(ControlCommand::OpenReport);
    step.keep_running = false;
    step
}

pub fn handle_shutdown(state: &mut ControllerState) -> ControlStep {
    let mut step = ControlStep::new();
    state.stop_timer(&mut step);
    step.keep_running = false;
    step
}

/// Run one engine tick and translate the outcome into commands.
fn advance_one(state: &mut ControllerState, options: &ControllerOptions, step: &mut ControlStep) {
    let finished_now = match sim::step(&mut state.session) {
        StepOutcome::Advanced(report) => {
            for event in report.events.iter() {
                step.log(log_for_event(event));
            }
            report.finished
        }
        StepOutcome::Finished => true,
    };

    if finished_now {
        finish(state, options, step);
    }

    state.publish(step);
}

fn finish(state: &mut ControllerState, options: &ControllerOptions, step: &mut ControlStep) {
    if state.run_state == RunState::Running {
        state.stop_timer(step);
    }

    let metrics = state.session.metrics();
    info!(
        time_step = metrics.time_step,
        progress = metrics.overall_progress,
        ac = metrics.actual_cost,
        ev = metrics.earned_value,
        "simulation run completed"
    );

    state.run_state = RunState::Finished;
    state.report_unlocked = true;
    step.log(LogEntry::success("Simulation run completed."));

    if options.exit_when_finished {
        step.keep_running = false;
    }
}

fn log_for_event(event: &StepEvent) -> LogEntry {
    match event {
        StepEvent::Assigned {
            agent_name,
            task_name,
            ..
        } => LogEntry::info(format!("Agent {agent_name} -> Task {task_name}.")),
        StepEvent::Completed {
            agent_name,
            task_name,
            ..
        } => LogEntry::success(format!("Agent {agent_name} COMPLETES Task {task_name}!")),
    }
}
