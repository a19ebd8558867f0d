// src/controller/core.rs

//! Pure controller state machine.
//!
//! [`ControllerCore`] consumes [`ControlEvent`]s and produces a
//! [`ControlStep`]: the commands the IO shell should run (start/cancel the
//! timer, push updates to the sink, open the report) and whether the loop
//! keeps going.
//!
//! It owns no channels and no Tokio types, so every transition can be unit
//! tested synchronously.

use crate::controller::handlers::{
    handle_manual_step, handle_pause, handle_reset, handle_shutdown, handle_start, handle_tick,
    handle_view_report, ControlStep, ControllerState,
};
use crate::controller::{ControlEvent, ControllerOptions, Frame, RunState};
use crate::sim::Session;

#[derive(Debug)]
pub struct ControllerCore {
    state: ControllerState,
    options: ControllerOptions,
}

impl ControllerCore {
    pub fn new(session: Session, options: ControllerOptions) -> Self {
        Self {
            state: ControllerState {
                session,
                run_state: RunState::Idle,
                report_unlocked: false,
                timer_generation: 0,
            },
            options,
        }
    }

    pub fn run_state(&self) -> RunState {
        self.state.run_state
    }

    pub fn is_report_unlocked(&self) -> bool {
        self.state.report_unlocked
    }

    pub fn session(&self) -> &Session {
        &self.state.session
    }

    /// Current view of the controller, suitable for rendering.
    pub fn frame(&self) -> Frame {
        self.state.frame()
    }

    /// Handle a single event, updating state and returning the commands for
    /// the IO shell.
    pub fn handle(&mut self, event: ControlEvent) -> ControlStep {
        match event {
            ControlEvent::Start { speed } => handle_start(&mut self.state, &self.options, speed),
            ControlEvent::Pause => handle_pause(&mut self.state),
            ControlEvent::Step => handle_manual_step(&mut self.state, &self.options),
            ControlEvent::Reset => handle_reset(&mut self.state),
            ControlEvent::Tick { generation } => {
                handle_tick(&mut self.state, &self.options, generation)
            }
            ControlEvent::ViewReport => handle_view_report(&mut self.state),
            ControlEvent::Shutdown => handle_shutdown(&mut self.state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{ControlCommand, ViewUpdate};
    use crate::sim::{Scenario, SessionParams};

    fn core(max_steps: u32) -> ControllerCore {
        let session = Session::new(
            Scenario::demo(),
            SessionParams {
                max_steps,
                error_margin: 0.1,
                file_name: "plan.xml".into(),
                seed: 3,
            },
        );
        ControllerCore::new(session, ControllerOptions::default())
    }

    fn started_generation(step: &ControlStep) -> Option<u64> {
        step.commands.iter().find_map(|c| match c {
            ControlCommand::StartTimer { generation, .. } => Some(*generation),
            _ => None,
        })
    }

    fn logs(step: &ControlStep) -> Vec<String> {
        step.commands
            .iter()
            .filter_map(|c| match c {
                ControlCommand::View(ViewUpdate::Log(entry)) => Some(entry.message.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn start_then_tick_advances() {
        let mut c = core(200);
        let step = c.handle(ControlEvent::Start { speed: Some(10) });
        let generation = started_generation(&step).expect("start must arm the timer");
        assert_eq!(c.run_state(), RunState::Running);

        c.handle(ControlEvent::Tick { generation });
        assert_eq!(c.session().metrics().time_step, 1);
    }

    #[test]
    fn stale_tick_is_ignored() {
        let mut c = core(200);
        let first = started_generation(&c.handle(ControlEvent::Start { speed: None })).unwrap();
        c.handle(ControlEvent::Pause);
        let second = started_generation(&c.handle(ControlEvent::Start { speed: None })).unwrap();
        assert_ne!(first, second);

        let step = c.handle(ControlEvent::Tick { generation: first });
        assert!(step.commands.is_empty());
        assert_eq!(c.session().metrics().time_step, 0);
    }

    #[test]
    fn step_is_rejected_while_running() {
        let mut c = core(200);
        c.handle(ControlEvent::Start { speed: None });
        let step = c.handle(ControlEvent::Step);
        assert_eq!(c.session().metrics().time_step, 0);
        assert_eq!(logs(&step).len(), 1);
    }

    #[test]
    fn step_from_idle_pauses() {
        let mut c = core(200);
        c.handle(ControlEvent::Step);
        assert_eq!(c.run_state(), RunState::Paused);
        assert_eq!(c.session().metrics().time_step, 1);
    }

    #[test]
    fn single_step_limit_finishes_and_unlocks_report() {
        let mut c = core(1);
        let generation = started_generation(&c.handle(ControlEvent::Start { speed: None })).unwrap();
        let step = c.handle(ControlEvent::Tick { generation });

        assert_eq!(c.run_state(), RunState::Finished);
        assert!(c.is_report_unlocked());
        assert!(step.commands.contains(&ControlCommand::CancelTimer));
        assert!(step.keep_running);
    }

    #[test]
    fn report_requires_unlock() {
        let mut c = core(200);
        let step = c.handle(ControlEvent::ViewReport);
        assert!(step.keep_running);
        assert!(!step.commands.contains(&ControlCommand::OpenReport));
    }

    #[test]
    fn reset_clears_state_and_lock() {
        let mut c = core(1);
        c.handle(ControlEvent::Step);
        assert!(c.is_report_unlocked());

        let step = c.handle(ControlEvent::Reset);
        assert_eq!(c.run_state(), RunState::Idle);
        assert!(!c.is_report_unlocked());
        assert_eq!(c.session().metrics().time_step, 0);
        assert!(step
            .commands
            .contains(&ControlCommand::View(ViewUpdate::ClearLog)));
    }

    #[test]
    fn shutdown_stops_loop() {
        let mut c = core(200);
        let step = c.handle(ControlEvent::Shutdown);
        assert!(!step.keep_running);
    }
}
