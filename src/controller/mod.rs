// src/controller/mod.rs

//! Run controller for the dashboard.
//!
//! This module ties together:
//! - the simulation [`Session`](crate::sim::Session)
//! - the start/pause/step/reset/report state machine
//! - the repeating tick timer
//! - the snapshot sink that renders what happened
//!
//! The pure state machine lives in [`core`] and [`handlers`]; the async/IO
//! shell that owns the timer and the sink is implemented in [`runtime`].

use std::time::Duration;

use crate::render::log::LogEntry;
use crate::sim::Snapshot;

/// Slowest and fastest accepted speed settings.
pub const MIN_SPEED: u8 = 1;
pub const MAX_SPEED: u8 = 10;
pub const DEFAULT_SPEED: u8 = 5;

/// Timer period for a speed setting: `max(100, 1100 - speed * 100)` ms.
pub fn tick_period(speed: u8) -> Duration {
    let speed = u64::from(speed.clamp(MIN_SPEED, MAX_SPEED));
    Duration::from_millis(1100u64.saturating_sub(speed * 100).max(100))
}

/// Lifecycle of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Freshly reset; nothing has run yet.
    Idle,
    /// The repeating tick is active.
    Running,
    /// Stopped by the operator (or after a manual step).
    Paused,
    /// All tasks completed or the step limit was reached.
    Finished,
}

/// Events flowing into the controller from the operator and the timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlEvent {
    /// Start or resume the repeating tick. `None` uses the configured speed.
    Start { speed: Option<u8> },
    Pause,
    /// Advance exactly one tick (only while not running).
    Step,
    Reset,
    /// Timer tick; `generation` identifies the timer that sent it.
    Tick { generation: u64 },
    /// Leave the dashboard for the report (only once finished).
    ViewReport,
    /// Graceful shutdown requested (e.g. Ctrl-C or `quit`).
    Shutdown,
}

/// Everything a renderer needs for one redraw.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub snapshot: Snapshot,
    pub run_state: RunState,
    pub report_unlocked: bool,
}

/// Updates delivered to a [`SnapshotSink`].
#[derive(Debug, Clone, PartialEq)]
pub enum ViewUpdate {
    Frame(Box<Frame>),
    Log(LogEntry),
    ClearLog,
}

/// Options that influence how the controller behaves.
#[derive(Debug, Clone, Copy)]
pub struct ControllerOptions {
    /// Speed used when `Start` carries none.
    pub default_speed: u8,
    /// If true, stop the event loop as soon as the run finishes
    /// (used for `--auto`).
    pub exit_when_finished: bool,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            default_speed: DEFAULT_SPEED,
            exit_when_finished: false,
        }
    }
}

pub mod core;
pub mod handlers;
pub mod runtime;
pub mod sink;
pub mod timer;

pub use self::core::ControllerCore;
pub use handlers::{ControlCommand, ControlStep};
pub use runtime::{RunExit, Runtime};
pub use sink::SnapshotSink;
pub use timer::TickTimer;
