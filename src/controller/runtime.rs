// src/controller/runtime.rs

use std::fmt;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::controller::core::ControllerCore;
use crate::controller::handlers::ControlCommand;
use crate::controller::sink::SnapshotSink;
use crate::controller::timer::TickTimer;
use crate::controller::{ControlEvent, Frame, ViewUpdate};
use crate::errors::Result;

/// How the dashboard loop ended.
#[derive(Debug, Clone)]
pub struct RunExit {
    /// The operator asked for the report.
    pub report_requested: bool,
    pub final_frame: Frame,
}

/// Drives the [`ControllerCore`] in response to [`ControlEvent`]s.
///
/// This is the IO shell around the core: it reads events from the channel,
/// owns the tick timer and forwards view updates to the sink.
pub struct Runtime<S: SnapshotSink> {
    core: ControllerCore,
    event_rx: mpsc::Receiver<ControlEvent>,
    /// Cloned into every timer so ticks land on the same channel.
    event_tx: mpsc::Sender<ControlEvent>,
    sink: S,
    timer: Option<TickTimer>,
}

impl<S: SnapshotSink> fmt::Debug for Runtime<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("core", &self.core)
            .field("timer", &self.timer)
            .finish_non_exhaustive()
    }
}

impl<S: SnapshotSink> Runtime<S> {
    pub fn new(
        core: ControllerCore,
        event_rx: mpsc::Receiver<ControlEvent>,
        event_tx: mpsc::Sender<ControlEvent>,
        sink: S,
    ) -> Self {
        Self {
            core,
            event_rx,
            event_tx,
            sink,
            timer: None,
        }
    }

    /// Main event loop.
    ///
    /// Publishes the initial frame, then feeds events into the core and
    /// executes the commands it returns until the core asks to stop or the
    /// channel closes.
    pub async fn run(mut self) -> Result<RunExit> {
        info!("dashboard runtime started");

        let initial = self.core.frame();
        self.sink
            .deliver(ViewUpdate::Frame(Box::new(initial)))
            .await?;

        let mut report_requested = false;

        loop {
            let event = match self.event_rx.recv().await {
                Some(e) => e,
                None => {
                    info!("controller event channel closed; exiting");
                    break;
                }
            };

            debug!(?event, "controller received event");

            let step = self.core.handle(event);

            for command in step.commands {
                if matches!(command, ControlCommand::OpenReport) {
                    report_requested = true;
                }
                self.execute_command(command).await?;
            }

            if !step.keep_running {
                info!("controller requested exit; stopping runtime");
                break;
            }
        }

        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }

        info!(report_requested, "dashboard runtime exiting");
        Ok(RunExit {
            report_requested,
            final_frame: self.core.frame(),
        })
    }

    async fn execute_command(&mut self, command: ControlCommand) -> Result<()> {
        match command {
            ControlCommand::StartTimer { generation, period } => {
                if let Some(old) = self.timer.take() {
                    old.cancel();
                }
                self.timer = Some(TickTimer::start(generation, period, self.event_tx.clone()));
            }
            ControlCommand::CancelTimer => {
                if let Some(timer) = self.timer.take() {
                    timer.cancel();
                }
            }
            ControlCommand::View(update) => {
                self.sink.deliver(update).await?;
            }
            ControlCommand::OpenReport => {
                debug!("report handoff requested");
            }
        }
        Ok(())
    }
}
