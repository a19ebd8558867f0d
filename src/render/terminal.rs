// src/render/terminal.rs

//! Plain-text drawing of the dashboard.

use std::fmt::Write as _;
use std::future::Future;
use std::io::Write;
use std::pin::Pin;

use tracing::trace;

use crate::controller::{RunState, SnapshotSink, ViewUpdate};
use crate::errors::Result;
use crate::render::log::EventLog;
use crate::render::view::{project, DashboardView, Layout, MarkerPosition};

const BAR_CELLS: usize = 20;

/// Draws frames and log lines to any writer (stdout in production).
///
/// While the run is active, each frame becomes a single status line and log
/// entries are printed as they arrive. Any other frame redraws the full
/// dashboard including the log panel.
pub struct TerminalRenderer<W: Write + Send> {
    out: W,
    layout: Layout,
    log: EventLog,
}

impl<W: Write + Send> TerminalRenderer<W> {
    pub fn new(out: W, layout: Layout) -> Self {
        Self {
            out,
            layout,
            log: EventLog::default(),
        }
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn apply(&mut self, update: ViewUpdate) -> Result<()> {
        match update {
            ViewUpdate::Frame(frame) => {
                let view = project(&frame, &self.layout);
                trace!(run_state = ?view.run_state, "rendering frame");
                let text = if view.run_state == RunState::Running {
                    status_line(&view)
                } else {
                    dashboard(&view, &self.log)
                };
                writeln!(self.out, "{text}")?;
            }
            ViewUpdate::Log(entry) => {
                let stamped = self.log.push(entry);
                writeln!(self.out, "  {stamped}")?;
            }
            ViewUpdate::ClearLog => self.log.clear(),
        }
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write + Send> SnapshotSink for TerminalRenderer<W> {
    fn deliver(
        &mut self,
        update: ViewUpdate,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move { self.apply(update) })
    }
}

fn run_state_label(state: RunState) -> &'static str {
    match state {
        RunState::Idle => "IDLE",
        RunState::Running => "RUNNING",
        RunState::Paused => "PAUSED",
        RunState::Finished => "FINISHED",
    }
}

pub fn progress_bar(width_percent: f64) -> String {
    let filled = ((width_percent.clamp(0.0, 100.0) / 100.0) * BAR_CELLS as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_CELLS - filled))
}

/// One-line summary used while the timer is running.
pub fn status_line(view: &DashboardView) -> String {
    let s = &view.stats;
    format!(
        "step {} | progress {} | EV {} | AC {} | CPI {} | active {}",
        s.time_step, s.progress, s.earned_value, s.actual_cost, s.cpi, s.active_agents
    )
}

/// Full dashboard: header, task panels, agent markers, stats and log.
pub fn dashboard(view: &DashboardView, log: &EventLog) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "== {} == [{}] report: {}",
        view.file_name,
        run_state_label(view.run_state),
        if view.report_unlocked { "available" } else { "locked" }
    );

    let _ = writeln!(out, "Tasks");
    let name_width = view.panels.iter().map(|p| p.name.len()).max().unwrap_or(0);
    for panel in &view.panels {
        let _ = writeln!(
            out,
            "  {:<name_width$} {} {:>5.1}%  {}",
            panel.name,
            progress_bar(panel.bar_width),
            panel.bar_width,
            panel.state_class,
        );
    }

    let _ = writeln!(out, "Agents");
    for marker in &view.markers {
        let place = match &marker.position {
            MarkerPosition::Home => "home".to_string(),
            MarkerPosition::AtTask(task) => format!("at {task}"),
        };
        let working = if marker.working { " (working)" } else { "" };
        let _ = writeln!(out, "  {} {}{}", marker.name, place, working);
    }

    let _ = writeln!(out, "Stats");
    let _ = writeln!(out, "  {}", status_line(view));

    let _ = writeln!(out, "Event log");
    if log.is_empty() {
        let _ = writeln!(out, "  (empty)");
    }
    for entry in log.iter() {
        let _ = writeln!(out, "  {entry}");
    }

    // Drop the trailing newline; the caller adds one.
    out.pop();
    out
}
