// src/render/mod.rs

//! Visual renderer: view model projection, event log and terminal output.
//!
//! The renderer never calls into the engine. It receives [`ViewUpdate`]s
//! through the [`SnapshotSink`] trait and draws whatever they carry.
//!
//! [`ViewUpdate`]: crate::controller::ViewUpdate
//! [`SnapshotSink`]: crate::controller::SnapshotSink

pub mod log;
pub mod terminal;
pub mod view;

pub use self::log::{EventLog, LogEntry, LogKind};
pub use terminal::TerminalRenderer;
pub use view::{project, AgentMarker, DashboardView, Layout, MarkerPosition, StatFields, TaskPanel};
