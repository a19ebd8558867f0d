// src/controller/sink.rs

//! Where controller output goes.
//!
//! The runtime never writes to the terminal directly. It hands every
//! [`ViewUpdate`] to a `SnapshotSink`, so tests can record updates while
//! production renders them.

use std::future::Future;
use std::pin::Pin;

use crate::controller::ViewUpdate;
use crate::errors::Result;

pub trait SnapshotSink: Send {
    /// Deliver a single update (frame, log line, or log clear).
    fn deliver(
        &mut self,
        update: ViewUpdate,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}
