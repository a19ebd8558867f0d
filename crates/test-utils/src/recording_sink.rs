use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use pmsim::controller::{Frame, SnapshotSink, ViewUpdate};
use pmsim::errors::Result;

/// A sink that records every update it receives.
///
/// Clones share the same buffer, so a test can keep one handle while the
/// runtime owns the other.
#[derive(Clone, Default)]
pub struct RecordingSink {
    updates: Arc<Mutex<Vec<ViewUpdate>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn updates(&self) -> Vec<ViewUpdate> {
        self.updates.lock().unwrap().clone()
    }

    pub fn frames(&self) -> Vec<Frame> {
        self.updates()
            .into_iter()
            .filter_map(|u| match u {
                ViewUpdate::Frame(f) => Some(*f),
                _ => None,
            })
            .collect()
    }

    pub fn log_messages(&self) -> Vec<String> {
        self.updates()
            .into_iter()
            .filter_map(|u| match u {
                ViewUpdate::Log(entry) => Some(entry.message),
                _ => None,
            })
            .collect()
    }
}

impl SnapshotSink for RecordingSink {
    fn deliver(
        &mut self,
        update: ViewUpdate,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let updates = Arc::clone(&self.updates);

        Box::pin(async move {
            updates.lock().unwrap().push(update);
            Ok(())
        })
    }
}
