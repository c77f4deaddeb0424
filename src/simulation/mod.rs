//! Simulated sensor producers for demos and integration tests.
//!
//! Each simulator can be driven synchronously (`next_fix` / `next_sample`)
//! for deterministic tests, or spawned as a producer thread feeding a
//! `GuidanceEvent` channel like a platform sensor subscription would.

mod compass;
mod walk;

pub use compass::{CompassConfig, SimulatedCompass};
pub use walk::{SimulatedWalk, WalkConfig};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;

/// Handle to a spawned sensor producer thread.
///
/// Dropping the handle stops the thread and joins it, so tearing down a
/// guidance session leaves no background work running.
pub struct ProducerHandle {
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl ProducerHandle {
    pub(crate) fn new(stop: Arc<AtomicBool>, thread: JoinHandle<()>) -> Self {
        Self {
            stop,
            thread: Some(thread),
        }
    }
}

impl Drop for ProducerHandle {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
