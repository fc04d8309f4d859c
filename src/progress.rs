//! Progress observers for long raster sweeps.
//!
//! The sweep calls [`Progress::update`] from whichever worker just finished a
//! chunk, so implementations must do their own synchronisation.
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

pub trait Progress: Sync {
    /// Called once before any work, with the number of cells to process.
    fn start(&self, total: usize);

    /// Called with the number of cells processed so far.
    fn update(&self, done: usize);

    /// Called once after the sweep; returns the time since `start`.
    fn stop(&self) -> Duration;
}

/// Ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn start(&self, _total: usize) {}

    fn update(&self, _done: usize) {}

    fn stop(&self) -> Duration {
        Duration::ZERO
    }
}

/// Reports every tenth of the work through `log::debug!`.
#[derive(Debug, Default)]
pub struct LogProgress {
    started: Mutex<Option<Instant>>,
    total: AtomicUsize,
    tenths: AtomicUsize,
}

impl LogProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Progress for LogProgress {
    fn start(&self, total: usize) {
        self.total.store(total, Ordering::Relaxed);
        self.tenths.store(0, Ordering::Relaxed);
        if let Ok(mut started) = self.started.lock() {
            *started = Some(Instant::now());
        }
    }

    fn update(&self, done: usize) {
        let total = self.total.load(Ordering::Relaxed);
        if total == 0 {
            return;
        }
        let tenths = (done.min(total) * 10) / total;
        // only the worker that moves the counter forward logs
        if self.tenths.fetch_max(tenths, Ordering::Relaxed) < tenths {
            log::debug!("{}% ({done} of {total} cells)", tenths * 10);
        }
    }

    fn stop(&self) -> Duration {
        self.started
            .lock()
            .ok()
            .and_then(|started| started.as_ref().map(Instant::elapsed))
            .unwrap_or_default()
    }
}
