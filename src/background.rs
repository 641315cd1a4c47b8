//! Background Module - Background Driver
//!
//! A single dedicated scheduling thread that starts, steps, and finishes
//! incremental cycles at a configurable cadence. Uses a condvar-with-
//! timeout wait so `stop_background` can interrupt a sleeping driver
//! immediately rather than waiting out the remainder of its interval.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use parking_lot::{Condvar, Mutex};

use crate::error::{CollectorError, Result};

struct SharedState {
    stop_requested: Mutex<bool>,
    wake: Condvar,
}

/// The background driver's thread lifecycle. Owns no collector state
/// directly; each tick is a caller-supplied closure so this module stays
/// independent of the mark/sweep internals it drives.
pub struct BackgroundDriver {
    handle: Mutex<Option<JoinHandle<()>>>,
    running: AtomicBool,
    shared: Arc<SharedState>,
}

impl BackgroundDriver {
    pub fn new() -> Self {
        Self {
            handle: Mutex::new(None),
            running: AtomicBool::new(false),
            shared: Arc::new(SharedState {
                stop_requested: Mutex::new(false),
                wake: Condvar::new(),
            }),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Start the driver thread. `tick` is invoked once per interval and
    /// should perform one step of incremental work (starting a cycle if
    /// none is active, then a single bounded `step_mark`).
    pub fn start<F>(&self, interval_ms: u64, tick: F) -> Result<()>
    where
        F: Fn() + Send + 'static,
    {
        if self.running.swap(true, Ordering::AcqRel) {
            return Err(CollectorError::BackgroundAlreadyRunning);
        }

        *self.shared.stop_requested.lock() = false;
        let shared = self.shared.clone();
        let interval = Duration::from_millis(interval_ms);

        let join = std::thread::spawn(move || loop {
            let mut stop = shared.stop_requested.lock();
            if *stop {
                return;
            }
            let result = shared.wake.wait_for(&mut stop, interval);
            let should_stop = *stop;
            drop(stop);

            if should_stop {
                return;
            }
            if result.timed_out() {
                tick();
            } else {
                // Woken early by a stop request that raced the check above;
                // loop back to re-check the flag rather than ticking.
                continue;
            }
        });

        *self.handle.lock() = Some(join);
        log::info!(target: "tricolor_gc::background", "background driver started (interval {interval_ms}ms)");
        Ok(())
    }

    /// Signal the driver to stop, wake it, and join the thread.
    pub fn stop(&self) -> Result<()> {
        if !self.running.swap(false, Ordering::AcqRel) {
            return Err(CollectorError::BackgroundNotRunning);
        }

        *self.shared.stop_requested.lock() = true;
        self.shared.wake.notify_all();

        if let Some(handle) = self.handle.lock().take() {
            let _ = handle.join();
        }
        log::info!(target: "tricolor_gc::background", "background driver stopped");
        Ok(())
    }
}

impl Default for BackgroundDriver {
    fn default() -> Self {
        Self::new()
    }
}
