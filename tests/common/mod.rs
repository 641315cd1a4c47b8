//! Shared test fixture for the collector's integration test suite.
//!
//! Each test builds its own `Collector` instance directly (rather than
//! going through the process-wide singleton in `tricolor_gc::`) so tests
//! can run concurrently without interfering with each other's graphs.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tricolor_gc::{Collector, CollectorConfig};

/// Default incremental mark step budget for fixtures that don't care about
/// the exact cadence.
pub const DEFAULT_STEP_BUDGET: usize = 64;

/// A fresh, isolated collector for a single test. Held behind an `Arc`
/// since `start_background` hands a clone to its driver thread.
pub struct GcFixture {
    pub gc: Arc<Collector>,
}

impl GcFixture {
    /// Build a fixture with the default configuration.
    pub fn new() -> Self {
        Self {
            gc: Arc::new(Collector::new()),
        }
    }

    /// Build a fixture with a custom incremental mark step budget.
    pub fn with_step_budget(budget: usize) -> Self {
        let config = CollectorConfig {
            mark_step_budget: budget,
            ..Default::default()
        };
        Self {
            gc: Arc::new(Collector::with_config(config)),
        }
    }
}

impl Default for GcFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a chain `n1 -> n2 -> ... -> nN` of freshly allocated objects,
/// returning their addresses in order. None are rooted.
pub fn build_chain(gc: &Collector, length: usize) -> Vec<usize> {
    let mut addrs = Vec::with_capacity(length);
    for _ in 0..length {
        addrs.push(gc.alloc(8).expect("allocation should succeed"));
    }
    for window in addrs.windows(2) {
        gc.add_edge(window[0], window[1]).expect("edge should attach");
    }
    addrs
}

/// Sleep briefly to let a background driver tick at least once.
pub fn let_background_tick() {
    std::thread::sleep(Duration::from_millis(50));
}

/// Assert every address in `addresses` is distinct.
///
/// **Bug this finds:** the underlying allocator handing out a reused or
/// duplicate address while the original registration is still live.
#[track_caller]
pub fn assert_all_addresses_unique(addresses: &[usize], context: &str) {
    let unique: HashSet<_> = addresses.iter().collect();
    assert_eq!(
        unique.len(),
        addresses.len(),
        "{context}: found {} duplicate addresses out of {}",
        addresses.len() - unique.len(),
        addresses.len()
    );
}

/// Assert that a finalizer fired exactly once per address in `expected`.
///
/// **Bug this finds:** a finalizer skipped or double-invoked during sweep.
#[track_caller]
pub fn assert_finalized_exactly(calls: &[usize], expected: &[usize], context: &str) {
    let mut sorted_calls = calls.to_vec();
    sorted_calls.sort_unstable();
    let mut sorted_expected = expected.to_vec();
    sorted_expected.sort_unstable();
    assert_eq!(
        sorted_calls, sorted_expected,
        "{context}: finalizer call set did not match expected reclaim set"
    );
}
