//! Stats Module - Diagnostics
//!
//! Read-only observability snapshot of collector state: cycle count, live
//! object count, root count, marking/background/gate state. Pure reporting,
//! not a control surface.

use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexMap;

/// Monotonic counters tracked across the collector's lifetime.
pub struct CycleCounter {
    cycles: AtomicU64,
}

impl CycleCounter {
    pub fn new() -> Self {
        Self {
            cycles: AtomicU64::new(0),
        }
    }

    pub fn record_cycle(&self) {
        self.cycles.fetch_add(1, Ordering::Relaxed);
    }

    pub fn count(&self) -> u64 {
        self.cycles.load(Ordering::Relaxed)
    }
}

impl Default for CycleCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a health snapshot in the order fields are inserted, for stable
/// diagnostics output.
pub fn health_snapshot(
    live_objects: usize,
    root_count: usize,
    cycle_count: u64,
    is_marking: bool,
    is_background_running: bool,
    is_gate_locked: bool,
) -> IndexMap<String, String> {
    let mut snapshot = IndexMap::new();
    snapshot.insert("live_objects".to_string(), live_objects.to_string());
    snapshot.insert("root_count".to_string(), root_count.to_string());
    snapshot.insert("cycle_count".to_string(), cycle_count.to_string());
    snapshot.insert("is_marking".to_string(), is_marking.to_string());
    snapshot.insert(
        "is_background_running".to_string(),
        is_background_running.to_string(),
    );
    snapshot.insert("is_gate_locked".to_string(), is_gate_locked.to_string());
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_counter_increments() {
        let counter = CycleCounter::new();
        assert_eq!(counter.count(), 0);
        counter.record_cycle();
        counter.record_cycle();
        assert_eq!(counter.count(), 2);
    }

    #[test]
    fn test_health_snapshot_fields() {
        let snapshot = health_snapshot(3, 1, 2, true, false, false);
        assert_eq!(snapshot.get("live_objects").unwrap(), "3");
        assert_eq!(snapshot.get("is_marking").unwrap(), "true");
    }
}
