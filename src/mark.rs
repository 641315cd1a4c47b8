//! Mark Module - Tri-Color Mark Engine
//!
//! Maintains the gray frontier and implements both the stop-the-world and
//! incremental entry points. Both variants share the same per-object scan
//! step; the only difference is whether the frontier is drained in one call
//! or across many.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::frontier::GrayFrontier;
use crate::object::Color;
use crate::registry::Registry;
use crate::roots::RootSet;
use crate::Address;

/// Recolor every registered object White and seed the gray frontier with
/// the current root set. Shared by both the stop-the-world and incremental
/// entry points.
fn reset_and_seed(registry: &Registry, roots: &RootSet, frontier: &GrayFrontier) {
    registry.reset_all_white();
    for root in roots.snapshot() {
        if let Some(entry) = registry.get(root) {
            entry.set_color(Color::Gray);
            frontier.push(root);
        }
    }
}

/// Scan one gray object: for each out-edge whose target is currently White,
/// set it Gray and push it onto the frontier; then set the popped object
/// Black. Returns `false` once the frontier is empty and there was nothing
/// to scan.
fn scan_one(registry: &Registry, frontier: &GrayFrontier) -> bool {
    let Some(address) = frontier.pop() else {
        return false;
    };

    // The entry may have been concurrently removed (e.g. a root deleted and
    // collected in a race the current design doesn't produce, but sweep
    // defends against it anyway); skip rather than fault.
    let Some(entry) = registry.get(address) else {
        return true;
    };

    for target in entry.edges_snapshot() {
        // An out-edge whose target isn't registered is skipped, not fatal.
        let Some(target_entry) = registry.get(target) else {
            continue;
        };
        if target_entry.color() == Color::White {
            target_entry.set_color(Color::Gray);
            frontier.push(target);
        }
    }

    entry.set_color(Color::Black);
    true
}

/// Run a full stop-the-world mark: reset, seed, then drain the frontier to
/// completion. Caller holds exclusive registry access for the duration.
pub fn mark_stop_the_world(registry: &Registry, roots: &RootSet, frontier: &GrayFrontier) {
    reset_and_seed(registry, roots, frontier);
    while scan_one(registry, frontier) {}
    log::debug!(target: "tricolor_gc::mark", "stop-the-world mark complete");
}

/// Incremental mark state: the active flag the write barrier consults, plus
/// the entry points split across `start` / `step` / `finish`.
pub struct IncrementalMark {
    active: AtomicBool,
}

impl IncrementalMark {
    pub fn new() -> Self {
        Self {
            active: AtomicBool::new(false),
        }
    }

    pub fn is_marking(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    pub fn active_flag(&self) -> &AtomicBool {
        &self.active
    }

    /// Reset and seed the frontier, then mark the cycle active.
    pub fn start(&self, registry: &Registry, roots: &RootSet, frontier: &GrayFrontier) {
        reset_and_seed(registry, roots, frontier);
        self.active.store(true, Ordering::Release);
        log::debug!(target: "tricolor_gc::mark", "incremental mark started");
    }

    /// Process at most `budget` gray objects. Returns `true` if the
    /// frontier emptied during this call (the caller transitions to sweep
    /// and clears the active flag).
    pub fn step(&self, registry: &Registry, frontier: &GrayFrontier, budget: usize) -> bool {
        if !self.active.load(Ordering::Acquire) {
            return false;
        }
        for _ in 0..budget {
            if !scan_one(registry, frontier) {
                self.active.store(false, Ordering::Release);
                log::debug!(target: "tricolor_gc::mark", "incremental mark frontier drained");
                return true;
            }
        }
        false
    }

    /// Force the frontier to drain fully, for a deterministic endpoint.
    /// Returns `false` without touching state if no cycle was active.
    pub fn finish(&self, registry: &Registry, frontier: &GrayFrontier) -> bool {
        if !self.active.load(Ordering::Acquire) {
            return false;
        }
        while scan_one(registry, frontier) {}
        self.active.store(false, Ordering::Release);
        log::debug!(target: "tricolor_gc::mark", "incremental mark finished");
        true
    }
}

impl Default for IncrementalMark {
    fn default() -> Self {
        Self::new()
    }
}
