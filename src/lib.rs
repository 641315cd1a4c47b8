//! # tricolor-gc - Tracing Garbage Collector for Explicitly Connected Heaps
//!
//! `tricolor-gc` supplies tracing garbage collection for manually allocated,
//! explicitly connected heap objects in a host program that otherwise uses
//! raw pointers. A client requests memory from the collector, declares
//! *roots* (objects live by fiat) and *edges* (directed references between
//! managed objects). Periodically, on demand or on a background cadence,
//! the collector identifies objects unreachable from any root and reclaims
//! them, invoking a per-object finalizer before freeing the underlying
//! buffer.
//!
//! ## Scope
//!
//! The collector is exact: it relies on the client to declare edges
//! explicitly rather than scanning the stack conservatively. It does not
//! compact or relocate live objects — addresses are stable for an object's
//! lifetime — and it is not generational; a single process-wide collector
//! instance is assumed.
//!
//! ## Quick start
//!
//! ```rust
//! use tricolor_gc::{alloc, alloc_root, add_edge, delete_root, collect, count};
//!
//! let a = alloc_root(32).unwrap();
//! let b = alloc(32).unwrap();
//! add_edge(a, b).unwrap();
//!
//! collect();
//! assert_eq!(count(), 2);
//!
//! delete_root(a);
//! collect();
//! assert_eq!(count(), 0);
//! ```
//!
//! ## Concurrency
//!
//! Marking can run incrementally, interleaved with mutator threads calling
//! `add_edge`/`alloc`/etc. A write barrier (`add_edge`'s barrier rule)
//! keeps the tri-color invariant intact: no edge ever leads from a Black
//! (fully scanned) object to a White (unvisited) object while a mark is in
//! progress. See the `mark` and `barrier` module docs for the invariant
//! this preserves.
//!
//! ## Modules
//!
//! - [`alloc`]: the raw buffer provider backing registered objects.
//! - [`object`]: per-object color, edges and finalizer.
//! - [`registry`]: address -> object metadata map.
//! - [`roots`]: the set of addresses declared live.
//! - [`edges`]: add/remove/swap operations on an object's out-edges.
//! - [`frontier`]: the gray work queue shared by marking and the barrier.
//! - [`barrier`]: the incremental-update write barrier.
//! - [`mark`]: the stop-the-world and incremental tri-color mark engine.
//! - [`sweep`]: reclaiming and finalizing unreached objects.
//! - [`gate`]: the collection gate for bulk mutation sections.
//! - [`background`]: the dedicated incremental-collection scheduling thread.
//! - [`stats`]: read-only diagnostics.
//! - [`config`]: internal tuning constants, not part of the public contract.
//! - [`error`]: error types for all collector operations.
//! - [`collector`]: the `Collector` type tying the above together.

pub mod alloc;
pub mod background;
pub mod barrier;
pub mod collector;
pub mod config;
pub mod edges;
pub mod error;
pub mod frontier;
pub mod gate;
pub mod mark;
pub mod object;
pub mod registry;
pub mod roots;
pub mod stats;
pub mod sweep;

pub use collector::Collector;
pub use config::CollectorConfig;
pub use error::{CollectorError, Result};
pub use object::{Color, Finalizer};

use std::sync::Arc;

use lazy_static::lazy_static;

/// A stable, opaque address identifying a managed object. Values are
/// returned by `alloc`/`alloc_root`/etc. and must not be fabricated by
/// the client — passing a foreign address is undefined behavior of the
/// client, not defended by the collector.
pub type Address = usize;

lazy_static! {
    static ref COLLECTOR: Arc<Collector> = Arc::new(Collector::new());
}

fn collector() -> &'static Arc<Collector> {
    &COLLECTOR
}

// ---- 4.1 Object registry -------------------------------------------------

/// Acquire a `size`-byte buffer and register it with a no-op finalizer.
pub fn alloc(size: usize) -> Result<Address> {
    collector().alloc(size)
}

/// Acquire a `size`-byte buffer and register it with `finalizer`.
pub fn alloc_manage(size: usize, finalizer: Finalizer) -> Result<Address> {
    collector().alloc_manage(size, finalizer)
}

/// As `alloc`, and atomically add the result to the root set.
pub fn alloc_root(size: usize) -> Result<Address> {
    collector().alloc_root(size)
}

/// As `alloc_manage`, and atomically add the result to the root set.
pub fn alloc_root_manage(size: usize, finalizer: Finalizer) -> Result<Address> {
    collector().alloc_root_manage(size, finalizer)
}

/// As `alloc`, and atomically insert an edge `parent -> new`. Fails if
/// `parent` is not registered.
pub fn alloc_with_parent(size: usize, parent: Address) -> Result<Address> {
    collector().alloc_with_parent(size, parent)
}

/// As `alloc_manage`, and atomically insert an edge `parent -> new`.
pub fn alloc_with_parent_manage(
    size: usize,
    parent: Address,
    finalizer: Finalizer,
) -> Result<Address> {
    collector().alloc_with_parent_manage(size, parent, finalizer)
}

/// Number of live registrations.
pub fn count() -> usize {
    collector().count()
}

// ---- 4.2 Root set ---------------------------------------------------------

/// Idempotent insert into the root set.
pub fn add_root(address: Address) {
    collector().add_root(address)
}

/// Idempotent removal from the root set; tolerated if absent.
pub fn delete_root(address: Address) {
    collector().delete_root(address)
}

// ---- 4.3 Edge operations ---------------------------------------------------

/// Insert `child` into `parent`'s out-edges, firing the write barrier if
/// marking is active and `parent` has already been scanned Black.
pub fn add_edge(parent: Address, child: Address) -> Result<()> {
    collector().add_edge(parent, child)
}

/// Remove one occurrence of `child` from `parent`'s out-edges.
pub fn del_edge(parent: Address, child: Address) -> Result<()> {
    collector().del_edge(parent, child)
}

/// `del_edge(parent, old)` followed by `add_edge(parent, new)` as one
/// logical step, so the barrier is never skipped for `new`.
pub fn swap_edge(parent: Address, old_child: Address, new_child: Address) -> Result<()> {
    collector().swap_edge(parent, old_child, new_child)
}

// ---- 4.4 / 4.5 Mark + sweep -------------------------------------------------

/// Run a full synchronous mark-then-sweep cycle.
pub fn collect() {
    collector().collect()
}

/// Begin an incremental mark cycle: reset all colors, seed the gray
/// frontier from the root set, and mark the cycle active. Waits on the
/// collection gate first, so a new cycle is deferred while `block_collect`
/// is held.
pub fn start_incremental_mark() {
    collector().start_incremental_mark()
}

/// Process one step (up to the default budget) of the active incremental
/// mark. If the frontier empties, transitions into sweep.
pub fn step_mark() {
    collector().step_mark()
}

/// True while an incremental mark is in progress (the barrier's fast-path
/// check).
pub fn is_marking() -> bool {
    collector().is_marking()
}

/// Force the frontier to drain and run sweep, for a deterministic endpoint.
pub fn finish_incremental_mark() {
    collector().finish_incremental_mark()
}

// ---- 4.7 Background driver --------------------------------------------------

/// Start the background driver thread: every `interval_ms`, if no cycle is
/// active it starts one, then steps up to `steps_per_tick` gray objects.
pub fn start_background(steps_per_tick: usize, interval_ms: u64) -> Result<()> {
    Arc::clone(collector()).start_background(steps_per_tick, interval_ms)
}

/// Signal the background driver to stop, wake it, and join its thread.
pub fn stop_background() -> Result<()> {
    collector().stop_background()
}

/// True while the background driver thread is running.
pub fn is_background_running() -> bool {
    collector().is_background_running()
}

// ---- 4.8 Collection gate ------------------------------------------------------

/// Block collection: acquire the gate. `collect()` and mark-start wait
/// while it is held.
pub fn block_collect() {
    collector().block_collect()
}

/// Release a previously acquired gate.
pub fn unlock_collect() -> Result<()> {
    collector().unlock_collect()
}

// ---- Diagnostics --------------------------------------------------------------

/// Number of completed mark-then-sweep cycles.
pub fn cycle_count() -> u64 {
    collector().cycle_count()
}

/// A read-only diagnostics snapshot: live object count, root count, cycle
/// count, and marking/background/gate state.
pub fn health() -> indexmap::IndexMap<String, String> {
    collector().health()
}

#[cfg(test)]
mod tests {
    use super::*;

    // These tests share the process-wide singleton, so each uses a disjoint
    // subgraph and avoids asserting on global `count()`/`cycle_count()`.

    #[test]
    fn test_alloc_returns_distinct_addresses() {
        let a = alloc(16).unwrap();
        let b = alloc(16).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_add_root_then_delete_root_is_idempotent() {
        let a = alloc(16).unwrap();
        add_root(a);
        add_root(a);
        delete_root(a);
        delete_root(a);
    }

    #[test]
    fn test_alloc_with_parent_requires_registered_parent() {
        let result = alloc_with_parent(16, 0xdead_beef_0000);
        assert!(result.is_err());
    }

    #[test]
    fn test_health_reports_marking_state() {
        let snapshot = health();
        assert!(snapshot.contains_key("is_marking"));
        assert!(snapshot.contains_key("cycle_count"));
    }
}
