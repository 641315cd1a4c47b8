//! Edges Module - Edge Operations
//!
//! Add, remove and swap out-edges on a registered object, cooperating with
//! the write barrier so that mutation during an active mark preserves I3.

use std::sync::atomic::Ordering;

use crate::barrier;
use crate::error::Result;
use crate::frontier::GrayFrontier;
use crate::registry::Registry;
use crate::Address;

/// Insert `child` into `parent`'s out-edges. No-op if the edge already
/// exists. Fires the write barrier when marking is active.
///
/// `child` is not required to be registered: an edge to an address the
/// registry doesn't know about is client misuse, but it is tolerated here
/// and defended against later (mark skips a dangling out-edge target; a
/// child that is never registered can never be reclaimed or finalized, so
/// sweep has nothing to fault on either). Only `parent` must be registered,
/// since that is where the edge is actually stored.
pub fn add_edge(
    registry: &Registry,
    frontier: &GrayFrontier,
    marking_active: &std::sync::atomic::AtomicBool,
    parent: Address,
    child: Address,
) -> Result<()> {
    let parent_entry = registry.require(parent)?;

    let inserted = parent_entry.add_edge(child);
    if !inserted {
        return Ok(());
    }

    if let Some(child_entry) = registry.get(child) {
        let active = marking_active.load(Ordering::Acquire);
        barrier::fire(active, &parent_entry, child, &child_entry, frontier);
    }
    Ok(())
}

/// Remove one occurrence of `child` from `parent`'s out-edges. No barrier
/// action: removing an edge can only make an object less reachable, which
/// is safe to discover on the next cycle.
pub fn del_edge(registry: &Registry, parent: Address, child: Address) -> Result<()> {
    let parent_entry = registry.require(parent)?;
    parent_entry.del_edge(child);
    Ok(())
}

/// Equivalent to `del_edge(parent, old)` followed by `add_edge(parent,
/// new)`, performed as one logical step so barrier bookkeeping for `new`
/// is never skipped.
pub fn swap_edge(
    registry: &Registry,
    frontier: &GrayFrontier,
    marking_active: &std::sync::atomic::AtomicBool,
    parent: Address,
    old_child: Address,
    new_child: Address,
) -> Result<()> {
    del_edge(registry, parent, old_child)?;
    add_edge(registry, frontier, marking_active, parent, new_child)
}
