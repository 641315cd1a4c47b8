//! Barrier Module - Write Barrier
//!
//! The only point at which a mutator can violate the tri-color invariant I3
//! ("no edge from a Black object to a White object") is `add_edge(parent,
//! child)` when the parent has already been scanned. This is an
//! incremental-update / Dijkstra-style barrier: active iff marking is in
//! progress, it re-grays a White child linked from a Black parent and
//! enqueues it on the gray frontier. Outside a cycle it is a pure registry
//! mutation with no barrier action.

use crate::frontier::GrayFrontier;
use crate::object::{Color, ObjectEntry};
use crate::Address;

/// Apply the write barrier for `add_edge(parent, child)`.
///
/// Must be called with the new edge already recorded in `parent`'s edge
/// set, and only while marking is active. Re-grays `child` if it is still
/// White and `parent` has already been scanned Black, preserving I3.
pub fn fire(
    marking_active: bool,
    parent: &ObjectEntry,
    child_address: Address,
    child: &ObjectEntry,
    frontier: &GrayFrontier,
) {
    if !marking_active {
        return;
    }
    if parent.color() != Color::Black {
        return;
    }
    if child.color() != Color::White {
        return;
    }
    child.set_color(Color::Gray);
    frontier.push(child_address);
    log::trace!(
        target: "tricolor_gc::barrier",
        "barrier re-grayed {child_address:#x} linked from a black parent"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::noop_finalizer;

    #[test]
    fn test_barrier_regrays_white_child_of_black_parent() {
        let parent = ObjectEntry::new(8, noop_finalizer());
        parent.set_color(Color::Black);
        let child = ObjectEntry::new(8, noop_finalizer());
        let frontier = GrayFrontier::new();

        fire(true, &parent, 0x2000, &child, &frontier);

        assert_eq!(child.color(), Color::Gray);
        assert_eq!(frontier.pop(), Some(0x2000));
    }

    #[test]
    fn test_barrier_noop_when_marking_inactive() {
        let parent = ObjectEntry::new(8, noop_finalizer());
        parent.set_color(Color::Black);
        let child = ObjectEntry::new(8, noop_finalizer());
        let frontier = GrayFrontier::new();

        fire(false, &parent, 0x2000, &child, &frontier);

        assert_eq!(child.color(), Color::White);
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_barrier_noop_when_parent_not_black() {
        let parent = ObjectEntry::new(8, noop_finalizer());
        let child = ObjectEntry::new(8, noop_finalizer());
        let frontier = GrayFrontier::new();

        fire(true, &parent, 0x2000, &child, &frontier);

        assert_eq!(child.color(), Color::White);
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_barrier_noop_when_child_already_gray() {
        let parent = ObjectEntry::new(8, noop_finalizer());
        parent.set_color(Color::Black);
        let child = ObjectEntry::new(8, noop_finalizer());
        child.set_color(Color::Gray);
        let frontier = GrayFrontier::new();

        fire(true, &parent, 0x2000, &child, &frontier);

        assert!(frontier.is_empty());
    }
}
