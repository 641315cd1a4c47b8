//! Sweep Module - Sweep Engine
//!
//! Reclaims and finalizes every object not reached by the latest mark.
//! Runs in two phases: a shared-read scan collects the White entries,
//! then each is finalized and freed outside that lock so a finalizer that
//! calls back into the collector (e.g. to allocate) cannot deadlock against
//! the scan. An entry is considered removed only after its finalizer has
//! returned, per the "finalizer runs exactly once" contract.

use crate::object::Color;
use crate::registry::Registry;
use crate::Address;

/// Sweep outcome: addresses reclaimed this cycle.
pub struct SweepReport {
    pub reclaimed: Vec<Address>,
}

/// Run one sweep. Caller holds exclusive registry access for the duration
/// (sweep never interleaves with mark for the same cycle).
pub fn sweep(registry: &Registry) -> SweepReport {
    let dead: Vec<Address> = registry
        .snapshot()
        .into_iter()
        .filter(|(_, entry)| entry.color() == Color::White)
        .map(|(address, _)| address)
        .collect();

    let mut reclaimed = Vec::with_capacity(dead.len());
    for address in dead {
        // Re-fetch rather than reuse the entry from the snapshot: another
        // thread could only have re-registered this exact address after a
        // remove, which cannot happen while sweep holds exclusive access.
        let Some(entry) = registry.get(address) else {
            continue;
        };
        let size = entry.size;
        let finalizer = entry.finalizer.clone();

        (finalizer)(address, size);
        unsafe {
            registry.allocator().dealloc(address, size);
        }
        registry.remove(address);
        log::trace!(target: "tricolor_gc::sweep", "reclaimed {address:#x} ({size} bytes)");
        reclaimed.push(address);
    }

    log::debug!(target: "tricolor_gc::sweep", "swept {} objects", reclaimed.len());
    SweepReport { reclaimed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::SystemAllocator;
    use crate::mark::mark_stop_the_world;
    use crate::object::noop_finalizer;
    use crate::roots::RootSet;
    use crate::frontier::GrayFrontier;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_sweep_reclaims_unreached_objects() {
        let registry = Registry::new(Box::new(SystemAllocator));
        let roots = RootSet::new();
        let frontier = GrayFrontier::new();

        let kept = registry.alloc(8, noop_finalizer()).unwrap();
        let garbage = registry.alloc(8, noop_finalizer()).unwrap();
        roots.add(kept);

        mark_stop_the_world(&registry, &roots, &frontier);
        let report = sweep(&registry);

        assert_eq!(report.reclaimed, vec![garbage]);
        assert!(registry.contains(kept));
        assert!(!registry.contains(garbage));
    }

    #[test]
    fn test_finalizer_called_exactly_once_with_size() {
        let registry = Registry::new(Box::new(SystemAllocator));
        let roots = RootSet::new();
        let frontier = GrayFrontier::new();

        let calls: Arc<AtomicUsize> = Arc::new(AtomicUsize::new(0));
        let seen_size: Arc<AtomicUsize> = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();
        let seen_size_clone = seen_size.clone();
        let finalizer: crate::object::Finalizer = Arc::new(move |_addr, size| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
            seen_size_clone.store(size, Ordering::SeqCst);
        });

        registry.alloc(40, finalizer).unwrap();

        mark_stop_the_world(&registry, &roots, &frontier);
        sweep(&registry);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(seen_size.load(Ordering::SeqCst), 40);
    }

    #[test]
    fn test_survivor_not_repainted_by_sweep() {
        let registry = Registry::new(Box::new(SystemAllocator));
        let roots = RootSet::new();
        let frontier = GrayFrontier::new();

        let kept = registry.alloc(8, noop_finalizer()).unwrap();
        roots.add(kept);

        mark_stop_the_world(&registry, &roots, &frontier);
        sweep(&registry);

        // Sweep does not reset survivors to White; that is mark-start's job.
        assert_eq!(registry.get(kept).unwrap().color(), Color::Black);
    }
}
