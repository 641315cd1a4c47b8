//! Registry Module - Object Registry
//!
//! Maps a managed address to its metadata: size, color, out-edges and
//! finalizer. Shared-read locking covers edge operations and mark scanning;
//! exclusive locking covers registration, deregistration, sweep, and the
//! full color reset at mark start.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::alloc::RawAllocator;
use crate::error::{CollectorError, Result};
use crate::object::{Color, Finalizer, ObjectEntry};
use crate::Address;

/// The object registry: address -> entry.
pub struct Registry {
    allocator: Box<dyn RawAllocator>,
    entries: RwLock<HashMap<Address, Arc<ObjectEntry>>>,
}

impl Registry {
    pub fn new(allocator: Box<dyn RawAllocator>) -> Self {
        Self {
            allocator,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Acquire a buffer and register it. Color starts White, edges empty.
    pub fn alloc(&self, size: usize, finalizer: Finalizer) -> Result<Address> {
        let address = self
            .allocator
            .alloc(size)
            .ok_or(CollectorError::AllocationFailed { requested: size })?;

        let entry = Arc::new(ObjectEntry::new(size, finalizer));
        self.entries.write().insert(address, entry);
        log::trace!(target: "tricolor_gc::registry", "allocated {address:#x} ({size} bytes)");
        Ok(address)
    }

    /// True if `address` is currently registered.
    pub fn contains(&self, address: Address) -> bool {
        self.entries.read().contains_key(&address)
    }

    /// Number of live registrations.
    pub fn count(&self) -> usize {
        self.entries.read().len()
    }

    /// Fetch a clone of the `Arc<ObjectEntry>` for `address`, if registered.
    pub fn get(&self, address: Address) -> Option<Arc<ObjectEntry>> {
        self.entries.read().get(&address).cloned()
    }

    /// Look up an entry, erroring if it isn't registered.
    pub fn require(&self, address: Address) -> Result<Arc<ObjectEntry>> {
        self.get(address)
            .ok_or(CollectorError::UnregisteredAddress { address })
    }

    /// Snapshot every currently registered address. Used to seed the mark's
    /// full-White reset and to drive sweep.
    pub fn addresses(&self) -> Vec<Address> {
        self.entries.read().keys().copied().collect()
    }

    /// Snapshot `(address, entry)` pairs for iteration under a shared lock.
    pub fn snapshot(&self) -> Vec<(Address, Arc<ObjectEntry>)> {
        self.entries
            .read()
            .iter()
            .map(|(addr, entry)| (*addr, entry.clone()))
            .collect()
    }

    /// Reset every registered object's color to White. Called once, under
    /// exclusive access, at the start of a mark cycle.
    pub fn reset_all_white(&self) {
        let map = self.entries.read();
        for entry in map.values() {
            entry.set_color(Color::White);
        }
    }

    /// Remove an entry outright (used by sweep's bookkeeping phase, after
    /// the finalizer for a dead object has already been invoked).
    pub fn remove(&self, address: Address) -> Option<Arc<ObjectEntry>> {
        self.entries.write().remove(&address)
    }

    pub fn allocator(&self) -> &dyn RawAllocator {
        self.allocator.as_ref()
    }
}
