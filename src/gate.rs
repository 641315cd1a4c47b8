//! Gate Module - Collection Gate
//!
//! `block_collect()` / `unlock_collect()` bracket a region in which
//! mutators perform bulk structural changes. The gate is an exclusive lock
//! held across two separate public API calls, which a scoped RAII guard
//! cannot express directly, so it is built on `parking_lot`'s raw mutex
//! primitive and locked/unlocked manually via `lock_api::RawMutex`.

use lock_api::RawMutex as _;
use parking_lot::RawMutex;

use crate::error::{CollectorError, Result};

/// The collection gate: an exclusive lock, balanced by the caller across
/// `block` / `unlock` pairs.
pub struct CollectionGate {
    raw: RawMutex,
}

impl CollectionGate {
    pub fn new() -> Self {
        Self {
            raw: RawMutex::INIT,
        }
    }

    /// Block collection: acquire the gate. Blocks the calling thread until
    /// no collection (synchronous or the start/reset phase of an
    /// incremental cycle) holds it.
    pub fn block(&self) {
        self.raw.lock();
        log::debug!(target: "tricolor_gc::gate", "collection gate blocked");
    }

    /// Release a previously acquired gate.
    ///
    /// Calling this without a matching `block()` is a pairing error: the
    /// raw mutex would be unlocked while not held, which is undefined
    /// behavior for `parking_lot::RawMutex`, so this is checked explicitly.
    pub fn unlock(&self) -> Result<()> {
        if !self.is_locked() {
            return Err(CollectorError::GateImbalance);
        }
        // SAFETY: `is_locked()` just confirmed this thread (or another)
        // holds the lock; `RawMutex::unlock` requires the caller to hold
        // the lock, which callers are responsible for pairing with `block`.
        unsafe {
            self.raw.unlock();
        }
        log::debug!(target: "tricolor_gc::gate", "collection gate unlocked");
        Ok(())
    }

    /// Try to acquire the gate without blocking. `collect()` and the
    /// mark-start path wait on `block()` instead, since per spec they must
    /// defer rather than fail while the gate is held; this is a probe for
    /// callers that want to know without waiting.
    pub fn try_block(&self) -> bool {
        self.raw.try_lock()
    }

    pub fn is_locked(&self) -> bool {
        self.raw.is_locked()
    }
}

impl Default for CollectionGate {
    fn default() -> Self {
        Self::new()
    }
}
