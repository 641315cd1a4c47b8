//! Frontier Module - Gray Frontier
//!
//! The work queue of objects discovered but not yet scanned. Both the mark
//! engine's step loop and the write barrier push onto it, so it is guarded
//! by its own mutual-exclusion lock, last in the lock order
//! (`cycle -> roots -> registry -> frontier`).

use std::collections::VecDeque;

use parking_lot::Mutex;

use crate::Address;

/// The gray frontier: a FIFO work queue.
pub struct GrayFrontier {
    queue: Mutex<VecDeque<Address>>,
}

impl GrayFrontier {
    pub fn new() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
        }
    }

    pub fn push(&self, address: Address) {
        self.queue.lock().push_back(address);
    }

    pub fn pop(&self) -> Option<Address> {
        self.queue.lock().pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }

    /// Discard everything, e.g. when abandoning a cycle.
    pub fn clear(&self) {
        self.queue.lock().clear();
    }
}

impl Default for GrayFrontier {
    fn default() -> Self {
        Self::new()
    }
}
