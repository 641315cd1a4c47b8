//! Roots Module - Root Set
//!
//! The set of addresses currently declared live by the client. Membership
//! is boolean, not reference-counted; the set is the mark engine's starting
//! frontier.

use std::collections::HashSet;

use parking_lot::RwLock;

use crate::Address;

/// The root set.
pub struct RootSet {
    roots: RwLock<HashSet<Address>>,
}

impl RootSet {
    pub fn new() -> Self {
        Self {
            roots: RwLock::new(HashSet::new()),
        }
    }

    /// Idempotent insert.
    pub fn add(&self, address: Address) {
        self.roots.write().insert(address);
    }

    /// Idempotent removal; tolerated if `address` is absent.
    pub fn delete(&self, address: Address) {
        self.roots.write().remove(&address);
    }

    /// Snapshot every currently declared root, for mark-start frontier
    /// seeding under a shared lock.
    pub fn snapshot(&self) -> Vec<Address> {
        self.roots.read().iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.roots.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.read().is_empty()
    }
}

impl Default for RootSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_is_idempotent() {
        let roots = RootSet::new();
        roots.add(0x1000);
        roots.add(0x1000);
        assert_eq!(roots.len(), 1);
    }

    #[test]
    fn test_delete_absent_is_noop() {
        let roots = RootSet::new();
        roots.delete(0xdead);
        assert_eq!(roots.len(), 0);
    }

    #[test]
    fn test_snapshot_reflects_membership() {
        let roots = RootSet::new();
        roots.add(1);
        roots.add(2);
        let mut snap = roots.snapshot();
        snap.sort_unstable();
        assert_eq!(snap, vec![1, 2]);
    }
}
