//! Object Module - Managed Object Metadata
//!
//! Defines the per-object state tracked by the registry: marking color,
//! declared out-edges, and the finalizer invoked at sweep.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::Address;

/// Tri-color marking state of a managed object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Not yet visited by the current mark.
    White,
    /// Discovered but not yet scanned; lives in the gray frontier.
    Gray,
    /// Fully scanned; all of its out-edges have been processed.
    Black,
}

/// A per-object finalizer, invoked exactly once with `(address, size)`
/// immediately before the underlying buffer is released.
pub type Finalizer = Arc<dyn Fn(Address, usize) + Send + Sync>;

/// The default finalizer: a no-op.
pub fn noop_finalizer() -> Finalizer {
    Arc::new(|_address, _size| {})
}

/// Mutable marking state for one object, guarded by its own lock so the
/// registry's outer map only needs a shared read lock for ordinary lookups.
pub struct ObjectState {
    pub color: Color,
    pub edges: HashSet<Address>,
}

impl ObjectState {
    fn new() -> Self {
        Self {
            color: Color::White,
            edges: HashSet::new(),
        }
    }
}

/// A registered object's full entry: immutable identity fields plus the
/// mutex-guarded marking state.
pub struct ObjectEntry {
    pub size: usize,
    pub finalizer: Finalizer,
    state: Mutex<ObjectState>,
}

impl ObjectEntry {
    pub fn new(size: usize, finalizer: Finalizer) -> Self {
        Self {
            size,
            finalizer,
            state: Mutex::new(ObjectState::new()),
        }
    }

    pub fn color(&self) -> Color {
        self.state.lock().color
    }

    pub fn set_color(&self, color: Color) {
        self.state.lock().color = color;
    }

    /// Snapshot the current out-edges.
    pub fn edges_snapshot(&self) -> Vec<Address> {
        self.state.lock().edges.iter().copied().collect()
    }

    pub fn add_edge(&self, child: Address) -> bool {
        self.state.lock().edges.insert(child)
    }

    pub fn del_edge(&self, child: Address) -> bool {
        self.state.lock().edges.remove(&child)
    }

    pub fn lock(&self) -> parking_lot::MutexGuard<'_, ObjectState> {
        self.state.lock()
    }
}
