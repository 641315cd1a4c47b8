//! Collector Module - The Process-Wide Collector
//!
//! Ties the registry, root set, gray frontier, mark engine, sweep engine,
//! write barrier, background driver and collection gate into one service.
//! Lock order across a single operation, where more than one is held:
//! cycle -> roots -> registry -> frontier. The registry and roots each
//! guard themselves internally; `cycle_lock` here is the coarse lock that
//! prevents two cycles from overlapping.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::Mutex;

use crate::alloc::{RawAllocator, SystemAllocator};
use crate::background::BackgroundDriver;
use crate::config::CollectorConfig;
use crate::edges;
use crate::error::Result;
use crate::frontier::GrayFrontier;
use crate::gate::CollectionGate;
use crate::mark::{mark_stop_the_world, IncrementalMark};
use crate::object::{noop_finalizer, Finalizer};
use crate::registry::Registry;
use crate::roots::RootSet;
use crate::stats::{health_snapshot, CycleCounter};
use crate::sweep::sweep;
use crate::Address;

/// The collector service. A process-wide singleton is constructed once by
/// `src/lib.rs`; this type is otherwise a plain value with no hidden global
/// state of its own, so it can also be constructed directly in tests.
pub struct Collector {
    config: CollectorConfig,
    registry: Registry,
    roots: RootSet,
    frontier: GrayFrontier,
    mark: IncrementalMark,
    gate: CollectionGate,
    background: BackgroundDriver,
    cycle_lock: Mutex<()>,
    cycles: CycleCounter,
}

impl Collector {
    /// Construct a collector backed by the system allocator and default
    /// configuration.
    pub fn new() -> Self {
        Self::with_config(CollectorConfig::default())
    }

    /// Construct a collector with an explicit configuration. Crate-internal
    /// / test constructor: the public surface never exposes configuration
    /// knobs directly.
    pub fn with_config(config: CollectorConfig) -> Self {
        config.validate().expect("invalid default configuration");
        Self::with_allocator(config, Box::new(SystemAllocator))
    }

    pub fn with_allocator(config: CollectorConfig, allocator: Box<dyn RawAllocator>) -> Self {
        Self {
            config,
            registry: Registry::new(allocator),
            roots: RootSet::new(),
            frontier: GrayFrontier::new(),
            mark: IncrementalMark::new(),
            gate: CollectionGate::new(),
            background: BackgroundDriver::new(),
            cycle_lock: Mutex::new(()),
            cycles: CycleCounter::new(),
        }
    }

    // ---- 4.1 Object registry ------------------------------------------

    pub fn alloc(&self, size: usize) -> Result<Address> {
        self.registry.alloc(size, noop_finalizer())
    }

    pub fn alloc_manage(&self, size: usize, finalizer: Finalizer) -> Result<Address> {
        self.registry.alloc(size, finalizer)
    }

    pub fn alloc_root(&self, size: usize) -> Result<Address> {
        let address = self.alloc(size)?;
        self.roots.add(address);
        Ok(address)
    }

    pub fn alloc_root_manage(&self, size: usize, finalizer: Finalizer) -> Result<Address> {
        let address = self.alloc_manage(size, finalizer)?;
        self.roots.add(address);
        Ok(address)
    }

    pub fn alloc_with_parent(&self, size: usize, parent: Address) -> Result<Address> {
        self.alloc_with_parent_manage(size, parent, noop_finalizer())
    }

    pub fn alloc_with_parent_manage(
        &self,
        size: usize,
        parent: Address,
        finalizer: Finalizer,
    ) -> Result<Address> {
        // Check the parent is registered before acquiring the buffer, so an
        // invalid parent never leaks a successful allocation.
        self.registry.require(parent)?;
        let address = self.registry.alloc(size, finalizer)?;
        edges::add_edge(
            &self.registry,
            &self.frontier,
            self.mark.active_flag(),
            parent,
            address,
        )?;
        Ok(address)
    }

    pub fn count(&self) -> usize {
        self.registry.count()
    }

    // ---- 4.2 Root set ---------------------------------------------------

    pub fn add_root(&self, address: Address) {
        self.roots.add(address);
    }

    pub fn delete_root(&self, address: Address) {
        self.roots.delete(address);
    }

    // ---- 4.3 Edge operations --------------------------------------------

    pub fn add_edge(&self, parent: Address, child: Address) -> Result<()> {
        edges::add_edge(
            &self.registry,
            &self.frontier,
            self.mark.active_flag(),
            parent,
            child,
        )
    }

    pub fn del_edge(&self, parent: Address, child: Address) -> Result<()> {
        edges::del_edge(&self.registry, parent, child)
    }

    pub fn swap_edge(&self, parent: Address, old_child: Address, new_child: Address) -> Result<()> {
        edges::swap_edge(
            &self.registry,
            &self.frontier,
            self.mark.active_flag(),
            parent,
            old_child,
            new_child,
        )
    }

    // ---- 4.4 / 4.5 Mark + sweep ------------------------------------------

    /// Run a full synchronous cycle: stop-the-world mark followed by sweep.
    ///
    /// If an incremental cycle is already active, this finishes that cycle
    /// (draining its existing frontier) rather than resetting state with a
    /// second mark on top of it. Starting a fresh stop-the-world mark here
    /// would race the active cycle's frontier/active-flag state, which is
    /// exactly the two-cycles-overlapping case the cycle lock exists to
    /// prevent.
    pub fn collect(&self) {
        let _cycle = self.cycle_lock.lock();
        self.gate.block();
        if !self.mark.finish(&self.registry, &self.frontier) {
            mark_stop_the_world(&self.registry, &self.roots, &self.frontier);
        }
        sweep(&self.registry);
        self.cycles.record_cycle();
        let _ = self.gate.unlock();
    }

    /// Begin an incremental cycle. Waits on the collection gate first: per
    /// spec, new cycles are deferred while a client holds `block_collect()`,
    /// though any incremental steps already in progress are left to finish.
    pub fn start_incremental_mark(&self) {
        let _cycle = self.cycle_lock.lock();
        self.gate.block();
        self.mark.start(&self.registry, &self.roots, &self.frontier);
        let _ = self.gate.unlock();
    }

    /// Process up to the configured per-step budget of gray objects. If the
    /// frontier empties, transitions into sweep and clears the active flag.
    pub fn step_mark(&self) {
        self.step_mark_budget(self.config.mark_step_budget);
    }

    /// Same as `step_mark`, with an explicit budget. Used by the background
    /// driver, which has its own `steps_per_tick` distinct from the default
    /// public budget.
    pub fn step_mark_budget(&self, budget: usize) {
        let drained = self.mark.step(&self.registry, &self.frontier, budget);
        if drained {
            sweep(&self.registry);
            self.cycles.record_cycle();
        }
    }

    pub fn is_marking(&self) -> bool {
        self.mark.is_marking()
    }

    pub fn finish_incremental_mark(&self) {
        if self.mark.finish(&self.registry, &self.frontier) {
            sweep(&self.registry);
            self.cycles.record_cycle();
        }
    }

    // ---- 4.7 Background driver ------------------------------------------

    /// Start the background driver thread. Takes `Arc<Self>` because the
    /// driver thread must hold a strong reference to keep the collector
    /// alive for as long as it runs; callers wrap the collector in an `Arc`
    /// once and clone it for this call.
    pub fn start_background(self: Arc<Self>, steps_per_tick: usize, interval_ms: u64) -> Result<()> {
        let tick_collector = Arc::clone(&self);
        self.background.start(interval_ms, move || {
            if !tick_collector.is_marking() {
                tick_collector.start_incremental_mark();
            }
            tick_collector.step_mark_budget(steps_per_tick);
        })
    }

    pub fn stop_background(&self) -> Result<()> {
        self.background.stop()
    }

    pub fn is_background_running(&self) -> bool {
        self.background.is_running()
    }

    // ---- 4.8 Collection gate ---------------------------------------------

    pub fn block_collect(&self) {
        self.gate.block();
    }

    pub fn unlock_collect(&self) -> Result<()> {
        self.gate.unlock()
    }

    // ---- Diagnostics -------------------------------------------------------

    pub fn cycle_count(&self) -> u64 {
        self.cycles.count()
    }

    pub fn health(&self) -> IndexMap<String, String> {
        health_snapshot(
            self.count(),
            self.roots.len(),
            self.cycle_count(),
            self.is_marking(),
            self.is_background_running(),
            self.gate.is_locked(),
        )
    }
}

impl Default for Collector {
    fn default() -> Self {
        Self::new()
    }
}
