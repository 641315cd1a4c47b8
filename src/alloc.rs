//! Allocator Module - Raw Buffer Provider
//!
//! The underlying allocator backing raw memory is an external collaborator,
//! not part of the collector's core (see module docs). It is treated as a
//! byte-buffer provider with sized alloc/free; this module supplies the
//! default system-allocator-backed implementation used by `Collector::new`.

use std::alloc::{self, Layout};

use crate::Address;

/// A provider of raw, sized buffers. The collector never inspects the
/// contents of a buffer; it only tracks the address and size it was handed.
pub trait RawAllocator: Send + Sync {
    /// Acquire a `size`-byte buffer. Returns `None` on allocation failure.
    fn alloc(&self, size: usize) -> Option<Address>;

    /// Release a buffer previously returned by `alloc` with the same size.
    ///
    /// # Safety
    /// `address` must have been returned by a prior `alloc(size)` call on
    /// this allocator and not already freed.
    unsafe fn dealloc(&self, address: Address, size: usize);
}

/// Default allocator, backed by the process's global allocator.
#[derive(Debug, Default)]
pub struct SystemAllocator;

impl SystemAllocator {
    fn layout_for(size: usize) -> Layout {
        // A zero-sized allocation request still needs a stable, distinct
        // address, so round up to a one-byte layout.
        Layout::from_size_align(size.max(1), std::mem::align_of::<usize>())
            .expect("layout size overflow")
    }
}

impl RawAllocator for SystemAllocator {
    fn alloc(&self, size: usize) -> Option<Address> {
        let layout = Self::layout_for(size);
        // SAFETY: layout has non-zero size by construction.
        let ptr = unsafe { alloc::alloc(layout) };
        if ptr.is_null() {
            None
        } else {
            Some(ptr as Address)
        }
    }

    unsafe fn dealloc(&self, address: Address, size: usize) {
        let layout = Self::layout_for(size);
        alloc::dealloc(address as *mut u8, layout);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_dealloc_roundtrip() {
        let allocator = SystemAllocator;
        let addr = allocator.alloc(64).expect("allocation should succeed");
        assert_ne!(addr, 0);
        unsafe {
            allocator.dealloc(addr, 64);
        }
    }

    #[test]
    fn test_distinct_addresses() {
        let allocator = SystemAllocator;
        let a = allocator.alloc(32).unwrap();
        let b = allocator.alloc(32).unwrap();
        assert_ne!(a, b);
        unsafe {
            allocator.dealloc(a, 32);
            allocator.dealloc(b, 32);
        }
    }
}
