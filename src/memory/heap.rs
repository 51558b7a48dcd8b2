//! Emulated heap
//!
//! This module provides `malloc`/`calloc`/`realloc`/`free` over the store
//! model. Allocation cannot fail and nothing is ever reused:
//! - `malloc` hands out a fresh, empty store (cells read as `Undefined` until
//!   written)
//! - `calloc` is the only path that guarantees zeroed cells
//! - `realloc` returns its argument unchanged; stores grow on write anyway
//! - `free` does nothing; a store goes away once no pointer refers to it
//!
//! The heap only keeps counters so allocation behaviour shows up in traces.

use super::store::{Pointer, Store};
use super::value::Value;
use tracing::trace;

/// Allocation counters
#[derive(Debug, Clone, Default)]
pub struct Heap {
    allocations: usize,
    zeroed_cells: usize,
    frees: usize,
}

impl Heap {
    pub fn new() -> Self {
        Heap::default()
    }

    /// Allocate a fresh store; `size` is not used to pre-size it
    pub fn allocate(&mut self, size: i64) -> Pointer {
        self.allocations += 1;
        trace!(size, allocation = self.allocations, "malloc");
        Pointer::to_start(Store::new())
    }

    /// Allocate `count * element_size` cells, each explicitly zero
    pub fn allocate_zeroed(&mut self, count: i64, element_size: i64) -> Pointer {
        let cells = count.saturating_mul(element_size).max(0) as usize;
        self.allocations += 1;
        self.zeroed_cells += cells;
        trace!(count, element_size, cells, "calloc");
        Pointer::to_start(Store::filled(cells, Value::Int(0)))
    }

    /// Resize an allocation; the pointer comes back unchanged
    pub fn resize(&mut self, pointer: Option<Pointer>, size: i64) -> Option<Pointer> {
        trace!(size, "realloc");
        pointer
    }

    /// Release an allocation; no observable effect
    pub fn release(&mut self, pointer: Option<&Pointer>) {
        if pointer.is_some() {
            self.frees += 1;
        }
        trace!(null = pointer.is_none(), "free");
    }

    /// Number of allocations handed out
    pub fn allocation_count(&self) -> usize {
        self.allocations
    }

    /// Number of cells zero-filled by `calloc`
    pub fn zeroed_cells(&self) -> usize {
        self.zeroed_cells
    }

    /// Number of non-null `free` calls
    pub fn free_count(&self) -> usize {
        self.frees
    }
}
