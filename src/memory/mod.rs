//! Memory model for compiled C programs
//!
//! This module provides the core memory abstractions:
//! - [`value`]: Runtime value representation (Int, Float, Str, Store, Null)
//! - [`store`]: Shared cell stores and `(offset, store)` pointers
//! - [`heap`]: Emulated malloc/calloc/realloc/free
//! - [`strings`]: C-string marshaling, strcpy/memset/memcpy
//!
//! # Cells, not bytes
//!
//! Unlike real C, memory is addressed in cells. Every scalar occupies one cell
//! whatever its C type, and a pointer stored in memory occupies two: its
//! offset, then its store. Pointer arithmetic is therefore unscaled:
//! ```text
//! ptr + n  →  (ptr.offset + n, ptr.store)
//! ```

pub mod heap;
pub mod store;
pub mod strings;
pub mod value;

pub use heap::Heap;
pub use store::{Pointer, Store};
pub use value::Value;

/// Read a pointer stored in two consecutive cells at `at[index]`
pub fn load_pointer(at: &Pointer, index: usize) -> Option<Pointer> {
    Pointer::from_pair(&at.read(index), &at.read(index + 1))
}

/// Store a pointer into two consecutive cells at `at[index]`
pub fn store_pointer(at: &Pointer, index: usize, pointer: Option<&Pointer>) {
    let [offset, store] = Pointer::pair_of(pointer);
    at.write(index, offset);
    at.write(index + 1, store);
}
