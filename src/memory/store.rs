//! Stores and pointers
//!
//! A [`Store`] stands in for one contiguous memory region: a growable sequence
//! of [`Value`] cells shared by reference between every pointer derived from
//! it. A [`Pointer`] is an `(offset, store)` pair.
//!
//! # Aliasing
//!
//! Cloning a store clones the handle, not the cells. A write through any
//! pointer into a store is visible through every other pointer into the same
//! store. Equality is identity: two stores are equal only if they are the same
//! region.
//!
//! # Bounds
//!
//! There are none. Reads past the written end return [`Value::Undefined`];
//! writes past the end extend the store, filling the gap with `Undefined`.

use super::value::Value;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Shared, growable cell sequence
#[derive(Clone, Default)]
pub struct Store {
    cells: Rc<RefCell<Vec<Value>>>,
}

impl Store {
    /// Create an empty store
    pub fn new() -> Self {
        Store::default()
    }

    /// Create a store of `len` cells, each set to `fill`
    pub fn filled(len: usize, fill: Value) -> Self {
        Store {
            cells: Rc::new(RefCell::new(vec![fill; len])),
        }
    }

    /// Create a store holding the given cells
    pub fn from_cells(cells: Vec<Value>) -> Self {
        Store {
            cells: Rc::new(RefCell::new(cells)),
        }
    }

    /// Number of cells written so far (including gap cells)
    pub fn len(&self) -> usize {
        self.cells.borrow().len()
    }

    /// Check if no cell has been written
    pub fn is_empty(&self) -> bool {
        self.cells.borrow().is_empty()
    }

    /// Read a cell; unwritten cells read as `Undefined`
    pub fn read(&self, index: usize) -> Value {
        self.cells
            .borrow()
            .get(index)
            .cloned()
            .unwrap_or_default()
    }

    /// Write a cell, extending the store if needed
    pub fn write(&self, index: usize, value: Value) {
        let mut cells = self.cells.borrow_mut();
        if index >= cells.len() {
            cells.resize(index + 1, Value::Undefined);
        }
        cells[index] = value;
    }

    /// Copy of the current cell contents
    pub fn to_vec(&self) -> Vec<Value> {
        self.cells.borrow().clone()
    }

    /// Check whether two handles refer to the same region
    pub fn ptr_eq(&self, other: &Store) -> bool {
        Rc::ptr_eq(&self.cells, &other.cells)
    }
}

impl PartialEq for Store {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

// Stores may contain references to themselves, so Debug never walks the cells.
impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Store({:p}, len={})", Rc::as_ptr(&self.cells), self.len())
    }
}

/// An emulated C pointer
#[derive(Debug, Clone, PartialEq)]
pub struct Pointer {
    pub offset: usize,
    pub store: Store,
}

impl Pointer {
    pub fn new(store: Store, offset: usize) -> Self {
        Pointer { offset, store }
    }

    /// Pointer to the first cell of `store`
    pub fn to_start(store: Store) -> Self {
        Pointer::new(store, 0)
    }

    /// Rebuild a pointer from its two-register form
    ///
    /// Returns `None` when the second half is not a store (C `NULL`). A
    /// negative offset is clamped to 0.
    pub fn from_pair(offset: &Value, store: &Value) -> Option<Pointer> {
        let store = store.as_store()?.clone();
        let offset = offset.as_int().max(0) as usize;
        Some(Pointer::new(store, offset))
    }

    /// Two-register form of this pointer
    pub fn to_pair(&self) -> [Value; 2] {
        [
            Value::Int(self.offset as i64),
            Value::Store(self.store.clone()),
        ]
    }

    /// Two-register form of a possibly-null pointer
    pub fn pair_of(pointer: Option<&Pointer>) -> [Value; 2] {
        match pointer {
            Some(p) => p.to_pair(),
            None => [Value::Int(0), Value::Null],
        }
    }

    /// Read cell `offset + index`
    pub fn read(&self, index: usize) -> Value {
        self.store.read(self.offset + index)
    }

    /// Write cell `offset + index`
    pub fn write(&self, index: usize, value: Value) {
        self.store.write(self.offset + index, value);
    }

    /// Pointer `n` cells further into the same store
    pub fn add(&self, n: usize) -> Pointer {
        Pointer::new(self.store.clone(), self.offset + n)
    }

    /// Pointer moved by `delta` cells; `None` if that would be negative
    pub fn offset_by(&self, delta: isize) -> Option<Pointer> {
        let offset = self.offset.checked_add_signed(delta)?;
        Some(Pointer::new(self.store.clone(), offset))
    }

    /// Difference in cells between two pointers into the same store
    pub fn diff(&self, other: &Pointer) -> Option<isize> {
        if self.store.ptr_eq(&other.store) {
            Some(self.offset as isize - other.offset as isize)
        } else {
            None
        }
    }
}
