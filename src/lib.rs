//! # Introduction
//!
//! clue-rt is the C runtime that compiled C programs link against when their
//! target has no raw memory. Memory is a set of shared cell stores, a C pointer
//! is an `(offset, store)` pair, and libc (`printf`, `malloc`, `strcpy`, ...)
//! is reimplemented over that model.
//!
//! ## Execution pipeline
//!
//! ```text
//! Compiled code → libc call → Format engine → stdout buffer → host sink
//!                      ↘ heap / strings ↗
//! ```
//!
//! 1. [`memory`]: values, stores, pointers, the emulated heap and C-string
//!    marshaling.
//! 2. [`format`]: the `printf` template parser and renderer.
//! 3. [`stdio`]: line-buffered output streams and their sinks.
//! 4. [`runtime`]: the [`runtime::Runtime`] façade: libc entry points,
//!    variadic pointer recovery, the symbol table and program startup.
//! 5. [`demos`]: hand-lowered programs used by the `clue-rt` binary.
//!
//! ## Calling convention
//!
//! Compiled code passes a pointer as two consecutive values, the offset then
//! the store, and any other argument as one value. Variadic callees recover the
//! pairs from the shape of the argument list; see [`runtime::varargs`].

pub mod demos;
pub mod format;
pub mod memory;
pub mod runtime;
pub mod stdio;
