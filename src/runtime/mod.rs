//! C runtime services
//!
//! This module provides what compiled code links against:
//! - [`engine`]: the [`Runtime`] state (heap, standard streams, FILE stores)
//! - [`builtins`]: libc entry points as typed methods
//! - [`symbols`]: the same entry points by C name, flat calling convention
//! - [`varargs`]: recovery of pointer pairs in variadic argument lists
//! - [`startup`]: initializer registry, argv packing and the run sequence
//! - [`errors`]: runtime error types
//!
//! # Execution Model
//!
//! Everything is single-threaded and synchronous. A call runs to completion
//! before returning; the only failure a libc call can raise is a format usage
//! error, which aborts that call.

pub mod builtins;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod startup;
pub mod symbols;
pub mod varargs;

pub use engine::{Runtime, RuntimeConfig, StreamId};
pub use errors::RuntimeError;
pub use startup::{EntryArgs, InitializerRegistry, Program};
