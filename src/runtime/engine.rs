//! Runtime state
//!
//! [`Runtime`] owns everything compiled code shares at run time: the emulated
//! heap, the stdout and stderr line buffers, and the stores standing in for the
//! `stdin`/`stdout`/`stderr` FILE objects. The libc entry points are methods on
//! it (see `builtins`), and the [`SymbolTable`] exposes the same entry points
//! under their C names for the flat calling convention.

use super::constants::DEFAULT_STACK_CELLS;
use super::errors::RuntimeError;
use super::symbols::SymbolTable;
use crate::memory::{Heap, Pointer, Store, Value};
use crate::stdio::{OutputBuffer, OutputSink, StderrSink, StdoutSink};
use tracing::debug;

/// Runtime settings
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Cells in the reserved stack store passed to the entry point
    pub stack_cells: usize,
    /// Emit a held partial output line when the program finishes
    pub flush_partial_line_on_exit: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        RuntimeConfig {
            stack_cells: DEFAULT_STACK_CELLS,
            flush_partial_line_on_exit: true,
        }
    }
}

/// Identity of a FILE pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamId {
    Stdin,
    Stdout,
    Stderr,
}

pub struct Runtime {
    config: RuntimeConfig,
    pub(crate) heap: Heap,
    pub(crate) stdout: OutputBuffer,
    pub(crate) stderr: OutputBuffer,
    stdin_file: Store,
    stdout_file: Store,
    stderr_file: Store,
    symbols: SymbolTable,
}

impl Runtime {
    /// Create a runtime writing to the process stdout and stderr
    pub fn new(config: RuntimeConfig) -> Self {
        Self::with_sinks(config, Box::new(StdoutSink), Box::new(StderrSink))
    }

    /// Create a runtime with custom output sinks
    pub fn with_sinks(
        config: RuntimeConfig,
        stdout: Box<dyn OutputSink>,
        stderr: Box<dyn OutputSink>,
    ) -> Self {
        Runtime {
            config,
            heap: Heap::new(),
            stdout: OutputBuffer::new("stdout", stdout),
            stderr: OutputBuffer::new("stderr", stderr),
            stdin_file: Store::filled(1, Value::Int(0)),
            stdout_file: Store::filled(1, Value::Int(0)),
            stderr_file: Store::filled(1, Value::Int(0)),
            symbols: SymbolTable::standard(),
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    /// The stdout line buffer
    pub fn stdout(&self) -> &OutputBuffer {
        &self.stdout
    }

    /// The stderr line buffer
    pub fn stderr(&self) -> &OutputBuffer {
        &self.stderr
    }

    /// FILE pointer for `stdin`
    pub fn stdin_file(&self) -> Pointer {
        Pointer::to_start(self.stdin_file.clone())
    }

    /// FILE pointer for `stdout`
    pub fn stdout_file(&self) -> Pointer {
        Pointer::to_start(self.stdout_file.clone())
    }

    /// FILE pointer for `stderr`
    pub fn stderr_file(&self) -> Pointer {
        Pointer::to_start(self.stderr_file.clone())
    }

    /// Which standard stream a FILE pointer refers to, if any
    pub fn stream_of(&self, file: &Pointer) -> Option<StreamId> {
        if file.store.ptr_eq(&self.stdout_file) {
            Some(StreamId::Stdout)
        } else if file.store.ptr_eq(&self.stderr_file) {
            Some(StreamId::Stderr)
        } else if file.store.ptr_eq(&self.stdin_file) {
            Some(StreamId::Stdin)
        } else {
            None
        }
    }

    /// Call a runtime symbol with flat arguments
    ///
    /// Pointers are passed as two consecutive values (offset, store). The
    /// result holds one value, or two for a returned pointer.
    pub fn call(&mut self, name: &str, args: &[Value]) -> Result<Vec<Value>, RuntimeError> {
        let builtin = self
            .symbols
            .lookup(name)
            .ok_or_else(|| RuntimeError::UnknownSymbol {
                name: name.to_string(),
            })?;
        debug!(symbol = name, args = args.len(), "call");
        builtin(self, args)
    }

    /// Check whether a symbol is provided
    pub fn provides(&self, name: &str) -> bool {
        self.symbols.lookup(name).is_some()
    }

    /// Flush both streams at program end
    pub fn shutdown(&mut self) {
        if self.config.flush_partial_line_on_exit {
            self.stdout.finish();
            self.stderr.finish();
        } else {
            self.stdout.flush();
            self.stderr.flush();
        }
        debug!(
            allocations = self.heap.allocation_count(),
            stdout_lines = self.stdout.lines_emitted(),
            "runtime shut down"
        );
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new(RuntimeConfig::default())
    }
}
