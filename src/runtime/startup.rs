//! Program startup
//!
//! Compiled C programs run in three phases:
//! 1. registration: the program adds its global constructors to an
//!    [`InitializerRegistry`]
//! 2. initialization: the registry is drained once, first registered first
//! 3. entry: `main` is called with the packed command line
//!
//! After `main` returns the runtime streams are finished and the exit code is
//! handed back to the host.

use super::engine::Runtime;
use super::errors::RuntimeError;
use crate::memory::strings::{from_host_string, to_host_string};
use crate::memory::{load_pointer, Pointer, Store, Value};
use std::collections::VecDeque;
use tracing::debug;

/// Zero-argument global constructor
pub type Initializer = Box<dyn FnOnce()>;

/// Write-once, drain-once queue of global constructors
#[derive(Default)]
pub struct InitializerRegistry {
    pending: VecDeque<Initializer>,
    drained: bool,
}

impl InitializerRegistry {
    pub fn new() -> Self {
        InitializerRegistry::default()
    }

    /// Append an initializer; rejected once the registry has been drained
    pub fn register(&mut self, initializer: impl FnOnce() + 'static) -> Result<(), RuntimeError> {
        if self.drained {
            return Err(RuntimeError::InitializersAlreadyRun);
        }
        self.pending.push_back(Box::new(initializer));
        Ok(())
    }

    /// Remove and invoke initializers in registration order until none remain
    ///
    /// Returns how many ran. May only be called once.
    pub fn run_all(&mut self) -> Result<usize, RuntimeError> {
        if self.drained {
            return Err(RuntimeError::InitializersAlreadyRun);
        }
        self.drained = true;

        let mut ran = 0;
        while let Some(initializer) = self.pending.pop_front() {
            initializer();
            ran += 1;
        }
        debug!(count = ran, "ran initializers");
        Ok(ran)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn is_drained(&self) -> bool {
        self.drained
    }
}

/// Arguments handed to a program's entry point
#[derive(Debug, Clone)]
pub struct EntryArgs {
    /// Reserved stack pointer
    pub stack: Pointer,
    pub argc: usize,
    /// Alternating (offset, store) cells, one pair per argument, ending with
    /// a NULL pair
    pub argv: Pointer,
}

impl EntryArgs {
    /// Pack a command line the way compiled `main` expects it
    pub fn pack(args: &[String], stack_cells: usize) -> Self {
        let argv = Pointer::to_start(Store::new());
        for (i, arg) in args.iter().enumerate() {
            let [offset, store] = from_host_string(arg).to_pair();
            argv.write(i * 2, offset);
            argv.write(i * 2 + 1, store);
        }
        argv.write(args.len() * 2, Value::Int(0));
        argv.write(args.len() * 2 + 1, Value::Null);

        EntryArgs {
            stack: Pointer::to_start(Store::filled(stack_cells, Value::Int(0))),
            argc: args.len(),
            argv,
        }
    }

    /// Pointer to `argv[index]`
    pub fn arg_pointer(&self, index: usize) -> Option<Pointer> {
        load_pointer(&self.argv, index * 2)
    }

    /// `argv[index]` as a host string
    pub fn arg(&self, index: usize) -> Option<String> {
        self.arg_pointer(index).map(|p| to_host_string(&p))
    }
}

/// A compiled program
pub trait Program {
    /// Add the program's global constructors
    fn register_initializers(&mut self, _registry: &mut InitializerRegistry) -> Result<(), RuntimeError> {
        Ok(())
    }

    /// The program's `main`
    fn main(&mut self, rt: &mut Runtime, entry: EntryArgs) -> Result<i64, RuntimeError>;
}

/// Run a program to completion and return its exit code
///
/// `args` is the full command line, program name first.
pub fn run(rt: &mut Runtime, program: &mut dyn Program, args: &[String]) -> Result<i64, RuntimeError> {
    let mut registry = InitializerRegistry::new();
    program.register_initializers(&mut registry)?;

    let entry = EntryArgs::pack(args, rt.config().stack_cells);
    registry.run_all()?;

    debug!(argc = entry.argc, "entering main");
    let result = program.main(rt, entry);
    rt.shutdown();
    let code = result?;
    debug!(code, "main returned");
    Ok(code)
}
