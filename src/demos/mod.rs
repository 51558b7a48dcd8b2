//! Hand-lowered demo programs
//!
//! Each demo is what the compiler would emit for a small C program: it talks
//! to the runtime only through the flat calling convention, passing pointers
//! as (offset, store) pairs.
//!
//! - [`echo`]: walks `argv`, uses positional formatting and `putchar`
//! - [`partialsums`]: the CLBG partial-sums benchmark

pub mod echo;
pub mod partialsums;

use crate::memory::strings::from_host_string;
use crate::memory::{Pointer, Value};
use crate::runtime::{Program, Runtime, RuntimeError};

/// Names accepted by [`lookup`]
pub const NAMES: &[&str] = &["echo", "partialsums"];

/// Find a demo by name
pub fn lookup(name: &str) -> Result<Box<dyn Program>, RuntimeError> {
    match name {
        "echo" => Ok(Box::new(echo::Echo::default())),
        "partialsums" => Ok(Box::new(partialsums::PartialSums::default())),
        _ => Err(RuntimeError::UnknownProgram {
            name: name.to_string(),
        }),
    }
}

/// `printf(format, ...)` as compiled code issues it
pub(crate) fn printf(rt: &mut Runtime, format: &Pointer, args: &[Value]) -> Result<i64, RuntimeError> {
    let mut flat = format.to_pair().to_vec();
    flat.extend_from_slice(args);
    let result = rt.call("printf", &flat)?;
    Ok(result.first().map(Value::as_int).unwrap_or(0))
}

/// A string literal's store
pub(crate) fn literal(text: &str) -> Pointer {
    from_host_string(text)
}
