//! Variadic argument disambiguation
//!
//! Compiled code passes a C pointer as two consecutive values, an offset
//! followed by a store, and everything else as one value. Variadic callees get
//! no type information, so the pairs are recovered from the shape of the list:
//! a value followed by `Null`, `Undefined` or a `Store` starts a pair.
//!
//! # Caller contract
//!
//! This is only sound because the compiled calling convention never passes a
//! store as an ordinary scalar. A hand-written caller that puts a scalar in
//! front of a store gets that scalar read as an offset. Nothing detects this.
//! Callers able to say which arguments are pointers should build [`VarArg`]s
//! themselves instead.

use super::constants::NULL_STRING;
use crate::memory::strings::to_host_string;
use crate::memory::{Pointer, Value};

/// A variadic argument with its kind made explicit
#[derive(Debug, Clone, PartialEq)]
pub enum VarArg {
    Scalar(Value),
    /// A pointer argument; `None` is C `NULL`
    Pointer(Option<Pointer>),
}

impl VarArg {
    /// The value a format directive sees for this argument
    ///
    /// Pointers are read as C-strings.
    pub fn into_format_value(self) -> Value {
        match self {
            VarArg::Scalar(value) => value,
            VarArg::Pointer(Some(pointer)) => Value::Str(to_host_string(&pointer)),
            VarArg::Pointer(None) => Value::Str(NULL_STRING.to_string()),
        }
    }
}

/// Split a flat variadic list into scalars and pointer pairs
///
/// The end of the list never counts as a pointer tail, so a trailing scalar
/// stays a scalar.
pub fn classify(args: &[Value]) -> Vec<VarArg> {
    let mut classified = Vec::with_capacity(args.len());
    let mut i = 0;
    while i < args.len() {
        let current = &args[i];
        match args.get(i + 1) {
            Some(next) if next.is_pointer_tail() => {
                classified.push(VarArg::Pointer(Pointer::from_pair(current, next)));
                i += 2;
            }
            _ => {
                classified.push(VarArg::Scalar(current.clone()));
                i += 1;
            }
        }
    }
    classified
}

/// Classify and resolve pointers to strings in one step
pub fn resolve(args: &[Value]) -> Vec<Value> {
    classify(args)
        .into_iter()
        .map(VarArg::into_format_value)
        .collect()
}
