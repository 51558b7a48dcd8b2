//! Runtime value representation
//!
//! This module defines the [`Value`] enum, the unit of data that compiled code
//! passes around: every call argument, every return register and every cell of
//! a [`Store`] is a `Value`.
//!
//! # Value Types
//!
//! - [`Value::Int`]: integer register or cell
//! - [`Value::Float`]: floating-point register or cell
//! - [`Value::Str`]: host string (the resolved form of a `char*` argument)
//! - [`Value::Store`]: reference to a shared store (second half of a pointer)
//! - [`Value::Null`]: null store reference (second half of `NULL`)
//! - [`Value::Undefined`]: a cell that was never written, or a missing argument
//!
//! # Coercion
//!
//! Numeric conversions follow the loose rules compiled code relies on: strings
//! parse, null is zero, and anything without a numeric meaning is NaN.

use super::store::Store;
use std::fmt;

/// Runtime values seen by compiled code
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
    Store(Store),
    Null,
    #[default]
    Undefined,
}

impl Value {
    /// Check if this value was ever written
    pub fn is_defined(&self) -> bool {
        !matches!(self, Value::Undefined)
    }

    /// Check if this value is a null store reference
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get the store, returns None if not a Store
    pub fn as_store(&self) -> Option<&Store> {
        match self {
            Value::Store(store) => Some(store),
            _ => None,
        }
    }

    /// Check whether this value can be the second half of a pointer pair
    ///
    /// Null, unwritten and store values never appear as ordinary scalars in the
    /// compiled calling convention.
    pub fn is_pointer_tail(&self) -> bool {
        matches!(self, Value::Null | Value::Undefined | Value::Store(_))
    }

    /// Numeric value of this cell
    pub fn as_f64(&self) -> f64 {
        match self {
            Value::Int(n) => *n as f64,
            Value::Float(x) => *x,
            Value::Str(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse().unwrap_or(f64::NAN)
                }
            }
            Value::Null => 0.0,
            Value::Store(_) | Value::Undefined => f64::NAN,
        }
    }

    /// Integer value of this cell, truncating toward zero
    ///
    /// Non-finite values become 0.
    pub fn as_int(&self) -> i64 {
        match self {
            Value::Int(n) => *n,
            other => {
                let x = other.as_f64();
                if x.is_finite() {
                    x.trunc() as i64
                } else {
                    0
                }
            }
        }
    }

    /// Value wrapped to an unsigned 32-bit integer
    pub fn as_u32(&self) -> u32 {
        match self {
            Value::Int(n) => *n as u32,
            other => {
                let x = other.as_f64();
                if !x.is_finite() {
                    return 0;
                }
                let wrapped = x.trunc().rem_euclid(4_294_967_296.0);
                wrapped as u32
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(s) => f.write_str(s),
            Value::Store(store) => write!(f, "(store:{})", store.len()),
            Value::Null => f.write_str("(null)"),
            Value::Undefined => Ok(()),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Store> for Value {
    fn from(store: Store) -> Self {
        Value::Store(store)
    }
}
