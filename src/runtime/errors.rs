//! Runtime error types
//!
//! This module defines [`RuntimeError`], which represents every failure the
//! runtime reports to compiled code or to the host. Allocation and cell access
//! cannot fail, so there are few of them.
//!
//! All runtime errors abort the current call; nothing is retried.

use crate::format::FormatError;
use std::fmt;

/// Runtime errors surfaced to the caller
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// A `printf`-family template was misused
    Format(FormatError),

    /// The initializer registry was used after it had been drained
    InitializersAlreadyRun,

    /// Call to a symbol the runtime does not provide
    UnknownSymbol { name: String },

    /// A builtin received fewer arguments than it reads
    ArgumentCountMismatch {
        function: String,
        expected: usize,
        got: usize,
    },

    /// A builtin that dereferences a pointer argument received NULL
    NullPointer { function: String },

    /// The host asked for a program that is not available
    UnknownProgram { name: String },
}

impl From<FormatError> for RuntimeError {
    fn from(err: FormatError) -> Self {
        RuntimeError::Format(err)
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::Format(err) => write!(f, "Format error: {}", err),
            RuntimeError::InitializersAlreadyRun => {
                write!(f, "Initializers have already been run")
            }
            RuntimeError::UnknownSymbol { name } => {
                write!(f, "Unknown runtime symbol '{}'", name)
            }
            RuntimeError::ArgumentCountMismatch {
                function,
                expected,
                got,
            } => {
                write!(
                    f,
                    "Function '{}' expects {} argument{}, got {}",
                    function,
                    expected,
                    if *expected == 1 { "" } else { "s" },
                    got
                )
            }
            RuntimeError::NullPointer { function } => {
                write!(f, "Null pointer passed to '{}'", function)
            }
            RuntimeError::UnknownProgram { name } => {
                write!(f, "Unknown program '{}'", name)
            }
        }
    }
}

impl std::error::Error for RuntimeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RuntimeError::Format(err) => Some(err),
            _ => None,
        }
    }
}
