//! Runtime symbol table
//!
//! Maps C symbol names to builtins taking the flat calling convention used by
//! compiled code: every pointer argument is two values (offset, store), every
//! other argument one value. The reserved stack pair compiled code passes
//! first is not part of `args`.
//!
//! A builtin returns its result registers: one value for scalars, two for a
//! returned pointer, none for `void`.

use super::builtins::math;
use super::engine::Runtime;
use super::errors::RuntimeError;
use crate::memory::{Pointer, Value};
use rustc_hash::FxHashMap;

pub type Builtin = fn(&mut Runtime, &[Value]) -> Result<Vec<Value>, RuntimeError>;

#[derive(Clone, Default)]
pub struct SymbolTable {
    entries: FxHashMap<&'static str, Builtin>,
}

impl SymbolTable {
    /// Table with every builtin the runtime provides
    pub fn standard() -> Self {
        let mut table = SymbolTable::default();
        table.insert("printf", call_printf);
        table.insert("sprintf", call_sprintf);
        table.insert("putc", call_putc);
        table.insert("putchar", call_putchar);
        table.insert("malloc", call_malloc);
        table.insert("calloc", call_calloc);
        table.insert("realloc", call_realloc);
        table.insert("free", call_free);
        table.insert("atoi", call_atoi);
        table.insert("atol", call_atol);
        table.insert("strcpy", call_strcpy);
        table.insert("memset", call_memset);
        table.insert("memcpy", call_memcpy);
        table.insert("gettimeofday", call_gettimeofday);
        table.insert("sin", |_, args| unary("sin", args, math::sin));
        table.insert("cos", |_, args| unary("cos", args, math::cos));
        table.insert("tan", |_, args| unary("tan", args, math::tan));
        table.insert("atan", |_, args| unary("atan", args, math::atan));
        table.insert("log", |_, args| unary("log", args, math::log));
        table.insert("exp", |_, args| unary("exp", args, math::exp));
        table.insert("sqrt", |_, args| unary("sqrt", args, math::sqrt));
        table.insert("pow", call_pow);
        table
    }

    pub fn insert(&mut self, name: &'static str, builtin: Builtin) {
        self.entries.insert(name, builtin);
    }

    pub fn lookup(&self, name: &str) -> Option<Builtin> {
        self.entries.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Flat argument reader
struct Args<'a> {
    function: &'static str,
    values: &'a [Value],
}

impl<'a> Args<'a> {
    fn new(function: &'static str, values: &'a [Value], expected: usize) -> Result<Self, RuntimeError> {
        if values.len() < expected {
            return Err(RuntimeError::ArgumentCountMismatch {
                function: function.to_string(),
                expected,
                got: values.len(),
            });
        }
        Ok(Args { function, values })
    }

    fn int(&self, index: usize) -> i64 {
        self.values[index].as_int()
    }

    fn float(&self, index: usize) -> f64 {
        self.values[index].as_f64()
    }

    /// Pointer in `values[index..index + 2]`, NULL allowed
    fn nullable_pointer(&self, index: usize) -> Option<Pointer> {
        let store = self.values.get(index + 1).cloned().unwrap_or_default();
        Pointer::from_pair(&self.values[index], &store)
    }

    /// Pointer in `values[index..index + 2]`, NULL rejected
    fn pointer(&self, index: usize) -> Result<Pointer, RuntimeError> {
        self.nullable_pointer(index)
            .ok_or_else(|| RuntimeError::NullPointer {
                function: self.function.to_string(),
            })
    }

    fn rest(&self, index: usize) -> &'a [Value] {
        &self.values[index.min(self.values.len())..]
    }
}

fn pointer_result(pointer: Option<&Pointer>) -> Vec<Value> {
    Pointer::pair_of(pointer).to_vec()
}

fn call_printf(rt: &mut Runtime, values: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    let args = Args::new("printf", values, 2)?;
    let format = args.pointer(0)?;
    let count = rt.printf(&format, args.rest(2))?;
    Ok(vec![Value::Int(count)])
}

fn call_sprintf(rt: &mut Runtime, values: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    let args = Args::new("sprintf", values, 4)?;
    let dest = args.pointer(0)?;
    let format = args.pointer(2)?;
    let count = rt.sprintf(&dest, &format, args.rest(4))?;
    Ok(vec![Value::Int(count)])
}

fn call_putc(rt: &mut Runtime, values: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    let args = Args::new("putc", values, 3)?;
    let stream = args.nullable_pointer(1);
    Ok(vec![Value::Int(rt.putc(args.int(0), stream.as_ref()))])
}

fn call_putchar(rt: &mut Runtime, values: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    let args = Args::new("putchar", values, 1)?;
    Ok(vec![Value::Int(rt.putchar(args.int(0)))])
}

fn call_malloc(rt: &mut Runtime, values: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    let args = Args::new("malloc", values, 1)?;
    Ok(pointer_result(Some(&rt.malloc(args.int(0)))))
}

fn call_calloc(rt: &mut Runtime, values: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    let args = Args::new("calloc", values, 2)?;
    Ok(pointer_result(Some(&rt.calloc(args.int(0), args.int(1)))))
}

fn call_realloc(rt: &mut Runtime, values: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    let args = Args::new("realloc", values, 3)?;
    let resized = rt.realloc(args.nullable_pointer(0), args.int(2));
    Ok(pointer_result(resized.as_ref()))
}

fn call_free(rt: &mut Runtime, values: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    let args = Args::new("free", values, 1)?;
    rt.free(args.nullable_pointer(0).as_ref());
    Ok(Vec::new())
}

fn call_atoi(rt: &mut Runtime, values: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    let args = Args::new("atoi", values, 2)?;
    Ok(vec![Value::Int(rt.atoi(&args.pointer(0)?))])
}

fn call_atol(rt: &mut Runtime, values: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    let args = Args::new("atol", values, 2)?;
    Ok(vec![Value::Int(rt.atol(&args.pointer(0)?))])
}

fn call_strcpy(rt: &mut Runtime, values: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    let args = Args::new("strcpy", values, 4)?;
    let dest = rt.strcpy(&args.pointer(0)?, &args.pointer(2)?);
    Ok(pointer_result(Some(&dest)))
}

fn call_memset(rt: &mut Runtime, values: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    let args = Args::new("memset", values, 4)?;
    let dest = rt.memset(&args.pointer(0)?, args.int(2), args.int(3));
    Ok(pointer_result(Some(&dest)))
}

fn call_memcpy(rt: &mut Runtime, values: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    let args = Args::new("memcpy", values, 5)?;
    let dest = rt.memcpy(&args.pointer(0)?, &args.pointer(2)?, args.int(4));
    Ok(pointer_result(Some(&dest)))
}

fn call_gettimeofday(rt: &mut Runtime, values: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    let args = Args::new("gettimeofday", values, 2)?;
    let tv = args.pointer(0)?;
    let tz = if values.len() >= 3 {
        args.nullable_pointer(2)
    } else {
        None
    };
    Ok(vec![Value::Int(rt.gettimeofday(&tv, tz.as_ref()))])
}

fn call_pow(_rt: &mut Runtime, values: &[Value]) -> Result<Vec<Value>, RuntimeError> {
    let args = Args::new("pow", values, 2)?;
    Ok(vec![Value::Float(math::pow(args.float(0), args.float(1)))])
}

fn unary(name: &'static str, values: &[Value], f: fn(f64) -> f64) -> Result<Vec<Value>, RuntimeError> {
    let args = Args::new(name, values, 1)?;
    Ok(vec![Value::Float(f(args.float(0)))])
}
