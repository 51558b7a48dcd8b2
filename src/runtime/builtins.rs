//! libc entry points
//!
//! This module provides the C library functions compiled programs call into,
//! as typed methods on [`Runtime`].
//!
//! # Supported Built-ins
//!
//! - stdio: `printf`, `sprintf`, `putc`, `putchar`
//! - stdlib: `malloc`, `calloc`, `realloc`, `free`, `atoi`, `atol`
//! - string: `strcpy`, `memset`, `memcpy`
//! - sys/time: `gettimeofday`
//! - math: `sin`, `cos`, `tan`, `atan`, `pow`, `log`, `exp`, `sqrt`
//!
//! # Implementation Notes
//!
//! - `printf` output is line buffered; see [`crate::stdio`]
//! - `printf` and `sprintf` return the number of characters rendered
//! - `memset` writes one cell fewer than requested (kept for compatibility)
//! - `realloc` returns its argument; `free` does nothing

use super::engine::{Runtime, StreamId};
use super::errors::RuntimeError;
use super::varargs::{self, VarArg};
use crate::format;
use crate::memory::strings;
use crate::memory::{Pointer, Value};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{trace, warn};

use super::constants::EOF;

impl Runtime {
    /// `printf(format, ...)`
    ///
    /// `varargs` follow the flat calling convention; pointer pairs are found
    /// by shape (see [`varargs`]).
    pub fn printf(&mut self, format: &Pointer, varargs: &[Value]) -> Result<i64, RuntimeError> {
        let values = varargs::resolve(varargs);
        self.print_values(format, &values)
    }

    /// `printf` with pre-classified arguments
    pub fn printf_tagged(&mut self, format: &Pointer, args: Vec<VarArg>) -> Result<i64, RuntimeError> {
        let values: Vec<Value> = args.into_iter().map(VarArg::into_format_value).collect();
        self.print_values(format, &values)
    }

    fn print_values(&mut self, format: &Pointer, values: &[Value]) -> Result<i64, RuntimeError> {
        let template = strings::to_host_string(format);
        let text = format::sprintf(&template, values)?;
        self.stdout.write_formatted(&text);
        Ok(text.chars().count() as i64)
    }

    /// `sprintf(dest, format, ...)`: store the rendered C-string at `dest`
    pub fn sprintf(
        &mut self,
        dest: &Pointer,
        format: &Pointer,
        varargs: &[Value],
    ) -> Result<i64, RuntimeError> {
        let template = strings::to_host_string(format);
        let text = format::sprintf(&template, &varargs::resolve(varargs))?;
        let written = strings::write_host_string(dest, &text);
        Ok(written as i64)
    }

    /// `putc(c, stream)`: returns `c`, or EOF for a stream that is not
    /// stdout or stderr
    pub fn putc(&mut self, c: i64, stream: Option<&Pointer>) -> i64 {
        let target = match stream.and_then(|file| self.stream_of(file)) {
            Some(StreamId::Stdout) => &mut self.stdout,
            Some(StreamId::Stderr) => &mut self.stderr,
            _ => {
                warn!(c, "putc to a stream that is not writable");
                return EOF;
            }
        };
        target.write_char(strings::decode_char(c));
        c
    }

    /// `putchar(c)`
    pub fn putchar(&mut self, c: i64) -> i64 {
        self.stdout.write_char(strings::decode_char(c));
        c
    }

    /// `malloc(size)`
    pub fn malloc(&mut self, size: i64) -> Pointer {
        self.heap.allocate(size)
    }

    /// `calloc(count, size)`
    pub fn calloc(&mut self, count: i64, size: i64) -> Pointer {
        self.heap.allocate_zeroed(count, size)
    }

    /// `realloc(ptr, size)`
    pub fn realloc(&mut self, pointer: Option<Pointer>, size: i64) -> Option<Pointer> {
        self.heap.resize(pointer, size)
    }

    /// `free(ptr)`
    pub fn free(&mut self, pointer: Option<&Pointer>) {
        self.heap.release(pointer);
    }

    /// `atol(s)`
    pub fn atol(&self, text: &Pointer) -> i64 {
        strings::parse_leading_int(&strings::to_host_string(text))
    }

    /// `atoi(s)`: `atol` wrapped to a C int
    pub fn atoi(&self, text: &Pointer) -> i64 {
        self.atol(text) as i32 as i64
    }

    /// `strcpy(dest, src)`
    pub fn strcpy(&mut self, dest: &Pointer, src: &Pointer) -> Pointer {
        strings::copy(dest, src)
    }

    /// `memset(dest, c, n)`
    pub fn memset(&mut self, dest: &Pointer, value: i64, count: i64) -> Pointer {
        strings::fill(dest, value, count)
    }

    /// `memcpy(dest, src, n)`
    pub fn memcpy(&mut self, dest: &Pointer, src: &Pointer, count: i64) -> Pointer {
        strings::copy_cells(dest, src, count)
    }

    /// `gettimeofday(tv, tz)`: seconds into `tv[0]`, microseconds into `tv[1]`
    pub fn gettimeofday(&mut self, tv: &Pointer, _tz: Option<&Pointer>) -> i64 {
        let elapsed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        tv.write(0, Value::Int(elapsed.as_secs() as i64));
        tv.write(1, Value::Int(elapsed.subsec_micros() as i64));
        trace!(secs = elapsed.as_secs(), "gettimeofday");
        0
    }
}

/// Delegated `<math.h>` functions
pub mod math {
    pub fn sin(x: f64) -> f64 {
        x.sin()
    }

    pub fn cos(x: f64) -> f64 {
        x.cos()
    }

    pub fn tan(x: f64) -> f64 {
        x.tan()
    }

    pub fn atan(x: f64) -> f64 {
        x.atan()
    }

    pub fn pow(x: f64, y: f64) -> f64 {
        x.powf(y)
    }

    pub fn log(x: f64) -> f64 {
        x.ln()
    }

    pub fn exp(x: f64) -> f64 {
        x.exp()
    }

    pub fn sqrt(x: f64) -> f64 {
        x.sqrt()
    }
}
