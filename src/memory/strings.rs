//! C-string marshaling and cell copies
//!
//! A C-string is a run of character-code cells ending in a zero cell. The
//! helpers here convert between host strings and such runs, and implement the
//! cell-level `strcpy`, `memset` and `memcpy`.

use super::store::{Pointer, Store};
use super::value::Value;

/// Read the C-string at `pointer` into a host string
///
/// Stops at the first zero cell. An unwritten cell also ends the string, so a
/// missing terminator can never run away past the end of the store.
pub fn to_host_string(pointer: &Pointer) -> String {
    let mut text = String::new();
    let mut index = 0;
    loop {
        let cell = pointer.read(index);
        if !cell.is_defined() {
            break;
        }
        let code = cell.as_int();
        if code == 0 {
            break;
        }
        text.push(decode_char(code));
        index += 1;
    }
    text
}

/// Character for a cell code; invalid codes decode to U+FFFD
pub fn decode_char(code: i64) -> char {
    u32::try_from(code)
        .ok()
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Copy a host string into a fresh store, zero-terminated
pub fn from_host_string(text: &str) -> Pointer {
    let mut cells: Vec<Value> = text.chars().map(|c| Value::Int(c as i64)).collect();
    cells.push(Value::Int(0));
    Pointer::to_start(Store::from_cells(cells))
}

/// Write `text` plus a terminator starting at `dest`
pub fn write_host_string(dest: &Pointer, text: &str) -> usize {
    let mut written = 0;
    for (i, c) in text.chars().enumerate() {
        dest.write(i, Value::Int(c as i64));
        written += 1;
    }
    dest.write(written, Value::Int(0));
    written
}

/// `strcpy`: copy cells up to and including the zero terminator
///
/// Returns the original destination pointer.
pub fn copy(dest: &Pointer, src: &Pointer) -> Pointer {
    let mut index = 0;
    loop {
        let cell = src.read(index);
        let done = !cell.is_defined() || cell.as_int() == 0;
        dest.write(index, if done { Value::Int(0) } else { cell });
        if done {
            break;
        }
        index += 1;
    }
    dest.clone()
}

/// `memset`: write `value` into `count - 1` cells starting at `dest`
///
/// The count is one short of what C specifies. Compiled programs built
/// against this runtime depend on the exact boundary, so it stays.
pub fn fill(dest: &Pointer, value: i64, count: i64) -> Pointer {
    for i in 0..(count - 1).max(0) as usize {
        dest.write(i, Value::Int(value));
    }
    dest.clone()
}

/// `memcpy`: copy exactly `count` cells from `src` to `dest`
pub fn copy_cells(dest: &Pointer, src: &Pointer, count: i64) -> Pointer {
    // Snapshot first so overlapping ranges in one store copy like memmove
    let cells: Vec<Value> = (0..count.max(0) as usize).map(|i| src.read(i)).collect();
    for (i, cell) in cells.into_iter().enumerate() {
        dest.write(i, cell);
    }
    dest.clone()
}

/// Parse the leading decimal integer of `text` the way `atol` does
///
/// Skips leading whitespace, accepts one sign, stops at the first non-digit.
/// Returns 0 when there are no digits; overflow wraps.
pub fn parse_leading_int(text: &str) -> i64 {
    let rest = text.trim_start();
    let (negative, digits) = match rest.as_bytes().first() {
        Some(b'-') => (true, &rest[1..]),
        Some(b'+') => (false, &rest[1..]),
        _ => (false, rest),
    };

    let magnitude = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, b| {
            acc.wrapping_mul(10).wrapping_add((b - b'0') as i64)
        });

    if negative {
        magnitude.wrapping_neg()
    } else {
        magnitude
    }
}
