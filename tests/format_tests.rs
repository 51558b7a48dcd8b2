// Format engine tests

use clue_rt::format::{sprintf, FormatError};
use clue_rt::memory::Value;

fn fmt(template: &str, values: &[Value]) -> String {
    sprintf(template, values).expect("Formatting failed")
}

#[test]
fn test_zero_pad_after_sign() {
    assert_eq!(fmt("%05d", &[Value::Int(-7)]), "-0007");
    assert_eq!(fmt("%05d", &[Value::Int(7)]), "00007");
    assert_eq!(fmt("%+05d", &[Value::Int(7)]), "+0007");
}

#[test]
fn test_positive_prefix() {
    assert_eq!(fmt("%+d", &[Value::Int(7)]), "+7");
    assert_eq!(fmt("% d", &[Value::Int(7)]), " 7");
    assert_eq!(fmt("%+ d", &[Value::Int(7)]), "+7");
    assert_eq!(fmt("%+d", &[Value::Int(-7)]), "-7");
}

#[test]
fn test_alternate_hex() {
    assert_eq!(fmt("%#x", &[Value::Int(255)]), "0xff");
    assert_eq!(fmt("%#X", &[Value::Int(255)]), "0XFF");
    assert_eq!(fmt("%#x", &[Value::Int(0)]), "0");
    assert_eq!(fmt("%#08x", &[Value::Int(255)]), "0x0000ff");
    assert_eq!(fmt("%#o", &[Value::Int(8)]), "010");
    assert_eq!(fmt("%#b", &[Value::Int(5)]), "0b101");
}

#[test]
fn test_left_justified_fixed() {
    assert_eq!(fmt("%-6.2f|", &[Value::Float(3.14159)]), "3.14  |");
}

#[test]
fn test_positional_reordering() {
    let values = [Value::from("world"), Value::from("hello")];
    assert_eq!(fmt("%2$s %1$s", &values), "hello world");
}

#[test]
fn test_star_width_and_precision() {
    assert_eq!(fmt("%*d|", &[Value::Int(4), Value::Int(7)]), "   7|");
    assert_eq!(fmt("%.*f", &[Value::Int(1), Value::Float(2.24)]), "2.2");
    assert_eq!(
        fmt("%3$*1$.*2$f|", &[Value::Int(8), Value::Int(3), Value::Float(1.5)]),
        "   1.500|"
    );
}

#[test]
fn test_unsigned_wraps_negative() {
    assert_eq!(fmt("%u", &[Value::Int(-1)]), "4294967295");
    assert_eq!(fmt("%x", &[Value::Int(-1)]), "ffffffff");
    assert_eq!(fmt("%b", &[Value::Int(-2)]), "11111111111111111111111111111110");
}

#[test]
fn test_integer_precision_is_min_digits() {
    assert_eq!(fmt("%.3d", &[Value::Int(5)]), "005");
    assert_eq!(fmt("%6.3d|", &[Value::Int(-5)]), "  -005|");
    assert_eq!(fmt("%.4x", &[Value::Int(255)]), "00ff");
    assert_eq!(fmt("%#.4x", &[Value::Int(255)]), "0x00ff");
}

#[test]
fn test_decimal_truncates_toward_zero() {
    assert_eq!(fmt("%d", &[Value::Float(-3.7)]), "-3");
    assert_eq!(fmt("%i", &[Value::Float(3.7)]), "3");
    assert_eq!(fmt("%d", &[Value::from("12")]), "12");
}

#[test]
fn test_default_float_precision() {
    assert_eq!(fmt("%f", &[Value::Float(1.5)]), "1.500000");
    assert_eq!(fmt("%e", &[Value::Float(1234.5)]), "1.234500e+03");
    assert_eq!(fmt("%E", &[Value::Float(0.00012)]), "1.200000E-04");
    assert_eq!(fmt("%g", &[Value::Float(0.5)]), "0.5");
    assert_eq!(fmt("%G", &[Value::Float(1e-10)]), "1E-10");
}

#[test]
fn test_float_sign_and_padding() {
    assert_eq!(fmt("%08.2f", &[Value::Float(-3.14159)]), "-0003.14");
    assert_eq!(fmt("%+.1f", &[Value::Float(2.0)]), "+2.0");
    assert_eq!(fmt("%9.3f|", &[Value::Float(2.5)]), "    2.500|");
}

#[test]
fn test_string_precision_truncates() {
    assert_eq!(fmt("%.3s", &[Value::from("abcdef")]), "abc");
    assert_eq!(fmt("%5s|", &[Value::from("ab")]), "   ab|");
    assert_eq!(fmt("%-5s|", &[Value::from("ab")]), "ab   |");
}

#[test]
fn test_char_conversion() {
    assert_eq!(fmt("%c%c", &[Value::Int(104), Value::Int(105)]), "hi");
    assert_eq!(fmt("%3c", &[Value::Int('x' as i64)]), "  x");
}

#[test]
fn test_percent_and_unknown_conversions() {
    assert_eq!(fmt("100%%", &[]), "100%");
    assert_eq!(fmt("%y %d", &[Value::Int(1)]), "%y 1");
    assert_eq!(fmt("%5k", &[Value::Int(1)]), "%5k");
}

#[test]
fn test_length_modifiers_ignored() {
    assert_eq!(fmt("%ld %lu", &[Value::Int(-2), Value::Int(3)]), "-2 3");
}

#[test]
fn test_non_finite_width_is_an_error() {
    let result = sprintf("%*d", &[Value::Undefined, Value::Int(3)]);
    assert!(matches!(result, Err(FormatError::NonFiniteWidth { .. })));

    let result = sprintf("%1$*2$d", &[Value::Int(3), Value::Float(f64::INFINITY)]);
    let err = result.unwrap_err();
    assert_eq!(err.to_string(), "Width of '%1$*2$d' must be finite");
}

#[test]
fn test_literal_text_is_preserved() {
    assert_eq!(fmt("plain text", &[]), "plain text");
    assert_eq!(fmt("tab\there ünïcode", &[]), "tab\there ünïcode");
}

#[test]
fn test_large_precision_pads_with_zeros() {
    let out = fmt("%.70000f", &[Value::Float(1.5)]);
    assert_eq!(out.len(), 70_002);
    assert!(out[3..].bytes().all(|b| b == b'0'));

    let out = fmt("%.*e", &[Value::Int(70_000), Value::Float(1.5)]);
    assert_eq!(out.len(), 70_006);
    assert!(out.ends_with("e+00"));
}

#[test]
fn test_width_above_int_max_is_an_error() {
    let result = sprintf("%*d", &[Value::Int(i64::MAX), Value::Int(1)]);
    let err = result.unwrap_err();
    assert_eq!(err, FormatError::WidthOverflow { directive: "%*d".to_string() });
    assert_eq!(err.to_string(), "Width of '%*d' exceeds 2147483647");

    let result = sprintf("%.*d", &[Value::Float(1e12), Value::Int(1)]);
    assert!(matches!(result, Err(FormatError::PrecisionOverflow { .. })));
}

#[test]
fn test_missing_arguments_render_zero_for_integers() {
    assert_eq!(fmt("[%d] [%u] [%5.1d]", &[]), "[0] [0] [    0]");
    assert_eq!(fmt("[%s]", &[]), "[]");
}
