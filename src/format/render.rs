//! Per-conversion rendering
//!
//! Each renderer produces the body of one directive (sign or base prefix
//! included) and hands it to [`justify`], which applies the width.

use super::directive::{Conversion, Flags};
use crate::memory::strings::decode_char;
use crate::memory::Value;

/// Largest precision handed to the std float formatter
///
/// An f64 has at most 1074 exact fraction digits, so every digit past this
/// bound is zero.
const MAX_STD_PRECISION: usize = 1100;

/// Fully resolved directive parameters
#[derive(Debug, Clone, Copy)]
pub struct Resolved {
    pub flags: Flags,
    pub width: usize,
    pub precision: Option<usize>,
    pub conversion: Conversion,
}

/// Render one value
pub fn render(resolved: &Resolved, value: &Value) -> String {
    let rendered = match resolved.conversion {
        Conversion::Str => render_str(resolved, value.to_string()),
        Conversion::Char => {
            let x = value.as_f64();
            let c = if x.is_finite() {
                decode_char(x.trunc() as i64)
            } else {
                char::REPLACEMENT_CHARACTER
            };
            render_str(resolved, c.to_string())
        }
        Conversion::Binary => render_radix(resolved, value, 2),
        Conversion::Octal => render_radix(resolved, value, 8),
        Conversion::Hex { .. } => render_radix(resolved, value, 16),
        Conversion::Unsigned => render_radix(resolved, value, 10),
        Conversion::Decimal => render_decimal(resolved, value),
        Conversion::Exponent { .. } | Conversion::Fixed { .. } | Conversion::General { .. } => {
            render_float(resolved, value.as_f64())
        }
    };

    if resolved.conversion.is_upper() {
        rendered.to_uppercase()
    } else {
        rendered
    }
}

/// Pad `value` to the width
///
/// Zero padding goes after the first `prefix_len` characters (sign or base
/// prefix), so `-7` becomes `-007` and `0x7` becomes `0x007`.
pub fn justify(value: String, prefix_len: usize, flags: &Flags, width: usize, zero_pad: bool) -> String {
    let len = value.chars().count();
    if len >= width {
        return value;
    }
    let fill = width - len;

    if flags.left {
        format!("{}{}", value, " ".repeat(fill))
    } else if zero_pad {
        let (prefix, rest) = value.split_at(prefix_len);
        format!("{}{}{}", prefix, "0".repeat(fill), rest)
    } else {
        format!("{}{}", " ".repeat(fill), value)
    }
}

fn render_str(resolved: &Resolved, text: String) -> String {
    let text = match resolved.precision {
        Some(max) => text.chars().take(max).collect(),
        None => text,
    };
    justify(text, 0, &resolved.flags, resolved.width, resolved.flags.zero)
}

fn render_radix(resolved: &Resolved, value: &Value, radix: u32) -> String {
    let number = value.as_u32();
    let digits = match radix {
        2 => format!("{:b}", number),
        8 => format!("{:o}", number),
        16 => format!("{:x}", number),
        _ => number.to_string(),
    };

    let prefix = match radix {
        _ if !resolved.flags.alternate || number == 0 => "",
        2 => "0b",
        8 => "0",
        16 => "0x",
        _ => "",
    };

    let body = format!("{}{}", prefix, min_digits(digits, resolved.precision));
    justify(body, prefix.len(), &resolved.flags, resolved.width, resolved.flags.zero)
}

fn render_decimal(resolved: &Resolved, value: &Value) -> String {
    let (negative, digits) = match value {
        Value::Int(n) => (*n < 0, n.unsigned_abs().to_string()),
        other => {
            // Non-finite values convert to 0 like every other integer coercion
            let x = other.as_f64().trunc();
            if x.is_finite() {
                (x < 0.0, format!("{:.0}", x.abs()))
            } else {
                (false, "0".to_string())
            }
        }
    };

    let prefix = if negative { "-" } else { resolved.flags.positive_prefix() };
    let body = format!("{}{}", prefix, min_digits(digits, resolved.precision));
    justify(body, prefix.len(), &resolved.flags, resolved.width, resolved.flags.zero)
}

fn render_float(resolved: &Resolved, x: f64) -> String {
    if !x.is_finite() {
        return render_non_finite(resolved, x);
    }

    let precision = resolved.precision.unwrap_or(6);
    let magnitude = x.abs();
    let text = match resolved.conversion {
        Conversion::Exponent { .. } => exponent_string(magnitude, precision),
        Conversion::General { .. } => general_string(magnitude, precision, resolved.flags.alternate),
        _ => fixed_string(magnitude, precision),
    };

    let prefix = if x < 0.0 { "-" } else { resolved.flags.positive_prefix() };
    let body = format!("{}{}", prefix, text);
    justify(body, prefix.len(), &resolved.flags, resolved.width, resolved.flags.zero)
}

// inf and nan pad with spaces even under the 0 flag
fn render_non_finite(resolved: &Resolved, x: f64) -> String {
    let (prefix, text) = if x.is_nan() {
        (resolved.flags.positive_prefix(), "nan")
    } else if x < 0.0 {
        ("-", "inf")
    } else {
        (resolved.flags.positive_prefix(), "inf")
    };
    justify(format!("{}{}", prefix, text), prefix.len(), &resolved.flags, resolved.width, false)
}

fn min_digits(digits: String, precision: Option<usize>) -> String {
    match precision {
        Some(min) if digits.len() < min => format!("{}{}", "0".repeat(min - digits.len()), digits),
        _ => digits,
    }
}

/// `d.ddde+XX` with `precision` fraction digits
fn exponent_string(magnitude: f64, precision: usize) -> String {
    let (mantissa, exponent) = split_exponent(magnitude, precision);
    format!("{}e{}", mantissa, exponent_suffix(exponent))
}

/// C `%g`: `precision` significant digits, trailing zeros removed unless `#`
fn general_string(magnitude: f64, precision: usize, alternate: bool) -> String {
    let significant = precision.max(1);
    let (_, exponent) = split_exponent(magnitude, significant - 1);

    if exponent < -4 || exponent >= significant as i32 {
        let (mantissa, exponent) = split_exponent(magnitude, significant - 1);
        let mantissa = if alternate { mantissa } else { strip_fraction_zeros(mantissa) };
        format!("{}e{}", mantissa, exponent_suffix(exponent))
    } else {
        let decimals = (significant as i32 - 1 - exponent).max(0) as usize;
        let fixed = fixed_string(magnitude, decimals);
        if alternate {
            fixed
        } else {
            strip_fraction_zeros(fixed)
        }
    }
}

/// `magnitude` with exactly `precision` fraction digits
fn fixed_string(magnitude: f64, precision: usize) -> String {
    let mut text = format!("{:.*}", precision.min(MAX_STD_PRECISION), magnitude);
    pad_zeros(&mut text, precision);
    text
}

/// Mantissa text and decimal exponent after rounding to `precision` digits
fn split_exponent(magnitude: f64, precision: usize) -> (String, i32) {
    let text = format!("{:.*e}", precision.min(MAX_STD_PRECISION), magnitude);
    let (mut mantissa, exponent) = match text.split_once('e') {
        Some((mantissa, exponent)) => (mantissa.to_string(), exponent.parse().unwrap_or(0)),
        None => (text, 0),
    };
    pad_zeros(&mut mantissa, precision);
    (mantissa, exponent)
}

fn pad_zeros(text: &mut String, precision: usize) {
    if precision > MAX_STD_PRECISION {
        text.extend(std::iter::repeat('0').take(precision - MAX_STD_PRECISION));
    }
}

fn exponent_suffix(exponent: i32) -> String {
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{}{:02}", sign, exponent.unsigned_abs())
}

fn strip_fraction_zeros(text: String) -> String {
    if !text.contains('.') {
        return text;
    }
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(conversion: Conversion, width: usize, precision: Option<usize>, flags: Flags) -> Resolved {
        Resolved {
            flags,
            width,
            precision,
            conversion,
        }
    }

    #[test]
    fn test_justify_zero_after_prefix() {
        let flags = Flags::default();
        assert_eq!(justify("-7".into(), 1, &flags, 5, true), "-0007");
        assert_eq!(justify("0x7".into(), 2, &flags, 6, true), "0x0007");
        assert_eq!(justify("7".into(), 0, &flags, 3, false), "  7");
        let left = Flags { left: true, ..Flags::default() };
        assert_eq!(justify("7".into(), 0, &left, 3, true), "7  ");
    }

    #[test]
    fn test_exponent_string() {
        assert_eq!(exponent_string(12345.678, 2), "1.23e+04");
        assert_eq!(exponent_string(0.000123, 1), "1.2e-04");
        assert_eq!(exponent_string(0.0, 3), "0.000e+00");
        assert_eq!(exponent_string(9.99, 1), "1.0e+01");
    }

    #[test]
    fn test_general_string() {
        assert_eq!(general_string(100000.0, 6, false), "100000");
        assert_eq!(general_string(1000000.0, 6, false), "1e+06");
        assert_eq!(general_string(0.0001, 6, false), "0.0001");
        assert_eq!(general_string(0.00001, 6, false), "1e-05");
        assert_eq!(general_string(3.14159, 3, false), "3.14");
        assert_eq!(general_string(2.5, 6, true), "2.50000");
        assert_eq!(general_string(0.0, 6, false), "0");
    }

    #[test]
    fn test_decimal_precision_is_min_digits() {
        let s = resolved(Conversion::Decimal, 6, Some(3), Flags::default());
        assert_eq!(render(&s, &Value::Int(-5)), "  -005");
        let s = resolved(Conversion::Decimal, 0, Some(0), Flags::default());
        assert_eq!(render(&s, &Value::Int(0)), "0");
    }

    #[test]
    fn test_non_finite_floats() {
        let s = resolved(Conversion::Fixed { upper: false }, 5, Some(2), Flags { zero: true, ..Flags::default() });
        assert_eq!(render(&s, &Value::Float(f64::INFINITY)), "  inf");
        assert_eq!(render(&s, &Value::Float(f64::NEG_INFINITY)), " -inf");
        let s = resolved(Conversion::Fixed { upper: true }, 0, Some(2), Flags::default());
        assert_eq!(render(&s, &Value::Undefined), "NAN");
    }

    #[test]
    fn test_precision_beyond_std_limit() {
        let fixed = fixed_string(1.5, 70_000);
        assert_eq!(fixed.len(), 70_002);
        assert!(fixed.starts_with("1.5000"));
        assert!(fixed.ends_with('0'));

        let (mantissa, exponent) = split_exponent(1234.5, 70_000);
        assert_eq!(mantissa.len(), 70_002);
        assert!(mantissa.starts_with("1.2345000"));
        assert_eq!(exponent, 3);
    }

    #[test]
    fn test_decimal_of_non_finite_is_zero() {
        let s = resolved(Conversion::Decimal, 5, Some(1), Flags::default());
        assert_eq!(render(&s, &Value::Undefined), "    0");
        assert_eq!(render(&s, &Value::Float(f64::INFINITY)), "    0");
    }

    #[test]
    fn test_char_from_code() {
        let s = resolved(Conversion::Char, 3, None, Flags::default());
        assert_eq!(render(&s, &Value::Int(65)), "  A");
    }
}
