//! Format template parser
//!
//! Splits a `printf` template into literal text and [`Directive`]s. The
//! accepted grammar is
//!
//! ```text
//! % [N$] [flags] [width | * | *N$] [. (precision | * | *N$)] [length] conversion
//! ```
//!
//! Anything after a `%` that does not match the grammar is left in the output
//! as literal text and consumes no argument.

/// Where a width or precision comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Count {
    /// Digits written in the template
    Literal(usize),
    /// `*`: the next implicit argument
    Next,
    /// `*N$`: the N-th argument (1-based)
    Position(usize),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    pub left: bool,
    pub plus: bool,
    pub space: bool,
    pub zero: bool,
    pub alternate: bool,
}

impl Flags {
    /// Sign shown in front of non-negative numbers
    pub fn positive_prefix(&self) -> &'static str {
        if self.plus {
            "+"
        } else if self.space {
            " "
        } else {
            ""
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    Str,
    Char,
    Binary,
    Octal,
    Hex { upper: bool },
    Unsigned,
    Decimal,
    Exponent { upper: bool },
    Fixed { upper: bool },
    General { upper: bool },
}

impl Conversion {
    pub fn from_char(c: u8) -> Option<Self> {
        let conversion = match c {
            b's' => Conversion::Str,
            b'c' => Conversion::Char,
            b'b' => Conversion::Binary,
            b'o' => Conversion::Octal,
            b'x' => Conversion::Hex { upper: false },
            b'X' => Conversion::Hex { upper: true },
            b'u' => Conversion::Unsigned,
            b'd' | b'i' => Conversion::Decimal,
            b'e' => Conversion::Exponent { upper: false },
            b'E' => Conversion::Exponent { upper: true },
            b'f' => Conversion::Fixed { upper: false },
            b'F' => Conversion::Fixed { upper: true },
            b'g' => Conversion::General { upper: false },
            b'G' => Conversion::General { upper: true },
            _ => return None,
        };
        Some(conversion)
    }

    /// Precision used when the directive gives none
    pub fn default_precision(&self) -> Option<usize> {
        match self {
            Conversion::Exponent { .. } | Conversion::Fixed { .. } | Conversion::General { .. } => {
                Some(6)
            }
            Conversion::Decimal => Some(0),
            _ => None,
        }
    }

    /// Whether the whole rendered token is upper-cased
    pub fn is_upper(&self) -> bool {
        matches!(
            self,
            Conversion::Hex { upper: true }
                | Conversion::Exponent { upper: true }
                | Conversion::Fixed { upper: true }
                | Conversion::General { upper: true }
        )
    }
}

/// One parsed `%` directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub position: Option<usize>,
    pub flags: Flags,
    pub width: Option<Count>,
    pub precision: Option<Count>,
    pub conversion: Conversion,
}

/// A piece of a parsed template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Literal(&'a str),
    /// `%%`
    Percent,
    /// A directive and the template text it was parsed from
    Directive(Directive, &'a str),
}

/// Split a template into segments
pub fn parse(template: &str) -> Vec<Segment<'_>> {
    let bytes = template.as_bytes();
    let mut segments = Vec::new();
    let mut literal_start = 0;
    let mut pos = 0;

    while pos < bytes.len() {
        if bytes[pos] != b'%' {
            pos += 1;
            continue;
        }

        let parsed = if bytes.get(pos + 1) == Some(&b'%') {
            Some((Segment::Percent, pos + 2))
        } else {
            parse_directive(bytes, pos + 1)
                .map(|(directive, end)| (Segment::Directive(directive, &template[pos..end]), end))
        };

        match parsed {
            Some((segment, end)) => {
                if literal_start < pos {
                    segments.push(Segment::Literal(&template[literal_start..pos]));
                }
                segments.push(segment);
                pos = end;
                literal_start = end;
            }
            // Not a directive: the '%' stays literal and scanning resumes after it
            None => pos += 1,
        }
    }

    if literal_start < bytes.len() {
        segments.push(Segment::Literal(&template[literal_start..]));
    }
    segments
}

/// Parse a directive whose body starts at `start` (just past the `%`)
///
/// Returns the directive and the index one past its conversion character.
fn parse_directive(bytes: &[u8], start: usize) -> Option<(Directive, usize)> {
    let mut pos = start;

    let position = match read_number(bytes, pos) {
        Some((n, end)) if bytes.get(end) == Some(&b'$') => {
            pos = end + 1;
            Some(n)
        }
        _ => None,
    };

    let mut flags = Flags::default();
    while let Some(&c) = bytes.get(pos) {
        match c {
            b'-' => flags.left = true,
            b'+' => flags.plus = true,
            b' ' => flags.space = true,
            b'0' => flags.zero = true,
            b'#' => flags.alternate = true,
            _ => break,
        }
        pos += 1;
    }

    let width = match read_count(bytes, pos) {
        Some((count, end)) => {
            pos = end;
            Some(count)
        }
        None => None,
    };

    let precision = if bytes.get(pos) == Some(&b'.') {
        let (count, end) = read_count(bytes, pos + 1)?;
        pos = end;
        Some(count)
    } else {
        None
    };

    while let Some(b'h' | b'l' | b'L' | b'q' | b'j' | b'z' | b't') = bytes.get(pos) {
        pos += 1;
    }

    let conversion = Conversion::from_char(*bytes.get(pos)?)?;

    Some((
        Directive {
            position,
            flags,
            width,
            precision,
            conversion,
        },
        pos + 1,
    ))
}

/// Read `digits`, `*` or `*digits$` at `pos`
fn read_count(bytes: &[u8], pos: usize) -> Option<(Count, usize)> {
    if bytes.get(pos) == Some(&b'*') {
        return match read_number(bytes, pos + 1) {
            Some((n, end)) if bytes.get(end) == Some(&b'$') => Some((Count::Position(n), end + 1)),
            _ => Some((Count::Next, pos + 1)),
        };
    }
    read_number(bytes, pos).map(|(n, end)| (Count::Literal(n), end))
}

fn read_number(bytes: &[u8], pos: usize) -> Option<(usize, usize)> {
    let digits = bytes[pos.min(bytes.len())..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 {
        return None;
    }
    let value = bytes[pos..pos + digits]
        .iter()
        .fold(0usize, |acc, b| acc.saturating_mul(10).saturating_add((b - b'0') as usize));
    Some((value, pos + digits))
}
