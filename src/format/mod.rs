//! `printf`-family format engine
//!
//! This module turns a template plus a flat list of [`Value`]s into text:
//! - [`directive`]: template parser producing literal and directive segments
//! - [`render`]: per-conversion rendering and width justification
//!
//! # Supported conversions
//!
//! `%s %c %b %o %x %X %u %i %d %e %E %f %F %g %G %%`, with flags `-+ 0#`,
//! literal or `*` widths and precisions, and Perl-style explicit argument
//! positions (`%2$s`, `%*1$d`). Length modifiers (`%ld`) are accepted and
//! ignored.
//!
//! # Argument consumption
//!
//! Implicit arguments are consumed left to right by a cursor that explicit
//! `N$` lookups never move. For each directive the width is resolved first,
//! then the precision, then the value. A missing argument reads as
//! [`Value::Undefined`].

pub mod directive;
pub mod render;

use crate::memory::Value;
use directive::{Count, Segment};
use render::Resolved;
use std::fmt;

/// Largest width or precision accepted, C's `INT_MAX`
pub const MAX_COUNT: f64 = i32::MAX as f64;

/// Usage errors raised while formatting
#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// Width resolved to NaN or infinity
    NonFiniteWidth { directive: String },

    /// Precision resolved to NaN or infinity
    NonFinitePrecision { directive: String },

    /// Width magnitude above `INT_MAX`
    WidthOverflow { directive: String },

    /// Precision above `INT_MAX`
    PrecisionOverflow { directive: String },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::NonFiniteWidth { directive } => {
                write!(f, "Width of '{}' must be finite", directive)
            }
            FormatError::NonFinitePrecision { directive } => {
                write!(f, "Precision of '{}' must be finite", directive)
            }
            FormatError::WidthOverflow { directive } => {
                write!(f, "Width of '{}' exceeds {}", directive, MAX_COUNT)
            }
            FormatError::PrecisionOverflow { directive } => {
                write!(f, "Precision of '{}' exceeds {}", directive, MAX_COUNT)
            }
        }
    }
}

impl std::error::Error for FormatError {}

/// Argument list with an implicit cursor
#[derive(Debug)]
pub struct Arguments<'a> {
    values: &'a [Value],
    cursor: usize,
}

impl<'a> Arguments<'a> {
    pub fn new(values: &'a [Value]) -> Self {
        Arguments { values, cursor: 0 }
    }

    /// Consume the next implicit argument
    pub fn next_value(&mut self) -> Value {
        let value = self.values.get(self.cursor).cloned().unwrap_or_default();
        self.cursor += 1;
        value
    }

    /// Argument at 1-based `position`; the cursor does not move
    pub fn at(&self, position: usize) -> Value {
        position
            .checked_sub(1)
            .and_then(|index| self.values.get(index))
            .cloned()
            .unwrap_or_default()
    }

    fn count(&mut self, count: Count) -> f64 {
        match count {
            Count::Literal(n) => n as f64,
            Count::Next => self.next_value().as_f64(),
            Count::Position(n) => self.at(n).as_f64(),
        }
    }
}

/// Render `template` with `values`
pub fn sprintf(template: &str, values: &[Value]) -> Result<String, FormatError> {
    let mut args = Arguments::new(values);
    let mut output = String::with_capacity(template.len());

    for segment in directive::parse(template) {
        match segment {
            Segment::Literal(text) => output.push_str(text),
            Segment::Percent => output.push('%'),
            Segment::Directive(d, raw) => {
                let mut flags = d.flags;

                let width = match d.width {
                    Some(count) => {
                        let width = args.count(count);
                        if !width.is_finite() {
                            return Err(FormatError::NonFiniteWidth {
                                directive: raw.to_string(),
                            });
                        }
                        let magnitude = width.abs().trunc();
                        if magnitude > MAX_COUNT {
                            return Err(FormatError::WidthOverflow {
                                directive: raw.to_string(),
                            });
                        }
                        // Negative widths left-justify
                        if width < 0.0 {
                            flags.left = true;
                        }
                        magnitude as usize
                    }
                    None => 0,
                };

                let precision = match d.precision {
                    Some(count) => {
                        let precision = args.count(count);
                        if !precision.is_finite() {
                            return Err(FormatError::NonFinitePrecision {
                                directive: raw.to_string(),
                            });
                        }
                        if precision < 0.0 {
                            d.conversion.default_precision()
                        } else if precision.trunc() > MAX_COUNT {
                            return Err(FormatError::PrecisionOverflow {
                                directive: raw.to_string(),
                            });
                        } else {
                            Some(precision.trunc() as usize)
                        }
                    }
                    None => d.conversion.default_precision(),
                };

                let value = match d.position {
                    Some(position) => args.at(position),
                    None => args.next_value(),
                };

                let resolved = Resolved {
                    flags,
                    width,
                    precision,
                    conversion: d.conversion,
                };
                output.push_str(&render::render(&resolved, &value));
            }
        }
    }

    Ok(output)
}
