//! Human-readable formatting of [`Value`]s.

use crate::value::Value;
use alloy_primitives::hex;
use itertools::Itertools;
use std::fmt;

/// [`Value`] formatter.
struct ValueFormatter {
    raw: bool,
}

impl ValueFormatter {
    /// Recursively formats a [`Value`].
    fn value(&self, value: &Value, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match value {
            Value::Address(inner) => write!(f, "{inner}"),
            Value::Function(inner) => write!(f, "{inner}"),
            Value::Bytes(inner) => f.write_str(&hex::encode_prefixed(inner)),
            Value::FixedBytes(word, size) => f.write_str(&hex::encode_prefixed(&word[..*size])),
            Value::Uint(inner, _) => write!(f, "{inner}"),
            Value::Int(inner, _) => write!(f, "{inner}"),
            Value::Bool(inner) => write!(f, "{inner}"),
            Value::String(inner) => {
                if self.raw {
                    f.write_str(inner)
                } else {
                    write!(f, "{inner:?}")
                }
            }
            Value::Array(values) | Value::FixedArray(values) => {
                write!(f, "[{}]", values.iter().format_with(", ", |v, g| g(&Display(v, self.raw))))
            }
            Value::Tuple(values) => self.tuple(values, f),
            Value::Struct { names, values } => {
                if self.raw || names.len() != values.len() {
                    return self.tuple(values, f);
                }
                write!(
                    f,
                    "{{ {} }}",
                    names
                        .iter()
                        .zip(values)
                        .format_with(", ", |(n, v), g| g(&format_args!("{n}: {}", Display(v, false))))
                )
            }
        }
    }

    fn tuple(&self, values: &[Value], f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", values.iter().format_with(", ", |v, g| g(&Display(v, self.raw))))
    }
}

struct Display<'a>(&'a Value, bool);

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ValueFormatter { raw: self.1 }.value(self.0, f)
    }
}

impl fmt::Display for Value {
    /// Formats the value for user output: strings are quoted and structs show member names.
    ///
    /// The alternate flag (`{:#}`) formats it for re-parsing with
    /// [`Value::coerce_str`] instead: strings are bare and structs become tuples.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ValueFormatter { raw: f.alternate() }.value(self, f)
    }
}
