//! Parsing of human-readable argument strings into [`Value`]s.
//!
//! Arrays are written as `[a, b, c]` and tuples as `(a, b)`. Strings may be quoted with `"` to
//! protect commas and brackets; integers accept decimal or `0x` hex; byte strings are hex.

use crate::{
    AbiError, Result,
    ty::{ArrayLen, Elementary, TypeKind, TypeNode},
    value::Value,
};
use alloy_primitives::{Address, B256, Function, I256, U256, hex};

impl Value {
    /// Parses `input` as a value of type `ty`.
    pub fn coerce_str(ty: &TypeNode, input: &str) -> Result<Self> {
        let input = input.trim();
        match ty.kind() {
            TypeKind::Elementary(e) => coerce_elementary(*e, input),
            TypeKind::Array { element, len } => {
                let inner = strip_delims(input, '[', ']')
                    .ok_or_else(|| AbiError::invalid(ty, "expected `[...]`"))?;
                let values = split_top_level(inner)?
                    .into_iter()
                    .map(|item| Self::coerce_str(element, item))
                    .collect::<Result<Vec<_>>>()?;
                match len {
                    ArrayLen::Dynamic => Ok(Self::Array(values)),
                    ArrayLen::Fixed(n) if values.len() == *n => Ok(Self::FixedArray(values)),
                    ArrayLen::Fixed(n) => Err(AbiError::invalid(
                        ty,
                        format!("expected {n} elements, got {}", values.len()),
                    )),
                }
            }
            TypeKind::Tuple(components) => {
                let inner = strip_delims(input, '(', ')')
                    .ok_or_else(|| AbiError::invalid(ty, "expected `(...)`"))?;
                let items = split_top_level(inner)?;
                if items.len() != components.len() {
                    return Err(AbiError::invalid(
                        ty,
                        format!("expected {} members, got {}", components.len(), items.len()),
                    ));
                }
                let values = components
                    .iter()
                    .zip(items)
                    .map(|(c, item)| Self::coerce_str(&c.ty, item))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Self::Tuple(values))
            }
        }
    }
}

fn coerce_elementary(ty: Elementary, input: &str) -> Result<Value> {
    let fail = |reason: &str| AbiError::invalid(ty, format!("`{input}`: {reason}"));
    let value = match ty {
        Elementary::Bool => match input {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            _ => return Err(fail("expected `true` or `false`")),
        },
        Elementary::Uint(bits) => {
            let value: U256 = input.parse().map_err(|_| fail("not an unsigned integer"))?;
            if bits < 256 && value.bit_len() > bits {
                return Err(fail("out of range"));
            }
            Value::Uint(value, bits)
        }
        Elementary::Int(bits) => {
            let value = parse_int(input).ok_or_else(|| fail("not an integer"))?;
            if !crate::block::int_fits(value, bits) {
                return Err(fail("out of range"));
            }
            Value::Int(value, bits)
        }
        Elementary::Address => Value::Address(
            input.parse::<Address>().map_err(|_| fail("not a 20-byte hex address"))?,
        ),
        Elementary::FixedBytes(size) => {
            let bytes = hex::decode(input).map_err(|_| fail("not hex"))?;
            if bytes.len() > size {
                return Err(fail("too long"));
            }
            let mut word = B256::ZERO;
            word[..bytes.len()].copy_from_slice(&bytes);
            Value::FixedBytes(word, size)
        }
        Elementary::Function => {
            let bytes = hex::decode(input).map_err(|_| fail("not hex"))?;
            if bytes.len() != 24 {
                return Err(fail("expected 24 bytes"));
            }
            Value::Function(Function::from_slice(&bytes))
        }
        Elementary::Bytes => Value::Bytes(hex::decode(input).map_err(|_| fail("not hex"))?),
        Elementary::String => Value::String(unquote(input).to_string()),
    };
    Ok(value)
}

fn parse_int(input: &str) -> Option<I256> {
    let (negative, digits) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input),
    };
    let abs: U256 = digits.parse().ok()?;
    let value = I256::checked_from_sign_and_abs(
        if negative { alloy_primitives::Sign::Negative } else { alloy_primitives::Sign::Positive },
        abs,
    )?;
    Some(value)
}

fn unquote(input: &str) -> &str {
    input
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(input)
}

fn strip_delims(input: &str, open: char, close: char) -> Option<&str> {
    input.strip_prefix(open)?.strip_suffix(close)
}

/// Splits a comma separated list, ignoring commas nested inside brackets or quotes.
fn split_top_level(input: &str) -> Result<Vec<&str>> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }
    let mut items = Vec::new();
    let mut depth = 0usize;
    let mut quoted = false;
    let mut start = 0;
    for (i, c) in input.char_indices() {
        match c {
            '"' => quoted = !quoted,
            '[' | '(' if !quoted => depth += 1,
            ']' | ')' if !quoted => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| AbiError::invalid("list", format!("unbalanced `{input}`")))?;
            }
            ',' if !quoted && depth == 0 => {
                items.push(input[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 || quoted {
        return Err(AbiError::invalid("list", format!("unbalanced `{input}`")));
    }
    items.push(input[start..].trim());
    Ok(items)
}
