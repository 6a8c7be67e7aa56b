//! The decoder facade.
//!
//! Decoding mirrors encoding: static values are read in place, dynamic values are reached
//! through a relative offset word. Offsets are measured from the start of the head region of the
//! enclosing tuple or array, which the decoder tracks as a stack of scopes.

use crate::{
    AbiError, Result,
    block::int_fits,
    constants::{ADDRESS_LEN, FUNCTION_LEN, MAX_DECODE_DEPTH, WORD_SIZE},
    rules::DecodingRules,
    ty::{ArrayLen, Elementary, TypeKind, TypeNode},
    value::Value,
};
use alloy_primitives::{Address, B256, Function, I256, U256};

/// A cursor over calldata being decoded.
#[derive(Clone, Debug)]
pub struct RawCalldata<'a> {
    data: &'a [u8],
    cursor: usize,
    scopes: Vec<usize>,
}

impl<'a> RawCalldata<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, cursor: 0, scopes: vec![0] }
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor;
    }

    /// Bytes left after the cursor.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.cursor)
    }

    /// Reads `len` bytes and advances past them.
    pub fn pop_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self.cursor.checked_add(len).filter(|end| *end <= self.data.len()).ok_or(
            AbiError::TruncatedCalldata { offset: self.cursor, needed: len, len: self.data.len() },
        )?;
        let bytes = &self.data[self.cursor..end];
        self.cursor = end;
        Ok(bytes)
    }

    pub fn pop_word(&mut self) -> Result<B256> {
        self.pop_bytes(WORD_SIZE).map(B256::from_slice)
    }

    /// Reads a word holding an offset or a length.
    pub fn pop_usize(&mut self) -> Result<usize> {
        let offset = self.cursor;
        let word = self.pop_word()?;
        let (high, low) = word.split_at(WORD_SIZE - 8);
        let mut low_bytes = [0u8; 8];
        low_bytes.copy_from_slice(low);
        high.iter()
            .all(|b| *b == 0)
            .then(|| usize::try_from(u64::from_be_bytes(low_bytes)).ok())
            .flatten()
            .ok_or(AbiError::TruncatedCalldata { offset, needed: usize::MAX, len: self.data.len() })
    }

    /// Starts a new head region at the cursor.
    pub fn start_scope(&mut self) {
        self.scopes.push(self.cursor);
    }

    pub fn end_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Converts an offset relative to the current head region into an absolute position.
    pub fn to_absolute_offset(&self, relative: usize) -> Result<usize> {
        let start = self.scopes.last().copied().unwrap_or_default();
        start.checked_add(relative).filter(|abs| *abs <= self.data.len()).ok_or(
            AbiError::TruncatedCalldata { offset: start, needed: relative, len: self.data.len() },
        )
    }
}

/// Decodes `data` as a value of type `ty`.
///
/// Non-tuple types are decoded as a tuple of one. In lenient mode an empty buffer yields
/// [`Value::default_for`] instead of an error.
pub fn decode(ty: &TypeNode, data: &[u8], rules: DecodingRules) -> Result<Value> {
    if ty.components().is_none() {
        let wrapped = TypeNode::unnamed_tuple([ty.clone()]);
        return match decode(&wrapped, data, rules)? {
            Value::Tuple(mut values) if values.len() == 1 => Ok(values.remove(0)),
            other => Err(AbiError::mismatch("", ty, other.kind_name())),
        };
    }

    if data.is_empty() && !rules.is_strict_mode {
        trace!(target: "calldata::decoder", %ty, "empty input, returning defaults");
        return Ok(Value::default_with_structs(ty, rules.should_convert_structs_to_objects));
    }

    let mut raw = RawCalldata::new(data);
    Decoder { raw: &mut raw, rules }.decode_in_place(ty, 0)
}

struct Decoder<'r, 'a> {
    raw: &'r mut RawCalldata<'a>,
    rules: DecodingRules,
}

impl Decoder<'_, '_> {
    /// Decodes a value whose head slot is at the cursor.
    fn decode_value(&mut self, ty: &TypeNode, depth: usize) -> Result<Value> {
        if !ty.is_dynamic() {
            return self.decode_in_place(ty, depth);
        }
        let relative = self.raw.pop_usize()?;
        let resume = self.raw.cursor();
        let target = self.raw.to_absolute_offset(relative)?;
        self.raw.set_cursor(target);
        let value = self.decode_in_place(ty, depth);
        self.raw.set_cursor(resume);
        value
    }

    /// Decodes a value whose encoding starts at the cursor.
    fn decode_in_place(&mut self, ty: &TypeNode, depth: usize) -> Result<Value> {
        if depth > MAX_DECODE_DEPTH {
            return Err(AbiError::TooDeep(MAX_DECODE_DEPTH));
        }
        match ty.kind() {
            TypeKind::Elementary(e) => self.decode_elementary(*e),
            TypeKind::Array { element, len: dimension } => {
                let len = match dimension {
                    ArrayLen::Fixed(n) => *n,
                    ArrayLen::Dynamic => self.raw.pop_usize()?,
                };
                // Every element occupies at least one word of head, as empty tuples are rejected.
                let needed = len.saturating_mul(WORD_SIZE);
                if needed > self.raw.remaining() {
                    return Err(AbiError::TruncatedCalldata {
                        offset: self.raw.cursor(),
                        needed,
                        len: self.raw.data.len(),
                    });
                }
                self.raw.start_scope();
                let values = (0..len)
                    .map(|_| self.decode_value(element, depth + 1))
                    .collect::<Result<Vec<_>>>();
                self.raw.end_scope();
                let values = values?;
                Ok(match dimension {
                    ArrayLen::Dynamic => Value::Array(values),
                    ArrayLen::Fixed(_) => Value::FixedArray(values),
                })
            }
            TypeKind::Tuple(components) => {
                if components.is_empty() && depth > 0 {
                    return Err(AbiError::malformed(&ty.canonical(), "empty tuple type"));
                }
                self.raw.start_scope();
                let values = components
                    .iter()
                    .map(|c| self.decode_value(&c.ty, depth + 1))
                    .collect::<Result<Vec<_>>>();
                self.raw.end_scope();
                let values = values?;
                let named = components.iter().any(|c| !c.name.is_empty());
                if self.rules.should_convert_structs_to_objects && named {
                    Ok(Value::Struct { names: ty.field_names(), values })
                } else {
                    Ok(Value::Tuple(values))
                }
            }
        }
    }

    fn decode_elementary(&mut self, ty: Elementary) -> Result<Value> {
        if ty.is_dynamic() {
            let len = self.raw.pop_usize()?;
            let padded = len.div_ceil(WORD_SIZE).saturating_mul(WORD_SIZE);
            let data = &self.raw.pop_bytes(padded)?[..len];
            return match ty {
                Elementary::String => String::from_utf8(data.to_vec())
                    .map(Value::String)
                    .map_err(|e| AbiError::invalid(ty, e.to_string())),
                _ => Ok(Value::Bytes(data.to_vec())),
            };
        }

        let word = self.raw.pop_word()?;
        decode_word(ty, word)
    }
}

/// Decodes a single static word as `ty`, validating its padding and range.
pub fn decode_word(ty: Elementary, word: B256) -> Result<Value> {
    let value = match ty {
        Elementary::Bool => match U256::from_be_bytes(word.0) {
            v if v == U256::ZERO => Value::Bool(false),
            v if v == U256::from(1) => Value::Bool(true),
            v => return Err(AbiError::invalid(ty, format!("{v} is not 0 or 1"))),
        },
        Elementary::Uint(bits) => {
            let v = U256::from_be_bytes(word.0);
            if v.bit_len() > bits {
                return Err(AbiError::invalid(ty, format!("{v} does not fit")));
            }
            Value::Uint(v, bits)
        }
        Elementary::Int(bits) => {
            let v = I256::from_raw(U256::from_be_bytes(word.0));
            if !int_fits(v, bits) {
                return Err(AbiError::invalid(ty, format!("{word} is not sign-extended")));
            }
            Value::Int(v, bits)
        }
        Elementary::Address => {
            if word[..WORD_SIZE - ADDRESS_LEN].iter().any(|b| *b != 0) {
                return Err(AbiError::invalid(ty, format!("{word} has dirty upper bytes")));
            }
            Value::Address(Address::from_word(word))
        }
        Elementary::FixedBytes(size) => Value::FixedBytes(word, size),
        Elementary::Function => Value::Function(Function::from_slice(&word[..FUNCTION_LEN])),
        Elementary::Bytes | Elementary::String => {
            return Err(AbiError::invalid(ty, "dynamic type in a single word"));
        }
    };
    Ok(value)
}
