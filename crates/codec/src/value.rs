//! Runtime values that can be encoded into, and decoded from, calldata.

use crate::ty::{ArrayLen, Elementary, TypeKind, TypeNode};
use alloy_primitives::{Address, B256, Function, I256, U256};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// A dynamically typed ABI value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    /// A boolean.
    Bool(bool),
    /// A signed integer and its bit width.
    Int(I256, usize),
    /// An unsigned integer and its bit width.
    Uint(U256, usize),
    /// An address.
    Address(Address),
    /// A fixed-length byte string, left-aligned in the word, and its length.
    FixedBytes(B256, usize),
    /// A function pointer: address followed by selector.
    Function(Function),
    /// A dynamic byte string.
    Bytes(Vec<u8>),
    /// A UTF-8 string.
    String(String),
    /// A dynamic-length array.
    Array(Vec<Self>),
    /// A fixed-length array.
    FixedArray(Vec<Self>),
    /// A positional tuple.
    Tuple(Vec<Self>),
    /// A tuple whose members are addressed by name.
    ///
    /// When encoding, members are matched to the tuple components by name, so the order of
    /// `names` does not have to follow the type.
    Struct { names: Vec<String>, values: Vec<Self> },
}

impl Value {
    /// The zero value of `ty`: `false`, `0`, the zero address, empty bytes and strings, empty
    /// dynamic arrays, and fixed arrays and tuples filled with zero values.
    ///
    /// This is what lenient decoding returns for an empty buffer.
    pub fn default_for(ty: &TypeNode) -> Self {
        Self::zero(ty, false)
    }

    /// Like [`Value::default_for`], but tuples with named components become
    /// [`Value::Struct`] when `structs` is set, matching what decoding produces.
    pub fn default_with_structs(ty: &TypeNode, structs: bool) -> Self {
        Self::zero(ty, structs)
    }

    fn zero(ty: &TypeNode, structs: bool) -> Self {
        match ty.kind() {
            TypeKind::Elementary(e) => match *e {
                Elementary::Address => Self::Address(Address::ZERO),
                Elementary::Bool => Self::Bool(false),
                Elementary::Int(bits) => Self::Int(I256::ZERO, bits),
                Elementary::Uint(bits) => Self::Uint(U256::ZERO, bits),
                Elementary::FixedBytes(size) => Self::FixedBytes(B256::ZERO, size),
                Elementary::Function => Self::Function(Function::ZERO),
                Elementary::Bytes => Self::Bytes(Vec::new()),
                Elementary::String => Self::String(String::new()),
            },
            TypeKind::Array { len: ArrayLen::Dynamic, .. } => Self::Array(Vec::new()),
            TypeKind::Array { element, len: ArrayLen::Fixed(n) } => {
                Self::FixedArray(vec![Self::zero(element, structs); *n])
            }
            TypeKind::Tuple(components) => {
                let values = components.iter().map(|c| Self::zero(&c.ty, structs)).collect();
                if structs && components.iter().any(|c| !c.name.is_empty()) {
                    Self::Struct { names: ty.field_names(), values }
                } else {
                    Self::Tuple(values)
                }
            }
        }
    }

    /// A short description of the value's shape, used in type mismatch errors.
    pub fn kind_name(&self) -> String {
        match self {
            Self::Bool(_) => "bool".into(),
            Self::Int(_, bits) => format!("int{bits}"),
            Self::Uint(_, bits) => format!("uint{bits}"),
            Self::Address(_) => "address".into(),
            Self::FixedBytes(_, size) => format!("bytes{size}"),
            Self::Function(_) => "function".into(),
            Self::Bytes(_) => "bytes".into(),
            Self::String(_) => "string".into(),
            Self::Array(values) => format!("array of {}", values.len()),
            Self::FixedArray(values) => format!("fixed array of {}", values.len()),
            Self::Tuple(values) => format!("tuple of {}", values.len()),
            Self::Struct { values, .. } => format!("struct of {}", values.len()),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_uint(&self) -> Option<U256> {
        match self {
            Self::Uint(u, _) => Some(*u),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<I256> {
        match self {
            Self::Int(i, _) => Some(*i),
            _ => None,
        }
    }

    pub fn as_address(&self) -> Option<Address> {
        match self {
            Self::Address(a) => Some(*a),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the members of an array, tuple or struct.
    pub fn as_members(&self) -> Option<&[Self]> {
        match self {
            Self::Array(values)
            | Self::FixedArray(values)
            | Self::Tuple(values)
            | Self::Struct { values, .. } => Some(values),
            _ => None,
        }
    }

    /// Looks up a struct member by name.
    pub fn field(&self, name: &str) -> Option<&Self> {
        match self {
            Self::Struct { names, values } => {
                names.iter().position(|n| n == name).and_then(|i| values.get(i))
            }
            _ => None,
        }
    }

    /// Converts every struct inside this value into a positional tuple.
    pub fn into_positional(self) -> Self {
        match self {
            Self::Struct { values, .. } | Self::Tuple(values) => {
                Self::Tuple(values.into_iter().map(Self::into_positional).collect())
            }
            Self::Array(values) => Self::Array(values.into_iter().map(Self::into_positional).collect()),
            Self::FixedArray(values) => {
                Self::FixedArray(values.into_iter().map(Self::into_positional).collect())
            }
            other => other,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<U256> for Value {
    fn from(value: U256) -> Self {
        Self::Uint(value, 256)
    }
}

impl From<I256> for Value {
    fn from(value: I256) -> Self {
        Self::Int(value, 256)
    }
}

impl From<Address> for Value {
    fn from(value: Address) -> Self {
        Self::Address(value)
    }
}

impl From<B256> for Value {
    fn from(value: B256) -> Self {
        Self::FixedBytes(value, 32)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

/// Integers serialize as decimal strings and byte strings as `0x`-prefixed hex, so values
/// survive JSON without losing precision. Structs serialize as objects keyed by member name.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i, _) => serializer.collect_str(i),
            Self::Uint(u, _) => serializer.collect_str(u),
            Self::Address(a) => serializer.collect_str(&a.to_checksum(None)),
            Self::FixedBytes(word, size) => {
                serializer.collect_str(&alloy_primitives::hex::encode_prefixed(&word[..*size]))
            }
            Self::Function(func) => serializer.collect_str(func),
            Self::Bytes(bytes) => {
                serializer.collect_str(&alloy_primitives::hex::encode_prefixed(bytes))
            }
            Self::String(s) => serializer.serialize_str(s),
            Self::Array(values) | Self::FixedArray(values) | Self::Tuple(values) => {
                let mut seq = serializer.serialize_seq(Some(values.len()))?;
                for value in values {
                    seq.serialize_element(value)?;
                }
                seq.end()
            }
            Self::Struct { names, values } => {
                let mut map = serializer.serialize_map(Some(values.len()))?;
                for (name, value) in names.iter().zip(values) {
                    map.serialize_entry(name, value)?;
                }
                map.end()
            }
        }
    }
}
