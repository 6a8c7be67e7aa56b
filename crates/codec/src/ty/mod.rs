//! ABI type trees.
//!
//! A [`TypeNode`] is produced once per schema, either from a signature string with
//! [`TypeNode::parse`] or from a JSON ABI parameter with [`TypeNode::from_param`], and can be
//! reused for any number of encode/decode calls. Whether a node is dynamic is computed once when
//! the node is constructed, from the already-constructed children, and cached on the node.

use std::fmt;

mod json;
mod parser;

pub use parser::{ParsedParam, ParsedSignature, parse_signature, parse_type};

/// A primitive ABI type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Elementary {
    /// `address`
    Address,
    /// `bool`
    Bool,
    /// `int<M>`, with the bit width.
    Int(usize),
    /// `uint<M>`, with the bit width.
    Uint(usize),
    /// `bytes<M>`, with the byte length.
    FixedBytes(usize),
    /// `function`: an address followed by a selector.
    Function,
    /// `bytes`
    Bytes,
    /// `string`
    String,
}

impl Elementary {
    /// Parses an elementary type name, de-sugaring the `uint`, `int` and `byte` aliases.
    pub fn parse(name: &str) -> Option<Self> {
        let ty = match name {
            "address" => Self::Address,
            "bool" => Self::Bool,
            "bytes" => Self::Bytes,
            "string" => Self::String,
            "function" => Self::Function,
            "byte" => Self::FixedBytes(1),
            "uint" => Self::Uint(256),
            "int" => Self::Int(256),
            _ => {
                if let Some(bits) = name.strip_prefix("uint") {
                    Self::Uint(parse_width(bits).filter(|b| b % 8 == 0 && (8..=256).contains(b))?)
                } else if let Some(bits) = name.strip_prefix("int") {
                    Self::Int(parse_width(bits).filter(|b| b % 8 == 0 && (8..=256).contains(b))?)
                } else if let Some(size) = name.strip_prefix("bytes") {
                    Self::FixedBytes(parse_width(size).filter(|s| (1..=32).contains(s))?)
                } else {
                    return None;
                }
            }
        };
        Some(ty)
    }

    /// Returns `true` for `bytes` and `string`.
    #[inline]
    pub const fn is_dynamic(&self) -> bool {
        matches!(self, Self::Bytes | Self::String)
    }
}

fn parse_width(s: &str) -> Option<usize> {
    if s.is_empty() || s.starts_with('0') || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl fmt::Display for Elementary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address => f.write_str("address"),
            Self::Bool => f.write_str("bool"),
            Self::Int(bits) => write!(f, "int{bits}"),
            Self::Uint(bits) => write!(f, "uint{bits}"),
            Self::FixedBytes(size) => write!(f, "bytes{size}"),
            Self::Function => f.write_str("function"),
            Self::Bytes => f.write_str("bytes"),
            Self::String => f.write_str("string"),
        }
    }
}

/// The length of an array type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArrayLen {
    /// `T[N]`
    Fixed(usize),
    /// `T[]`, length-prefixed at runtime.
    Dynamic,
}

/// A named member of a tuple.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Component {
    /// The declared name, possibly empty.
    pub name: String,
    /// The member's type.
    pub ty: TypeNode,
}

impl Component {
    pub fn new(name: impl Into<String>, ty: TypeNode) -> Self {
        Self { name: name.into(), ty }
    }

    /// A component without a name.
    pub fn unnamed(ty: TypeNode) -> Self {
        Self::new(String::new(), ty)
    }
}

/// The shape of a [`TypeNode`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Elementary(Elementary),
    Array { element: Box<TypeNode>, len: ArrayLen },
    Tuple(Vec<Component>),
}

/// A normalized ABI type with its cached dynamic/static classification.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeNode {
    kind: TypeKind,
    dynamic: bool,
}

impl TypeNode {
    /// Creates an elementary type.
    pub fn elementary(ty: Elementary) -> Self {
        Self { dynamic: ty.is_dynamic(), kind: TypeKind::Elementary(ty) }
    }

    /// Wraps `element` in an array dimension.
    pub fn array(element: Self, len: ArrayLen) -> Self {
        let dynamic = len == ArrayLen::Dynamic || element.dynamic;
        Self { kind: TypeKind::Array { element: Box::new(element), len }, dynamic }
    }

    /// Creates a tuple. The tuple is dynamic iff any component is dynamic.
    pub fn tuple(components: Vec<Component>) -> Self {
        let dynamic = components.iter().any(|c| c.ty.dynamic);
        Self { kind: TypeKind::Tuple(components), dynamic }
    }

    /// Creates a tuple of unnamed components.
    pub fn unnamed_tuple(types: impl IntoIterator<Item = Self>) -> Self {
        Self::tuple(types.into_iter().map(Component::unnamed).collect())
    }

    /// Parses a type signature such as `(uint256,bytes)[]`.
    pub fn parse(signature: &str) -> crate::Result<Self> {
        parse_type(signature)
    }

    #[inline]
    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    /// Returns `true` if the encoding of this type has a variable size and must therefore be
    /// referenced through an offset pointer.
    #[inline]
    pub fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    /// Returns the tuple components, if this is a tuple.
    pub fn components(&self) -> Option<&[Component]> {
        match &self.kind {
            TypeKind::Tuple(components) => Some(components),
            _ => None,
        }
    }

    /// Returns the elementary type, if this is one.
    pub fn as_elementary(&self) -> Option<Elementary> {
        match self.kind {
            TypeKind::Elementary(ty) => Some(ty),
            _ => None,
        }
    }

    /// Canonical type string: names stripped, aliases de-sugared, tuples as `(t1,t2,...)`.
    pub fn canonical(&self) -> String {
        let mut out = String::new();
        self.write_signature(&mut out, false);
        out
    }

    /// Type string including component names, e.g. `(uint256 amount,string memo)`.
    pub fn detailed(&self) -> String {
        let mut out = String::new();
        self.write_signature(&mut out, true);
        out
    }

    fn write_signature(&self, out: &mut String, detailed: bool) {
        match &self.kind {
            TypeKind::Elementary(ty) => out.push_str(&ty.to_string()),
            TypeKind::Array { element, len } => {
                element.write_signature(out, detailed);
                match len {
                    ArrayLen::Fixed(n) => out.push_str(&format!("[{n}]")),
                    ArrayLen::Dynamic => out.push_str("[]"),
                }
            }
            TypeKind::Tuple(components) => {
                out.push('(');
                for (i, component) in components.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    component.ty.write_signature(out, detailed);
                    if detailed && !component.name.is_empty() {
                        out.push(' ');
                        out.push_str(&component.name);
                    }
                }
                out.push(')');
            }
        }
    }

    /// Unique member names for a tuple.
    ///
    /// Repeated or empty names are suffixed with `_1`, `_2`, ... until unique, so every
    /// member can be addressed by name.
    pub fn field_names(&self) -> Vec<String> {
        let Some(components) = self.components() else { return Vec::new() };
        let mut names: Vec<String> = Vec::with_capacity(components.len());
        for component in components {
            let mut name = component.name.clone();
            let mut idx = 0;
            while name.is_empty() || names.contains(&name) {
                idx += 1;
                name = format!("{}_{idx}", component.name);
            }
            names.push(name);
        }
        names
    }
}

impl fmt::Display for TypeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

impl std::str::FromStr for TypeNode {
    type Err = crate::AbiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
