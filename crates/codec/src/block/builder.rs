use super::{Block, BlockId, BlockKind, BlockTree, pad_right, u256_word};
use crate::{
    AbiError, Result,
    constants::WORD_SIZE,
    ty::{ArrayLen, Elementary, TypeKind, TypeNode},
    value::Value,
};
use alloy_primitives::{B256, I256, U256};

/// Where a freshly built block is attached.
#[derive(Clone, Copy)]
enum Slot {
    Root,
    /// Appended to the members of a set.
    Member(BlockId),
    /// Installed as the dependency of a pointer.
    Dependency(BlockId),
}

struct Task<'a> {
    ty: &'a TypeNode,
    value: &'a Value,
    name: String,
    slot: Slot,
}

/// Validates `value` against `ty` and builds its block tree.
///
/// `root_name` names the root block, usually the method name. Every dynamic value below the root
/// is wrapped in a pointer owned by its enclosing set; static tuples and fixed arrays of static
/// elements are embedded inline.
pub fn build(ty: &TypeNode, value: &Value, root_name: &str) -> Result<BlockTree> {
    let mut tree = BlockTree::default();
    let mut stack = vec![Task { ty, value, name: root_name.to_string(), slot: Slot::Root }];

    while let Some(Task { ty, value, name, slot }) = stack.pop() {
        let parent_name = match slot {
            Slot::Root => String::new(),
            Slot::Member(id) | Slot::Dependency(id) => tree.get(id).name.clone(),
        };

        if let Slot::Member(set) = slot
            && ty.is_dynamic()
        {
            let pointer = tree.push(Block {
                name: name.clone(),
                signature: ty.canonical(),
                parent_name,
                header_size: 0,
                body_size: WORD_SIZE,
                offset: None,
                kind: BlockKind::Pointer { dependency: set, parent: set, alias: None, word: None },
            });
            attach(&mut tree, slot, pointer);
            stack.push(Task { ty, value, name, slot: Slot::Dependency(pointer) });
            continue;
        }

        let id = match ty.kind() {
            TypeKind::Elementary(e) => {
                let data = encode_elementary(*e, value, &name)?;
                tree.push(Block {
                    signature: ty.canonical(),
                    parent_name,
                    header_size: 0,
                    body_size: data.len(),
                    offset: None,
                    kind: BlockKind::Blob { data },
                    name,
                })
            }
            TypeKind::Array { element, len } => {
                let values = array_members(ty, *len, value, &name)?;
                let header = (*len == ArrayLen::Dynamic)
                    .then(|| u256_word(U256::from(values.len())));
                let set = push_set(&mut tree, ty, header, &name, parent_name);
                stack.extend(values.iter().enumerate().rev().map(|(i, value)| Task {
                    ty: element,
                    value,
                    name: format!("{name}[{i}]"),
                    slot: Slot::Member(set),
                }));
                set
            }
            TypeKind::Tuple(components) => {
                if components.is_empty() && !matches!(slot, Slot::Root) {
                    return Err(AbiError::malformed(&ty.canonical(), "empty tuple type"));
                }
                let values = tuple_members(ty, value, &name)?;
                let set = push_set(&mut tree, ty, None, &name, parent_name);
                let names = ty.field_names();
                stack.extend(components.iter().zip(values).zip(names).rev().map(
                    |((component, value), field)| Task {
                        ty: &component.ty,
                        value,
                        name: if name.is_empty() { field } else { format!("{name}.{field}") },
                        slot: Slot::Member(set),
                    },
                ));
                set
            }
        };
        attach(&mut tree, slot, id);
    }

    trace!(target: "calldata::builder", blocks = tree.len(), "built block tree");
    Ok(tree)
}

fn push_set(
    tree: &mut BlockTree,
    ty: &TypeNode,
    header: Option<B256>,
    name: &str,
    parent_name: String,
) -> BlockId {
    tree.push(Block {
        name: name.to_string(),
        signature: ty.canonical(),
        parent_name,
        header_size: if header.is_some() { WORD_SIZE } else { 0 },
        body_size: 0,
        offset: None,
        kind: BlockKind::Set { header, members: Vec::new() },
    })
}

fn attach(tree: &mut BlockTree, slot: Slot, id: BlockId) {
    match slot {
        Slot::Root => tree.set_root(id),
        Slot::Member(set) => {
            if let BlockKind::Set { members, .. } = &mut tree.get_mut(set).kind {
                members.push(id);
            }
        }
        Slot::Dependency(pointer) => {
            if let BlockKind::Pointer { dependency, .. } = &mut tree.get_mut(pointer).kind {
                *dependency = id;
            }
        }
    }
}

fn array_members<'a>(
    ty: &TypeNode,
    len: ArrayLen,
    value: &'a Value,
    path: &str,
) -> Result<&'a [Value]> {
    let values = match value {
        Value::Array(values) | Value::FixedArray(values) => values,
        other => return Err(AbiError::mismatch(path, ty, other.kind_name())),
    };
    if let ArrayLen::Fixed(n) = len
        && values.len() != n
    {
        return Err(AbiError::mismatch(path, ty, value.kind_name()));
    }
    Ok(values)
}

/// Returns the tuple members in component order, resolving struct members by name.
fn tuple_members<'a>(ty: &TypeNode, value: &'a Value, path: &str) -> Result<Vec<&'a Value>> {
    let components = ty.components().unwrap_or_default();
    match value {
        Value::Tuple(values) if values.len() == components.len() => Ok(values.iter().collect()),
        Value::Struct { names, values } if names.len() == values.len() => {
            let fields = ty.field_names();
            if names.len() != fields.len() {
                return Err(AbiError::mismatch(path, ty, value.kind_name()));
            }
            fields
                .iter()
                .zip(components)
                .map(|(field, component)| {
                    let declared = &component.name;
                    names
                        .iter()
                        .position(|n| n == field || (!declared.is_empty() && n == declared))
                        .map(|i| &values[i])
                        .ok_or_else(|| {
                            let member = if path.is_empty() {
                                field.clone()
                            } else {
                                format!("{path}.{field}")
                            };
                            AbiError::mismatch(&member, &component.ty, "nothing")
                        })
                })
                .collect()
        }
        other => Err(AbiError::mismatch(path, ty, other.kind_name())),
    }
}

/// Returns `true` if `value` is representable as a two's complement integer of `bits` bits.
pub(crate) fn int_fits(value: I256, bits: usize) -> bool {
    if bits >= 256 {
        return true;
    }
    let high = value.asr(bits - 1);
    high == I256::ZERO || high == I256::MINUS_ONE
}

/// Encodes an elementary value into its head word, or its length-prefixed payload.
///
/// Integer and fixed-bytes values must carry the width of their slot, so that decoding gives
/// back the same value.
fn encode_elementary(ty: Elementary, value: &Value, path: &str) -> Result<Vec<u8>> {
    let word = match (ty, value) {
        (Elementary::Bool, Value::Bool(b)) => B256::with_last_byte(*b as u8),
        (Elementary::Uint(bits), Value::Uint(v, width)) if bits == *width => {
            if bits < 256 && v.bit_len() > bits {
                return Err(AbiError::invalid(ty, format!("{v} at `{path}` is out of range")));
            }
            u256_word(*v)
        }
        (Elementary::Int(bits), Value::Int(v, width)) if bits == *width => {
            if !int_fits(*v, bits) {
                return Err(AbiError::invalid(ty, format!("{v} at `{path}` is out of range")));
            }
            u256_word(v.into_raw())
        }
        (Elementary::Address, Value::Address(a)) => a.into_word(),
        (Elementary::FixedBytes(size), Value::FixedBytes(word, width)) if size == *width => {
            if word[size..].iter().any(|b| *b != 0) {
                return Err(AbiError::invalid(
                    ty,
                    format!("value at `{path}` is longer than {size} bytes"),
                ));
            }
            *word
        }
        (Elementary::Function, Value::Function(func)) => {
            let mut word = B256::ZERO;
            word[..func.len()].copy_from_slice(func.as_slice());
            word
        }
        (Elementary::Bytes, Value::Bytes(bytes)) => return Ok(encode_packed_dynamic(bytes)),
        (Elementary::String, Value::String(s)) => return Ok(encode_packed_dynamic(s.as_bytes())),
        (ty, other) => return Err(AbiError::mismatch(path, ty, other.kind_name())),
    };
    Ok(word.to_vec())
}

/// Length word followed by the right-padded payload.
fn encode_packed_dynamic(data: &[u8]) -> Vec<u8> {
    let mut out = u256_word(U256::from(data.len())).to_vec();
    out.extend(pad_right(data));
    out
}
