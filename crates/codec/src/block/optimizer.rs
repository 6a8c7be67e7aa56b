//! De-duplication of identical dynamic payloads.
//!
//! When two pointers refer to byte-identical content, only one copy needs to be emitted and both
//! pointers can refer to it. Blocks are visited in reverse emission order so that the copy that
//! is kept is always the last one: offsets can only point forward.

use super::{BlockId, BlockKind, BlockTree, layout::linearize};
use alloy_primitives::{
    B256, keccak256,
    map::{B256HashMap, HashSet},
};

/// Hashes block content for duplicate detection.
pub trait ContentHasher {
    fn hash(&self, data: &[u8]) -> B256;
}

/// The default [`ContentHasher`], using Keccak-256.
#[derive(Clone, Copy, Debug, Default)]
pub struct Keccak256Hasher;

impl ContentHasher for Keccak256Hasher {
    fn hash(&self, data: &[u8]) -> B256 {
        keccak256(data)
    }
}

impl<F: Fn(&[u8]) -> B256> ContentHasher for F {
    fn hash(&self, data: &[u8]) -> B256 {
        self(data)
    }
}

/// Points every pointer whose dependency duplicates a later block at that block instead.
///
/// An alias target may itself sit inside a subtree that another alias removes from the output.
/// Such aliases are dropped again, until every remaining alias targets an emitted block.
///
/// Returns the number of pointers that were aliased.
pub fn optimize<H: ContentHasher + ?Sized>(tree: &mut BlockTree, hasher: &H) -> usize {
    let order = linearize(tree);
    let mut seen: B256HashMap<BlockId> = B256HashMap::default();
    let mut aliases = Vec::new();

    for &id in order.iter().rev() {
        match tree.get(id).kind {
            BlockKind::Pointer { dependency, .. } => {
                let hash = hasher.hash(&tree.raw_data(dependency));
                if let Some(&existing) = seen.get(&hash)
                    && existing != dependency
                {
                    aliases.push((id, existing));
                }
            }
            _ => {
                let hash = hasher.hash(&tree.raw_data(id));
                seen.entry(hash).or_insert(id);
            }
        }
    }

    for &(pointer, target) in &aliases {
        set_alias(tree, pointer, Some(target));
    }

    loop {
        let emitted: HashSet<BlockId> = linearize(tree).into_iter().collect();
        let (kept, dropped): (Vec<_>, Vec<_>) = aliases
            .into_iter()
            .partition(|(pointer, target)| emitted.contains(pointer) && emitted.contains(target));
        aliases = kept;
        if dropped.is_empty() {
            break;
        }
        for (pointer, target) in dropped {
            trace!(
                target: "calldata::optimizer",
                pointer = %tree.get(pointer).name,
                target = %tree.get(target).name,
                "dropping alias of an unemitted block"
            );
            set_alias(tree, pointer, None);
        }
    }

    for &(pointer, target) in &aliases {
        trace!(
            target: "calldata::optimizer",
            pointer = %tree.get(pointer).name,
            target = %tree.get(target).name,
            "aliasing duplicate payload"
        );
    }
    aliases.len()
}

fn set_alias(tree: &mut BlockTree, pointer: BlockId, target: Option<BlockId>) {
    if let BlockKind::Pointer { alias, .. } = &mut tree.get_mut(pointer).kind {
        *alias = target;
    }
}
