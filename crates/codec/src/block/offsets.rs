//! Offset assignment and pointer resolution.

use super::{BlockId, BlockKind, BlockTree, u256_word};
use crate::{AbiError, Result};
use alloy_primitives::U256;

/// Assigns every block in `order` its byte offset within the argument region, then writes the
/// offset word of every pointer.
///
/// A pointer's word is the distance from the start of its parent set's body (after the length
/// word, if any) to its target: the aliased block if set, the dependency otherwise. Returns the
/// total size of the argument region.
pub fn resolve(tree: &mut BlockTree, order: &[BlockId]) -> Result<usize> {
    let mut cursor = 0;
    for &id in order {
        let block = tree.get_mut(id);
        block.offset = Some(cursor);
        cursor += block.size();
    }

    for &id in order {
        let BlockKind::Pointer { dependency, parent, alias, .. } = tree.get(id).kind else {
            continue;
        };
        let target = alias.unwrap_or(dependency);
        let target_offset = offset_of(tree, target)?;
        let parent_block = tree.get(parent);
        let base = offset_of(tree, parent)? + parent_block.header_size;
        let relative = target_offset
            .checked_sub(base)
            .ok_or_else(|| AbiError::NegativeOffset { name: tree.get(id).name.clone() })?;

        if let BlockKind::Pointer { word, .. } = &mut tree.get_mut(id).kind {
            *word = Some(u256_word(U256::from(relative)));
        }
    }

    trace!(target: "calldata::offsets", size = cursor, "resolved offsets");
    Ok(cursor)
}

fn offset_of(tree: &BlockTree, id: BlockId) -> Result<usize> {
    let block = tree.get(id);
    block.offset.ok_or_else(|| AbiError::UnresolvedOffset { name: block.name.clone() })
}
