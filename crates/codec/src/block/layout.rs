//! Emission order of a block tree.
//!
//! A set is emitted before its members, and the members before the dependencies of the pointers
//! among them. Each dependency subtree is flattened completely, with the same rule, before the
//! next pointer's dependency:
//!
//! ```text
//! Set{A, B -> a, C}                       =>  [Set, A, B, C, a]
//! Set{A, B -> Set'{a, P -> b}, C -> c}    =>  [Set, A, B, C, Set', a, P, b, c]
//! ```
//!
//! Aliased pointers keep their head slot, but their dependency is not emitted.

use super::{BlockId, BlockKind, BlockTree};

enum Work {
    Emit(BlockId),
    Expand(BlockId),
}

/// Returns the ids of all blocks to emit, in order.
pub fn linearize(tree: &BlockTree) -> Vec<BlockId> {
    let mut order = Vec::with_capacity(tree.len());
    let mut stack = vec![Work::Expand(tree.root())];

    while let Some(work) = stack.pop() {
        let id = match work {
            Work::Emit(id) => {
                order.push(id);
                continue;
            }
            Work::Expand(id) => id,
        };
        let BlockKind::Set { members, .. } = &tree.get(id).kind else {
            order.push(id);
            continue;
        };

        let dependencies = members.iter().filter_map(|member| match tree.get(*member).kind {
            BlockKind::Pointer { dependency, alias: None, .. } => Some(dependency),
            _ => None,
        });
        // Pushed in reverse so that they pop in emission order.
        let pending: Vec<_> = dependencies.collect();
        stack.extend(pending.into_iter().rev().map(Work::Expand));
        stack.extend(members.iter().rev().map(|m| Work::Expand(*m)));
        stack.push(Work::Emit(id));
    }

    order
}
