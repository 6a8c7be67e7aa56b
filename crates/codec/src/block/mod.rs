//! Calldata blocks.
//!
//! Encoding goes through an intermediate tree of blocks, one per encoded unit:
//!
//! - a [`Blob`](BlockKind::Blob) holds word-aligned raw bytes (an elementary value, or the length
//!   word and padded payload of `bytes`/`string`);
//! - a [`Pointer`](BlockKind::Pointer) is the one-word head slot of a dynamic value, referring to
//!   the block holding that value;
//! - a [`Set`](BlockKind::Set) groups the members of a tuple or array, optionally preceded by a
//!   length word for dynamic arrays.
//!
//! Blocks live in a [`BlockTree`] arena and reference each other by [`BlockId`]. A tree is built
//! fresh for every encode call, then optionally [optimized](optimizer), [laid out](layout) and
//! [resolved](offsets) before being serialized.

use crate::{AbiError, Result, constants::WORD_SIZE};
use alloy_primitives::{B256, U256};

mod builder;
pub mod layout;
pub mod offsets;
pub mod optimizer;

pub use builder::build;
pub(crate) use builder::int_fits;
pub use optimizer::{ContentHasher, Keccak256Hasher};

/// Index of a block inside its [`BlockTree`].
pub type BlockId = usize;

/// A single node of the calldata block tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    /// Dotted path of the value this block encodes, e.g. `transfer.to` or `f.items[2]`.
    pub name: String,
    /// Canonical type of the encoded value.
    pub signature: String,
    /// Name of the enclosing block.
    pub parent_name: String,
    /// Bytes emitted before the body: the length word of a dynamic array.
    pub header_size: usize,
    /// Bytes emitted by the block itself, excluding members and dependencies.
    pub body_size: usize,
    /// Position of the block's first byte, relative to the start of the argument region.
    ///
    /// Set by [`offsets::resolve`].
    pub offset: Option<usize>,
    pub kind: BlockKind,
}

/// The variant-specific part of a [`Block`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlockKind {
    Blob {
        data: Vec<u8>,
    },
    Pointer {
        /// The block holding the dynamic payload.
        dependency: BlockId,
        /// The set whose head contains this pointer. Offsets are relative to its body.
        parent: BlockId,
        /// An identical block elsewhere in the tree to point at instead of `dependency`.
        alias: Option<BlockId>,
        /// The resolved offset word.
        word: Option<B256>,
    },
    Set {
        /// Length word of a dynamic array.
        header: Option<B256>,
        members: Vec<BlockId>,
    },
}

impl Block {
    /// Total number of bytes this block emits on its own.
    #[inline]
    pub fn size(&self) -> usize {
        self.header_size + self.body_size
    }

    pub fn is_pointer(&self) -> bool {
        matches!(self.kind, BlockKind::Pointer { .. })
    }

    pub fn is_set(&self) -> bool {
        matches!(self.kind, BlockKind::Set { .. })
    }

    /// The bytes this block contributes to the output.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        match &self.kind {
            BlockKind::Blob { data } => Ok(data.clone()),
            BlockKind::Pointer { word: Some(word), .. } => Ok(word.to_vec()),
            BlockKind::Pointer { word: None, .. } => {
                Err(AbiError::UnresolvedOffset { name: self.name.clone() })
            }
            BlockKind::Set { header, .. } => Ok(header.map(|h| h.to_vec()).unwrap_or_default()),
        }
    }
}

/// Arena of blocks produced by a single encode call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlockTree {
    blocks: Vec<Block>,
    root: BlockId,
}

impl BlockTree {
    #[inline]
    pub fn root(&self) -> BlockId {
        self.root
    }

    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    #[inline]
    pub fn get(&self, id: BlockId) -> &Block {
        &self.blocks[id]
    }

    pub(crate) fn get_mut(&mut self, id: BlockId) -> &mut Block {
        &mut self.blocks[id]
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BlockId, &Block)> {
        self.blocks.iter().enumerate()
    }

    pub(crate) fn push(&mut self, block: Block) -> BlockId {
        self.blocks.push(block);
        self.blocks.len() - 1
    }

    pub(crate) fn set_root(&mut self, root: BlockId) {
        self.root = root;
    }

    /// The content of a block and everything beneath it, used to detect identical subtrees.
    ///
    /// A set contributes its header followed by its members; a pointer wraps its dependency's
    /// content in `<` `>` so that it never collides with the content it points to. Pointer
    /// offsets are not part of the content, so this can be computed before layout.
    pub fn raw_data(&self, id: BlockId) -> Vec<u8> {
        enum Work {
            Visit(BlockId),
            Bytes(&'static [u8]),
        }

        let mut out = Vec::new();
        let mut stack = vec![Work::Visit(id)];
        while let Some(work) = stack.pop() {
            let id = match work {
                Work::Bytes(bytes) => {
                    out.extend_from_slice(bytes);
                    continue;
                }
                Work::Visit(id) => id,
            };
            match &self.blocks[id].kind {
                BlockKind::Blob { data } => out.extend_from_slice(data),
                BlockKind::Pointer { dependency, .. } => {
                    out.push(b'<');
                    stack.push(Work::Bytes(b">"));
                    stack.push(Work::Visit(*dependency));
                }
                BlockKind::Set { header, members } => {
                    if let Some(header) = header {
                        out.extend_from_slice(header.as_slice());
                    }
                    stack.extend(members.iter().rev().map(|m| Work::Visit(*m)));
                }
            }
        }
        out
    }
}

/// Big-endian word encoding of `value`.
#[inline]
pub(crate) fn u256_word(value: U256) -> B256 {
    B256::from(value.to_be_bytes::<32>())
}

/// Right-pads `data` with zeros to a multiple of [`WORD_SIZE`].
pub(crate) fn pad_right(data: &[u8]) -> Vec<u8> {
    let mut out = data.to_vec();
    out.resize(data.len().div_ceil(WORD_SIZE) * WORD_SIZE, 0);
    out
}
