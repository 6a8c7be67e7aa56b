//! The encoder facade.

use crate::{
    Result,
    block::{
        self, BlockKind, BlockTree, ContentHasher, Keccak256Hasher, layout::linearize,
        offsets::resolve, optimizer::optimize,
    },
    constants::WORD_SIZE,
    rules::EncodingRules,
    ty::TypeNode,
    value::Value,
};
use alloy_primitives::{Selector, hex};
use std::fmt;

/// Width of the offset column in annotated output.
const OFFSET_PADDING: usize = 10;
/// Width of the word column in annotated output.
const VALUE_PADDING: usize = 74;

/// One emitted block.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Segment {
    offset: usize,
    bytes: Vec<u8>,
    label: String,
    is_set: bool,
}

/// Encoded calldata: an optional selector followed by the emitted blocks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Calldata {
    selector: Option<Selector>,
    segments: Vec<Segment>,
    rules: EncodingRules,
}

impl Calldata {
    /// Lays out and resolves `tree`, optimizing it first if the rules ask for it.
    pub fn new(tree: BlockTree, selector: Option<Selector>, rules: EncodingRules) -> Result<Self> {
        Self::with_hasher(tree, selector, rules, &Keccak256Hasher)
    }

    /// Like [`new`](Self::new), with a custom hasher for duplicate detection.
    pub fn with_hasher<H: ContentHasher + ?Sized>(
        mut tree: BlockTree,
        selector: Option<Selector>,
        rules: EncodingRules,
        hasher: &H,
    ) -> Result<Self> {
        if rules.should_optimize {
            let aliased = optimize(&mut tree, hasher);
            debug!(target: "calldata::encoder", aliased, "optimized calldata");
        }
        let order = linearize(&tree);
        resolve(&mut tree, &order)?;

        let root_name = tree.get(tree.root()).name.clone();
        let segments = order
            .iter()
            .map(|&id| {
                let block = tree.get(id);
                Ok(Segment {
                    offset: block.offset.unwrap_or_default(),
                    bytes: block.to_bytes()?,
                    label: label(&tree, id, &root_name),
                    is_set: block.is_set(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { selector, segments, rules })
    }

    pub fn selector(&self) -> Option<Selector> {
        self.selector
    }

    pub fn rules(&self) -> EncodingRules {
        self.rules
    }

    /// Size of the encoded arguments, excluding the selector.
    pub fn args_len(&self) -> usize {
        self.segments.iter().map(|s| s.bytes.len()).sum()
    }

    /// The raw calldata bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(4 + self.args_len());
        if let Some(selector) = self.selector {
            out.extend_from_slice(selector.as_slice());
        }
        for segment in &self.segments {
            out.extend_from_slice(&segment.bytes);
        }
        out
    }

    /// `0x`-prefixed hex of [`to_bytes`](Self::to_bytes).
    pub fn to_hex(&self) -> String {
        hex::encode_prefixed(self.to_bytes())
    }

    /// Human-readable rendering: one line per word with its offset and the name of the value
    /// it belongs to. Sets are introduced by `###` headings.
    ///
    /// ```text
    /// 0x13e751a6
    ///                                                                                    ### f
    /// 0x0       0000000000000000000000000000000000000000000000000000000000000040    ptr<a> (alias for b)
    /// 0x20      0000000000000000000000000000000000000000000000000000000000000040    ptr<b>
    /// ```
    pub fn annotated(&self) -> String {
        let mut out = match self.selector {
            Some(selector) => selector.to_string(),
            None => "0x".to_string(),
        };
        let blank_offset = " ".repeat(OFFSET_PADDING);
        let blank_value = " ".repeat(VALUE_PADDING);

        for segment in &self.segments {
            out.push('\n');
            if segment.bytes.is_empty() {
                out.push_str(&format!("\n{blank_offset}{blank_value}### {}", segment.label));
                continue;
            }
            for (i, word) in segment.bytes.chunks(WORD_SIZE).enumerate() {
                let offset = format!("0x{:x}", segment.offset + i * WORD_SIZE);
                let line = format!(
                    "{offset:<OFFSET_PADDING$}{:<VALUE_PADDING$}",
                    hex::encode(word)
                );
                match (i, segment.is_set) {
                    (0, true) => out.push_str(&format!("\n{line}### {}", segment.label)),
                    (0, false) => out.push_str(&format!("{line}    {}", segment.label)),
                    _ => out.push_str(&format!("\n{line}")),
                }
            }
        }
        out.lines().map(str::trim_end).collect::<Vec<_>>().join("\n")
    }
}

impl fmt::Display for Calldata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rules.should_annotate {
            f.write_str(&self.annotated())
        } else {
            f.write_str(&self.to_hex())
        }
    }
}

/// The name shown for a block in annotated output, relative to its parent.
fn label(tree: &BlockTree, id: usize, root_name: &str) -> String {
    let block = tree.get(id);
    let pretty = |name: &str, parent: &str| -> String {
        let relative = (!parent.is_empty())
            .then(|| name.strip_prefix(&format!("{parent}.")).map(str::to_string))
            .flatten()
            .or_else(|| {
                (!root_name.is_empty())
                    .then(|| name.strip_prefix(&format!("{root_name}.")).map(str::to_string))
                    .flatten()
            });
        relative.unwrap_or_else(|| name.to_string())
    };

    let name = pretty(&block.name, &block.parent_name);
    match block.kind {
        BlockKind::Pointer { alias: Some(alias), .. } => {
            let target = tree.get(alias);
            format!("ptr<{name}> (alias for {})", pretty(&target.name, &target.parent_name))
        }
        BlockKind::Pointer { .. } => format!("ptr<{name}>"),
        _ => name,
    }
}

/// Encodes `value` as type `ty`, without a selector.
#[instrument(target = "calldata::encoder", level = "debug", skip_all, fields(ty = %ty))]
pub fn encode(ty: &TypeNode, value: &Value, rules: EncodingRules) -> Result<Calldata> {
    encode_with_selector(ty, value, None, "", rules)
}

/// Encodes `value` as type `ty`, prefixed by `selector` if given.
///
/// Non-tuple types are encoded as a tuple of one, which is how a lone value is laid out in
/// calldata.
pub fn encode_with_selector(
    ty: &TypeNode,
    value: &Value,
    selector: Option<Selector>,
    root_name: &str,
    rules: EncodingRules,
) -> Result<Calldata> {
    let tree = if ty.components().is_some() {
        block::build(ty, value, root_name)?
    } else {
        let wrapped = TypeNode::unnamed_tuple([ty.clone()]);
        block::build(&wrapped, &Value::Tuple(vec![value.clone()]), root_name)?
    };
    Calldata::new(tree, selector, rules)
}
