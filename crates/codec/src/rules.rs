//! Encoding and decoding options.

use serde::{Deserialize, Serialize};

/// Options controlling how values are encoded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EncodingRules {
    /// De-duplicate identical dynamic payloads.
    #[serde(alias = "should_optimize")]
    pub should_optimize: bool,
    /// Render [`Calldata`](crate::Calldata) as annotated, human-readable text.
    #[serde(alias = "should_annotate")]
    pub should_annotate: bool,
}

impl EncodingRules {
    pub fn optimized(mut self) -> Self {
        self.should_optimize = true;
        self
    }

    pub fn annotated(mut self) -> Self {
        self.should_annotate = true;
        self
    }
}

/// Options controlling how calldata is decoded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DecodingRules {
    /// Fail on empty input instead of returning zero values.
    #[serde(alias = "is_strict_mode")]
    pub is_strict_mode: bool,
    /// Decode tuples with named components as [`Value::Struct`](crate::Value::Struct).
    #[serde(alias = "should_convert_structs_to_objects")]
    pub should_convert_structs_to_objects: bool,
}

impl DecodingRules {
    pub fn strict(mut self) -> Self {
        self.is_strict_mode = true;
        self
    }

    pub fn with_structs(mut self) -> Self {
        self.should_convert_structs_to_objects = true;
        self
    }
}
