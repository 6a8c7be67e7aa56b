//! Callable method schemas.

use crate::{
    AbiError, Result,
    calldata::{Calldata, encode_with_selector},
    constants::SELECTOR_LEN,
    decoder::decode,
    rules::{DecodingRules, EncodingRules},
    ty::{Component, ParsedParam, TypeNode, parse_signature},
    value::Value,
};
use alloy_primitives::{Selector, hex, keccak256};

/// A method: a name, its input and output tuples, and the derived selector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Method {
    name: String,
    inputs: TypeNode,
    outputs: TypeNode,
    signature: String,
    selector: Selector,
}

impl Method {
    /// Creates a method. Inputs and outputs that are not tuples are wrapped in a tuple of one.
    pub fn new(name: impl Into<String>, inputs: TypeNode, outputs: TypeNode) -> Self {
        let name = name.into();
        let inputs = into_tuple(inputs);
        let outputs = into_tuple(outputs);
        let signature = format!("{name}{}", inputs.canonical());
        let selector = Selector::from_slice(&keccak256(signature.as_bytes())[..SELECTOR_LEN]);
        Self { name, inputs, outputs, signature, selector }
    }

    /// Parses a human-readable signature such as
    /// `function balanceOf(address owner) view returns (uint256)`.
    pub fn parse(signature: &str) -> Result<Self> {
        let parsed = parse_signature(signature)?;
        Ok(Self::new(parsed.name, params_tuple(parsed.inputs), params_tuple(parsed.outputs)))
    }

    /// Builds a method from a JSON ABI function.
    pub fn from_function(function: &alloy_json_abi::Function) -> Result<Self> {
        Ok(Self::new(
            function.name.clone(),
            TypeNode::from_params(&function.inputs)?,
            TypeNode::from_params(&function.outputs)?,
        ))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The input tuple.
    pub fn inputs(&self) -> &TypeNode {
        &self.inputs
    }

    /// The output tuple.
    pub fn outputs(&self) -> &TypeNode {
        &self.outputs
    }

    /// The canonical signature, e.g. `transfer(address,uint256)`.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// The signature with input names, e.g. `transfer(address to,uint256 amount)`.
    pub fn detailed_signature(&self) -> String {
        format!("{}{}", self.name, self.inputs.detailed())
    }

    pub fn selector(&self) -> Selector {
        self.selector
    }

    /// Encodes a call with positional arguments.
    #[instrument(
        target = "calldata::method",
        level = "debug",
        skip_all,
        fields(method = %self.signature)
    )]
    pub fn encode(&self, args: &[Value], rules: EncodingRules) -> Result<Calldata> {
        self.encode_value(&Value::Tuple(args.to_vec()), rules)
    }

    /// Encodes a call from a single tuple or struct value holding all arguments.
    pub fn encode_value(&self, args: &Value, rules: EncodingRules) -> Result<Calldata> {
        encode_with_selector(&self.inputs, args, Some(self.selector), &self.name, rules)
    }

    /// Decodes call arguments. The calldata must start with this method's selector, except in
    /// lenient mode where empty calldata yields zero values.
    pub fn decode(&self, calldata: &[u8], rules: DecodingRules) -> Result<Vec<Value>> {
        if calldata.is_empty() && !rules.is_strict_mode {
            let structs = rules.should_convert_structs_to_objects;
            return Ok(members(Value::default_with_structs(&self.inputs, structs)));
        }
        let args = self.strip_selector(calldata)?;
        decode(&self.inputs, args, rules).map(members)
    }

    /// Decodes call arguments in strict mode.
    ///
    /// Returns `None` for a method without inputs, the value itself for a single input, and a
    /// tuple of all inputs otherwise.
    pub fn strict_decode(&self, calldata: &[u8], rules: DecodingRules) -> Result<Option<Value>> {
        self.decode(calldata, rules.strict()).map(unwrap_outputs)
    }

    /// Decodes call arguments keyed by (disambiguated) input name.
    pub fn decode_named(
        &self,
        calldata: &[u8],
        rules: DecodingRules,
    ) -> Result<Vec<(String, Value)>> {
        let values = self.decode(calldata, rules.with_structs())?;
        Ok(self.inputs.field_names().into_iter().zip(values).collect())
    }

    /// Encodes return data. Return data has no selector.
    pub fn encode_return_values(&self, values: &[Value], rules: EncodingRules) -> Result<Calldata> {
        encode_with_selector(&self.outputs, &Value::Tuple(values.to_vec()), None, &self.name, rules)
    }

    /// Decodes return data. In lenient mode empty return data yields zero values.
    pub fn decode_return_values(&self, data: &[u8], rules: DecodingRules) -> Result<Vec<Value>> {
        decode(&self.outputs, data, rules).map(members)
    }

    /// Decodes return data in strict mode, unwrapped like [`strict_decode`](Self::strict_decode).
    pub fn strict_decode_return_value(
        &self,
        data: &[u8],
        rules: DecodingRules,
    ) -> Result<Option<Value>> {
        self.decode_return_values(data, rules.strict()).map(unwrap_outputs)
    }

    fn strip_selector<'a>(&self, calldata: &'a [u8]) -> Result<&'a [u8]> {
        match calldata.split_at_checked(SELECTOR_LEN) {
            Some((selector, args)) if selector == self.selector.as_slice() => Ok(args),
            _ => Err(AbiError::SelectorMismatch {
                expected: self.selector,
                got: hex::encode(&calldata[..calldata.len().min(SELECTOR_LEN)]),
            }),
        }
    }
}

impl std::str::FromStr for Method {
    type Err = AbiError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn into_tuple(ty: TypeNode) -> TypeNode {
    if ty.components().is_some() { ty } else { TypeNode::unnamed_tuple([ty]) }
}

pub(crate) fn params_tuple(params: Vec<ParsedParam>) -> TypeNode {
    TypeNode::tuple(params.into_iter().map(|p| Component::new(p.name, p.ty)).collect())
}

fn members(value: Value) -> Vec<Value> {
    match value {
        Value::Tuple(values) | Value::Struct { values, .. } => values,
        other => vec![other],
    }
}

fn unwrap_outputs(mut values: Vec<Value>) -> Option<Value> {
    match values.len() {
        0 => None,
        1 => values.pop(),
        _ => Some(Value::Tuple(values)),
    }
}
