//! Event schemas and log decoding.

use crate::{
    AbiError, Result,
    decoder::{decode, decode_word},
    rules::DecodingRules,
    ty::{Component, TypeNode, parse_signature},
    value::Value,
};
use alloy_primitives::{B256, keccak256};

/// An event parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventInput {
    pub name: String,
    pub ty: TypeNode,
    pub indexed: bool,
}

/// An event: its inputs, and the topic hash identifying its logs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    name: String,
    inputs: Vec<EventInput>,
    anonymous: bool,
    signature: String,
    topic: B256,
}

impl Event {
    pub fn new(name: impl Into<String>, inputs: Vec<EventInput>, anonymous: bool) -> Self {
        let name = name.into();
        let types = TypeNode::unnamed_tuple(inputs.iter().map(|i| i.ty.clone()));
        let signature = format!("{name}{}", types.canonical());
        let topic = keccak256(signature.as_bytes());
        Self { name, inputs, anonymous, signature, topic }
    }

    /// Parses `event Transfer(address indexed from, address indexed to, uint256 value)`.
    pub fn parse(signature: &str) -> Result<Self> {
        let parsed = parse_signature(signature)?;
        let inputs = parsed
            .inputs
            .into_iter()
            .map(|p| EventInput { name: p.name, ty: p.ty, indexed: p.indexed })
            .collect();
        Ok(Self::new(parsed.name, inputs, parsed.anonymous))
    }

    /// Builds an event from a JSON ABI event.
    pub fn from_json(event: &alloy_json_abi::Event) -> Result<Self> {
        let inputs = event
            .inputs
            .iter()
            .map(|p| {
                Ok(EventInput {
                    name: p.name.clone(),
                    ty: TypeNode::from_event_param(p)?,
                    indexed: p.indexed,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(event.name.clone(), inputs, event.anonymous))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn inputs(&self) -> &[EventInput] {
        &self.inputs
    }

    pub fn anonymous(&self) -> bool {
        self.anonymous
    }

    /// The canonical signature, e.g. `Transfer(address,address,uint256)`.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// `keccak256` of the signature: the first topic of every non-anonymous log.
    pub fn topic(&self) -> B256 {
        self.topic
    }

    pub fn indexed_count(&self) -> usize {
        self.inputs.iter().filter(|i| i.indexed).count()
    }

    /// Decodes a log into `(name, value)` pairs in declaration order.
    ///
    /// Indexed value types are decoded from their topic. Indexed reference types (`bytes`,
    /// `string`, arrays and tuples) are only present as a hash, which is returned as `bytes32`.
    pub fn decode_log(&self, topics: &[B256], data: &[u8]) -> Result<Vec<(String, Value)>> {
        let topics = if self.anonymous {
            topics
        } else {
            match topics.split_first() {
                Some((first, rest)) if *first == self.topic => rest,
                _ => {
                    return Err(AbiError::invalid(
                        &self.signature,
                        "log does not carry the event's topic",
                    ));
                }
            }
        };
        if topics.len() != self.indexed_count() {
            return Err(AbiError::invalid(
                &self.signature,
                format!("expected {} indexed topics, got {}", self.indexed_count(), topics.len()),
            ));
        }

        let body = TypeNode::tuple(
            self.inputs
                .iter()
                .filter(|i| !i.indexed)
                .map(|i| Component::new(i.name.clone(), i.ty.clone()))
                .collect(),
        );
        let mut body_values = match decode(&body, data, DecodingRules::default().strict())? {
            Value::Tuple(values) => values.into_iter(),
            other => vec![other].into_iter(),
        };
        let mut topics = topics.iter();

        let names = TypeNode::tuple(
            self.inputs.iter().map(|i| Component::new(i.name.clone(), i.ty.clone())).collect(),
        )
        .field_names();

        self.inputs
            .iter()
            .zip(names)
            .map(|(input, name)| {
                let value = if input.indexed {
                    let topic = *topics.next().ok_or_else(|| {
                        AbiError::invalid(&self.signature, "missing indexed topic")
                    })?;
                    match input.ty.as_elementary() {
                        Some(e) if !e.is_dynamic() => decode_word(e, topic)?,
                        _ => Value::FixedBytes(topic, 32),
                    }
                } else {
                    body_values
                        .next()
                        .ok_or_else(|| AbiError::invalid(&self.signature, "missing log data"))?
                };
                Ok((name, value))
            })
            .collect()
    }
}
