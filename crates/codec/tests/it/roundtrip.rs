//! Randomized encode/decode round trips, optimized and not.

use crate::utils::to_dyn;
use alloy_primitives::{Address, B256, I256, U256};
use calldata_codec::{
    ArrayLen, DecodingRules, Elementary, EncodingRules, TypeKind, TypeNode, Value, decode, encode,
};
use proptest::{collection::vec, prelude::*};

fn arb_elementary() -> impl Strategy<Value = Elementary> {
    prop_oneof![
        Just(Elementary::Bool),
        Just(Elementary::Address),
        (1..=32usize).prop_map(|n| Elementary::Uint(n * 8)),
        (1..=32usize).prop_map(|n| Elementary::Int(n * 8)),
        (1..=32usize).prop_map(Elementary::FixedBytes),
        Just(Elementary::Bytes),
        Just(Elementary::String),
    ]
}

fn arb_type() -> impl Strategy<Value = TypeNode> {
    arb_elementary().prop_map(TypeNode::elementary).prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(|t| TypeNode::array(t, ArrayLen::Dynamic)),
            (inner.clone(), 1..4usize).prop_map(|(t, n)| TypeNode::array(t, ArrayLen::Fixed(n))),
            vec(inner, 1..4).prop_map(TypeNode::unnamed_tuple),
        ]
    })
}

fn arb_value(ty: &TypeNode) -> BoxedStrategy<Value> {
    match ty.kind() {
        TypeKind::Elementary(e) => arb_elementary_value(*e),
        TypeKind::Array { element, len: ArrayLen::Dynamic } => {
            vec(arb_value(element), 0..4).prop_map(Value::Array).boxed()
        }
        TypeKind::Array { element, len: ArrayLen::Fixed(n) } => {
            vec(arb_value(element), *n).prop_map(Value::FixedArray).boxed()
        }
        TypeKind::Tuple(components) => components
            .iter()
            .map(|c| arb_value(&c.ty))
            .collect::<Vec<_>>()
            .prop_map(Value::Tuple)
            .boxed(),
    }
}

fn arb_elementary_value(ty: Elementary) -> BoxedStrategy<Value> {
    match ty {
        Elementary::Bool => any::<bool>().prop_map(Value::Bool).boxed(),
        Elementary::Address => {
            any::<[u8; 20]>().prop_map(|b| Value::Address(Address::from(b))).boxed()
        }
        Elementary::Uint(bits) => any::<[u8; 32]>()
            .prop_map(move |b| {
                let value = U256::from_be_bytes(b);
                let value = if bits < 256 { value >> (256 - bits) } else { value };
                Value::Uint(value, bits)
            })
            .boxed(),
        Elementary::Int(bits) => any::<[u8; 32]>()
            .prop_map(move |b| {
                let value = I256::from_raw(U256::from_be_bytes(b));
                let value = if bits < 256 { value.asr(256 - bits) } else { value };
                Value::Int(value, bits)
            })
            .boxed(),
        Elementary::FixedBytes(size) => vec(any::<u8>(), size)
            .prop_map(move |b| Value::FixedBytes(B256::right_padding_from(&b), size))
            .boxed(),
        Elementary::Function => any::<[u8; 24]>()
            .prop_map(|b| Value::Function(alloy_primitives::Function::from(b)))
            .boxed(),
        Elementary::Bytes => vec(any::<u8>(), 0..70).prop_map(Value::Bytes).boxed(),
        Elementary::String => {
            prop_oneof![Just("Hello".to_string()), "[a-z]{0,40}", ".{0,8}"]
                .prop_map(Value::String)
                .boxed()
        }
    }
}

/// A tuple type with a value of it. Values of the same type tend to repeat, which gives the
/// optimizer something to do.
fn arb_call() -> impl Strategy<Value = (TypeNode, Value)> {
    vec(arb_type(), 1..4)
        .prop_map(TypeNode::unnamed_tuple)
        .prop_flat_map(|ty| {
            let value = arb_value(&ty);
            (Just(ty), value)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn plain_encoding_round_trips((ty, value) in arb_call()) {
        let data = encode(&ty, &value, EncodingRules::default()).unwrap().to_bytes();
        prop_assert_eq!(&data, &to_dyn(&value).abi_encode_params());
        prop_assert_eq!(decode(&ty, &data, DecodingRules::default().strict()).unwrap(), value);
    }

    #[test]
    fn optimized_encoding_round_trips((ty, value) in arb_call()) {
        let plain = encode(&ty, &value, EncodingRules::default()).unwrap().to_bytes();
        let optimized = encode(&ty, &value, EncodingRules::default().optimized()).unwrap().to_bytes();
        prop_assert!(optimized.len() <= plain.len());
        prop_assert_eq!(decode(&ty, &optimized, DecodingRules::default().strict()).unwrap(), value);
    }

    #[test]
    fn truncated_input_never_panics((ty, value) in arb_call(), cut in any::<prop::sample::Index>()) {
        let data = encode(&ty, &value, EncodingRules::default()).unwrap().to_bytes();
        let cut = cut.index(data.len() + 1);
        let _ = decode(&ty, &data[..cut], DecodingRules::default().strict());
    }
}
