//! Cross-checks against `alloy-dyn-abi`.

use crate::utils::to_dyn;
use alloy_dyn_abi::DynSolType;
use alloy_primitives::{Address, B256, I256, U256, address};
use calldata_codec::{DecodingRules, EncodingRules, TypeNode, Value, decode, encode};
use similar_asserts::assert_eq;

#[track_caller]
fn check(ty: &str, value: Value) {
    let node = TypeNode::parse(ty).unwrap();
    let dyn_ty = DynSolType::parse(ty).unwrap();
    let expected = to_dyn(&value).abi_encode_params();

    let ours = encode(&node, &value, EncodingRules::default()).unwrap().to_bytes();
    assert_eq!(alloy_primitives::hex::encode(&ours), alloy_primitives::hex::encode(&expected));

    let decoded = decode(&node, &expected, DecodingRules::default().strict()).unwrap();
    assert_eq!(decoded, value);
    assert_eq!(dyn_ty.abi_decode_params(&ours).unwrap(), to_dyn(&value));
}

fn uint(n: u64) -> Value {
    Value::from(U256::from(n))
}

#[test]
fn static_tuples() {
    check(
        "(address,bool,uint8,int256,bytes4)",
        Value::Tuple(vec![
            Value::Address(address!("1dc4c1cefef38a777b15aa20260a54e584b16c48")),
            Value::Bool(true),
            Value::Uint(U256::from(255), 8),
            Value::Int(I256::MINUS_ONE, 256),
            Value::FixedBytes(B256::right_padding_from(&[0xde, 0xad, 0xbe, 0xef]), 4),
        ]),
    );
}

#[test]
fn dynamic_members() {
    check(
        "(uint256[],bytes[])",
        Value::Tuple(vec![
            Value::Array(vec![uint(70), uint(1), uint(18)]),
            Value::Array(vec![
                Value::Bytes(vec![0xb1]),
                Value::Bytes(vec![0xb2; 33]),
                Value::Bytes(vec![]),
            ]),
        ]),
    );
}

#[test]
fn nested_tuples_and_fixed_arrays() {
    check(
        "((uint256,string)[2],(bool,address)[],string[2][])",
        Value::Tuple(vec![
            Value::FixedArray(vec![
                Value::Tuple(vec![uint(1), Value::from("one")]),
                Value::Tuple(vec![uint(2), Value::from("two")]),
            ]),
            Value::Array(vec![Value::Tuple(vec![Value::Bool(false), Value::Address(Address::ZERO)])]),
            Value::Array(vec![
                Value::FixedArray(vec![Value::from("a"), Value::from("")]),
                Value::FixedArray(vec![Value::from("b"), Value::from("c".repeat(70).as_str())]),
            ]),
        ]),
    );
}

#[test]
fn static_fixed_arrays_stay_inline() {
    check(
        "(uint8[3],(uint256,bool)[2])",
        Value::Tuple(vec![
            Value::FixedArray((1..=3).map(|n| Value::Uint(U256::from(n), 8)).collect()),
            Value::FixedArray(vec![
                Value::Tuple(vec![uint(5), Value::Bool(true)]),
                Value::Tuple(vec![uint(6), Value::Bool(false)]),
            ]),
        ]),
    );
}

#[test]
fn empty_dynamic_values() {
    check(
        "(string,bytes,uint256[])",
        Value::Tuple(vec![Value::from(""), Value::Bytes(vec![]), Value::Array(vec![])]),
    );
}
