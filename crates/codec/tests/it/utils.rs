use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{B256, U256};
use calldata_codec::Value;

/// Concatenates a selector and a list of words into calldata.
pub fn calldata(selector: [u8; 4], words: &[B256]) -> Vec<u8> {
    let mut out = selector.to_vec();
    for word in words {
        out.extend_from_slice(word.as_slice());
    }
    out
}

pub fn word(n: u64) -> B256 {
    B256::from(U256::from(n).to_be_bytes::<32>())
}

/// The length word and right-padded payload of a `bytes` or `string`.
pub fn blob(data: &[u8]) -> Vec<B256> {
    let mut words = vec![word(data.len() as u64)];
    for chunk in data.chunks(32) {
        words.push(B256::right_padding_from(chunk));
    }
    words
}

/// Converts a value into its `alloy-dyn-abi` counterpart.
pub fn to_dyn(value: &Value) -> DynSolValue {
    match value {
        Value::Bool(b) => DynSolValue::Bool(*b),
        Value::Int(i, bits) => DynSolValue::Int(*i, *bits),
        Value::Uint(u, bits) => DynSolValue::Uint(*u, *bits),
        Value::Address(a) => DynSolValue::Address(*a),
        Value::FixedBytes(w, size) => DynSolValue::FixedBytes(*w, *size),
        Value::Function(f) => DynSolValue::Function(*f),
        Value::Bytes(b) => DynSolValue::Bytes(b.clone()),
        Value::String(s) => DynSolValue::String(s.clone()),
        Value::Array(v) => DynSolValue::Array(v.iter().map(to_dyn).collect()),
        Value::FixedArray(v) => DynSolValue::FixedArray(v.iter().map(to_dyn).collect()),
        Value::Tuple(v) | Value::Struct { values: v, .. } => {
            DynSolValue::Tuple(v.iter().map(to_dyn).collect())
        }
    }
}
