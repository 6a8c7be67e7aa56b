use crate::utils::{blob, calldata, word};
use alloy_primitives::U256;
use calldata_codec::{DecodingRules, EncodingRules, Method, Value};
use similar_asserts::assert_eq;

fn encode_both(signature: &str, args: &[Value]) -> (Vec<u8>, Vec<u8>) {
    let method = Method::parse(signature).unwrap();
    let plain = method.encode(args, EncodingRules::default()).unwrap().to_bytes();
    let optimized = method.encode(args, EncodingRules::default().optimized()).unwrap().to_bytes();

    // Both forms decode to the same arguments.
    for data in [&plain, &optimized] {
        assert_eq!(method.decode(data, DecodingRules::default()).unwrap(), args);
        assert_eq!(method.decode(data, DecodingRules::default().strict()).unwrap(), args);
    }
    (plain, optimized)
}

#[test]
fn repeated_strings_share_one_payload() {
    let args = [Value::from("Hello"), Value::from("Hello")];
    let (plain, optimized) = encode_both("f(string,string)", &args);

    let mut words = vec![word(0x40), word(0x40)];
    words.extend(blob(b"Hello"));
    assert_eq!(optimized, calldata([0x18, 0x15, 0x9c, 0xfb], &words));
    assert_eq!(plain.len() - optimized.len(), 64);
}

#[test]
fn repeated_array_elements_share_payloads() {
    let args = [Value::Array(
        ["Hello", "World", "Hello", "World"].into_iter().map(Value::from).collect(),
    )];
    let (_, optimized) = encode_both("f(string[])", &args);

    let mut words = vec![word(0x20), word(4), word(0x80), word(0xc0), word(0x80), word(0xc0)];
    words.extend(blob(b"Hello"));
    words.extend(blob(b"World"));
    assert_eq!(optimized, calldata([0xe9, 0xcc, 0x87, 0x80], &words));
}

#[test]
fn identical_static_arrays_are_shared() {
    let amounts = Value::Array(vec![Value::from(U256::from(100)), Value::from(U256::from(150))]);
    let args = [amounts.clone(), amounts];
    let (plain, optimized) = encode_both("f(uint256[],uint256[])", &args);

    let words = [word(0x40), word(0x40), word(2), word(0x64), word(0x96)];
    assert_eq!(optimized, calldata([0xd2, 0x0d, 0xa5, 0x25], &words));
    assert_eq!(plain.len(), 4 + 8 * 32);
}

#[test]
fn distinct_values_are_untouched() {
    let args = [Value::from("Hello"), Value::from("World")];
    let (plain, optimized) = encode_both("f(string,string)", &args);
    assert_eq!(plain, optimized);
}

#[test]
fn nested_duplicates_inside_structs() {
    let item = Value::Tuple(vec![Value::from(U256::from(1)), Value::Bytes(vec![0xaa; 40])]);
    let args = [Value::Array(vec![item.clone(), item.clone(), item])];
    let (plain, optimized) = encode_both("f((uint256,bytes)[])", &args);
    assert!(optimized.len() < plain.len());
}

// `d` and `x` share a payload, which drops `d[0]` from the output; `q` matches `d[0]` but must
// keep its own copy.
#[test]
fn shared_payload_across_different_types() {
    let args = [
        Value::Bytes(vec![]),
        Value::Array(vec![Value::from(U256::ZERO)]),
        Value::Bytes(vec![0]),
    ];
    let (plain, optimized) = encode_both("f(bytes,uint256[],bytes)", &args);
    assert_eq!(plain.len() - optimized.len(), 64);
}
