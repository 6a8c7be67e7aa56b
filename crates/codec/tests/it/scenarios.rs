use crate::utils::{blob, word};
use alloy_json_abi::JsonAbi;
use alloy_primitives::{B256, U256, address, hex};
use calldata_codec::{
    AbiError, DecodingRules, EncodingRules, Event, Method, TypeNode, Value, decode, encode,
};
use similar_asserts::assert_eq;

#[test]
fn single_address_call() {
    let method = Method::parse("ERC20Token(address)").unwrap();
    let token = address!("1dc4c1cefef38a777b15aa20260a54e584b16c48");
    let data = method.encode(&[Value::Address(token)], EncodingRules::default()).unwrap();
    assert_eq!(data.to_hex(), "0xf47261b00000000000000000000000001dc4c1cefef38a777b15aa20260a54e584b16c48");
}

#[test]
fn arrays_of_values_and_blobs() {
    let ty = TypeNode::parse("(uint256[] amounts, bytes[] items)").unwrap();
    let value = Value::Tuple(vec![
        Value::Array([70u64, 1, 18].into_iter().map(|n| Value::from(U256::from(n))).collect()),
        Value::Array(vec![Value::Bytes(vec![0xb1]), Value::Bytes(vec![0xb2]), Value::Bytes(vec![0xb3])]),
    ]);
    let data = encode(&ty, &value, EncodingRules::default()).unwrap().to_bytes();

    // Head: offsets of both arrays.
    let mut words = vec![word(0x40), word(0xc0)];
    // amounts
    words.extend([word(3), word(70), word(1), word(18)]);
    // items: length, offsets relative to the first element slot, then the blobs.
    words.extend([word(3), word(0x60), word(0xa0), word(0xe0)]);
    for b in [0xb1, 0xb2, 0xb3] {
        words.extend(blob(&[b]));
    }
    let expected: Vec<u8> = words.iter().flat_map(|w| w.0).collect();
    assert_eq!(hex::encode(&data), hex::encode(&expected));

    let decoded = decode(&ty, &data, DecodingRules::default().with_structs()).unwrap();
    assert_eq!(decoded.field("amounts"), value.as_members().map(|m| &m[0]));
    assert_eq!(decoded.field("items"), value.as_members().map(|m| &m[1]));
}

#[test]
fn annotated_output_names_every_word() {
    let method = Method::parse("f(uint256[] amounts, string memo)").unwrap();
    let args = [
        Value::Array(vec![Value::from(U256::from(1))]),
        Value::from("hi"),
    ];
    let text = method.encode(&args, EncodingRules::default().annotated()).unwrap().to_string();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some(method.selector().to_string().as_str()));
    assert!(text.contains("### f"));
    assert!(text.contains("ptr<amounts>"));
    assert!(text.contains("ptr<memo>"));
    assert!(text.contains("### amounts"));
    for line in text.lines().filter(|l| l.starts_with("0x") && l.len() > 10) {
        assert!(line.len() >= 10 + 64, "{line}");
    }
}

#[test]
fn methods_from_json_abi() {
    let abi: JsonAbi = serde_json::from_str(
        r#"[{
            "type": "function",
            "name": "fillOrder",
            "stateMutability": "nonpayable",
            "inputs": [
                {"name": "order", "type": "tuple", "internalType": "struct Order", "components": [
                    {"name": "maker", "type": "address"},
                    {"name": "amounts", "type": "uint256[2]"},
                    {"name": "data", "type": "bytes"}
                ]},
                {"name": "signature", "type": "bytes"}
            ],
            "outputs": [{"name": "filled", "type": "uint256"}]
        }]"#,
    )
    .unwrap();
    let function = abi.functions().next().unwrap();
    let method = Method::from_function(function).unwrap();
    assert_eq!(method.signature(), "fillOrder((address,uint256[2],bytes),bytes)");
    assert_eq!(method.selector(), function.selector());

    let order = Value::Struct {
        names: vec!["maker".into(), "amounts".into(), "data".into()],
        values: vec![
            Value::Address(address!("5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed")),
            Value::FixedArray(vec![Value::from(U256::from(1)), Value::from(U256::from(2))]),
            Value::Bytes(vec![1, 2, 3]),
        ],
    };
    let args = [order.clone(), Value::Bytes(vec![0xff; 65])];
    let data = method.encode(&args, EncodingRules::default()).unwrap().to_bytes();

    let named = method.decode_named(&data, DecodingRules::default()).unwrap();
    assert_eq!(named[0], ("order".to_string(), order));
    assert_eq!(named[1].0, "signature");

    let filled = method
        .encode_return_values(&[Value::from(U256::from(9))], EncodingRules::default())
        .unwrap();
    assert_eq!(
        method.strict_decode_return_value(&filled.to_bytes(), DecodingRules::default()).unwrap(),
        Some(Value::from(U256::from(9)))
    );
}

#[test]
fn events_from_json_abi() {
    let abi: JsonAbi = serde_json::from_str(
        r#"[{
            "type": "event",
            "name": "Fill",
            "anonymous": false,
            "inputs": [
                {"name": "maker", "type": "address", "indexed": true},
                {"name": "tags", "type": "string[]", "indexed": true},
                {"name": "amount", "type": "uint128", "indexed": false},
                {"name": "note", "type": "string", "indexed": false}
            ]
        }]"#,
    )
    .unwrap();
    let json = abi.events().next().unwrap();
    let event = Event::from_json(json).unwrap();
    assert_eq!(event.signature(), "Fill(address,string[],uint128,string)");
    assert_eq!(event.topic(), json.selector());

    let maker = address!("5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed");
    let tags_hash = B256::repeat_byte(0x11);
    let body = encode(
        &TypeNode::parse("(uint128,string)").unwrap(),
        &Value::Tuple(vec![Value::Uint(U256::from(5), 128), Value::from("gm")]),
        EncodingRules::default(),
    )
    .unwrap()
    .to_bytes();
    let decoded = event.decode_log(&[event.topic(), maker.into_word(), tags_hash], &body).unwrap();
    assert_eq!(
        decoded,
        vec![
            ("maker".to_string(), Value::Address(maker)),
            ("tags".to_string(), Value::FixedBytes(tags_hash, 32)),
            ("amount".to_string(), Value::Uint(U256::from(5), 128)),
            ("note".to_string(), Value::from("gm")),
        ]
    );
}

#[test]
fn lenient_and_strict_empty_input() {
    let method = Method::parse("f(string s, uint8[2] n) returns (bool)").unwrap();
    assert_eq!(
        method.decode(&[], DecodingRules::default()).unwrap(),
        vec![Value::from(""), Value::FixedArray(vec![Value::Uint(U256::ZERO, 8); 2])]
    );
    let err = method.decode(&[], DecodingRules::default().strict()).unwrap_err();
    assert!(matches!(err, AbiError::SelectorMismatch { .. }), "{err}");

    assert_eq!(
        method.strict_decode_return_value(&[], DecodingRules::default()).unwrap_err().is_truncated(),
        true
    );
    assert_eq!(
        method.decode_return_values(&[], DecodingRules::default()).unwrap(),
        vec![Value::Bool(false)]
    );
}

#[test]
fn rejects_out_of_range_arguments() {
    let method = Method::parse("f(uint8)").unwrap();
    let err =
        method.encode(&[Value::Uint(U256::from(256), 8)], EncodingRules::default()).unwrap_err();
    assert!(matches!(err, AbiError::InvalidValue { .. }), "{err}");

    // A uint256 value does not silently narrow into a uint8 slot.
    let err = method.encode(&[Value::from(U256::from(1))], EncodingRules::default()).unwrap_err();
    assert!(matches!(err, AbiError::TypeMismatch { .. }), "{err}");

    let err = method.encode(&[Value::from("256")], EncodingRules::default()).unwrap_err();
    assert!(matches!(err, AbiError::TypeMismatch { .. }), "{err}");
}

#[test]
fn rejects_dirty_words_in_strict_mode() {
    let method = Method::parse("f(bool)").unwrap();
    let mut data = method.selector().to_vec();
    data.extend(word(2).0);
    assert!(method.decode(&data, DecodingRules::default().strict()).is_err());
}
