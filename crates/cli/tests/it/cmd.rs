use crate::{TOKEN_ABI, calldatatest};
use snapbox::str;

const TRANSFER: &str = "0xa9059cbb0000000000000000000000005aaeb6053f3e94c9b9a09f33669435e7ef1beaed00000000000000000000000000000000000000000000000000000000000003e8";

// tests that `calldata sig` prints selectors and event topics
calldatatest!(sig, |dir, cmd| {
    cmd.args(["sig", "transfer(address to, uint256 amount)"]).assert().success().stdout_eq(
        str![[r#"
0xa9059cbb

"#]],
    );

    crate::calldata(dir)
        .args(["sig", "--event", "Transfer(address indexed,address indexed,uint256)"])
        .assert()
        .success()
        .stdout_eq(str![[r#"
0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef

"#]]);
});

calldatatest!(parse_type, |_dir, cmd| {
    cmd.args(["parse", "(uint256 amount, (bytes1 flag, string memo)[] notes)"])
        .assert()
        .success()
        .stdout_eq(str![[r#"
canonical: (uint256,(bytes1,string)[])
detailed:  (uint256 amount,(bytes1 flag,string memo)[] notes)
dynamic:   true

"#]]);
});

calldatatest!(encode_then_decode, |dir, cmd| {
    cmd.args(["encode", "transfer(address,uint256)", "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed", "1000"])
        .assert()
        .success()
        .stdout_eq(str![[r#"
0xa9059cbb0000000000000000000000005aaeb6053f3e94c9b9a09f33669435e7ef1beaed00000000000000000000000000000000000000000000000000000000000003e8

"#]]);

    crate::calldata(dir)
        .args(["decode", "transfer(address,uint256)", TRANSFER]).assert().success().stdout_eq(str![[r#"
0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed
1000

"#]]);
});

// identical dynamic arguments share one encoding
calldatatest!(encode_optimized, |_dir, cmd| {
    cmd.args(["encode", "f(string,string)", "Hello", "Hello", "--optimize"])
        .assert()
        .success()
        .stdout_eq(str![[r#"
0x18159cfb00000000000000000000000000000000000000000000000000000000000000400000000000000000000000000000000000000000000000000000000000000040000000000000000000000000000000000000000000000000000000000000000548656c6c6f000000000000000000000000000000000000000000000000000000

"#]]);
});

calldatatest!(encode_rejects_bad_arguments, |_dir, cmd| {
    let output = cmd
        .args(["encode", "f(uint256,bool)", "x", "true"])
        .assert()
        .failure()
        .get_output()
        .clone();
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("could not parse argument #1 `x` as uint256"), "{stderr}");
});

calldatatest!(decode_calldata_with_abi, |dir, cmd| {
    std::fs::write(dir.join("Token.json"), TOKEN_ABI).unwrap();
    cmd.args(["decode-calldata", "--abi", "Token.json", "--owner", "token", TRANSFER])
        .assert()
        .success()
        .stdout_eq(str![[r#"
transfer(address to,uint256 amount)
  to: 0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed
  amount: 1000

"#]]);
});

calldatatest!(decode_calldata_unknown_selector, |dir, cmd| {
    std::fs::write(dir.join("Token.json"), TOKEN_ABI).unwrap();
    let output = cmd
        .args(["decode-calldata", "--abi", "Token.json", "0xdeadbeef"])
        .assert()
        .failure()
        .get_output()
        .clone();
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("0xdeadbeef"), "{stderr}");
    assert!(stderr.contains("Hint: pass the ABI that defines this function with `--abi`"), "{stderr}");
});

calldatatest!(decode_log, |dir, cmd| {
    std::fs::write(dir.join("Token.json"), TOKEN_ABI).unwrap();
    cmd.args([
        "decode-log",
        "--abi",
        "Token.json",
        "--topics",
        "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef",
        "0x0000000000000000000000005aaeb6053f3e94c9b9a09f33669435e7ef1beaed",
        "0x0000000000000000000000000000000000000000000000000000000000000000",
        "--data",
        "0x0000000000000000000000000000000000000000000000000000000000000007",
    ])
    .assert()
    .success()
    .stdout_eq(str![[r#"
Transfer
  from: 0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed
  to: 0x0000000000000000000000000000000000000000
  value: 7

"#]]);
});

// overloads get numbered names ordered by signature
calldatatest!(methods, |dir, cmd| {
    std::fs::write(dir.join("Token.json"), TOKEN_ABI).unwrap();
    cmd.args(["methods", "--abi", "Token.json"]).assert().success().stdout_eq(str![[r#"
0x40c10f19  mint1                    mint(address to,uint256 amount)
0xa0712d68  mint2                    mint(uint256 amount)
0xa9059cbb  transfer                 transfer(address to,uint256 amount)

"#]]);
});
