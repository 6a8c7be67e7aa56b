use crate::{TOKEN_ABI, calldatatest};
use snapbox::str;

// `calldata.toml` in the working directory sets encoding defaults
calldatatest!(reads_config_file, |dir, cmd| {
    std::fs::write(dir.join("calldata.toml"), "[encoding]\nshould_optimize = true\n").unwrap();
    cmd.args(["encode", "f(uint256[],uint256[])", "[100,150]", "[100,150]"])
        .assert()
        .success()
        .stdout_eq(str![[r#"
0xd20da52500000000000000000000000000000000000000000000000000000000000000400000000000000000000000000000000000000000000000000000000000000040000000000000000000000000000000000000000000000000000000000000000200000000000000000000000000000000000000000000000000000000000000640000000000000000000000000000000000000000000000000000000000000096

"#]]);
});

// ABI files listed in the config are used when `--abi` is not given
calldatatest!(abis_from_config, |dir, cmd| {
    std::fs::create_dir(dir.join("out")).unwrap();
    std::fs::write(dir.join("out/Token.json"), format!(r#"{{"abi":{TOKEN_ABI}}}"#)).unwrap();
    std::fs::write(dir.join("calldata.toml"), "abis = [\"out/Token.json\"]\n").unwrap();
    cmd.args(["decode-calldata", "0xa0712d680000000000000000000000000000000000000000000000000000000000000005"])
        .assert()
        .success()
        .stdout_eq(str![[r#"
mint(uint256 amount)
  amount: 5

"#]]);
});

calldatatest!(env_overrides_config, |dir, cmd| {
    std::fs::write(dir.join("calldata.toml"), "[decoding]\nis_strict_mode = false\n").unwrap();
    let output = cmd
        .env("CALLDATA_DECODING__IS_STRICT_MODE", "true")
        .args(["decode", "f(uint256)", "0x"])
        .assert()
        .failure()
        .get_output()
        .clone();
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("selector"), "{stderr}");
});

calldatatest!(invalid_config, |dir, cmd| {
    std::fs::write(dir.join("calldata.toml"), "[encoding]\nshould_optimize = 1\n").unwrap();
    let output = cmd.args(["sig", "f()"]).assert().failure().get_output().clone();
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to extract calldata config"), "{stderr}");
});
