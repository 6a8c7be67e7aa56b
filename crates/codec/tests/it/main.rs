mod optimizer;
mod oracle;
mod roundtrip;
mod scenarios;
mod utils;
