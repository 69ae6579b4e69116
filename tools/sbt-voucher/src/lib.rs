//! SBT Voucher: command-line issuer and verifier for lazy-mint vouchers.
//!
//! The binary is a thin clap wrapper; everything it does lives in
//! [`commands`] so it can be exercised without spawning a process.
//!
//! The domain version, name and fallback chain id come from the `SBT_*`
//! variables read by `LazyMintConfig::from_env`.
//!
//! ```text
//! sbt-voucher keygen
//! sbt-voucher issue  --key <hex> --chain base --contract 0x… --token-id 42 --metadata addr.json
//! sbt-voucher verify --voucher voucher.json --signer 0x… --chain base --contract 0x…
//! ```

pub mod commands;

pub use commands::{
    parse_chain, resolve_config, CommandError, IssueRequest, KeyPair, VerifyRequest,
};
