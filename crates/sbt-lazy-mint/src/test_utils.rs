//! Test utilities for lazy-mint vouchers.
//!
//! Deterministic keys and sample metadata shared by unit tests, the
//! integration crate and benchmarks. Enable with the `test-utils` feature flag.
//!
//! # Example
//!
//! ```rust
//! use sbt_lazy_mint::test_utils::{deterministic_signer, new_york_metadata};
//!
//! let signer = deterministic_signer(1);
//! assert_eq!(new_york_metadata().city, "New York");
//! # let _ = signer;
//! ```

use crate::adapters::local_signer::LocalKeySigner;
use crate::domain::entities::LocationMetadata;

/// Private key scalar `1`. Its address is the well-known
/// `0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf`.
pub const KEY_ONE: [u8; 32] = {
    let mut key = [0u8; 32];
    key[31] = 1;
    key
};

/// A signer whose key is derived from `seed`.
///
/// The same seed always yields the same address. Seed `0` is mapped to `1`
/// so the scalar is never zero.
pub fn deterministic_signer(seed: u64) -> LocalKeySigner {
    let mut key = [0u8; 32];
    key[24..].copy_from_slice(&seed.max(1).to_be_bytes());
    key[0] = 0x01;
    match LocalKeySigner::from_bytes(key) {
        Ok(signer) => signer,
        Err(_) => unreachable!("seeded key is within the curve order"),
    }
}

/// Same as [`deterministic_signer`] with a reported chain id.
pub fn deterministic_signer_on(seed: u64, chain_id: u64) -> LocalKeySigner {
    deterministic_signer(seed).with_chain_id(chain_id)
}

/// 5th Ave, New York. Latitude and longitude in micro-degrees.
pub fn new_york_metadata() -> LocationMetadata {
    LocationMetadata {
        street: "5th Ave".into(),
        city: "New York".into(),
        state: "NY".into(),
        country: "USA".into(),
        postal_code: "10001".into(),
        latitude: 40_748_817,
        longitude: -73_985_428,
        minted_at: 0,
        additional_info: String::new(),
    }
}

/// A second, unrelated address.
pub fn berlin_metadata() -> LocationMetadata {
    LocationMetadata {
        street: "Unter den Linden 77".into(),
        city: "Berlin".into(),
        state: "BE".into(),
        country: "Germany".into(),
        postal_code: "10117".into(),
        latitude: 52_516_275,
        longitude: 13_377_704,
        minted_at: 0,
        additional_info: "Hotel Adlon reception".into(),
    }
}
