//! # SBT Lazy-Mint Vouchers
//!
//! Issues and verifies EIP-712 signed vouchers that authorize minting a
//! Soulbound delivery-address token later, on-chain, by the minter.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Typed-data hashing, secp256k1 recovery, entities
//! - **Ports Layer** (`ports/`): `LazyMintApi` (inbound) and `VoucherSigner` (outbound)
//! - **Adapters** (`adapters/`): Local key signer, watch-only signer, JSON wire codec
//! - **Service Layer** (`service.rs`): Wires domain logic to ports
//!
//! ## Signed Subset
//!
//! Only `tokenId`, `minter`, `street`, `city` and `postalCode` are covered by
//! the signature. `state`, `country`, coordinates, `mintedAt` and
//! `additionalInfo` travel with the voucher but can be altered without
//! invalidating it.
//!
//! ## Security Notes
//!
//! - **Malleability Prevention (EIP-2)**: Signatures with high S values are rejected
//! - **Domain Binding**: Vouchers are bound to chain id and verifying contract

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export public API
pub use adapters::json_codec::{decode_voucher, encode_voucher, encode_voucher_pretty, CodecError};
pub use adapters::local_signer::LocalKeySigner;
pub use adapters::watch_only::WatchOnlySigner;
pub use config::{ConfigError, LazyMintConfig};
pub use domain::chains::{ChainError, SupportedChain};
pub use domain::eip712::{Eip712Domain, TypedData, LAZY_MINT_VOUCHER};
pub use domain::entities::{
    Address, BatchVerificationResult, LazyMintVoucher, LocationInput, LocationMetadata,
    SignatureBytes, VerificationResult,
};
pub use domain::errors::{SignatureError, SignerError, VerificationFailure, VoucherError};
pub use ports::inbound::LazyMintApi;
pub use ports::outbound::VoucherSigner;
pub use primitive_types::U256;
pub use service::LazyMintService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
