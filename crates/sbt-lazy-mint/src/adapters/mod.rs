//! # Adapters Layer
//!
//! Concrete Signer capabilities and the voucher wire codec.

pub mod json_codec;
pub mod local_signer;
pub mod watch_only;
