//! # Voucher Wire Codec
//!
//! JSON envelope used to hand vouchers to a redemption endpoint.
//!
//! Format version 1:
//!
//! ```text
//! {
//!   "format": 1,
//!   "tokenId": "42",                 // decimal string (uint256)
//!   "minter": "0x…",                 // EIP-55 checksummed
//!   "metadata": {
//!     "street": "…", "city": "…", "state": "…", "country": "…",
//!     "postalCode": "…",
//!     "latitude": "40748817",        // degrees x 10^6, decimal string
//!     "longitude": "-73985428",
//!     "mintedAt": "0",
//!     "additionalInfo": "…"
//!   },
//!   "signature": "0x…"               // r || s || v, hex
//! }
//! ```
//!
//! The signed schema is `LazyMintVoucher(uint256 tokenId,address minter,
//! string street,string city,string postalCode)` under domain
//! `DeliveryAddressSBT` version `1`.

use crate::domain::entities::LazyMintVoucher;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Current envelope format version.
pub const WIRE_FORMAT_VERSION: u64 = 1;

/// Wire codec errors.
#[derive(Debug, Error)]
pub enum CodecError {
    /// JSON is malformed or does not match the envelope shape
    #[error("Malformed voucher JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The envelope has no numeric `format` field
    #[error("Voucher envelope is missing its format version")]
    MissingFormat,

    /// The envelope was written by an incompatible encoder
    #[error("Unsupported voucher format version: {0}")]
    UnsupportedFormat(u64),
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    format: u64,
    #[serde(flatten)]
    voucher: &'a LazyMintVoucher,
}

#[derive(Deserialize)]
struct Envelope {
    #[allow(dead_code)]
    format: u64,
    #[serde(flatten)]
    voucher: LazyMintVoucher,
}

fn envelope(voucher: &LazyMintVoucher) -> EnvelopeRef<'_> {
    EnvelopeRef {
        format: WIRE_FORMAT_VERSION,
        voucher,
    }
}

/// Encode a voucher as compact JSON.
pub fn encode_voucher(voucher: &LazyMintVoucher) -> Result<String, CodecError> {
    Ok(serde_json::to_string(&envelope(voucher))?)
}

/// Encode a voucher as indented JSON.
pub fn encode_voucher_pretty(voucher: &LazyMintVoucher) -> Result<String, CodecError> {
    Ok(serde_json::to_string_pretty(&envelope(voucher))?)
}

/// Decode a voucher, rejecting unknown format versions.
///
/// A signature of the wrong length decodes successfully; it is rejected by
/// verification instead.
pub fn decode_voucher(json: &str) -> Result<LazyMintVoucher, CodecError> {
    let value: Value = serde_json::from_str(json)?;

    let format = value
        .get("format")
        .and_then(Value::as_u64)
        .ok_or(CodecError::MissingFormat)?;
    if format != WIRE_FORMAT_VERSION {
        return Err(CodecError::UnsupportedFormat(format));
    }

    let envelope: Envelope = serde_json::from_value(value)?;
    Ok(envelope.voucher)
}
