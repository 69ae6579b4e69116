//! # Domain Entities
//!
//! Core value types for lazy-mint vouchers: addresses, location metadata,
//! raw signature bytes and verification results.

use super::coordinates::{degrees_to_fixed, Axis};
use super::ecdsa::keccak256;
use super::errors::{SignatureError, VerificationFailure, VoucherError};
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DeserializeFromStr, DisplayFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;

/// 32-byte Keccak-256 output.
pub type Hash = [u8; 32];

// =============================================================================
// Address
// =============================================================================

/// Ethereum-style account address (last 20 bytes of keccak256(pubkey)).
///
/// Displays in EIP-55 checksummed form. Equality is byte equality, so two
/// address strings that differ only in case compare equal once parsed.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, SerializeDisplay, DeserializeFromStr)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The zero address.
    pub const ZERO: Address = Address([0u8; 20]);

    /// Raw address bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// EIP-55 mixed-case checksum encoding, `0x`-prefixed.
    pub fn to_checksum(&self) -> String {
        let lower = hex::encode(self.0);
        let hash = keccak256(lower.as_bytes());

        let mut out = String::with_capacity(42);
        out.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            let nibble = if i % 2 == 0 {
                hash[i / 2] >> 4
            } else {
                hash[i / 2] & 0x0f
            };
            if c.is_ascii_alphabetic() && nibble >= 8 {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
        }
        out
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl FromStr for Address {
    type Err = VoucherError;

    /// Parse a `0x`-prefixed hex address.
    ///
    /// Single-case input is accepted as-is; mixed-case input must carry a
    /// valid EIP-55 checksum.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or_else(|| VoucherError::InvalidAddress(format!("missing 0x prefix: {s}")))?;

        if digits.len() != 40 {
            return Err(VoucherError::InvalidAddress(format!(
                "expected 40 hex digits, got {}",
                digits.len()
            )));
        }

        let mut bytes = [0u8; 20];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|e| VoucherError::InvalidAddress(format!("{s}: {e}")))?;
        let address = Address(bytes);

        let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
        let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());
        if has_lower && has_upper && address.to_checksum()[2..] != *digits {
            return Err(VoucherError::InvalidAddress(format!("bad checksum: {s}")));
        }

        Ok(address)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_checksum())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_checksum())
    }
}

// =============================================================================
// Signature bytes
// =============================================================================

/// Opaque signature bytes as produced by a Signer capability.
///
/// Held unparsed so that structurally wrong signatures (wrong length,
/// corrupted bytes) survive transport and fail at verification time.
/// Encodes as `0x`-prefixed hex.
#[derive(Clone, Default, PartialEq, Eq, Hash, SerializeDisplay, DeserializeFromStr)]
pub struct SignatureBytes(pub Vec<u8>);

impl SignatureBytes {
    /// Borrow the raw bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Number of bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no bytes are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for SignatureBytes {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl FromStr for SignatureBytes {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        hex::decode(digits).map(Self)
    }
}

impl fmt::Display for SignatureBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0))
    }
}

impl fmt::Debug for SignatureBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SignatureBytes({self})")
    }
}

// =============================================================================
// Location metadata
// =============================================================================

/// The tokenized delivery address.
///
/// Coordinates are fixed-point degrees x 10^6. `minted_at` is zero when a
/// voucher is issued and filled in by the contract at redemption.
///
/// Only street, city and postal code are signed. State, country,
/// coordinates and additional info can be rewritten in transit without
/// invalidating the voucher.
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationMetadata {
    pub street: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
    #[serde_as(as = "DisplayFromStr")]
    pub latitude: i64,
    #[serde_as(as = "DisplayFromStr")]
    pub longitude: i64,
    #[serde_as(as = "DisplayFromStr")]
    pub minted_at: u64,
    #[serde(default)]
    pub additional_info: String,
}

/// The subset of [`LocationMetadata`] committed to a voucher signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignedLocation<'a> {
    pub street: &'a str,
    pub city: &'a str,
    pub postal_code: &'a str,
}

impl LocationMetadata {
    /// Build metadata from form input, converting degrees to fixed point.
    ///
    /// `minted_at` is always zero.
    pub fn from_input(input: LocationInput) -> Result<Self, VoucherError> {
        let latitude = degrees_to_fixed(input.latitude, Axis::Latitude)?;
        let longitude = degrees_to_fixed(input.longitude, Axis::Longitude)?;

        Ok(Self {
            street: input.street,
            city: input.city,
            state: input.state,
            country: input.country,
            postal_code: input.postal_code,
            latitude,
            longitude,
            minted_at: 0,
            additional_info: input.additional_info.unwrap_or_default(),
        })
    }

    /// Fields that participate in the signed digest.
    ///
    /// State, country, coordinates and additional info are carried alongside
    /// the voucher but are not signed.
    pub fn signed_fields(&self) -> SignedLocation<'_> {
        SignedLocation {
            street: &self.street,
            city: &self.city,
            postal_code: &self.postal_code,
        }
    }
}

/// Address form input with floating-point coordinates in degrees.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationInput {
    pub street: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub additional_info: Option<String>,
}

impl TryFrom<LocationInput> for LocationMetadata {
    type Error = VoucherError;

    fn try_from(input: LocationInput) -> Result<Self, Self::Error> {
        LocationMetadata::from_input(input)
    }
}

// =============================================================================
// Voucher
// =============================================================================

/// A signed authorization for `minter` to mint `token_id` with `metadata`.
///
/// Immutable once issued. Only `token_id`, `minter` and the fields returned
/// by [`LocationMetadata::signed_fields`] are covered by `signature`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LazyMintVoucher {
    #[serde(with = "u256_decimal")]
    pub token_id: U256,
    pub minter: Address,
    pub metadata: LocationMetadata,
    pub signature: SignatureBytes,
}

/// Serde helpers carrying a `U256` as a decimal string.
pub mod u256_decimal {
    use primitive_types::U256;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(D::Error::custom(format!("not a decimal integer: {s:?}")));
        }
        U256::from_dec_str(&s).map_err(|e| D::Error::custom(format!("{s}: {e:?}")))
    }
}

// =============================================================================
// Verification results
// =============================================================================

/// Outcome of verifying one voucher.
#[derive(Clone, Debug)]
pub struct VerificationResult {
    /// Whether the recovered signer matches the claimed signer
    pub valid: bool,
    /// Signer implied by the signature, if recovery succeeded
    pub recovered_signer: Option<Address>,
    /// Address the Signer capability reported, if available
    pub expected_signer: Option<Address>,
    /// Chain id used in the rebuilt domain
    pub chain_id: u64,
    /// Why verification failed
    pub error: Option<VerificationFailure>,
}

impl VerificationResult {
    /// Create a successful verification result.
    pub fn valid(signer: Address, chain_id: u64) -> Self {
        Self {
            valid: true,
            recovered_signer: Some(signer),
            expected_signer: Some(signer),
            chain_id,
            error: None,
        }
    }

    /// Create a failed verification result.
    pub fn invalid(
        error: VerificationFailure,
        recovered_signer: Option<Address>,
        expected_signer: Option<Address>,
        chain_id: u64,
    ) -> Self {
        Self {
            valid: false,
            recovered_signer,
            expected_signer,
            chain_id,
            error: Some(error),
        }
    }

    /// Shorthand for a recovery failure.
    pub fn unrecoverable(error: SignatureError, expected: Option<Address>, chain_id: u64) -> Self {
        Self::invalid(error.into(), None, expected, chain_id)
    }
}

/// Result of verifying several vouchers against one claimed signer.
#[derive(Clone, Debug)]
pub struct BatchVerificationResult {
    /// Individual results, in input order
    pub results: Vec<VerificationResult>,
    /// Whether all verifications passed
    pub all_valid: bool,
    /// Count of valid vouchers
    pub valid_count: usize,
    /// Count of invalid vouchers
    pub invalid_count: usize,
}

impl BatchVerificationResult {
    /// Create a batch result from individual results.
    pub fn from_results(results: Vec<VerificationResult>) -> Self {
        let valid_count = results.iter().filter(|r| r.valid).count();
        let invalid_count = results.len() - valid_count;
        let all_valid = invalid_count == 0;

        Self {
            results,
            all_valid,
            valid_count,
            invalid_count,
        }
    }
}
