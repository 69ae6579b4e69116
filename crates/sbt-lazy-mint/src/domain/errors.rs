//! # Voucher Errors
//!
//! Error types for voucher construction and signature recovery.
//!
//! Only [`VoucherError::SigningFailed`] is surfaced by voucher issuance in
//! normal operation. Recovery failures ([`SignatureError`]) never escape
//! verification; the service maps them to `false`.

use super::entities::Address;
use thiserror::Error;

/// Errors reported by the Signer capability.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignerError {
    /// The wallet holder declined the signing prompt
    #[error("Signing request rejected by user")]
    Rejected,

    /// The wallet or provider is not reachable
    #[error("Signer disconnected: {0}")]
    Disconnected(String),

    /// The signer cannot perform the requested operation
    #[error("Signer unavailable: {0}")]
    Unavailable(String),

    /// Private key material is not a valid secp256k1 scalar
    #[error("Invalid signing key")]
    InvalidKey,
}

/// Errors raised while recovering a signer from a typed-data signature.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// Signature is not exactly 65 bytes (r || s || v)
    #[error("Invalid signature length: expected 65 bytes, got {0}")]
    InvalidLength(usize),

    /// R or S is outside [1, n-1]
    #[error("Invalid signature format")]
    InvalidFormat,

    /// Signature has high S value (EIP-2 malleability protection)
    #[error("Malleable signature (high S value)")]
    MalleableSignature,

    /// Invalid recovery ID (v must be 0, 1, 27, or 28)
    #[error("Invalid recovery ID: {0}")]
    InvalidRecoveryId(u8),

    /// Failed to recover public key from signature
    #[error("Failed to recover public key")]
    RecoveryFailed,

    /// Typed-data value does not match its schema
    #[error("Typed data does not match schema: {0}")]
    SchemaMismatch(String),
}

/// Errors surfaced by the lazy-mint voucher service.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VoucherError {
    /// The Signer capability could not produce a signature
    #[error("Signing failed: {0}")]
    SigningFailed(#[from] SignerError),

    /// Address string is malformed or fails its EIP-55 checksum
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Coordinate cannot be represented as degrees x 10^6
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// Typed data could not be encoded for signing
    #[error("Invalid typed data: {0}")]
    InvalidTypedData(#[from] SignatureError),
}

/// Why a voucher failed verification.
///
/// Diagnostic only: callers of `verify_voucher` see a plain `false`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VerificationFailure {
    /// The signature could not be parsed or recovered
    #[error("Signature recovery failed: {0}")]
    Signature(#[from] SignatureError),

    /// Recovered signer does not match the claimed signer
    #[error("Signer mismatch: expected {expected}, recovered {actual}")]
    SignerMismatch { expected: Address, actual: Address },

    /// The Signer capability could not report its address
    #[error("Claimed signer unavailable: {0}")]
    SignerUnavailable(SignerError),
}
