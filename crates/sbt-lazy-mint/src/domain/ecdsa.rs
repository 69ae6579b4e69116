//! # ECDSA Signing and Recovery (secp256k1)
//!
//! Pure domain logic for producing and recovering 65-byte `r || s || v`
//! signatures over 32-byte typed-data digests.
//!
//! ## Security Notes
//!
//! - **Malleability Prevention (EIP-2)**: S must not exceed SECP256K1_HALF_ORDER
//! - **Scalar Range Validation**: R and S must be in [1, n-1]
//! - **Constant-Time Operations**: Uses `subtle` crate for side-channel resistance
//! - Uses k256 crate for cryptographic operations

use super::entities::{Address, Hash};
use super::errors::SignatureError;
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use sha3::{Digest, Keccak256};
use subtle::{Choice, ConstantTimeEq};

/// Length of a serialized recoverable signature.
pub const SIGNATURE_LENGTH: usize = 65;

/// secp256k1 curve order n
/// n = 0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141
const SECP256K1_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
];

/// Half of the secp256k1 curve order (for malleability check).
const SECP256K1_HALF_ORDER: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B, 0x20, 0xA0,
];

/// Parsed recoverable ECDSA signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecoverableSignature {
    /// R component (32 bytes)
    pub r: [u8; 32],
    /// S component (32 bytes)
    pub s: [u8; 32],
    /// Recovery ID (0, 1, 27, or 28)
    pub v: u8,
}

impl RecoverableSignature {
    /// Split 65 raw bytes into `(r, s, v)`.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, SignatureError> {
        if bytes.len() != SIGNATURE_LENGTH {
            return Err(SignatureError::InvalidLength(bytes.len()));
        }

        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);

        Ok(Self { r, s, v: bytes[64] })
    }

    /// Serialize as `r || s || v`.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut out = [0u8; SIGNATURE_LENGTH];
        out[..32].copy_from_slice(&self.r);
        out[32..64].copy_from_slice(&self.s);
        out[64] = self.v;
        out
    }
}

// =============================================================================
// RECOVERY
// =============================================================================

/// Recover the signer address from raw signature bytes over `digest`.
///
/// Validations performed before recovery:
/// 1. Exactly 65 bytes
/// 2. R and S in [1, n-1]
/// 3. S in lower half of the curve order (EIP-2)
/// 4. Recovery ID (v) is 0, 1, 27 or 28
pub fn recover_signer(digest: &Hash, signature: &[u8]) -> Result<Address, SignatureError> {
    let signature = RecoverableSignature::from_slice(signature)?;

    if !is_valid_scalar(&signature.r) || !is_valid_scalar(&signature.s) {
        return Err(SignatureError::InvalidFormat);
    }

    if !is_low_s(&signature.s) {
        return Err(SignatureError::MalleableSignature);
    }

    recover_address(digest, &signature)
}

/// Recover the signer's address from a parsed signature.
pub fn recover_address(
    digest: &Hash,
    signature: &RecoverableSignature,
) -> Result<Address, SignatureError> {
    use zeroize::Zeroize;

    let recovery_id = parse_recovery_id(signature.v)?;

    let mut sig_bytes = [0u8; 64];
    sig_bytes[..32].copy_from_slice(&signature.r);
    sig_bytes[32..].copy_from_slice(&signature.s);

    let sig = Signature::from_slice(&sig_bytes);
    sig_bytes.zeroize();
    let sig = sig.map_err(|_| SignatureError::InvalidFormat)?;

    let recovered_key = VerifyingKey::recover_from_prehash(digest, &sig, recovery_id)
        .map_err(|_| SignatureError::RecoveryFailed)?;

    Ok(address_from_pubkey(&recovered_key))
}

// =============================================================================
// SIGNING
// =============================================================================

/// Sign a 32-byte digest, returning a low-S `r || s || v` signature with
/// `v` in {27, 28}.
pub fn sign_digest(
    signing_key: &SigningKey,
    digest: &Hash,
) -> Result<RecoverableSignature, SignatureError> {
    let (sig, recid) = signing_key
        .sign_prehash_recoverable(digest)
        .map_err(|_| SignatureError::InvalidFormat)?;

    let sig_bytes = sig.to_bytes();
    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&sig_bytes[..32]);
    s.copy_from_slice(&sig_bytes[32..]);

    // Normalize S to low value (EIP-2); inverting S flips the recovery id
    let (s, recid) = if is_low_s(&s) {
        (s, recid.to_byte())
    } else {
        (invert_s(&s), recid.to_byte() ^ 1)
    };

    Ok(RecoverableSignature { r, s, v: recid + 27 })
}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Keccak256 hash function.
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Derive Ethereum address from public key.
pub fn address_from_pubkey(public_key: &VerifyingKey) -> Address {
    let pubkey_bytes = public_key.to_encoded_point(false);
    let pubkey_slice = pubkey_bytes.as_bytes();

    // Keccak256 hash of public key (without 0x04 prefix)
    let hash = keccak256(&pubkey_slice[1..]);

    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    Address(address)
}

/// Check if S value is in lower half of curve order (EIP-2 malleability protection).
///
/// Per EIP-2: S <= floor(n/2), the bound on-chain `ecrecover` wrappers enforce.
/// Runs in constant time.
fn is_low_s(s: &[u8; 32]) -> bool {
    (!ct_less_than(&SECP256K1_HALF_ORDER, s)).into()
}

/// Check if a scalar value is in valid range [1, n-1] for ECDSA.
///
/// Runs in constant time.
fn is_valid_scalar(scalar: &[u8; 32]) -> bool {
    let mut is_zero = Choice::from(1u8);
    for &byte in scalar {
        is_zero &= byte.ct_eq(&0u8);
    }

    (!is_zero & ct_less_than(scalar, &SECP256K1_ORDER)).into()
}

/// Constant-time big-endian `a < b`.
fn ct_less_than(a: &[u8; 32], b: &[u8; 32]) -> Choice {
    let mut less = Choice::from(0u8);
    let mut greater = Choice::from(0u8);

    for i in 0..32 {
        let not_decided = !(less | greater);
        let byte_less = Choice::from((a[i] < b[i]) as u8);
        let byte_greater = Choice::from((a[i] > b[i]) as u8);

        less |= not_decided & byte_less;
        greater |= not_decided & byte_greater;
    }

    less
}

/// Parse recovery ID from v value.
///
/// Valid v values: 0, 1, 27, 28
fn parse_recovery_id(v: u8) -> Result<RecoveryId, SignatureError> {
    let id = match v {
        0 | 27 => 0,
        1 | 28 => 1,
        _ => return Err(SignatureError::InvalidRecoveryId(v)),
    };

    RecoveryId::try_from(id).map_err(|_| SignatureError::InvalidRecoveryId(v))
}

/// Invert S value: s' = n - s
pub fn invert_s(s: &[u8; 32]) -> [u8; 32] {
    let mut result = [0u8; 32];
    let mut borrow: i32 = 0;

    for i in (0..32).rev() {
        let diff = (SECP256K1_ORDER[i] as i32) - (s[i] as i32) - borrow;
        if diff < 0 {
            result[i] = (diff + 256) as u8;
            borrow = 1;
        } else {
            result[i] = diff as u8;
            borrow = 0;
        }
    }

    result
}
