//! # Local Key Signer
//!
//! A Signer capability backed by an in-process secp256k1 key. Signing is
//! deterministic (RFC 6979) and always yields low-S signatures.

use crate::domain::ecdsa::{address_from_pubkey, sign_digest};
use crate::domain::eip712::TypedData;
use crate::domain::entities::{Address, SignatureBytes};
use crate::domain::errors::SignerError;
use crate::ports::outbound::VoucherSigner;
use k256::ecdsa::SigningKey;
use std::fmt;
use tracing::debug;
use zeroize::Zeroize;

/// secp256k1 key held in memory.
#[derive(Clone)]
pub struct LocalKeySigner {
    signing_key: SigningKey,
    address: Address,
    chain_id: Option<u64>,
}

impl LocalKeySigner {
    /// Generate a random key.
    pub fn random() -> Self {
        Self::from_signing_key(SigningKey::random(&mut rand::thread_rng()))
    }

    /// Create from secret key bytes (32 bytes).
    pub fn from_bytes(bytes: [u8; 32]) -> Result<Self, SignerError> {
        let signing_key =
            SigningKey::from_bytes((&bytes).into()).map_err(|_| SignerError::InvalidKey)?;
        Ok(Self::from_signing_key(signing_key))
    }

    /// Create from a hex secret key, with or without `0x`.
    pub fn from_hex(secret: &str) -> Result<Self, SignerError> {
        let digits = secret.trim().strip_prefix("0x").unwrap_or(secret.trim());
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(digits, &mut bytes).map_err(|_| SignerError::InvalidKey)?;
        let signer = Self::from_bytes(bytes);
        bytes.zeroize();
        signer
    }

    fn from_signing_key(signing_key: SigningKey) -> Self {
        let address = address_from_pubkey(signing_key.verifying_key());
        Self {
            signing_key,
            address,
            chain_id: None,
        }
    }

    /// Report `chain_id` from [`VoucherSigner::chain_id`].
    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = Some(chain_id);
        self
    }

    /// The account address for this key.
    pub fn account(&self) -> Address {
        self.address
    }

    /// Secret key bytes (for key export).
    pub fn to_bytes(&self) -> [u8; 32] {
        self.signing_key.to_bytes().into()
    }
}

impl fmt::Debug for LocalKeySigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalKeySigner")
            .field("address", &self.address)
            .field("chain_id", &self.chain_id)
            .finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl VoucherSigner for LocalKeySigner {
    async fn sign_typed_data(&self, data: &TypedData) -> Result<SignatureBytes, SignerError> {
        let digest = data
            .signing_hash()
            .map_err(|e| SignerError::Unavailable(e.to_string()))?;

        let signature = sign_digest(&self.signing_key, &digest)
            .map_err(|e| SignerError::Unavailable(e.to_string()))?;

        debug!(
            signer = %self.address,
            digest = %hex::encode(digest),
            "Signed typed data"
        );

        Ok(SignatureBytes(signature.to_bytes().to_vec()))
    }

    async fn chain_id(&self) -> Option<u64> {
        self.chain_id
    }

    async fn address(&self) -> Result<Address, SignerError> {
        Ok(self.address)
    }
}
