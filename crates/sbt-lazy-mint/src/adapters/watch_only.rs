//! # Watch-Only Signer
//!
//! Knows an address and chain but holds no key. Used to check vouchers
//! against a claimed signer from a machine that cannot sign for it.

use crate::domain::eip712::TypedData;
use crate::domain::entities::{Address, SignatureBytes};
use crate::domain::errors::SignerError;
use crate::ports::outbound::VoucherSigner;

/// Signer capability that can report identity but never signs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WatchOnlySigner {
    address: Address,
    chain_id: Option<u64>,
}

impl WatchOnlySigner {
    pub fn new(address: Address, chain_id: Option<u64>) -> Self {
        Self { address, chain_id }
    }
}

#[async_trait::async_trait]
impl VoucherSigner for WatchOnlySigner {
    async fn sign_typed_data(&self, _data: &TypedData) -> Result<SignatureBytes, SignerError> {
        Err(SignerError::Unavailable(format!(
            "watch-only signer {} cannot sign",
            self.address
        )))
    }

    async fn chain_id(&self) -> Option<u64> {
        self.chain_id
    }

    async fn address(&self) -> Result<Address, SignerError> {
        Ok(self.address)
    }
}
