//! # Outbound Ports (Driven Ports / SPI)
//!
//! The Signer capability: a wallet or key that signs structured data and
//! reports its address and chain.

use crate::domain::eip712::TypedData;
use crate::domain::entities::{Address, SignatureBytes};
use crate::domain::errors::SignerError;

/// Signer capability consumed by the voucher service.
///
/// Calls may suspend indefinitely (e.g. an unanswered wallet prompt); the
/// service imposes no timeout.
#[async_trait::async_trait]
pub trait VoucherSigner: Send + Sync {
    /// Sign `{domain, schema, value}`.
    ///
    /// # Errors
    /// * `SignerError::Rejected` - The user declined the prompt
    /// * `SignerError::Disconnected` - Wallet or provider unreachable
    /// * `SignerError::Unavailable` - The signer cannot sign (e.g. watch-only)
    async fn sign_typed_data(&self, data: &TypedData) -> Result<SignatureBytes, SignerError>;

    /// Chain the signer is connected to, if it can report one.
    async fn chain_id(&self) -> Option<u64> {
        None
    }

    /// The signer's own address (the "claimed signer" during verification).
    async fn address(&self) -> Result<Address, SignerError>;
}

#[async_trait::async_trait]
impl<S: VoucherSigner + ?Sized> VoucherSigner for std::sync::Arc<S> {
    async fn sign_typed_data(&self, data: &TypedData) -> Result<SignatureBytes, SignerError> {
        (**self).sign_typed_data(data).await
    }

    async fn chain_id(&self) -> Option<u64> {
        (**self).chain_id().await
    }

    async fn address(&self) -> Result<Address, SignerError> {
        (**self).address().await
    }
}
