//! # Inbound Ports (Driving Ports / API)
//!
//! Traits that define the public API of the lazy-mint subsystem.

use crate::domain::entities::{
    Address, BatchVerificationResult, LazyMintVoucher, LocationMetadata, VerificationResult,
};
use crate::domain::errors::VoucherError;
use primitive_types::U256;

/// Primary lazy-mint voucher API.
///
/// Implementations hold no mutable state between calls and must be
/// thread-safe (`Send + Sync`).
#[async_trait::async_trait]
pub trait LazyMintApi: Send + Sync {
    /// Issue a voucher authorizing `minter` to mint `token_id` with `metadata`.
    ///
    /// # Errors
    /// * `VoucherError::SigningFailed` - The signer failed or the user rejected
    async fn create_voucher(
        &self,
        token_id: U256,
        minter: Address,
        metadata: LocationMetadata,
    ) -> Result<LazyMintVoucher, VoucherError>;

    /// Check that the voucher was signed by the signer's current address on
    /// its current chain. Never errors; any failure is `false`.
    async fn verify_voucher(&self, voucher: &LazyMintVoucher) -> bool;

    /// Same check as [`verify_voucher`](Self::verify_voucher), with details.
    async fn inspect_voucher(&self, voucher: &LazyMintVoucher) -> VerificationResult;

    /// Verify many vouchers against one claimed signer and chain.
    async fn verify_batch(&self, vouchers: &[LazyMintVoucher]) -> BatchVerificationResult;
}
