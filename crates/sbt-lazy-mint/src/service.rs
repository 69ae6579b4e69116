//! # Lazy-Mint Voucher Service
//!
//! Application service layer that implements the `LazyMintApi` trait.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Implements the inbound port (`LazyMintApi`)
//! - Uses the outbound port (`VoucherSigner`) for signatures, chain id and
//!   the claimed signer address
//! - Delegates typed-data hashing and recovery to the domain layer
//!
//! The service holds no mutable state. Each call rebuilds its own domain,
//! schema and value, so calls may run concurrently without coordination.

use crate::config::LazyMintConfig;
use crate::domain::chains::SupportedChain;
use crate::domain::ecdsa;
use crate::domain::eip712::{voucher_typed_data, Eip712Domain, TypedData};
use crate::domain::entities::{
    Address, BatchVerificationResult, Hash, LazyMintVoucher, LocationMetadata,
    VerificationResult,
};
use crate::domain::errors::{SignerError, VerificationFailure, VoucherError};
use crate::ports::inbound::LazyMintApi;
use crate::ports::outbound::VoucherSigner;
use primitive_types::U256;
use rayon::prelude::*;
use tracing::{debug, info, warn};

/// Lazy-mint voucher service.
///
/// Holds a Signer capability and the verifying-contract configuration for
/// its whole lifetime; there is no reconfiguration.
pub struct LazyMintService<S: VoucherSigner> {
    signer: S,
    config: LazyMintConfig,
}

impl<S: VoucherSigner> LazyMintService<S> {
    /// Create a service for `verifying_contract` with default domain settings.
    pub fn new(signer: S, verifying_contract: Address) -> Self {
        Self::with_config(signer, LazyMintConfig::new(verifying_contract))
    }

    /// Create a service from an explicit configuration.
    pub fn with_config(signer: S, config: LazyMintConfig) -> Self {
        Self { signer, config }
    }

    pub fn config(&self) -> &LazyMintConfig {
        &self.config
    }

    pub fn signer(&self) -> &S {
        &self.signer
    }

    /// Domain record for the chain the signer currently reports.
    ///
    /// A missing or zero chain id falls back to the configured default.
    async fn current_domain(&self) -> Eip712Domain {
        let chain_id = self
            .signer
            .chain_id()
            .await
            .filter(|id| *id != 0)
            .unwrap_or(self.config.fallback_chain_id);

        if SupportedChain::from_chain_id(chain_id).is_err() {
            warn!(chain_id, "Signer reports a chain outside the deployment registry");
        }

        self.config.domain(chain_id)
    }
}

#[async_trait::async_trait]
impl<S: VoucherSigner> LazyMintApi for LazyMintService<S> {
    async fn create_voucher(
        &self,
        token_id: U256,
        minter: Address,
        metadata: LocationMetadata,
    ) -> Result<LazyMintVoucher, VoucherError> {
        let domain = self.current_domain().await;
        let chain_id = domain.chain_id;
        let typed_data = voucher_typed_data(domain, token_id, minter, &metadata);
        let digest = signing_digest(&typed_data)?;
        debug!(%token_id, chain_id, digest = %hex::encode(digest), "Requesting voucher signature");

        let signature = self
            .signer
            .sign_typed_data(&typed_data)
            .await
            .map_err(|e| {
                warn!(%token_id, %minter, error = %e, "Voucher signing failed");
                VoucherError::SigningFailed(e)
            })?;

        info!(%token_id, %minter, chain_id, "Lazy-mint voucher issued");

        Ok(LazyMintVoucher {
            token_id,
            minter,
            metadata,
            signature,
        })
    }

    async fn verify_voucher(&self, voucher: &LazyMintVoucher) -> bool {
        self.inspect_voucher(voucher).await.valid
    }

    async fn inspect_voucher(&self, voucher: &LazyMintVoucher) -> VerificationResult {
        let domain = self.current_domain().await;
        let expected = self.signer.address().await;

        let result = verify_against(&domain, voucher, &expected);
        if let Some(error) = &result.error {
            warn!(
                token_id = %voucher.token_id,
                chain_id = domain.chain_id,
                error = %error,
                "Voucher verification failed"
            );
        }
        result
    }

    async fn verify_batch(&self, vouchers: &[LazyMintVoucher]) -> BatchVerificationResult {
        let domain = self.current_domain().await;
        let expected = self.signer.address().await;

        let results: Vec<VerificationResult> = vouchers
            .par_iter()
            .map(|voucher| verify_against(&domain, voucher, &expected))
            .collect();

        let batch = BatchVerificationResult::from_results(results);
        debug!(
            total = vouchers.len(),
            valid = batch.valid_count,
            invalid = batch.invalid_count,
            "Batch voucher verification complete"
        );
        batch
    }
}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Digest the signer is about to be asked for. Encoding failures are
/// reported before any wallet prompt.
fn signing_digest(typed_data: &TypedData) -> Result<Hash, VoucherError> {
    Ok(typed_data.signing_hash()?)
}

/// Rebuild the signed value from the voucher and compare the recovered
/// signer with `expected`.
fn verify_against(
    domain: &Eip712Domain,
    voucher: &LazyMintVoucher,
    expected: &Result<Address, SignerError>,
) -> VerificationResult {
    let chain_id = domain.chain_id;
    let typed_data = voucher_typed_data(
        domain.clone(),
        voucher.token_id,
        voucher.minter,
        &voucher.metadata,
    );

    let recovered = match typed_data
        .signing_hash()
        .and_then(|digest| ecdsa::recover_signer(&digest, voucher.signature.as_slice()))
    {
        Ok(address) => address,
        Err(e) => {
            return VerificationResult::unrecoverable(e, expected.as_ref().ok().copied(), chain_id)
        }
    };

    match expected {
        Ok(expected) if *expected == recovered => VerificationResult::valid(recovered, chain_id),
        Ok(expected) => VerificationResult::invalid(
            VerificationFailure::SignerMismatch {
                expected: *expected,
                actual: recovered,
            },
            Some(recovered),
            Some(*expected),
            chain_id,
        ),
        Err(e) => VerificationResult::invalid(
            VerificationFailure::SignerUnavailable(e.clone()),
            Some(recovered),
            None,
            chain_id,
        ),
    }
}

// =============================================================================
// TESTS
// =============================================================================
