//! # Signer Flows
//!
//! Issuer and verifier running with different Signer capabilities:
//!
//! 1. **Watch-only verification**: the verifier knows the issuer's address, not its key
//! 2. **Shared signer**: several services hold one `Arc` signer
//! 3. **Wallet without chain id**: falls back to the configured chain
//! 4. **Concurrent calls**: no coordination between in-flight operations

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use sbt_lazy_mint::test_utils::{
        berlin_metadata, deterministic_signer, deterministic_signer_on, new_york_metadata,
    };
    use sbt_lazy_mint::{
        Address, LazyMintApi, LazyMintConfig, LazyMintService, LocalKeySigner, SignatureBytes,
        SignerError, TypedData, VoucherError, VoucherSigner, WatchOnlySigner, U256,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    /// Wallet that prompts a user: declines every second request and never
    /// reports a chain id.
    struct FlakyWallet {
        key: LocalKeySigner,
        prompts: std::sync::atomic::AtomicUsize,
    }

    #[async_trait::async_trait]
    impl VoucherSigner for FlakyWallet {
        async fn sign_typed_data(&self, data: &TypedData) -> Result<SignatureBytes, SignerError> {
            let n = self
                .prompts
                .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            if n % 2 == 1 {
                return Err(SignerError::Rejected);
            }
            self.key.sign_typed_data(data).await
        }

        async fn address(&self) -> Result<Address, SignerError> {
            Ok(self.key.account())
        }
    }

    fn contract() -> Address {
        LazyMintConfig::for_testing().verifying_contract
    }

    // =============================================================================
    // WATCH-ONLY VERIFICATION
    // =============================================================================

    #[tokio::test]
    async fn test_watch_only_verifier_accepts_issuer_vouchers() {
        let issuer = LazyMintService::new(deterministic_signer_on(3, 8453), contract());
        let minter = deterministic_signer(4).account();
        let voucher = issuer
            .create_voucher(U256::from(7u64), minter, berlin_metadata())
            .await
            .unwrap();

        let verifier = LazyMintService::new(
            WatchOnlySigner::new(issuer.signer().account(), Some(8453)),
            contract(),
        );
        assert!(verifier.verify_voucher(&voucher).await);

        let stranger = LazyMintService::new(
            WatchOnlySigner::new(deterministic_signer(5).account(), Some(8453)),
            contract(),
        );
        assert!(!stranger.verify_voucher(&voucher).await);
    }

    #[tokio::test]
    async fn test_watch_only_cannot_issue() {
        let service = LazyMintService::new(WatchOnlySigner::new(Address::ZERO, None), contract());
        let result = service
            .create_voucher(U256::one(), Address::ZERO, new_york_metadata())
            .await;
        assert!(matches!(
            result,
            Err(VoucherError::SigningFailed(SignerError::Unavailable(_)))
        ));
    }

    // =============================================================================
    // SHARED SIGNER
    // =============================================================================

    #[tokio::test]
    async fn test_services_share_one_signer() {
        let signer = Arc::new(deterministic_signer_on(6, 10));
        let issuer = LazyMintService::new(Arc::clone(&signer), contract());
        let verifier = LazyMintService::new(Arc::clone(&signer), contract());

        let voucher = issuer
            .create_voucher(U256::from(1_000u64), signer.account(), new_york_metadata())
            .await
            .unwrap();
        assert!(verifier.verify_voucher(&voucher).await);
    }

    // =============================================================================
    // WALLET WITHOUT CHAIN ID
    // =============================================================================

    #[tokio::test]
    async fn test_wallet_without_chain_uses_fallback() {
        let wallet = FlakyWallet {
            key: deterministic_signer(7),
            prompts: Default::default(),
        };
        let service = LazyMintService::with_config(
            wallet,
            LazyMintConfig {
                fallback_chain_id: 10,
                ..LazyMintConfig::for_testing()
            },
        );
        let voucher = service
            .create_voucher(U256::one(), Address([0x22; 20]), new_york_metadata())
            .await
            .unwrap();

        let result = service.inspect_voucher(&voucher).await;
        assert!(result.valid);
        assert_eq!(result.chain_id, 10);

        // Issued under the fallback chain, so a verifier on mainnet disagrees
        let mainnet = LazyMintService::new(
            WatchOnlySigner::new(deterministic_signer(7).account(), Some(1)),
            contract(),
        );
        assert!(!mainnet.verify_voucher(&voucher).await);
    }

    #[tokio::test]
    async fn test_declined_prompt_is_reported_once() {
        let wallet = FlakyWallet {
            key: deterministic_signer(8),
            prompts: Default::default(),
        };
        let service = LazyMintService::new(wallet, contract());

        assert!(service
            .create_voucher(U256::one(), Address::ZERO, new_york_metadata())
            .await
            .is_ok());
        assert_eq!(
            service
                .create_voucher(U256::from(2u64), Address::ZERO, new_york_metadata())
                .await
                .unwrap_err(),
            VoucherError::SigningFailed(SignerError::Rejected)
        );
        assert_eq!(
            service
                .signer()
                .prompts
                .load(std::sync::atomic::Ordering::SeqCst),
            2
        );
    }

    // =============================================================================
    // CONCURRENT CALLS
    // =============================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_issue_and_verify() {
        let service = Arc::new(LazyMintService::new(
            deterministic_signer_on(9, 42_161),
            contract(),
        ));
        let minter = service.signer().account();

        let handles: Vec<_> = (0..32u64)
            .map(|i| {
                let service = Arc::clone(&service);
                tokio::spawn(async move {
                    let mut metadata = new_york_metadata();
                    metadata.street = format!("{i} 5th Ave");
                    let voucher = service
                        .create_voucher(U256::from(i), minter, metadata)
                        .await
                        .unwrap();
                    (voucher.clone(), service.verify_voucher(&voucher).await)
                })
            })
            .collect();

        let mut vouchers = Vec::new();
        for handle in handles {
            let (voucher, valid) = handle.await.unwrap();
            assert!(valid);
            vouchers.push(voucher);
        }

        let batch = service.verify_batch(&vouchers).await;
        assert!(batch.all_valid);
        assert_eq!(batch.valid_count, 32);
    }
}
