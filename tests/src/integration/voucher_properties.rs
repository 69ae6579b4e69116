//! # Voucher Issue/Verify Properties
//!
//! Invariants that must hold for any voucher issued through
//! `LazyMintService`:
//!
//! 1. **Round trip**: a voucher verifies under the signer and chain that issued it
//! 2. **Signed subset**: mutating tokenId, minter, street, city or postalCode invalidates it
//! 3. **Unsigned fields**: state, country, coordinates and additionalInfo do not
//! 4. **Domain binding**: a different chain or verifying contract invalidates it
//! 5. **Malformed signatures**: verification answers `false`, never an error

#[cfg(test)]
mod tests {
    use rand::Rng;
    use sbt_lazy_mint::domain::ecdsa::{invert_s, RecoverableSignature};
    use sbt_lazy_mint::test_utils::{
        berlin_metadata, deterministic_signer, deterministic_signer_on, new_york_metadata,
    };
    use sbt_lazy_mint::{
        Address, LazyMintApi, LazyMintConfig, LazyMintService, LazyMintVoucher, LocalKeySigner,
        SignatureBytes, SignatureError, VerificationFailure, U256,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn contract() -> Address {
        LazyMintConfig::for_testing().verifying_contract
    }

    fn service_on(chain_id: u64) -> LazyMintService<LocalKeySigner> {
        LazyMintService::new(deterministic_signer_on(1, chain_id), contract())
    }

    async fn issue_new_york(service: &LazyMintService<LocalKeySigner>) -> LazyMintVoucher {
        let minter = service.signer().account();
        service
            .create_voucher(U256::from(42u64), minter, new_york_metadata())
            .await
            .unwrap()
    }

    // =============================================================================
    // ROUND TRIP
    // =============================================================================

    #[tokio::test]
    async fn test_new_york_voucher_verifies_and_boston_does_not() {
        let service = service_on(1);
        let voucher = issue_new_york(&service).await;
        assert!(service.verify_voucher(&voucher).await);

        let mut boston = voucher.clone();
        boston.metadata.city = "Boston".into();
        assert!(!service.verify_voucher(&boston).await);
    }

    #[tokio::test]
    async fn test_random_vouchers_round_trip() {
        let service = service_on(137);
        let minter = service.signer().account();
        let mut rng = rand::thread_rng();

        for _ in 0..16 {
            let token_id = U256::from(rng.gen::<u64>()) << 128;
            let mut metadata = berlin_metadata();
            metadata.street = format!("Street {}", rng.gen::<u32>());
            metadata.postal_code = format!("{:05}", rng.gen_range(0..100_000));

            let voucher = service
                .create_voucher(token_id, minter, metadata)
                .await
                .unwrap();
            assert!(service.verify_voucher(&voucher).await);
        }
    }

    #[tokio::test]
    async fn test_token_id_extremes() {
        let service = service_on(1);
        let minter = service.signer().account();

        for token_id in [U256::zero(), U256::MAX] {
            let voucher = service
                .create_voucher(token_id, minter, new_york_metadata())
                .await
                .unwrap();
            assert!(service.verify_voucher(&voucher).await);
        }
    }

    #[tokio::test]
    async fn test_minter_may_differ_from_signer() {
        let service = service_on(1);
        let minter = deterministic_signer(99).account();

        let voucher = service
            .create_voucher(U256::one(), minter, new_york_metadata())
            .await
            .unwrap();

        assert_eq!(voucher.minter, minter);
        assert!(service.verify_voucher(&voucher).await);
    }

    // =============================================================================
    // SIGNED SUBSET
    // =============================================================================

    #[tokio::test]
    async fn test_every_signed_field_is_bound() {
        let service = service_on(1);
        let voucher = issue_new_york(&service).await;

        let mutations: [(&str, fn(&mut LazyMintVoucher)); 5] = [
            ("tokenId", |v: &mut LazyMintVoucher| v.token_id = U256::from(43u64)),
            ("minter", |v: &mut LazyMintVoucher| v.minter = Address([0x11; 20])),
            ("street", |v: &mut LazyMintVoucher| v.metadata.street = "6th Ave".into()),
            ("city", |v: &mut LazyMintVoucher| v.metadata.city = "Boston".into()),
            ("postalCode", |v: &mut LazyMintVoucher| {
                v.metadata.postal_code = "10002".into()
            }),
        ];

        for (field, mutate) in mutations {
            let mut tampered = voucher.clone();
            mutate(&mut tampered);
            assert!(
                !service.verify_voucher(&tampered).await,
                "mutating {field} must invalidate the voucher"
            );
        }
    }

    #[tokio::test]
    async fn test_unsigned_fields_are_not_bound() {
        let service = service_on(1);
        let voucher = issue_new_york(&service).await;

        let mut relabelled = voucher.clone();
        relabelled.metadata.state = "NJ".into();
        relabelled.metadata.country = "United States".into();
        relabelled.metadata.latitude = -1;
        relabelled.metadata.longitude = 1;
        relabelled.metadata.minted_at = 1_700_000_000;
        relabelled.metadata.additional_info = "leave at door".into();

        assert!(service.verify_voucher(&relabelled).await);
    }

    #[tokio::test]
    async fn test_whitespace_is_significant() {
        let service = service_on(1);
        let mut voucher = issue_new_york(&service).await;
        voucher.metadata.street = "5th Ave ".into();
        assert!(!service.verify_voucher(&voucher).await);
    }

    // =============================================================================
    // DOMAIN BINDING
    // =============================================================================

    #[tokio::test]
    async fn test_other_chain_rejects() {
        let voucher = issue_new_york(&service_on(1)).await;
        assert!(!service_on(11_155_111).verify_voucher(&voucher).await);
    }

    #[tokio::test]
    async fn test_other_contract_rejects() {
        let voucher = issue_new_york(&service_on(1)).await;
        let elsewhere = LazyMintService::new(deterministic_signer_on(1, 1), Address([0x77; 20]));
        assert!(!elsewhere.verify_voucher(&voucher).await);
    }

    #[tokio::test]
    async fn test_other_domain_version_rejects() {
        let voucher = issue_new_york(&service_on(1)).await;
        let config = LazyMintConfig {
            domain_version: "2".into(),
            ..LazyMintConfig::for_testing()
        };
        let bumped = LazyMintService::with_config(deterministic_signer_on(1, 1), config);
        assert!(!bumped.verify_voucher(&voucher).await);
    }

    #[tokio::test]
    async fn test_other_signer_rejects() {
        let voucher = issue_new_york(&service_on(1)).await;
        let other = LazyMintService::new(deterministic_signer_on(2, 1), contract());

        let result = other.inspect_voucher(&voucher).await;
        assert!(!result.valid);
        assert_eq!(result.recovered_signer, Some(deterministic_signer(1).account()));
        assert_eq!(result.expected_signer, Some(deterministic_signer(2).account()));
    }

    // =============================================================================
    // MALFORMED SIGNATURES
    // =============================================================================

    #[tokio::test]
    async fn test_high_s_twin_is_rejected() {
        let service = service_on(1);
        let voucher = issue_new_york(&service).await;

        let mut sig = RecoverableSignature::from_slice(voucher.signature.as_slice()).unwrap();
        sig.s = invert_s(&sig.s);
        sig.v = if sig.v == 27 { 28 } else { 27 };

        let mut twin = voucher;
        twin.signature = SignatureBytes(sig.to_bytes().to_vec());

        let result = service.inspect_voucher(&twin).await;
        assert!(!result.valid);
        assert_eq!(
            result.error,
            Some(VerificationFailure::Signature(SignatureError::MalleableSignature))
        );
    }

    #[tokio::test]
    async fn test_bad_recovery_id_is_rejected() {
        let service = service_on(1);
        let mut voucher = issue_new_york(&service).await;
        voucher.signature.0[64] = 29;

        let result = service.inspect_voucher(&voucher).await;
        assert_eq!(
            result.error,
            Some(VerificationFailure::Signature(SignatureError::InvalidRecoveryId(29)))
        );
    }

    #[tokio::test]
    async fn test_zero_r_is_rejected() {
        let service = service_on(1);
        let mut voucher = issue_new_york(&service).await;
        voucher.signature.0[..32].fill(0);

        let result = service.inspect_voucher(&voucher).await;
        assert_eq!(
            result.error,
            Some(VerificationFailure::Signature(SignatureError::InvalidFormat))
        );
    }

    #[tokio::test]
    async fn test_wrong_lengths_are_false() {
        let service = service_on(1);
        let voucher = issue_new_york(&service).await;

        for len in [0usize, 1, 64, 66, 130] {
            let mut bytes = voucher.signature.as_slice().to_vec();
            bytes.resize(len, 0x1B);
            let mut broken = voucher.clone();
            broken.signature = SignatureBytes(bytes);
            assert!(!service.verify_voucher(&broken).await, "length {len}");
        }
    }
}
