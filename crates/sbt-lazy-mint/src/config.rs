//! # Lazy-Mint Configuration
//!
//! Settings that feed the EIP-712 domain record.

use crate::domain::eip712::{Eip712Domain, DOMAIN_NAME, DOMAIN_VERSION};
use crate::domain::entities::Address;
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Chain id used when the signer cannot report one.
pub const DEFAULT_CHAIN_ID: u64 = 1;

/// Invalid configuration value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

/// Voucher service configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LazyMintConfig {
    /// Address of the contract that redeems vouchers.
    pub verifying_contract: Address,

    /// EIP-712 domain name (protocol identifier).
    pub domain_name: String,

    /// EIP-712 domain version. Bump when the voucher schema changes.
    pub domain_version: String,

    /// Chain id used when the signer reports none.
    pub fallback_chain_id: u64,
}

impl Default for LazyMintConfig {
    fn default() -> Self {
        Self {
            verifying_contract: Address::ZERO,
            domain_name: DOMAIN_NAME.to_string(),
            domain_version: DOMAIN_VERSION.to_string(),
            fallback_chain_id: DEFAULT_CHAIN_ID,
        }
    }
}

impl LazyMintConfig {
    /// Default configuration for a given verifying contract.
    pub fn new(verifying_contract: Address) -> Self {
        Self {
            verifying_contract,
            ..Self::default()
        }
    }

    /// Create a config for testing (fixed non-zero contract address).
    pub fn for_testing() -> Self {
        Self::new(Address([0x5B; 20]))
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SBT_VERIFYING_CONTRACT`: Contract address (default: zero address)
    /// - `SBT_DOMAIN_NAME`: Domain name (default: DeliveryAddressSBT)
    /// - `SBT_DOMAIN_VERSION`: Domain version (default: 1)
    /// - `SBT_FALLBACK_CHAIN_ID`: Chain id when the signer reports none (default: 1)
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let verifying_contract = match env::var("SBT_VERIFYING_CONTRACT") {
            Ok(raw) => raw.parse().map_err(|e: crate::VoucherError| ConfigError::InvalidValue {
                key: "SBT_VERIFYING_CONTRACT",
                reason: e.to_string(),
            })?,
            Err(_) => defaults.verifying_contract,
        };

        let fallback_chain_id = match env::var("SBT_FALLBACK_CHAIN_ID") {
            Ok(raw) => raw.parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidValue {
                    key: "SBT_FALLBACK_CHAIN_ID",
                    reason: e.to_string(),
                }
            })?,
            Err(_) => defaults.fallback_chain_id,
        };

        Ok(Self {
            verifying_contract,
            domain_name: env::var("SBT_DOMAIN_NAME").unwrap_or(defaults.domain_name),
            domain_version: env::var("SBT_DOMAIN_VERSION").unwrap_or(defaults.domain_version),
            fallback_chain_id,
        })
    }

    /// Domain record for a given chain id.
    pub fn domain(&self, chain_id: u64) -> Eip712Domain {
        Eip712Domain {
            name: self.domain_name.clone(),
            version: self.domain_version.clone(),
            chain_id,
            verifying_contract: self.verifying_contract,
        }
    }
}
