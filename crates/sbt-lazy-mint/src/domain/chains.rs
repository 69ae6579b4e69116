//! # Chain Registry
//!
//! Networks the Soulbound address contract is deployed to. The registry is
//! informational: vouchers can be signed for any chain id.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Unknown chain name or id.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChainError {
    #[error("Unknown chain: {0}")]
    UnknownName(String),

    #[error("Unknown chain id: {0}")]
    UnknownId(u64),
}

/// A supported deployment network.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportedChain {
    Mainnet,
    Sepolia,
    Polygon,
    Mumbai,
    Base,
    Arbitrum,
    Optimism,
}

/// Production networks.
pub const PRODUCTION_CHAINS: [SupportedChain; 5] = [
    SupportedChain::Mainnet,
    SupportedChain::Polygon,
    SupportedChain::Base,
    SupportedChain::Arbitrum,
    SupportedChain::Optimism,
];

/// Test networks.
pub const TESTNET_CHAINS: [SupportedChain; 2] = [SupportedChain::Sepolia, SupportedChain::Mumbai];

impl SupportedChain {
    /// All known chains, production first.
    pub fn all() -> impl Iterator<Item = SupportedChain> {
        PRODUCTION_CHAINS.into_iter().chain(TESTNET_CHAINS)
    }

    /// EIP-155 chain id.
    pub fn chain_id(&self) -> u64 {
        match self {
            SupportedChain::Mainnet => 1,
            SupportedChain::Sepolia => 11_155_111,
            SupportedChain::Polygon => 137,
            SupportedChain::Mumbai => 80_001,
            SupportedChain::Base => 8_453,
            SupportedChain::Arbitrum => 42_161,
            SupportedChain::Optimism => 10,
        }
    }

    /// Short lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            SupportedChain::Mainnet => "mainnet",
            SupportedChain::Sepolia => "sepolia",
            SupportedChain::Polygon => "polygon",
            SupportedChain::Mumbai => "mumbai",
            SupportedChain::Base => "base",
            SupportedChain::Arbitrum => "arbitrum",
            SupportedChain::Optimism => "optimism",
        }
    }

    /// Block explorer base URL.
    pub fn block_explorer(&self) -> &'static str {
        match self {
            SupportedChain::Mainnet => "https://etherscan.io",
            SupportedChain::Sepolia => "https://sepolia.etherscan.io",
            SupportedChain::Polygon => "https://polygonscan.com",
            SupportedChain::Mumbai => "https://mumbai.polygonscan.com",
            SupportedChain::Base => "https://basescan.org",
            SupportedChain::Arbitrum => "https://arbiscan.io",
            SupportedChain::Optimism => "https://optimistic.etherscan.io",
        }
    }

    pub fn is_testnet(&self) -> bool {
        TESTNET_CHAINS.contains(self)
    }

    /// Look up a chain by id.
    pub fn from_chain_id(chain_id: u64) -> Result<Self, ChainError> {
        Self::all()
            .find(|c| c.chain_id() == chain_id)
            .ok_or(ChainError::UnknownId(chain_id))
    }
}

impl FromStr for SupportedChain {
    type Err = ChainError;

    /// Accepts a chain name (case-insensitive) or a decimal chain id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(id) = s.parse::<u64>() {
            return Self::from_chain_id(id);
        }
        let lower = s.to_ascii_lowercase();
        Self::all()
            .find(|c| c.name() == lower)
            .ok_or_else(|| ChainError::UnknownName(s.to_string()))
    }
}

impl fmt::Display for SupportedChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
