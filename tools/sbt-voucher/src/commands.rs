//! Subcommand implementations.
//!
//! Each command takes already-read inputs (strings, parsed addresses) and
//! returns a value for `main` to print. File and environment access stays
//! in the binary.

use sbt_lazy_mint::{
    decode_voucher, Address, ChainError, CodecError, ConfigError, LazyMintApi, LazyMintConfig,
    LazyMintService, LazyMintVoucher, LocalKeySigner, LocationInput, LocationMetadata,
    SignerError, SupportedChain, VerificationResult, VoucherError, WatchOnlySigner, U256,
};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// CLI command errors.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Invalid signer key: {0}")]
    Key(SignerError),

    #[error("Invalid token id {0:?}: expected a decimal integer")]
    InvalidTokenId(String),

    #[error("No verifying contract: pass --contract or set SBT_VERIFYING_CONTRACT")]
    MissingContract,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Chain(#[from] ChainError),

    #[error(transparent)]
    Voucher(#[from] VoucherError),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// A freshly generated key and its address.
#[derive(Debug, Serialize)]
pub struct KeyPair {
    /// `0x`-prefixed secret key hex
    pub private_key: String,
    pub address: Address,
}

/// Inputs for `issue`.
#[derive(Debug, Clone)]
pub struct IssueRequest {
    /// Signer secret key hex, with or without `0x`
    pub key: String,
    pub chain_id: u64,
    pub config: LazyMintConfig,
    /// Decimal token id
    pub token_id: String,
    /// Redeeming wallet; the signer's own address when absent
    pub minter: Option<Address>,
    pub metadata: LocationInput,
}

/// Inputs for `verify`.
#[derive(Debug, Clone)]
pub struct VerifyRequest {
    /// Voucher in wire format
    pub voucher_json: String,
    pub signer: Address,
    pub chain_id: u64,
    pub config: LazyMintConfig,
}

/// Service configuration from `SBT_*` environment variables, with an
/// explicit `--contract` taking precedence.
pub fn resolve_config(contract: Option<Address>) -> Result<LazyMintConfig, CommandError> {
    with_contract(LazyMintConfig::from_env()?, contract)
}

fn with_contract(
    mut config: LazyMintConfig,
    contract: Option<Address>,
) -> Result<LazyMintConfig, CommandError> {
    if let Some(contract) = contract {
        config.verifying_contract = contract;
    }
    if config.verifying_contract == Address::ZERO {
        return Err(CommandError::MissingContract);
    }
    Ok(config)
}

/// Resolve a chain given by registry name or by numeric id.
///
/// Numeric ids outside the registry are accepted as-is.
pub fn parse_chain(raw: &str) -> Result<u64, ChainError> {
    match raw.trim().parse::<u64>() {
        Ok(id) => Ok(id),
        Err(_) => raw.trim().parse::<SupportedChain>().map(|c| c.chain_id()),
    }
}

fn parse_token_id(raw: &str) -> Result<U256, CommandError> {
    let digits = raw.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CommandError::InvalidTokenId(raw.to_string()));
    }
    U256::from_dec_str(digits).map_err(|_| CommandError::InvalidTokenId(raw.to_string()))
}

/// Generate a random signing key.
pub fn keygen() -> KeyPair {
    let signer = LocalKeySigner::random();
    KeyPair {
        private_key: format!("0x{}", hex::encode(signer.to_bytes())),
        address: signer.account(),
    }
}

/// Sign a voucher with a local key.
pub async fn issue(request: IssueRequest) -> Result<LazyMintVoucher, CommandError> {
    let signer = LocalKeySigner::from_hex(&request.key)
        .map_err(CommandError::Key)?
        .with_chain_id(request.chain_id);
    let minter = request.minter.unwrap_or_else(|| signer.account());
    let token_id = parse_token_id(&request.token_id)?;
    let metadata = LocationMetadata::from_input(request.metadata)?;

    debug!(signer = %signer.account(), chain_id = request.chain_id, "Issuing voucher");

    let service = LazyMintService::with_config(signer, request.config);
    Ok(service.create_voucher(token_id, minter, metadata).await?)
}

/// Check a voucher against a claimed signer without holding its key.
pub async fn verify(request: VerifyRequest) -> Result<VerificationResult, CommandError> {
    let voucher = decode_voucher(&request.voucher_json)?;
    let signer = WatchOnlySigner::new(request.signer, Some(request.chain_id));
    let service = LazyMintService::with_config(signer, request.config);
    Ok(service.inspect_voucher(&voucher).await)
}
