//! sbt-voucher: issue and verify Soulbound delivery-address lazy-mint vouchers.
//!
//! Voucher JSON goes to stdout; logs go to stderr (`RUST_LOG`, default `info`).

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sbt_lazy_mint::{encode_voucher_pretty, Address, LocationInput};
use sbt_voucher::commands::{self, IssueRequest, VerifyRequest};
use sbt_voucher::{parse_chain, resolve_config};

/// SBT Voucher: lazy-mint voucher issuer and verifier
#[derive(Parser, Debug)]
#[command(name = "sbt-voucher")]
#[command(about = "Issue and verify EIP-712 lazy-mint vouchers for delivery-address SBTs")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a random signing key
    Keygen,

    /// Sign a voucher authorizing a wallet to mint an address token
    Issue {
        /// Signer secret key (hex)
        #[arg(long, env = "SBT_SIGNER_KEY", hide_env_values = true)]
        key: String,

        /// Chain name (e.g. base, sepolia) or numeric chain id
        #[arg(long, default_value = "mainnet")]
        chain: String,

        /// Verifying contract address; defaults to SBT_VERIFYING_CONTRACT
        #[arg(long)]
        contract: Option<Address>,

        /// Token id (decimal)
        #[arg(long)]
        token_id: String,

        /// Wallet allowed to redeem; defaults to the signer's address
        #[arg(long)]
        minter: Option<Address>,

        /// JSON file with the delivery address and coordinates in degrees
        #[arg(long)]
        metadata: PathBuf,
    },

    /// Check a voucher against a claimed signer
    Verify {
        /// Voucher JSON file
        #[arg(long)]
        voucher: PathBuf,

        /// Address expected to have signed the voucher
        #[arg(long)]
        signer: Address,

        /// Chain name or numeric chain id
        #[arg(long, default_value = "mainnet")]
        chain: String,

        /// Verifying contract address; defaults to SBT_VERIFYING_CONTRACT
        #[arg(long)]
        contract: Option<Address>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();

    match args.command {
        Command::Keygen => {
            let pair = commands::keygen();
            println!("{}", serde_json::to_string_pretty(&pair)?);
            Ok(ExitCode::SUCCESS)
        }

        Command::Issue {
            key,
            chain,
            contract,
            token_id,
            minter,
            metadata,
        } => {
            let path = metadata;
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("reading metadata from {}", path.display()))?;
            let metadata: LocationInput = serde_json::from_str(&raw)
                .with_context(|| format!("parsing metadata in {}", path.display()))?;

            let voucher = commands::issue(IssueRequest {
                key,
                chain_id: parse_chain(&chain)?,
                config: resolve_config(contract)?,
                token_id,
                minter,
                metadata,
            })
            .await?;

            println!("{}", encode_voucher_pretty(&voucher)?);
            Ok(ExitCode::SUCCESS)
        }

        Command::Verify {
            voucher,
            signer,
            chain,
            contract,
        } => {
            let voucher_json = fs::read_to_string(&voucher)
                .with_context(|| format!("reading voucher from {}", voucher.display()))?;

            let result = commands::verify(VerifyRequest {
                voucher_json,
                signer,
                chain_id: parse_chain(&chain)?,
                config: resolve_config(contract)?,
            })
            .await?;

            if result.valid {
                println!("valid");
                Ok(ExitCode::SUCCESS)
            } else {
                match &result.error {
                    Some(reason) => println!("invalid: {reason}"),
                    None => println!("invalid"),
                }
                Ok(ExitCode::FAILURE)
            }
        }
    }
}
