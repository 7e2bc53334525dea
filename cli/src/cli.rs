//! # CLI Interface
//!
//! Defines the command-line argument structure for `eosio-pack` using
//! `clap` derive.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use eosio_packer::config::{DEFAULT_EXPIRATION_WINDOW, EOS_MAINNET_CHAIN_ID};

use crate::logging::LogFormat;

/// EOSIO transaction packer.
///
/// Converts transactions between their JSON form and the canonical packed
/// hex that nodes accept, and computes the IDs and digests signers need.
#[derive(Parser, Debug)]
#[command(
    name = "eosio-pack",
    about = "EOSIO transaction packer",
    version,
    propagate_version = true
)]
pub struct EosioPackCli {
    /// Log output format.
    #[arg(long, global = true, value_enum, env = "EOSIO_LOG_FORMAT", default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Default log filter when `RUST_LOG` is not set.
    #[arg(long, global = true, env = "EOSIO_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Pack a JSON transaction into hex.
    Pack(PackArgs),
    /// Unpack hex into a JSON transaction.
    Unpack(UnpackArgs),
    /// Print the transaction ID of a JSON transaction.
    Id(InputArgs),
    /// Print the digest a signer must sign.
    Digest(DigestArgs),
    /// Encode or decode a name.
    #[command(subcommand)]
    Name(NameCommand),
    /// Derive ref_block_num and ref_block_prefix from a block ID.
    BlockPrefix(BlockPrefixArgs),
    /// Build an unsigned single-action transaction.
    Transfer(TransferArgs),
    /// Print version information and exit.
    Version,
}

/// A JSON transaction read from a file or stdin.
#[derive(Args, Debug)]
pub struct InputArgs {
    /// Path to the JSON transaction. Reads stdin when omitted or `-`.
    pub file: Option<PathBuf>,
}

/// Arguments for the `pack` subcommand.
#[derive(Args, Debug)]
pub struct PackArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Pack only the transaction body (no signatures or context-free data).
    #[arg(long)]
    pub body: bool,
}

/// Arguments for the `unpack` subcommand.
#[derive(Args, Debug)]
pub struct UnpackArgs {
    /// Packed transaction as hex.
    pub hex: String,
}

/// Arguments for the `digest` subcommand.
#[derive(Args, Debug)]
pub struct DigestArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Chain ID (64 hex characters). Defaults to EOS mainnet.
    #[arg(long, env = "EOSIO_CHAIN_ID", default_value = EOS_MAINNET_CHAIN_ID)]
    pub chain_id: String,
}

/// Name subcommands.
#[derive(Subcommand, Debug)]
pub enum NameCommand {
    /// Print the 64-bit value of a name.
    Encode {
        /// The symbolic name, e.g. `eosio.token`.
        name: String,
    },
    /// Print the symbolic form of a 64-bit value.
    Decode {
        /// Decimal, or hex with a `0x` prefix.
        #[arg(value_parser = parse_name_value)]
        value: u64,
    },
}

/// Arguments for the `block-prefix` subcommand.
#[derive(Args, Debug)]
pub struct BlockPrefixArgs {
    /// Full block ID (64 hex characters).
    pub block_id: String,
}

/// Arguments for the `transfer` subcommand.
#[derive(Args, Debug)]
pub struct TransferArgs {
    /// ID of a recent block to reference.
    #[arg(long)]
    pub block_id: String,

    /// Contract account.
    #[arg(long, default_value = "eosio.token")]
    pub account: String,

    /// Action name.
    #[arg(long, default_value = "transfer")]
    pub action: String,

    /// Authorizing account.
    #[arg(long)]
    pub actor: String,

    /// Authorizing permission.
    #[arg(long, default_value = "active")]
    pub permission: String,

    /// Packed action arguments as hex (for example from `abi_json_to_bin`).
    #[arg(long)]
    pub data: String,

    /// Seconds until the transaction expires.
    #[arg(long, default_value_t = DEFAULT_EXPIRATION_WINDOW.as_secs())]
    pub expires_in: u64,

    /// Print the JSON form instead of packed hex.
    #[arg(long)]
    pub json: bool,
}

fn parse_name_value(s: &str) -> Result<u64, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => s.parse::<u64>(),
    };
    parsed.map_err(|e| format!("invalid name value {s:?}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        // Ensures the derive macros produce a valid CLI definition.
        EosioPackCli::command().debug_assert();
    }

    #[test]
    fn name_values_accept_decimal_and_hex() {
        assert_eq!(parse_name_value("0x5530ea0000000000"), Ok(0x5530_ea00_0000_0000));
        assert_eq!(parse_name_value("42"), Ok(42));
        assert!(parse_name_value("0xzz").is_err());
    }

    #[test]
    fn transfer_defaults() {
        let cli = EosioPackCli::parse_from([
            "eosio-pack",
            "transfer",
            "--block-id",
            "00",
            "--actor",
            "alice",
            "--data",
            "0102",
        ]);
        match cli.command {
            Commands::Transfer(args) => {
                assert_eq!(args.account, "eosio.token");
                assert_eq!(args.action, "transfer");
                assert_eq!(args.permission, "active");
                assert_eq!(args.expires_in, 60);
                assert!(!args.json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
