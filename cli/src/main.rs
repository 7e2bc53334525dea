// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # EOSIO Pack
//!
//! Entry point for the `eosio-pack` binary. Parses CLI arguments, initializes
//! logging, and runs one conversion. Results go to stdout, logs to stderr.
//!
//! Subcommands:
//!
//! - `pack`         — JSON transaction to packed hex
//! - `unpack`       — packed hex to JSON transaction
//! - `id`           — transaction ID
//! - `digest`       — signing digest for a chain
//! - `name`         — encode/decode a name
//! - `block-prefix` — TaPoS fields from a block ID
//! - `transfer`     — build an unsigned single-action transaction
//! - `version`      — print build version information

mod cli;
mod logging;

use std::io::Read;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use eosio_packer::codec::Name;
use eosio_packer::config::chain_name;
use eosio_packer::transaction::{
    signing_digest, Action, HexBytes, RefBlock, Transaction, TransactionBuilder,
};

use cli::{Commands, EosioPackCli, NameCommand};

fn main() -> Result<()> {
    let cli = EosioPackCli::parse();
    logging::init_logging(&cli.log_level, cli.log_format);

    match cli.command {
        Commands::Pack(args) => pack(args),
        Commands::Unpack(args) => unpack(args),
        Commands::Id(args) => {
            let tx = read_transaction(args.file.as_deref())?;
            println!("{}", tx.id());
            Ok(())
        }
        Commands::Digest(args) => digest(args),
        Commands::Name(command) => {
            match command {
                NameCommand::Encode { name } => {
                    let encoded = Name::encode(&name);
                    println!("{} 0x{:016x}", encoded.value(), encoded.value());
                }
                NameCommand::Decode { value } => println!("{}", Name::new(value)),
            }
            Ok(())
        }
        Commands::BlockPrefix(args) => {
            let block = RefBlock::from_block_id(&args.block_id)
                .with_context(|| format!("invalid block id {}", args.block_id))?;
            println!("ref_block_num    {}", block.ref_block_num);
            println!("ref_block_prefix {}", block.ref_block_prefix);
            Ok(())
        }
        Commands::Transfer(args) => transfer(args),
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Packs a JSON transaction (or only its body) and prints the hex.
fn pack(args: cli::PackArgs) -> Result<()> {
    let tx = read_transaction(args.input.file.as_deref())?;
    let hex = if args.body {
        hex::encode(tx.packed_body())
    } else {
        tx.pack_hex()
    };
    tracing::info!(bytes = hex.len() / 2, body_only = args.body, "transaction packed");
    println!("{hex}");
    Ok(())
}

/// Unpacks hex and prints the JSON form.
fn unpack(args: cli::UnpackArgs) -> Result<()> {
    let tx = Transaction::unpack_hex(args.hex.trim()).context("failed to unpack transaction")?;
    println!("{}", tx.to_json_string_pretty()?);
    Ok(())
}

/// Prints the signing digest of a JSON transaction.
fn digest(args: cli::DigestArgs) -> Result<()> {
    let tx = read_transaction(args.input.file.as_deref())?;
    let digest = signing_digest(&tx, &args.chain_id)
        .with_context(|| format!("invalid chain id {}", args.chain_id))?;
    tracing::info!(
        chain = chain_name(&args.chain_id).unwrap_or("custom"),
        tx_id = %tx.id(),
        "signing digest computed"
    );
    println!("{}", hex::encode(digest));
    Ok(())
}

/// Builds an unsigned single-action transaction referencing a recent block.
fn transfer(args: cli::TransferArgs) -> Result<()> {
    let block = RefBlock::from_block_id(&args.block_id)
        .with_context(|| format!("invalid block id {}", args.block_id))?;
    let data = HexBytes::from_hex("data", &args.data).context("invalid --data")?;

    let tx = TransactionBuilder::new()
        .expires_in(Duration::from_secs(args.expires_in))
        .reference_block(&block)
        .action(Action::single(
            args.account,
            args.action,
            args.actor,
            args.permission,
            data,
        ))
        .build();

    tracing::info!(
        ref_block_num = block.ref_block_num,
        ref_block_prefix = block.ref_block_prefix,
        expiration = %tx.expiration_time(),
        "unsigned transaction built"
    );

    if args.json {
        println!("{}", tx.to_json_string_pretty()?);
    } else {
        println!("{}", tx.pack_hex());
    }
    Ok(())
}

/// Reads a JSON transaction from `path`, or stdin for `None` / `-`.
fn read_transaction(path: Option<&Path>) -> Result<Transaction> {
    let text = match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)
            .with_context(|| format!("failed to read {}", p.display()))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };
    let tx = Transaction::from_json_str(&text).context("invalid transaction json")?;
    tracing::debug!(actions = tx.actions.len(), "transaction loaded");
    Ok(tx)
}

/// Prints version information to stdout.
fn print_version() {
    println!("eosio-pack {}", env!("CARGO_PKG_VERSION"));
}
