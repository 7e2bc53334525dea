//! Walks through building, digesting and packing an unsigned transfer.
//!
//! Run with:
//!   cargo run --example demo

use std::time::Duration;

use eosio_packer::config::EOS_MAINNET_CHAIN_ID;
use eosio_packer::transaction::{signing_digest, Action, HexBytes, RefBlock, TransactionBuilder};

const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A recent block, as returned by `get_info` / `get_block`.
    let block_id = "009e3b0fba79833b24eaf68724fc45b6a1c9966a189e8554ab91cdc0728e925a";
    let from = "youraccount1";
    // Sample payload; real data comes from `abi_json_to_bin`.
    let data = HexBytes::from_hex("data", "01020304")?;

    let block = RefBlock::from_block_id(block_id)?;
    println!("{BOLD}reference block{RESET}");
    println!("  ref_block_num    {}", block.ref_block_num);
    println!("  ref_block_prefix {}", block.ref_block_prefix);

    let tx = TransactionBuilder::new()
        .expires_in(Duration::from_secs(60))
        .reference_block(&block)
        .action(Action::single("eosio.token", "transfer", from, "active", data))
        .build();

    println!("\n{BOLD}transaction{RESET}");
    println!("{}", tx.to_json_string_pretty()?);

    println!("\n{BOLD}id{RESET}     {}", tx.id());
    println!(
        "{BOLD}digest{RESET} {} {DIM}(mainnet){RESET}",
        hex::encode(signing_digest(&tx, EOS_MAINNET_CHAIN_ID)?)
    );
    println!("{BOLD}packed{RESET} {}", tx.pack_hex());

    Ok(())
}
