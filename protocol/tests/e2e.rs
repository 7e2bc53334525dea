//! End-to-end tests for the EOSIO packer.
//!
//! These exercise the public API the way a wallet would: derive TaPoS fields
//! from a recent block, build or parse a transaction, compute the digest for
//! the signer, attach the signature and pack for submission.

use eosio_packer::codec::{Name, Packer};
use eosio_packer::config::EOS_MAINNET_CHAIN_ID;
use eosio_packer::transaction::{
    block_prefix, signing_digest, Action, HexBytes, PermissionLevel, RefBlock, Transaction,
    TransactionBuilder,
};
use serde_json::json;

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

const GOLDEN_HEX: &str = "007a495a010002000000000000000100a6823403ea3055000000572d3ccdcd010000000000855c3400000000a8ed3232020102000000";

const BLOCK_ID: &str = "009e3b0fba79833b24eaf68724fc45b6a1c9966a189e8554ab91cdc0728e925a";

fn transfer_json() -> serde_json::Value {
    json!({
        "expiration": "2018-01-01T00:00:00",
        "ref_block_num": 1,
        "ref_block_prefix": 2,
        "max_net_usage_words": 0,
        "max_cpu_usage_ms": 0,
        "delay_sec": 0,
        "context_free_actions": [],
        "actions": [{
            "account": "eosio.token",
            "name": "transfer",
            "authorization": [{"actor": "alice", "permission": "active"}],
            "data": "0102"
        }],
        "transaction_extensions": [],
        "signatures": [],
        "context_free_data": []
    })
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn golden_transfer_packs_byte_for_byte() {
    let tx = Transaction::from_json(&transfer_json()).expect("valid transaction");
    assert_eq!(tx.pack_hex(), GOLDEN_HEX);
}

#[test]
fn reparsing_the_same_input_is_deterministic() {
    let first = Transaction::from_json(&transfer_json()).unwrap().pack_hex();
    let second = Transaction::from_json(&transfer_json()).unwrap().pack_hex();
    assert_eq!(first, second);
}

#[test]
fn json_to_entity_to_json_is_stable() {
    let tx = Transaction::from_json(&transfer_json()).unwrap();
    let again = Transaction::from_json(&tx.to_json().unwrap()).unwrap();
    assert_eq!(tx, again);
    assert_eq!(again.pack_hex(), GOLDEN_HEX);
}

#[test]
fn wallet_flow_from_recent_block() {
    let block = RefBlock::from_block_id(BLOCK_ID).unwrap();
    assert_eq!(block.ref_block_num, 15_119);
    assert_eq!(block.ref_block_prefix, block_prefix("24eaf687").unwrap());

    let mut tx = TransactionBuilder::new()
        .expiration(1_514_764_860)
        .reference_block(&block)
        .action(Action::single(
            "eosio.token",
            "transfer",
            "youraccount1",
            "active",
            HexBytes::from_hex("data", "01020304").unwrap(),
        ))
        .build();

    let id = tx.id();
    let digest = signing_digest(&tx, EOS_MAINNET_CHAIN_ID).unwrap();
    tx.add_signature("SIG_K1_placeholder");

    // Neither the ID nor the digest covers signatures.
    assert_eq!(tx.id(), id);
    assert_eq!(signing_digest(&tx, EOS_MAINNET_CHAIN_ID).unwrap(), digest);

    let packed = tx.pack_hex();
    let body_hex = hex::encode(tx.packed_body());
    assert!(packed.starts_with(&body_hex));

    let unpacked = Transaction::unpack_hex(&packed).unwrap();
    assert_eq!(unpacked.signatures, vec!["SIG_K1_placeholder".to_string()]);
    assert_eq!(unpacked.actions[0].authorization[0].actor, "youraccount1");
}

#[test]
fn multi_action_transaction_keeps_order() {
    let tx = TransactionBuilder::new()
        .expiration(0)
        .action(Action::new(
            "eosio",
            "buyram",
            vec![PermissionLevel::new("alice", "active")],
            HexBytes::default(),
        ))
        .action(Action::new(
            "eosio",
            "delegatebw",
            vec![
                PermissionLevel::new("alice", "active"),
                PermissionLevel::new("bob", "active"),
            ],
            HexBytes::default(),
        ))
        .build();

    let unpacked = Transaction::unpack(&tx.pack()).unwrap();
    let names: Vec<_> = unpacked.actions.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["buyram", "delegatebw"]);
    assert_eq!(unpacked.actions[1].authorization[1].actor, "bob");
}

#[test]
fn lossy_inputs_pack_as_documented() {
    let mut value = transfer_json();
    value["actions"][0]["data"] = json!("01023");
    value["ref_block_num"] = json!(65_537);
    value["actions"][0]["account"] = json!("eosio.tokenXYZABC");
    let tx = Transaction::from_json(&value).unwrap();

    let mut expected = Packer::new();
    expected.pack_u16(1);
    let hex = tx.pack_hex();
    // ref_block_num sits right after the 4-byte expiration.
    assert_eq!(&hex[8..12], expected.to_hex());
    // Odd trailing hex digit dropped.
    assert!(hex.contains("020102"));
    // "X" is outside the alphabet and the tail past 13 characters is ignored.
    assert_eq!(
        Name::encode(&tx.actions[0].account),
        Name::encode("eosio.token.")
    );
}

#[test]
fn malformed_inputs_fail_fast() {
    let cases = [
        ("expiration", json!("yesterday")),
        ("ref_block_prefix", json!("two")),
        ("actions", json!([{"account": "eosio"}])),
        ("context_free_data", json!(["nothex"])),
    ];
    for (field, bad) in cases {
        let mut value = transfer_json();
        value[field] = bad;
        assert!(
            Transaction::from_json(&value).is_err(),
            "{field} should have been rejected"
        );
    }
}

#[test]
fn hex_errors_identify_the_field() {
    let mut value = transfer_json();
    value["context_free_data"] = json!(["dead", "zz"]);
    let err = Transaction::from_json(&value).unwrap_err().to_string();
    assert!(err.contains("invalid hex in context_free_data"), "{err}");

    let mut value = transfer_json();
    value["actions"][0]["data"] = json!("0g");
    let err = Transaction::from_json(&value).unwrap_err().to_string();
    assert!(err.contains("invalid hex in data"), "{err}");
}
