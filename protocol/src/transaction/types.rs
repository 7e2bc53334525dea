//! Entities nested inside a transaction.
//!
//! Names are kept as the caller's strings and only encoded while packing,
//! so the structured form round-trips exactly what was given.

use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::codec::{decode_hex, CodecError, Name, Pack, Packer, Unpack, Unpacker};

// ---------------------------------------------------------------------------
// HexBytes
// ---------------------------------------------------------------------------

/// Opaque bytes carried as hex text in the structured form.
///
/// Decoding drops an odd trailing character and rejects non-hex input.
/// Re-encoding always yields lowercase hex.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct HexBytes(Vec<u8>);

impl HexBytes {
    /// Decodes `hex`, naming `field` in the error if it is malformed.
    pub fn from_hex(field: &'static str, hex: &str) -> Result<Self, CodecError> {
        decode_hex(field, hex).map(Self)
    }

    /// The decoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consumes the wrapper, returning the bytes.
    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }

    /// Returns `true` if there are no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lowercase hex rendering.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl From<Vec<u8>> for HexBytes {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for HexBytes {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl fmt::Display for HexBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for HexBytes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for HexBytes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex("data", &s).map_err(de::Error::custom)
    }
}

impl Pack for HexBytes {
    fn pack(&self, packer: &mut Packer) {
        packer.pack_bytes(&self.0);
    }
}

impl Unpack for HexBytes {
    fn unpack(unpacker: &mut Unpacker<'_>) -> Result<Self, CodecError> {
        unpacker.unpack_bytes().map(Self)
    }
}

// ---------------------------------------------------------------------------
// PermissionLevel
// ---------------------------------------------------------------------------

/// An `actor@permission` pair authorizing an action.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PermissionLevel {
    /// Account granting the authorization.
    pub actor: String,
    /// Permission of that account being used, usually `active`.
    pub permission: String,
}

impl PermissionLevel {
    /// Pairs an actor with one of its permissions.
    pub fn new(actor: impl Into<String>, permission: impl Into<String>) -> Self {
        Self {
            actor: actor.into(),
            permission: permission.into(),
        }
    }
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.actor, self.permission)
    }
}

impl Pack for PermissionLevel {
    fn pack(&self, packer: &mut Packer) {
        Name::encode(&self.actor).pack(packer);
        Name::encode(&self.permission).pack(packer);
    }
}

impl Unpack for PermissionLevel {
    fn unpack(unpacker: &mut Unpacker<'_>) -> Result<Self, CodecError> {
        let actor = Name::unpack(unpacker)?;
        let permission = Name::unpack(unpacker)?;
        Ok(Self::new(actor.to_string(), permission.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// A contract call: `account::name` with its authorizations and packed
/// arguments.
///
/// `data` is the already-serialized argument payload (for example the output
/// of an ABI `json_to_bin`). The codec never looks inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// Contract account.
    pub account: String,
    /// Action name within the contract.
    pub name: String,
    /// Order matters: it is part of the signed bytes.
    pub authorization: Vec<PermissionLevel>,
    /// Packed action arguments.
    pub data: HexBytes,
}

impl Action {
    /// An action with an explicit authorization list.
    pub fn new(
        account: impl Into<String>,
        name: impl Into<String>,
        authorization: Vec<PermissionLevel>,
        data: HexBytes,
    ) -> Self {
        Self {
            account: account.into(),
            name: name.into(),
            authorization,
            data,
        }
    }

    /// An action authorized by a single `actor@permission`.
    pub fn single(
        account: impl Into<String>,
        name: impl Into<String>,
        actor: impl Into<String>,
        permission: impl Into<String>,
        data: HexBytes,
    ) -> Self {
        Self::new(
            account,
            name,
            vec![PermissionLevel::new(actor, permission)],
            data,
        )
    }
}

impl Pack for Action {
    fn pack(&self, packer: &mut Packer) {
        Name::encode(&self.account).pack(packer);
        Name::encode(&self.name).pack(packer);
        packer.pack_array(&self.authorization);
        self.data.pack(packer);
    }
}

impl Unpack for Action {
    fn unpack(unpacker: &mut Unpacker<'_>) -> Result<Self, CodecError> {
        let account = Name::unpack(unpacker)?;
        let name = Name::unpack(unpacker)?;
        let authorization = unpacker.unpack_array()?;
        let data = HexBytes::unpack(unpacker)?;
        Ok(Self::new(
            account.to_string(),
            name.to_string(),
            authorization,
            data,
        ))
    }
}

// ---------------------------------------------------------------------------
// Extension
// ---------------------------------------------------------------------------

/// A transaction extension slot.
///
/// Reserved for forward compatibility of the format. The structured form
/// never produces one, so `transaction_extensions` packs as an empty array
/// in practice; the unpacker still reads any that appear on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension {
    /// Extension type identifier.
    pub num: u32,
    /// Opaque extension payload.
    pub data: HexBytes,
}

impl Pack for Extension {
    fn pack(&self, packer: &mut Packer) {
        packer.pack_u32(self.num);
        self.data.pack(packer);
    }
}

impl Unpack for Extension {
    fn unpack(unpacker: &mut Unpacker<'_>) -> Result<Self, CodecError> {
        let num = unpacker.unpack_u32()?;
        let data = HexBytes::unpack(unpacker)?;
        Ok(Self { num, data })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn hex_of(value: &impl Pack) -> String {
        let mut packer = Packer::new();
        value.pack(&mut packer);
        packer.to_hex()
    }

    #[test]
    fn permission_level_is_two_names() {
        let level = PermissionLevel::new("alice", "active");
        assert_eq!(hex_of(&level), "0000000000855c3400000000a8ed3232");
        assert_eq!(level.to_string(), "alice@active");
    }

    #[test]
    fn action_layout() {
        let action = Action::single(
            "eosio.token",
            "transfer",
            "alice",
            "active",
            HexBytes::from(vec![0x01, 0x02]),
        );
        assert_eq!(
            hex_of(&action),
            concat!(
                "00a6823403ea3055",                 // account
                "000000572d3ccdcd",                 // name
                "01",                               // authorization count
                "0000000000855c3400000000a8ed3232", // alice@active
                "020102",                           // data
            )
        );
    }

    #[test]
    fn action_without_authorization() {
        let action = Action::new("eosio", "onblock", vec![], HexBytes::default());
        let hex = hex_of(&action);
        // Two names, empty auth array, empty data.
        assert_eq!(hex.len(), 2 * (8 + 8 + 1 + 1));
        assert!(hex.ends_with("0000"));
    }

    #[test]
    fn authorization_order_is_preserved() {
        let a = Action::new(
            "eosio",
            "updateauth",
            vec![
                PermissionLevel::new("alice", "active"),
                PermissionLevel::new("bob", "owner"),
            ],
            HexBytes::default(),
        );
        let mut b = a.clone();
        b.authorization.reverse();
        assert_ne!(hex_of(&a), hex_of(&b));
    }

    #[test]
    fn extension_layout() {
        let ext = Extension {
            num: 1,
            data: HexBytes::from(vec![0xff]),
        };
        assert_eq!(hex_of(&ext), "0100000001ff");
    }

    #[test]
    fn hex_bytes_serde() {
        let bytes: HexBytes = serde_json::from_str("\"DEADbeef1\"").unwrap();
        assert_eq!(bytes.as_bytes(), &[0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(serde_json::to_string(&bytes).unwrap(), "\"deadbeef\"");

        let err = serde_json::from_str::<HexBytes>("\"0g\"").unwrap_err();
        assert!(err.to_string().contains("invalid hex"));
    }

    #[test]
    fn action_unpacks_to_same_value() {
        let action = Action::single(
            "eosio.token",
            "transfer",
            "youraccount1",
            "active",
            HexBytes::from(vec![1, 2, 3, 4]),
        );
        let mut packer = Packer::new();
        action.pack(&mut packer);
        let bytes = packer.into_bytes();
        let mut u = Unpacker::new(&bytes);
        assert_eq!(Action::unpack(&mut u).unwrap(), action);
        u.finish().unwrap();
    }
}
