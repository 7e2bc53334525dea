//! Field adapters for the structured (JSON) form of a transaction.
//!
//! Most fields map one-to-one through `serde` derive. The exceptions live
//! here: the `expiration` timestamp, integers that are narrowed rather than
//! range-checked, the always-empty `transaction_extensions`, and
//! `context_free_data`, whose hex errors must name that field.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::codec::CodecError;
use crate::config::EXPIRATION_FORMAT;

/// Parses `yyyy-MM-ddTHH:mm:ss` as UTC and returns epoch seconds truncated
/// to 32 bits.
pub fn parse_expiration(value: &str) -> Result<u32, CodecError> {
    let naive = NaiveDateTime::parse_from_str(value, EXPIRATION_FORMAT).map_err(|e| {
        CodecError::InvalidTimestamp {
            value: value.to_string(),
            reason: e.to_string(),
        }
    })?;
    Ok(naive.and_utc().timestamp() as u32)
}

/// Renders epoch seconds as `yyyy-MM-ddTHH:mm:ss` in UTC.
pub fn format_expiration(secs: u32) -> String {
    expiration_time(secs).format(EXPIRATION_FORMAT).to_string()
}

/// Epoch seconds as a UTC datetime. Every `u32` is in range.
pub fn expiration_time(secs: u32) -> DateTime<Utc> {
    DateTime::from_timestamp(i64::from(secs), 0).unwrap_or_default()
}

/// `#[serde(with = "expiration")]` for the `expiration` field.
pub mod expiration {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(secs: &u32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_expiration(*secs))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_expiration(&s).map_err(de::Error::custom)
    }
}

/// Integer deserializers that accept any JSON integer and keep only the low
/// bits of the target width, the way the packer truncates.
pub mod wrapping {
    use std::fmt;

    use serde::de::{self, Deserializer, Visitor};

    struct AnyInteger;

    impl<'de> Visitor<'de> for AnyInteger {
        type Value = u64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an integer")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u64, E> {
            Ok(v as u64)
        }
    }

    pub fn deserialize_u8<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
        deserializer.deserialize_any(AnyInteger).map(|v| v as u8)
    }

    pub fn deserialize_u16<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u16, D::Error> {
        deserializer.deserialize_any(AnyInteger).map(|v| v as u16)
    }

    pub fn deserialize_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        deserializer.deserialize_any(AnyInteger).map(|v| v as u32)
    }
}

/// `transaction_extensions` is read and written as an empty array no matter
/// what the input holds.
pub mod extensions {
    use serde::de::IgnoredAny;
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::transaction::types::Extension;

    pub fn serialize<S: Serializer>(_: &[Extension], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_seq(Some(0))?.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Extension>, D::Error> {
        IgnoredAny::deserialize(deserializer)?;
        Ok(Vec::new())
    }
}

/// Reads `context_free_data` as hex strings, reporting bad entries against
/// that field rather than the generic `data` label of [`HexBytes`].
///
/// [`HexBytes`]: crate::transaction::types::HexBytes
pub mod context_free_data {
    use serde::{de, Deserialize, Deserializer};

    use crate::transaction::types::HexBytes;

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<HexBytes>, D::Error> {
        Vec::<String>::deserialize(deserializer)?
            .iter()
            .map(|hex| HexBytes::from_hex("context_free_data", hex).map_err(de::Error::custom))
            .collect()
    }
}
