//! Misc Serde helpers for chronicles crates.

use alloy_primitives::Address;
use serde::{Deserialize, Deserializer, Serializer, de};

/// (De)serializes an [`Address`] in its EIP-55 checksummed form.
pub mod checksum {
    use super::*;

    /// Serializes the address checksummed.
    pub fn serialize<S: Serializer>(addr: &Address, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&addr.to_checksum(None))
    }

    /// Deserializes an address from hex in any letter case.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Address, D::Error> {
        Address::deserialize(deserializer)
    }
}

/// (De)serializes an optional [`Address`] in its EIP-55 checksummed form.
///
/// Use together with `#[serde(default, skip_serializing_if = "Option::is_none")]`.
pub mod checksum_opt {
    use super::*;

    /// Serializes the address checksummed, or `null`.
    pub fn serialize<S: Serializer>(
        addr: &Option<Address>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match addr {
            Some(addr) => checksum::serialize(addr, serializer),
            None => serializer.serialize_none(),
        }
    }

    /// Deserializes an optional address; `null` and empty strings become `None`.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Address>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(s) if !s.is_empty() => s.parse().map(Some).map_err(de::Error::custom),
            _ => Ok(None),
        }
    }
}

/// Helper type to parse both `u64` and decimal strings.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Num(u64),
    Str(String),
}

/// (De)serializes a chain id that older ledgers stored as a decimal string.
///
/// Reads numbers and strings alike and always writes a decimal string.
pub mod chain_id_string {
    use super::*;

    /// Serializes the chain id as a decimal string.
    pub fn serialize<S: Serializer>(chain_id: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(chain_id)
    }

    /// Deserializes a chain id from either a number or a decimal string.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        match NumberOrString::deserialize(deserializer)? {
            NumberOrString::Num(n) => Ok(n),
            NumberOrString::Str(s) => s.trim().parse().map_err(de::Error::custom),
        }
    }
}

/// Deserializes an optional string, mapping the empty string to `None`.
pub fn non_empty_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.is_empty()))
}
