// Copyright 2024 ICX Tools Developers
// SPDX-License-Identifier: MIT

use std::fmt;
use std::str::FromStr;

use libsecp256k1::PublicKey;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha3::{Digest, Sha3_256};

const ADDRESS_PREFIX: &str = "hx";
const ADDRESS_LEN: usize = 20;

/// An externally owned account address: `hx` followed by the hex encoded last 20 bytes of the
/// SHA3-256 hash of the uncompressed public key (without its `0x04` tag).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    pub fn from_public_key(public_key: &PublicKey) -> Self {
        let uncompressed = public_key.serialize();
        let hash = Sha3_256::digest(&uncompressed[1..]);

        let mut bytes = [0u8; ADDRESS_LEN];
        bytes.copy_from_slice(&hash[hash.len() - ADDRESS_LEN..]);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{ADDRESS_PREFIX}{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for Address {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex_part = s
            .strip_prefix(ADDRESS_PREFIX)
            .ok_or_else(|| anyhow::anyhow!("address {s} does not start with {ADDRESS_PREFIX}"))?;

        let raw = hex::decode(hex_part)?;
        let bytes: [u8; ADDRESS_LEN] = raw
            .try_into()
            .map_err(|_| anyhow::anyhow!("address {s} must hold {ADDRESS_LEN} bytes"))?;
        Ok(Self(bytes))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Address::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IcxSigner;

    #[test]
    fn display_and_parse() {
        let address = IcxSigner::random().address();
        let s = address.to_string();

        assert!(s.starts_with("hx"));
        assert_eq!(s.len(), 2 + 2 * ADDRESS_LEN);
        assert_eq!(Address::from_str(&s).unwrap(), address);
    }

    #[test]
    fn parse_rejects_malformed() {
        assert!(Address::from_str("cx0000000000000000000000000000000000000000").is_err());
        assert!(Address::from_str("hx1234").is_err());
        assert!(Address::from_str("hxzz00000000000000000000000000000000000000").is_err());
    }

    #[test]
    fn known_private_key_address() {
        // private key 0x...01 maps to the generator point
        let mut key = [0u8; 32];
        key[31] = 1;
        let signer = IcxSigner::from_bytes(&key).unwrap();

        let uncompressed = signer.public_key().serialize();
        let hash = Sha3_256::digest(&uncompressed[1..]);
        let expected = format!("hx{}", hex::encode(&hash[12..]));
        assert_eq!(signer.address().to_string(), expected);
    }
}
