//! Serialization implementations for keyforge-types
//!
//! This module provides serde and borsh implementations for all types.

use crate::*;

// Serde implementations
#[cfg(feature = "serde")]
mod serde_impls {
    use super::*;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;

    // Address
    impl Serialize for Address {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            self.to_string().serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for Address {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            Address::from_str(&s).map_err(serde::de::Error::custom)
        }
    }

    // KeyType - stable name string
    impl Serialize for KeyType {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            self.as_str().serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for KeyType {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            KeyType::from_str(&s).map_err(serde::de::Error::custom)
        }
    }
}

// Borsh implementations
#[cfg(feature = "borsh")]
mod borsh_impls {
    use super::*;
    use borsh::{BorshDeserialize, BorshSerialize};
    use std::str::FromStr;

    // Address - stored as raw bytes
    impl BorshSerialize for Address {
        fn serialize<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
            writer.write_all(self.as_bytes())
        }
    }

    impl BorshDeserialize for Address {
        fn deserialize_reader<R: std::io::Read>(reader: &mut R) -> std::io::Result<Self> {
            let mut bytes = [0u8; 20];
            reader.read_exact(&mut bytes)?;
            Ok(Address::from_bytes(bytes))
        }
    }

    // KeyType - stored as its stable name
    impl BorshSerialize for KeyType {
        fn serialize<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
            BorshSerialize::serialize(self.as_str(), writer)
        }
    }

    impl BorshDeserialize for KeyType {
        fn deserialize_reader<R: std::io::Read>(reader: &mut R) -> std::io::Result<Self> {
            let name = String::deserialize_reader(reader)?;
            KeyType::from_str(&name)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(feature = "serde")]
    fn test_address_serde_roundtrip() {
        let original = Address::from_bytes([0x5au8; 20]);
        let json = serde_json::to_string(&original).unwrap();
        assert_eq!(json, format!("\"{}\"", "5A".repeat(20)));
        let deserialized: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(original, deserialized);
    }

    #[test]
    #[cfg(feature = "serde")]
    fn test_key_type_serde() {
        let json = serde_json::to_string(&KeyType::Dilithium2).unwrap();
        assert_eq!(json, "\"dilithium2\"");
        let parsed: KeyType = serde_json::from_str("\"secp256k1\"").unwrap();
        assert_eq!(parsed, KeyType::Secp256k1);
        assert!(serde_json::from_str::<KeyType>("\"rsa\"").is_err());
    }

    #[test]
    #[cfg(feature = "borsh")]
    fn test_address_borsh_roundtrip() {
        let original = Address::from_bytes([9u8; 20]);
        let encoded = borsh::to_vec(&original).unwrap();
        assert_eq!(encoded.len(), 20);
        let deserialized: Address = borsh::from_slice(&encoded).unwrap();
        assert_eq!(original, deserialized);
    }

    #[test]
    #[cfg(feature = "borsh")]
    fn test_key_type_borsh() {
        let encoded = borsh::to_vec(&KeyType::Secp256k1).unwrap();
        // u32 length prefix followed by the name
        assert_eq!(&encoded[..4], &9u32.to_le_bytes());
        assert_eq!(&encoded[4..], b"secp256k1");
        let decoded: KeyType = borsh::from_slice(&encoded).unwrap();
        assert_eq!(decoded, KeyType::Secp256k1);
    }
}
