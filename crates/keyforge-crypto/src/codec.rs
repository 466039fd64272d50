//! On-wire encodings shared by every key object.
//!
//! Two encodings of the same payload:
//! - binary: the borsh layout of a byte vector (u32 little-endian length
//!   prefix, then the raw key bytes). Kept for legacy storage.
//! - JSON: `{"type": "<amino name>", "value": "<base64 payload>"}`.
//!
//! A zero-length payload never decodes.

use crate::error::CryptoError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// A key type with a registered wire name and a raw byte payload.
pub trait KeyCodec: Sized {
    /// Name written into the JSON `type` field.
    const AMINO_NAME: &'static str;

    fn payload(&self) -> &[u8];

    /// Build from a decoded payload. Must reject an empty payload with
    /// [`CryptoError::InvalidKeySize`].
    fn from_payload(payload: Vec<u8>) -> Result<Self, CryptoError>;

    fn from_binary(bz: &[u8]) -> Result<Self, CryptoError> {
        Self::from_payload(decode_binary(bz)?)
    }

    #[cfg(feature = "serde")]
    fn from_json(json: &str) -> Result<Self, CryptoError> {
        let envelope = decode_json(json)?;
        envelope.expect_type(Self::AMINO_NAME)?;
        Self::from_payload(envelope.payload()?)
    }
}

/// Length-prefix `payload`.
pub fn encode_binary(payload: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let mut out = Vec::with_capacity(4 + payload.len());
    borsh::BorshSerialize::serialize(payload, &mut out)?;
    Ok(out)
}

/// Strip the length prefix. Trailing bytes and empty payloads are rejected.
pub fn decode_binary(bz: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let payload: Vec<u8> = borsh::from_slice(bz)?;
    if payload.is_empty() {
        return Err(CryptoError::InvalidKeySize);
    }
    Ok(payload)
}

/// JSON envelope carrying a typed key payload.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct AminoJson {
    #[serde(rename = "type")]
    pub type_name: String,
    pub value: String,
}

#[cfg(feature = "serde")]
impl AminoJson {
    pub fn new(type_name: &str, payload: &[u8]) -> Self {
        Self {
            type_name: type_name.to_string(),
            value: STANDARD.encode(payload),
        }
    }

    pub fn expect_type(&self, type_name: &str) -> Result<(), CryptoError> {
        if self.type_name != type_name {
            return Err(CryptoError::Serialization(format!(
                "expected key type '{}', got '{}'",
                type_name, self.type_name
            )));
        }
        Ok(())
    }

    /// Decoded payload, rejecting an empty one.
    pub fn payload(&self) -> Result<Vec<u8>, CryptoError> {
        let payload = STANDARD.decode(&self.value)?;
        if payload.is_empty() {
            return Err(CryptoError::InvalidKeySize);
        }
        Ok(payload)
    }
}

#[cfg(feature = "serde")]
pub fn encode_json(type_name: &str, payload: &[u8]) -> Result<String, CryptoError> {
    serde_json::to_string(&AminoJson::new(type_name, payload))
        .map_err(|e| CryptoError::Serialization(e.to_string()))
}

#[cfg(feature = "serde")]
pub fn decode_json(json: &str) -> Result<AminoJson, CryptoError> {
    serde_json::from_str(json).map_err(|e| CryptoError::Serialization(e.to_string()))
}

/// Implements borsh and serde for a [`KeyCodec`] type in terms of the
/// encodings above.
macro_rules! impl_key_serialization {
    ($ty:ty) => {
        impl borsh::BorshSerialize for $ty {
            fn serialize<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
                borsh::BorshSerialize::serialize(
                    $crate::codec::KeyCodec::payload(self),
                    writer,
                )
            }
        }

        impl borsh::BorshDeserialize for $ty {
            fn deserialize_reader<R: std::io::Read>(reader: &mut R) -> std::io::Result<Self> {
                let payload: Vec<u8> = borsh::BorshDeserialize::deserialize_reader(reader)?;
                <$ty as $crate::codec::KeyCodec>::from_payload(payload).map_err(|e| {
                    std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
                })
            }
        }

        #[cfg(feature = "serde")]
        impl serde::Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                let envelope = $crate::codec::AminoJson::new(
                    <$ty as $crate::codec::KeyCodec>::AMINO_NAME,
                    $crate::codec::KeyCodec::payload(self),
                );
                serde::Serialize::serialize(&envelope, serializer)
            }
        }

        #[cfg(feature = "serde")]
        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let envelope =
                    <$crate::codec::AminoJson as serde::Deserialize>::deserialize(deserializer)?;
                envelope
                    .expect_type(<$ty as $crate::codec::KeyCodec>::AMINO_NAME)
                    .and_then(|_| envelope.payload())
                    .and_then(<$ty as $crate::codec::KeyCodec>::from_payload)
                    .map_err(serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use impl_key_serialization;
