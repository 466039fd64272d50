//! Key objects.
//!
//! Every supported algorithm provides a private/public key pair behind the
//! [`PrivKey`] and [`PubKey`] traits so wallet code can hold keys without
//! knowing the concrete scheme.
//!
//! Lifecycle of a private key: created by `generate` or decoding, active while
//! in use, and invalidated by [`zeroize::Zeroize::zeroize`] (or on drop). An
//! invalidated key has an empty payload, reports `is_active() == false` and
//! its encodings never decode.

pub mod dilithium;
pub mod secp256k1;

pub use dilithium::{Dilithium2PrivKey, Dilithium2PubKey};
pub use secp256k1::{Secp256k1PrivKey, Secp256k1PubKey};

use crate::codec::{self, KeyCodec};
use crate::error::CryptoError;
use keyforge_types::{Address, KeyType};
use std::fmt;
use subtle::ConstantTimeEq;

/// Byte comparison whose running time does not depend on where the inputs
/// first differ. Lengths are not secret.
pub fn ct_bytes_eq(a: &[u8], b: &[u8]) -> bool {
    bool::from(a.ct_eq(b))
}

/// Truncate a digest to an address.
pub(crate) fn truncated_address(digest: &[u8]) -> Address {
    let mut bytes = [0u8; Address::LEN];
    bytes.copy_from_slice(&digest[..Address::LEN]);
    Address::from_bytes(bytes)
}

/// Public half of a key pair. Freely shareable.
pub trait PubKey: fmt::Debug + fmt::Display + Send + Sync {
    /// Raw fingerprint of the key. Not an account-abstraction address.
    fn address(&self) -> Address;

    fn bytes(&self) -> &[u8];

    fn key_type(&self) -> KeyType;

    /// Wire name used in the JSON `type` field.
    fn amino_name(&self) -> &'static str;

    fn verify_signature(&self, msg: &[u8], sig: &[u8]) -> bool;

    /// False for different algorithms, else a constant-time byte comparison.
    fn equals(&self, other: &dyn PubKey) -> bool {
        self.key_type() == other.key_type() && ct_bytes_eq(self.bytes(), other.bytes())
    }

    fn to_binary(&self) -> Result<Vec<u8>, CryptoError> {
        codec::encode_binary(self.bytes())
    }

    #[cfg(feature = "serde")]
    fn to_json(&self) -> Result<String, CryptoError> {
        codec::encode_json(self.amino_name(), self.bytes())
    }

    fn clone_box(&self) -> Box<dyn PubKey>;
}

/// Secret half of a key pair. Owns its bytes and wipes them on drop.
pub trait PrivKey: fmt::Debug + Send + Sync {
    /// Exact stored payload.
    fn bytes(&self) -> &[u8];

    fn key_type(&self) -> KeyType;

    fn amino_name(&self) -> &'static str;

    fn pub_key(&self) -> Result<Box<dyn PubKey>, CryptoError>;

    fn sign(&self, msg: &[u8]) -> Result<Vec<u8>, CryptoError>;

    /// False for different algorithms, else a constant-time byte comparison.
    fn equals(&self, other: &dyn PrivKey) -> bool {
        self.key_type() == other.key_type() && ct_bytes_eq(self.bytes(), other.bytes())
    }

    /// False once the key material has been wiped.
    fn is_active(&self) -> bool {
        !self.bytes().is_empty()
    }

    fn to_binary(&self) -> Result<Vec<u8>, CryptoError> {
        codec::encode_binary(self.bytes())
    }

    #[cfg(feature = "serde")]
    fn to_json(&self) -> Result<String, CryptoError> {
        codec::encode_json(self.amino_name(), self.bytes())
    }
}

impl PartialEq for dyn PubKey {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl PartialEq for dyn PrivKey {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Clone for Box<dyn PubKey> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Decode a length-prefixed private key of the given algorithm.
pub fn priv_key_from_binary(key_type: KeyType, bz: &[u8]) -> Result<Box<dyn PrivKey>, CryptoError> {
    match key_type {
        KeyType::Secp256k1 => Ok(Box::new(Secp256k1PrivKey::from_binary(bz)?)),
        KeyType::Dilithium2 => Ok(Box::new(Dilithium2PrivKey::from_binary(bz)?)),
        other => Err(CryptoError::UnsupportedAlgorithm(other.to_string())),
    }
}

/// Decode a length-prefixed public key of the given algorithm.
pub fn pub_key_from_binary(key_type: KeyType, bz: &[u8]) -> Result<Box<dyn PubKey>, CryptoError> {
    match key_type {
        KeyType::Secp256k1 => Ok(Box::new(Secp256k1PubKey::from_binary(bz)?)),
        KeyType::Dilithium2 => Ok(Box::new(Dilithium2PubKey::from_binary(bz)?)),
        other => Err(CryptoError::UnsupportedAlgorithm(other.to_string())),
    }
}

/// Decode a JSON private key, dispatching on its `type` field.
#[cfg(feature = "serde")]
pub fn priv_key_from_json(json: &str) -> Result<Box<dyn PrivKey>, CryptoError> {
    let envelope = codec::decode_json(json)?;
    match envelope.type_name.as_str() {
        Secp256k1PrivKey::AMINO_NAME => {
            Ok(Box::new(Secp256k1PrivKey::from_payload(envelope.payload()?)?))
        }
        Dilithium2PrivKey::AMINO_NAME => {
            Ok(Box::new(Dilithium2PrivKey::from_payload(envelope.payload()?)?))
        }
        other => Err(CryptoError::UnsupportedAlgorithm(other.to_string())),
    }
}

/// Decode a JSON public key, dispatching on its `type` field.
#[cfg(feature = "serde")]
pub fn pub_key_from_json(json: &str) -> Result<Box<dyn PubKey>, CryptoError> {
    let envelope = codec::decode_json(json)?;
    match envelope.type_name.as_str() {
        Secp256k1PubKey::AMINO_NAME => {
            Ok(Box::new(Secp256k1PubKey::from_payload(envelope.payload()?)?))
        }
        Dilithium2PubKey::AMINO_NAME => {
            Ok(Box::new(Dilithium2PubKey::from_payload(envelope.payload()?)?))
        }
        other => Err(CryptoError::UnsupportedAlgorithm(other.to_string())),
    }
}
