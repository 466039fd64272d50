//! Dilithium2 key objects.
//!
//! Only key storage, encoding and address derivation are real here. There is
//! no lattice arithmetic behind these types:
//! - the public key is a 32-byte placeholder, SHA-256 of the private bytes;
//! - signing always fails with [`CryptoError::NotSupported`];
//! - verification accepts any non-empty signature and proves nothing.
//!
//! Do not treat a Dilithium2 signature check as an authentication step until
//! a real post-quantum backend replaces these placeholders.

use super::{truncated_address, PrivKey, PubKey};
use crate::codec::{impl_key_serialization, KeyCodec};
use crate::error::CryptoError;
use keyforge_types::{Address, KeyType};
use sha2::{Digest, Sha256};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Dilithium2 secret key length.
pub const PRIV_KEY_SIZE: usize = 2528;

pub const PRIV_KEY_NAME: &str = "tendermint/PrivKeyDilithium2";
pub const PUB_KEY_NAME: &str = "tendermint/PubKeyDilithium2";

const DEFAULT_FILL: u8 = 0x42;

#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Dilithium2PrivKey {
    key: Vec<u8>,
}

impl Dilithium2PrivKey {
    /// Fills the full key length by repeating `bz` cyclically.
    ///
    /// This is deterministic filler, not key generation: the result has no
    /// more entropy than `bz`.
    pub fn generate(bz: &[u8]) -> Self {
        let fill = [DEFAULT_FILL];
        let bz = if bz.is_empty() { &fill[..] } else { bz };

        let key = bz.iter().copied().cycle().take(PRIV_KEY_SIZE).collect();
        Self { key }
    }
}

impl KeyCodec for Dilithium2PrivKey {
    const AMINO_NAME: &'static str = PRIV_KEY_NAME;

    fn payload(&self) -> &[u8] {
        &self.key
    }

    /// Any non-empty length is accepted; older encodings stored shorter keys.
    fn from_payload(payload: Vec<u8>) -> Result<Self, CryptoError> {
        if payload.is_empty() {
            return Err(CryptoError::InvalidKeySize);
        }
        Ok(Self { key: payload })
    }
}

impl_key_serialization!(Dilithium2PrivKey);

impl PrivKey for Dilithium2PrivKey {
    fn bytes(&self) -> &[u8] {
        &self.key
    }

    fn key_type(&self) -> KeyType {
        KeyType::Dilithium2
    }

    fn amino_name(&self) -> &'static str {
        PRIV_KEY_NAME
    }

    /// Placeholder public key: SHA-256 of the private bytes.
    fn pub_key(&self) -> Result<Box<dyn PubKey>, CryptoError> {
        if self.key.is_empty() {
            return Err(CryptoError::InvalidPrivateKey);
        }
        Ok(Box::new(Dilithium2PubKey {
            key: Sha256::digest(&self.key).to_vec(),
        }))
    }

    fn sign(&self, _msg: &[u8]) -> Result<Vec<u8>, CryptoError> {
        Err(CryptoError::NotSupported(
            "dilithium2 signing is not implemented".to_string(),
        ))
    }
}

impl fmt::Debug for Dilithium2PrivKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dilithium2PrivKey(..)")
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Dilithium2PubKey {
    key: Vec<u8>,
}

impl KeyCodec for Dilithium2PubKey {
    const AMINO_NAME: &'static str = PUB_KEY_NAME;

    fn payload(&self) -> &[u8] {
        &self.key
    }

    fn from_payload(payload: Vec<u8>) -> Result<Self, CryptoError> {
        if payload.is_empty() {
            return Err(CryptoError::InvalidKeySize);
        }
        Ok(Self { key: payload })
    }
}

impl_key_serialization!(Dilithium2PubKey);

impl PubKey for Dilithium2PubKey {
    /// First 20 bytes of SHA-256(public key).
    fn address(&self) -> Address {
        truncated_address(&Sha256::digest(&self.key))
    }

    fn bytes(&self) -> &[u8] {
        &self.key
    }

    fn key_type(&self) -> KeyType {
        KeyType::Dilithium2
    }

    fn amino_name(&self) -> &'static str {
        PUB_KEY_NAME
    }

    /// NOT a signature check. Returns true for any non-empty signature.
    fn verify_signature(&self, _msg: &[u8], sig: &[u8]) -> bool {
        !sig.is_empty()
    }

    fn clone_box(&self) -> Box<dyn PubKey> {
        Box::new(self.clone())
    }
}

impl fmt::Display for Dilithium2PubKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PubKeyDilithium2{{{}}}", self.address())
    }
}

impl fmt::Debug for Dilithium2PubKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
