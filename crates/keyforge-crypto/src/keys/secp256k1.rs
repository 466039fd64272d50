//! secp256k1 keys: 32-byte scalars, 33-byte compressed public keys and
//! low-S ECDSA over SHA-256.

use super::{truncated_address, PrivKey, PubKey};
use crate::codec::{impl_key_serialization, KeyCodec};
use crate::error::CryptoError;
use crate::hd::{compressed_public_key, KEY_LEN, PUBLIC_KEY_LEN};
use k256::ecdsa::signature::{Signer, Verifier};
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};
use keyforge_types::{Address, KeyType};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

pub const PRIV_KEY_SIZE: usize = KEY_LEN;
pub const PUB_KEY_SIZE: usize = PUBLIC_KEY_LEN;
pub const SIGNATURE_SIZE: usize = 64;

pub const PRIV_KEY_NAME: &str = "tendermint/PrivKeySecp256k1";
pub const PUB_KEY_NAME: &str = "tendermint/PubKeySecp256k1";

/// Filler used when `generate` receives no bytes.
const DEFAULT_FILL: u8 = 0x42;

#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Secp256k1PrivKey {
    key: Vec<u8>,
}

impl Secp256k1PrivKey {
    /// Deterministic key from arbitrary bytes: copied left-aligned into a
    /// zeroed 32-byte buffer, longer input truncated. Not a source of
    /// randomness; callers supply entropy.
    pub fn generate(bz: &[u8]) -> Self {
        let fill = [DEFAULT_FILL];
        let bz = if bz.is_empty() { &fill[..] } else { bz };

        let mut key = vec![0u8; PRIV_KEY_SIZE];
        let n = bz.len().min(PRIV_KEY_SIZE);
        key[..n].copy_from_slice(&bz[..n]);
        Self { key }
    }

    fn signing_key(&self) -> Result<SigningKey, CryptoError> {
        SigningKey::from_slice(&self.key).map_err(|_| CryptoError::InvalidPrivateKey)
    }
}

impl KeyCodec for Secp256k1PrivKey {
    const AMINO_NAME: &'static str = PRIV_KEY_NAME;

    fn payload(&self) -> &[u8] {
        &self.key
    }

    fn from_payload(payload: Vec<u8>) -> Result<Self, CryptoError> {
        if payload.len() != PRIV_KEY_SIZE {
            return Err(CryptoError::InvalidKeySize);
        }
        Ok(Self { key: payload })
    }
}

impl_key_serialization!(Secp256k1PrivKey);

impl PrivKey for Secp256k1PrivKey {
    fn bytes(&self) -> &[u8] {
        &self.key
    }

    fn key_type(&self) -> KeyType {
        KeyType::Secp256k1
    }

    fn amino_name(&self) -> &'static str {
        PRIV_KEY_NAME
    }

    fn pub_key(&self) -> Result<Box<dyn PubKey>, CryptoError> {
        let public = compressed_public_key(&self.key).ok_or(CryptoError::InvalidPrivateKey)?;
        Ok(Box::new(Secp256k1PubKey::from_compressed(public)))
    }

    /// RFC 6979 ECDSA over SHA-256(msg), normalized to low-S, as `r || s`.
    fn sign(&self, msg: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let signing_key = self.signing_key()?;
        let sig: Signature = signing_key.try_sign(msg)?;
        let sig = sig.normalize_s().unwrap_or(sig);
        Ok(sig.to_bytes().to_vec())
    }
}

impl fmt::Debug for Secp256k1PrivKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secp256k1PrivKey(..)")
    }
}

/// Compressed SEC1 point.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Secp256k1PubKey {
    key: Vec<u8>,
}

impl Secp256k1PubKey {
    pub fn from_compressed(bytes: [u8; PUB_KEY_SIZE]) -> Self {
        Self {
            key: bytes.to_vec(),
        }
    }

    fn verifying_key(&self) -> Option<VerifyingKey> {
        VerifyingKey::from_sec1_bytes(&self.key).ok()
    }
}

impl KeyCodec for Secp256k1PubKey {
    const AMINO_NAME: &'static str = PUB_KEY_NAME;

    fn payload(&self) -> &[u8] {
        &self.key
    }

    fn from_payload(payload: Vec<u8>) -> Result<Self, CryptoError> {
        if payload.len() != PUB_KEY_SIZE {
            return Err(CryptoError::InvalidKeySize);
        }
        Ok(Self { key: payload })
    }
}

impl_key_serialization!(Secp256k1PubKey);

impl PubKey for Secp256k1PubKey {
    /// RIPEMD160(SHA256(compressed key)).
    fn address(&self) -> Address {
        let sha = Sha256::digest(&self.key);
        truncated_address(&Ripemd160::digest(sha))
    }

    fn bytes(&self) -> &[u8] {
        &self.key
    }

    fn key_type(&self) -> KeyType {
        KeyType::Secp256k1
    }

    fn amino_name(&self) -> &'static str {
        PUB_KEY_NAME
    }

    /// Accepts only 64-byte low-S signatures.
    fn verify_signature(&self, msg: &[u8], sig: &[u8]) -> bool {
        if sig.len() != SIGNATURE_SIZE {
            return false;
        }
        let Ok(sig) = Signature::from_slice(sig) else {
            return false;
        };
        if sig.normalize_s().is_some() {
            return false;
        }
        match self.verifying_key() {
            Some(vk) => vk.verify(msg, &sig).is_ok(),
            None => false,
        }
    }

    fn clone_box(&self) -> Box<dyn PubKey> {
        Box::new(self.clone())
    }
}

impl fmt::Display for Secp256k1PubKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PubKeySecp256k1{{{}}}", hex::encode_upper(&self.key))
    }
}

impl fmt::Debug for Secp256k1PubKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
