//! Signing-algorithm descriptors.
//!
//! A descriptor knows how to turn a mnemonic into raw private-key bytes for
//! its scheme and how to build a key object from bytes. Descriptors are
//! stateless and shared through the [`registry`](crate::registry).

use crate::error::CryptoError;
use crate::hd::{compute_master, derive_for_path};
use crate::keys::{Dilithium2PrivKey, PrivKey, Secp256k1PrivKey};
use bip39::Mnemonic;
use keyforge_types::KeyType;
use tracing::debug;
use zeroize::Zeroizing;

/// A pluggable key algorithm.
pub trait SigningAlgorithm: Send + Sync {
    /// Stable identifier; `name().as_str()` is what gets persisted.
    fn name(&self) -> KeyType;

    /// Derive raw private-key bytes from a mnemonic, passphrase and HD path.
    fn derive(
        &self,
        mnemonic: &str,
        passphrase: &str,
        hd_path: &str,
    ) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
        derive_bip32(mnemonic, passphrase, hd_path)
    }

    /// Build a private key from arbitrary bytes. Never fails.
    fn generate(&self, bz: &[u8]) -> Box<dyn PrivKey>;
}

/// BIP-39 seed, BIP-32 master key, then a walk down `hd_path`.
///
/// Mnemonic errors come back unchanged as [`CryptoError::SeedDerivation`].
pub fn derive_bip32(
    mnemonic: &str,
    passphrase: &str,
    hd_path: &str,
) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    let seed = Zeroizing::new(Mnemonic::parse(mnemonic)?.to_seed(passphrase));
    let master = compute_master(&seed[..]);
    let derived = derive_for_path(&master, hd_path)?;
    debug!(path = hd_path, "derived key");
    Ok(derived)
}

/// ECDSA over secp256k1.
#[derive(Debug, Clone, Copy, Default)]
pub struct Secp256k1Algo;

impl SigningAlgorithm for Secp256k1Algo {
    fn name(&self) -> KeyType {
        KeyType::Secp256k1
    }

    fn generate(&self, bz: &[u8]) -> Box<dyn PrivKey> {
        Box::new(Secp256k1PrivKey::generate(bz))
    }
}

/// Dilithium2 placeholder scheme. Derives secp256k1-style 32-byte material;
/// [`generate`](SigningAlgorithm::generate) expands it to full key length.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dilithium2Algo;

impl SigningAlgorithm for Dilithium2Algo {
    fn name(&self) -> KeyType {
        KeyType::Dilithium2
    }

    fn generate(&self, bz: &[u8]) -> Box<dyn PrivKey> {
        Box::new(Dilithium2PrivKey::generate(bz))
    }
}

pub static SECP256K1: Secp256k1Algo = Secp256k1Algo;
pub static DILITHIUM2: Dilithium2Algo = Dilithium2Algo;
