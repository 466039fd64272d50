//! Keyforge Crypto - key derivation and key objects for an HD wallet.
//!
//! This crate provides:
//! - BIP-32 master/child derivation from a BIP-39 mnemonic
//! - Signing-algorithm descriptors selected by name through a registry
//! - secp256k1 and Dilithium2 key objects with binary and JSON encodings
//!
//! ```no_run
//! use keyforge_crypto::registry;
//!
//! let algo = registry::resolve("secp256k1")?;
//! let bytes = algo.derive("abandon ... about", "", "m/44'/118'/0'/0/0")?;
//! let key = algo.generate(&bytes);
//! println!("{}", key.pub_key()?.address());
//! # Ok::<(), keyforge_crypto::CryptoError>(())
//! ```

pub mod algo;
pub mod codec;
pub mod error;
pub mod hd;
pub mod keys;
pub mod registry;

pub use algo::{derive_bip32, Dilithium2Algo, Secp256k1Algo, SigningAlgorithm};
pub use error::CryptoError;
pub use hd::{
    compute_master, create_hd_path, derive_for_path, Bip44Params, ChildNumber, DerivationPath,
    ExtendedPrivKey, ExtendedPubKey,
};
pub use keys::{
    priv_key_from_binary, pub_key_from_binary, Dilithium2PrivKey, Dilithium2PubKey, PrivKey,
    PubKey, Secp256k1PrivKey, Secp256k1PubKey,
};
#[cfg(feature = "serde")]
pub use keys::{priv_key_from_json, pub_key_from_json};
pub use codec::KeyCodec;
