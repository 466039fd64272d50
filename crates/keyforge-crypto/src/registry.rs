//! Name-to-algorithm lookup.
//!
//! The table is built once on first use and is read-only afterwards, so
//! lookups from any thread need no locking.

use crate::algo::{SigningAlgorithm, DILITHIUM2, SECP256K1};
use crate::error::CryptoError;
use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use tracing::warn;

static REGISTRY: Lazy<BTreeMap<&'static str, &'static dyn SigningAlgorithm>> = Lazy::new(|| {
    let algos: [&'static dyn SigningAlgorithm; 2] = [&SECP256K1, &DILITHIUM2];
    algos
        .into_iter()
        .map(|algo| (algo.name().as_str(), algo))
        .collect()
});

/// Look up an algorithm by its stable name.
pub fn resolve(name: &str) -> Result<&'static dyn SigningAlgorithm, CryptoError> {
    match REGISTRY.get(name) {
        Some(algo) => Ok(*algo),
        None => {
            warn!(algorithm = name, "unsupported signing algorithm");
            Err(CryptoError::UnsupportedAlgorithm(name.to_string()))
        }
    }
}

/// Like [`resolve`], but only among `allowed` (a keyring's supported list).
pub fn resolve_from(
    name: &str,
    allowed: &[&str],
) -> Result<&'static dyn SigningAlgorithm, CryptoError> {
    if !allowed.contains(&name) {
        warn!(algorithm = name, ?allowed, "signing algorithm not allowed");
        return Err(CryptoError::UnsupportedAlgorithm(name.to_string()));
    }
    resolve(name)
}

/// Registered names in sorted order.
pub fn names() -> Vec<&'static str> {
    REGISTRY.keys().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyforge_types::KeyType;

    #[test]
    fn test_resolve_registered() {
        assert_eq!(resolve("secp256k1").unwrap().name(), KeyType::Secp256k1);
        assert_eq!(resolve("dilithium2").unwrap().name(), KeyType::Dilithium2);
    }

    #[test]
    fn test_resolve_unknown() {
        for name in ["", "ed25519", "SECP256K1", "rsa"] {
            assert_eq!(
                resolve(name).err(),
                Some(CryptoError::UnsupportedAlgorithm(name.to_string()))
            );
        }
    }

    #[test]
    fn test_names_sorted() {
        assert_eq!(names(), vec!["dilithium2", "secp256k1"]);
    }

    #[test]
    fn test_resolve_from_allow_list() {
        assert!(resolve_from("secp256k1", &["secp256k1"]).is_ok());
        assert!(matches!(
            resolve_from("dilithium2", &["secp256k1"]),
            Err(CryptoError::UnsupportedAlgorithm(_))
        ));
        // Allowed but never registered.
        assert!(matches!(
            resolve_from("ed25519", &["ed25519", "secp256k1"]),
            Err(CryptoError::UnsupportedAlgorithm(_))
        ));
    }

    #[test]
    fn test_concurrent_lookups() {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                std::thread::spawn(move || {
                    let name = if i % 2 == 0 { "secp256k1" } else { "dilithium2" };
                    resolve(name).map(|a| a.name().as_str())
                })
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            let expected = if i % 2 == 0 { "secp256k1" } else { "dilithium2" };
            assert_eq!(handle.join().unwrap(), Ok(expected));
        }
    }
}
