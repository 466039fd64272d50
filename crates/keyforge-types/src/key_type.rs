use crate::error::TypesError;
use std::fmt;
use std::str::FromStr;

/// Signature algorithm tag carried by every key object.
///
/// The string returned by [`KeyType::as_str`] is persisted verbatim in wallet
/// metadata. Renaming a released variant breaks every wallet created with it.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum KeyType {
    /// Multisignature public key.
    Multi,
    /// Bitcoin secp256k1 ECDSA parameters.
    Secp256k1,
    /// Ed25519. Not supported for end-user keys.
    Ed25519,
    /// BLS12-381. Not supported for end-user keys.
    Bls12_381,
    /// Post-quantum Dilithium2. Software keys only.
    Dilithium2,
}

impl KeyType {
    pub const ALL: [KeyType; 5] = [
        KeyType::Multi,
        KeyType::Secp256k1,
        KeyType::Ed25519,
        KeyType::Bls12_381,
        KeyType::Dilithium2,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            KeyType::Multi => "multi",
            KeyType::Secp256k1 => "secp256k1",
            KeyType::Ed25519 => "ed25519",
            KeyType::Bls12_381 => "bls12_381",
            KeyType::Dilithium2 => "dilithium2",
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyType {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KeyType::ALL
            .into_iter()
            .find(|kt| kt.as_str() == s)
            .ok_or_else(|| TypesError::UnknownKeyType(s.to_string()))
    }
}
