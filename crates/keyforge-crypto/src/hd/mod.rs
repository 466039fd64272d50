//! Hierarchical Deterministic (HD) key derivation (BIP-32 over secp256k1).
//!
//! ```text
//!  seed ──HMAC-SHA512("Bitcoin seed")──▶ (master key, chain code)
//!                                              │
//!                     for each path segment    ▼
//!   hardened:  HMAC-SHA512(c, 0x00 || k || ser32(i + 2^31))
//!   normal:    HMAC-SHA512(c, serP(k·G) || ser32(i))
//!                                              │
//!                                              ▼
//!                                    derived key bytes
//! ```
//!
//! Every function here is pure: the output depends only on the arguments.

pub mod bip44;
pub mod path;

pub use bip44::{create_hd_path, Bip44Params, COSMOS_COIN_TYPE, FULL_FUNDRAISER_PATH};
pub use path::{ChildNumber, DerivationPath, HARDENED_BIT, MAX_CHILD_INDEX};

use crate::error::CryptoError;
use hmac::{Hmac, Mac};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::elliptic_curve::PrimeField;
use k256::{FieldBytes, ProjectivePoint, PublicKey, Scalar, SecretKey};
use sha2::Sha512;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// HMAC key used to compute the master key from a seed.
pub const MASTER_SECRET: &[u8] = b"Bitcoin seed";

/// Length of a private key, chain code and HMAC half.
pub const KEY_LEN: usize = 32;

/// Length of a compressed SEC1 public key.
pub const PUBLIC_KEY_LEN: usize = 33;

type HmacSha512 = Hmac<Sha512>;

fn hmac_sha512(key: &[u8], parts: &[&[u8]]) -> Zeroizing<[u8; 64]> {
    let mut mac = HmacSha512::new_from_slice(key).expect("HMAC accepts keys of any length");
    for part in parts {
        mac.update(part);
    }
    let mut out = Zeroizing::new([0u8; 64]);
    out.copy_from_slice(&mac.finalize().into_bytes());
    out
}

fn split_halves(i: &[u8; 64]) -> ([u8; KEY_LEN], [u8; KEY_LEN]) {
    let mut left = [0u8; KEY_LEN];
    let mut right = [0u8; KEY_LEN];
    left.copy_from_slice(&i[..KEY_LEN]);
    right.copy_from_slice(&i[KEY_LEN..]);
    (left, right)
}

/// `parse256(bytes)` as a curve scalar, `None` when `bytes >= n`.
fn scalar_from_bytes(bytes: &[u8; KEY_LEN]) -> Option<Scalar> {
    Option::from(Scalar::from_repr(FieldBytes::from(*bytes)))
}

/// Compressed public key for a private key, `None` for zero or `>= n`.
pub(crate) fn compressed_public_key(key: &[u8]) -> Option<[u8; PUBLIC_KEY_LEN]> {
    let key: [u8; KEY_LEN] = key.try_into().ok()?;
    let secret = SecretKey::from_bytes(&FieldBytes::from(key)).ok()?;
    let encoded = secret.public_key().to_encoded_point(true);
    let mut out = [0u8; PUBLIC_KEY_LEN];
    out.copy_from_slice(encoded.as_bytes());
    Some(out)
}

/// Private key plus chain code at one node of the derivation tree.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ExtendedPrivKey {
    key: [u8; KEY_LEN],
    chain_code: [u8; KEY_LEN],
}

impl ExtendedPrivKey {
    pub fn new(key: [u8; KEY_LEN], chain_code: [u8; KEY_LEN]) -> Self {
        Self { key, chain_code }
    }

    pub fn key(&self) -> &[u8; KEY_LEN] {
        &self.key
    }

    pub fn chain_code(&self) -> &[u8; KEY_LEN] {
        &self.chain_code
    }

    /// Neutered counterpart: public key and the same chain code.
    pub fn to_extended_public(&self) -> Result<ExtendedPubKey, CryptoError> {
        let public_key = compressed_public_key(&self.key).ok_or(CryptoError::InvalidPrivateKey)?;
        Ok(ExtendedPubKey {
            public_key,
            chain_code: self.chain_code,
        })
    }

    /// One CKDpriv step.
    pub fn derive_child(&self, child: ChildNumber) -> Result<Self, CryptoError> {
        let invalid = CryptoError::InvalidChild {
            index: child.index(),
        };

        let parent = scalar_from_bytes(&self.key)
            .filter(|s| !bool::from(s.is_zero()))
            .ok_or_else(|| invalid.clone())?;

        let i = if child.is_hardened() {
            hmac_sha512(
                &self.chain_code,
                &[&[0u8][..], &self.key[..], &child.to_be_bytes()[..]],
            )
        } else {
            let public_key = compressed_public_key(&self.key).ok_or_else(|| invalid.clone())?;
            hmac_sha512(&self.chain_code, &[&public_key[..], &child.to_be_bytes()[..]])
        };

        let (mut il, chain_code) = split_halves(&i);
        let tweak = scalar_from_bytes(&il);
        il.zeroize();
        let tweak = tweak.ok_or_else(|| invalid.clone())?;

        let child_scalar = tweak + parent;
        if bool::from(child_scalar.is_zero()) {
            return Err(invalid);
        }

        let mut key = [0u8; KEY_LEN];
        key.copy_from_slice(&child_scalar.to_bytes());
        Ok(Self { key, chain_code })
    }

    /// Walk every segment of `path` starting from this node.
    pub fn derive_path(&self, path: &DerivationPath) -> Result<Self, CryptoError> {
        let mut node = self.clone();
        for child in path {
            tracing::trace!(index = child.index(), hardened = child.is_hardened(), "derive child");
            node = node.derive_child(*child)?;
        }
        Ok(node)
    }
}

impl fmt::Debug for ExtendedPrivKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ExtendedPrivKey(..)")
    }
}

/// Public key plus chain code. Can only walk non-hardened segments.
#[derive(Clone, PartialEq, Eq)]
pub struct ExtendedPubKey {
    public_key: [u8; PUBLIC_KEY_LEN],
    chain_code: [u8; KEY_LEN],
}

impl ExtendedPubKey {
    pub fn public_key(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.public_key
    }

    pub fn chain_code(&self) -> &[u8; KEY_LEN] {
        &self.chain_code
    }

    /// One CKDpub step. Hardened children need the private key and are refused.
    pub fn derive_child(&self, child: ChildNumber) -> Result<Self, CryptoError> {
        if child.is_hardened() {
            return Err(CryptoError::NotSupported(
                "hardened derivation requires the private key".to_string(),
            ));
        }
        let invalid = CryptoError::InvalidChild {
            index: child.index(),
        };

        let parent = PublicKey::from_sec1_bytes(&self.public_key)
            .map_err(|_| CryptoError::InvalidPublicKey)?;

        let i = hmac_sha512(
            &self.chain_code,
            &[&self.public_key[..], &child.to_be_bytes()[..]],
        );
        let (il, chain_code) = split_halves(&i);
        let tweak = scalar_from_bytes(&il).ok_or_else(|| invalid.clone())?;

        let point = ProjectivePoint::GENERATOR * tweak + parent.to_projective();
        if point == ProjectivePoint::IDENTITY {
            return Err(invalid);
        }

        let encoded = point.to_affine().to_encoded_point(true);
        let mut public_key = [0u8; PUBLIC_KEY_LEN];
        public_key.copy_from_slice(encoded.as_bytes());
        Ok(Self {
            public_key,
            chain_code,
        })
    }
}

impl fmt::Debug for ExtendedPubKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExtendedPubKey({})", hex::encode(self.public_key))
    }
}

/// Master key and chain code for a seed.
///
/// Total over any input; the seed length is validated by the seed deriver.
pub fn compute_master(seed: &[u8]) -> ExtendedPrivKey {
    let i = hmac_sha512(MASTER_SECRET, &[seed]);
    let (key, chain_code) = split_halves(&i);
    ExtendedPrivKey { key, chain_code }
}

/// Derive the private key bytes at `path` below `master`.
///
/// An empty path returns the master key unchanged without touching the chain
/// code.
pub fn derive_for_path(
    master: &ExtendedPrivKey,
    path: &str,
) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    let path: DerivationPath = path.parse()?;
    if path.is_empty() {
        return Ok(Zeroizing::new(master.key.to_vec()));
    }

    let derived = master.derive_path(&path)?;
    Ok(Zeroizing::new(derived.key.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;

    // BIP-32 test vector 1
    const V1_SEED: &str = "000102030405060708090a0b0c0d0e0f";

    // BIP-39 seed of "abandon x11 about" with an empty passphrase
    const ABANDON_SEED: &str = "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc19a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4";

    fn v1_master() -> ExtendedPrivKey {
        compute_master(&hex::decode(V1_SEED).unwrap())
    }

    #[test]
    fn test_master_vector() {
        let master = v1_master();
        assert_eq!(
            hex::encode(master.key()),
            "e8f32e723decf4051aefac8e2c93c9c5b214313817cdb01a1494b917c8436b35"
        );
        assert_eq!(
            hex::encode(master.chain_code()),
            "873dff81c02f525623fd1fe5167eac3a55a049de3d314bb42ee227ffed37d508"
        );
    }

    #[test]
    fn test_bip32_vector_chain() {
        let master = v1_master();
        let cases = [
            ("m/0'", "edb2e14f9ee77d26dd93b4ecede8d16ed408ce149b6cd80b0715a2d911a0afea"),
            ("m/0'/1", "3c6cb8d0f6a264c91ea8b5030fadaa8e538b020f0a387421a12de9319dc93368"),
            ("m/0'/1/2'", "cbce0d719ecf7431d88e6a89fa1483e02e35092af60c042b1df2ff59fa424dca"),
            ("m/0'/1/2'/2", "0f479245fb19a38a1954c5c7c0ebab2f9bdfd96a17563ef28a6a4b1a2a764ef4"),
        ];
        for (path, expected) in cases {
            let key = derive_for_path(&master, path).unwrap();
            assert_eq!(hex::encode(&*key), expected, "path {}", path);
        }
    }

    #[test]
    fn test_cosmos_path() {
        let master = compute_master(&hex::decode(ABANDON_SEED).unwrap());
        assert_eq!(
            hex::encode(master.key()),
            "1837c1be8e2995ec11cda2b066151be2cfb48adf9e47b151d46adab3a21cdf67"
        );
        let key = derive_for_path(&master, FULL_FUNDRAISER_PATH).unwrap();
        assert_eq!(
            hex::encode(&*key),
            "c4a48e2fce1481cd3294b4490f6678090ea98d3d0e5cd984558ab0968741b104"
        );
    }

    #[test]
    fn test_empty_path_returns_master() {
        let master = v1_master();
        assert_eq!(&*derive_for_path(&master, "").unwrap(), &master.key()[..]);
        assert_eq!(&*derive_for_path(&master, "m").unwrap(), &master.key()[..]);
    }

    #[test]
    fn test_hardened_differs_from_normal() {
        let master = v1_master();
        let hardened = derive_for_path(&master, "m/0'").unwrap();
        let normal = derive_for_path(&master, "m/0").unwrap();
        assert_ne!(&*hardened, &*normal);
        assert_eq!(
            hex::encode(&*normal),
            "4e2cdcf2f14e802810e878cf9e6411fc4e712edf19a06bcfcc5d5572e489a3b7"
        );
    }

    #[test]
    fn test_public_derivation_matches_private_for_normal_steps() {
        let master = v1_master();
        let node = master.derive_child(ChildNumber::hardened(0).unwrap()).unwrap();
        let xpub = node.to_extended_public().unwrap();

        let child = ChildNumber::normal(1).unwrap();
        let from_private = node.derive_child(child).unwrap().to_extended_public().unwrap();
        let from_public = xpub.derive_child(child).unwrap();
        assert_eq!(from_private, from_public);
    }

    #[test]
    fn test_public_derivation_refuses_hardened() {
        let xpub = v1_master().to_extended_public().unwrap();
        let result = xpub.derive_child(ChildNumber::hardened(0).unwrap());
        assert!(matches!(result, Err(CryptoError::NotSupported(_))));

        // Nothing reachable from public data reproduces the hardened child.
        let hardened = v1_master().derive_child(ChildNumber::hardened(0).unwrap()).unwrap();
        let public_walk = xpub.derive_child(ChildNumber::normal(0).unwrap()).unwrap();
        assert_ne!(
            hardened.to_extended_public().unwrap().public_key(),
            public_walk.public_key()
        );
    }

    #[test]
    fn test_parse_errors_propagate() {
        let master = v1_master();
        assert!(matches!(derive_for_path(&master, "44'/0"), Err(CryptoError::Parse(_))));
        assert!(matches!(derive_for_path(&master, "m/x"), Err(CryptoError::Parse(_))));
        assert_eq!(
            derive_for_path(&master, "m/2147483648"),
            Err(CryptoError::Range(2147483648))
        );
    }

    #[test]
    fn test_invalid_parent_surfaces_invalid_child() {
        // Zero and the group order are not valid secp256k1 private keys.
        let zero = ExtendedPrivKey::new([0u8; 32], [1u8; 32]);
        assert_eq!(
            zero.derive_child(ChildNumber::hardened(3).unwrap()).unwrap_err(),
            CryptoError::InvalidChild { index: 3 }
        );

        let order = ExtendedPrivKey::new([0xffu8; 32], [1u8; 32]);
        let err = order.derive_child(ChildNumber::normal(9).unwrap()).unwrap_err();
        assert!(err.is_retryable());
    }

    #[test]
    fn test_compressed_public_key_checks_length() {
        let mut one = [0u8; KEY_LEN];
        one[31] = 1;
        assert_eq!(
            hex::encode(compressed_public_key(&one).unwrap()),
            "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );
        assert!(compressed_public_key(&one[..31]).is_none());
        assert!(compressed_public_key(&[0u8; KEY_LEN]).is_none());
    }

    #[test]
    fn test_debug_redacts_key() {
        let master = v1_master();
        assert_eq!(format!("{:?}", master), "ExtendedPrivKey(..)");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(64))]

            #[test]
            fn derivation_is_deterministic(index in 0u32..=MAX_CHILD_INDEX, hardened in any::<bool>()) {
                let master = v1_master();
                let path = format!("m/{}{}", index, if hardened { "'" } else { "" });
                let first = derive_for_path(&master, &path);
                let second = derive_for_path(&master, &path);
                prop_assert_eq!(first, second);
            }

            #[test]
            fn hardened_and_normal_children_differ(index in 0u32..=MAX_CHILD_INDEX) {
                let master = v1_master();
                let hardened = derive_for_path(&master, &format!("m/{}'", index)).unwrap();
                let normal = derive_for_path(&master, &format!("m/{}", index)).unwrap();
                prop_assert_ne!(hardened, normal);
            }

            #[test]
            fn path_display_roundtrips(indices in proptest::collection::vec((0u32..=MAX_CHILD_INDEX, any::<bool>()), 0..6)) {
                let path: DerivationPath = indices
                    .iter()
                    .map(|(i, h)| if *h { ChildNumber::hardened(*i) } else { ChildNumber::normal(*i) })
                    .collect::<Result<Vec<_>, _>>()
                    .unwrap()
                    .into();
                let reparsed: DerivationPath = path.to_string().parse().unwrap();
                prop_assert_eq!(path, reparsed);
            }
        }
    }
}
