//! BIP-44 path parameters: `m / purpose' / coin_type' / account' / change / address_index`.

use super::path::{ChildNumber, DerivationPath};
use crate::error::CryptoError;
use std::fmt;
use std::str::FromStr;

/// Registered coin type used by the default wallet path.
pub const COSMOS_COIN_TYPE: u32 = 118;

/// Purpose field mandated by BIP-44.
pub const BIP44_PURPOSE: u32 = 44;

/// First key of the default account.
pub const FULL_FUNDRAISER_PATH: &str = "m/44'/118'/0'/0/0";

/// The five BIP-44 fields. The first three are always hardened.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Bip44Params {
    pub purpose: u32,
    pub coin_type: u32,
    pub account: u32,
    pub change: bool,
    pub address_index: u32,
}

impl Bip44Params {
    pub fn new(purpose: u32, coin_type: u32, account: u32, change: bool, address_index: u32) -> Self {
        Self {
            purpose,
            coin_type,
            account,
            change,
            address_index,
        }
    }

    /// Purpose 44, external chain.
    pub fn fundraiser(account: u32, coin_type: u32, address_index: u32) -> Self {
        Self::new(BIP44_PURPOSE, coin_type, account, false, address_index)
    }

    /// `m/` followed by the relative form.
    pub fn full_path(&self) -> String {
        format!("m/{}", self)
    }

    pub fn derivation_path(&self) -> Result<DerivationPath, CryptoError> {
        Ok(DerivationPath::master()
            .child(ChildNumber::hardened(self.purpose)?)
            .child(ChildNumber::hardened(self.coin_type)?)
            .child(ChildNumber::hardened(self.account)?)
            .child(ChildNumber::normal(self.change as u32)?)
            .child(ChildNumber::normal(self.address_index)?))
    }
}

/// Fundraiser path for `coin_type`, `account` and `address_index`.
pub fn create_hd_path(coin_type: u32, account: u32, address_index: u32) -> Bip44Params {
    Bip44Params::fundraiser(account, coin_type, address_index)
}

impl fmt::Display for Bip44Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}'/{}'/{}'/{}/{}",
            self.purpose, self.coin_type, self.account, self.change as u8, self.address_index
        )
    }
}

impl FromStr for Bip44Params {
    type Err = CryptoError;

    /// Strict parse: absolute (`m/...`) or relative, exactly five fields.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let relative = s.strip_prefix("m/").unwrap_or(s);
        let fields: Vec<&str> = relative.split('/').collect();
        if fields.len() != 5 {
            return Err(CryptoError::Parse(format!(
                "invalid BIP-44 path '{}': expected 5 fields, got {}",
                s,
                fields.len()
            )));
        }

        let children = fields
            .iter()
            .map(|f| f.parse::<ChildNumber>())
            .collect::<Result<Vec<_>, _>>()?;

        let expect_hardened = [true, true, true, false, false];
        let names = ["purpose", "coin type", "account", "change", "address index"];
        for ((child, hardened), name) in children.iter().zip(expect_hardened).zip(names) {
            if child.is_hardened() != hardened {
                return Err(CryptoError::Parse(format!(
                    "invalid BIP-44 path '{}': {} must {}be hardened",
                    s,
                    name,
                    if hardened { "" } else { "not " }
                )));
            }
        }

        if children[0].index() != BIP44_PURPOSE {
            return Err(CryptoError::Parse(format!(
                "invalid BIP-44 path '{}': purpose must be {}, got {}",
                s,
                BIP44_PURPOSE,
                children[0].index()
            )));
        }

        let change = match children[3].index() {
            0 => false,
            1 => true,
            other => {
                return Err(CryptoError::Parse(format!(
                    "invalid BIP-44 path '{}': change must be 0 or 1, got {}",
                    s, other
                )))
            }
        };

        Ok(Self::new(
            children[0].index(),
            children[1].index(),
            children[2].index(),
            change,
            children[4].index(),
        ))
    }
}
