use crate::error::TypesError;
use std::fmt;
use std::str::FromStr;

/// 20-byte key fingerprint.
///
/// This is a one-way, truncated hash of public-key bytes; how the digest is
/// computed depends on the key algorithm. It is a raw cryptographic
/// fingerprint only and carries no account-abstraction semantics.
///
/// Display format is upper-case hex. [`Address::to_bech32`] renders the
/// human-facing form with a caller-chosen prefix.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address([u8; 20]);

impl Address {
    pub const ZERO: Self = Self([0u8; 20]);
    pub const LEN: usize = 20;

    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Create from a byte slice
    pub fn from_slice(slice: &[u8]) -> Result<Self, TypesError> {
        if slice.len() != Self::LEN {
            return Err(TypesError::InvalidAddressLength(slice.len()));
        }
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(slice);
        Ok(Self(bytes))
    }

    /// Check if this is the zero address
    pub fn is_zero(&self) -> bool {
        self == &Self::ZERO
    }

    /// Convert to hex string without 0x prefix
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Encode as Bech32 with the given human-readable prefix.
    pub fn to_bech32(&self, hrp: &str) -> Result<String, TypesError> {
        let hrp = bech32::Hrp::parse(hrp).map_err(|e| TypesError::Bech32Error(e.to_string()))?;
        bech32::encode::<bech32::Bech32>(hrp, &self.0)
            .map_err(|e| TypesError::Bech32Error(e.to_string()))
    }

    /// Decode a Bech32 string, requiring the given human-readable prefix.
    pub fn from_bech32(s: &str, expected_hrp: &str) -> Result<Self, TypesError> {
        let (hrp, data) = bech32::decode(s).map_err(|e| TypesError::Bech32Error(e.to_string()))?;

        if hrp.as_str() != expected_hrp {
            return Err(TypesError::InvalidAddressFormat(format!(
                "Invalid HRP: expected '{}', got '{}'",
                expected_hrp, hrp
            )));
        }

        Self::from_slice(&data)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode_upper(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", hex::encode_upper(self.0))
    }
}

impl fmt::LowerHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::UpperHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode_upper(self.0))
    }
}

impl FromStr for Address {
    type Err = TypesError;

    /// Parses hex, with or without a `0x` prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);

        if digits.len() != Self::LEN * 2 {
            return Err(TypesError::InvalidAddressFormat(s.to_string()));
        }

        let bytes = hex::decode(digits)?;
        Self::from_slice(&bytes)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
