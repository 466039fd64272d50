//! Derivation path parsing.
//!
//! Accepts the usual `m/44'/118'/0'/0/0` notation. An apostrophe after a
//! segment marks it hardened. The empty string and a bare `m` both denote the
//! identity path.

use crate::error::CryptoError;
use std::fmt;
use std::str::FromStr;

/// Bit set on the serialized index of a hardened child.
pub const HARDENED_BIT: u32 = 1 << 31;

/// Largest index a single segment may carry.
pub const MAX_CHILD_INDEX: u32 = HARDENED_BIT - 1;

const HARDENED_MARKER: char = '\'';

/// One step of a derivation path.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ChildNumber {
    index: u32,
    hardened: bool,
}

impl ChildNumber {
    pub fn new(index: u32, hardened: bool) -> Result<Self, CryptoError> {
        if index > MAX_CHILD_INDEX {
            return Err(CryptoError::Range(index as u64));
        }
        Ok(Self { index, hardened })
    }

    pub fn hardened(index: u32) -> Result<Self, CryptoError> {
        Self::new(index, true)
    }

    pub fn normal(index: u32) -> Result<Self, CryptoError> {
        Self::new(index, false)
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn is_hardened(&self) -> bool {
        self.hardened
    }

    /// Index as it enters the HMAC input (`ser32(i)`), hardened bit included.
    pub fn to_u32(&self) -> u32 {
        if self.hardened {
            self.index | HARDENED_BIT
        } else {
            self.index
        }
    }

    pub fn to_be_bytes(&self) -> [u8; 4] {
        self.to_u32().to_be_bytes()
    }
}

impl fmt::Display for ChildNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hardened {
            write!(f, "{}{}", self.index, HARDENED_MARKER)
        } else {
            write!(f, "{}", self.index)
        }
    }
}

impl FromStr for ChildNumber {
    type Err = CryptoError;

    fn from_str(segment: &str) -> Result<Self, Self::Err> {
        if segment.is_empty() {
            return Err(CryptoError::Parse("empty path segment".to_string()));
        }

        let (digits, hardened) = match segment.strip_suffix(HARDENED_MARKER) {
            Some(rest) => (rest, true),
            None => (segment, false),
        };

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CryptoError::Parse(format!(
                "segment '{}' is not a decimal index",
                segment
            )));
        }

        // All digits, so the only possible failure is overflow.
        let value: u64 = digits.parse().map_err(|_| CryptoError::Range(u64::MAX))?;
        if value > MAX_CHILD_INDEX as u64 {
            return Err(CryptoError::Range(value));
        }

        Self::new(value as u32, hardened)
    }
}

/// Ordered list of child steps walked from the master key.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct DerivationPath(Vec<ChildNumber>);

impl DerivationPath {
    /// The identity path (`m`).
    pub fn master() -> Self {
        Self(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChildNumber> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[ChildNumber] {
        &self.0
    }

    /// Append a child step, returning the extended path.
    pub fn child(mut self, child: ChildNumber) -> Self {
        self.0.push(child);
        self
    }
}

impl From<Vec<ChildNumber>> for DerivationPath {
    fn from(children: Vec<ChildNumber>) -> Self {
        Self(children)
    }
}

impl<'a> IntoIterator for &'a DerivationPath {
    type Item = &'a ChildNumber;
    type IntoIter = std::slice::Iter<'a, ChildNumber>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for child in &self.0 {
            write!(f, "/{}", child)?;
        }
        Ok(())
    }
}

impl FromStr for DerivationPath {
    type Err = CryptoError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        if path.is_empty() {
            return Ok(Self::master());
        }

        let mut parts = path.split('/');
        match parts.next() {
            Some("m") => {}
            Some(root) => {
                return Err(CryptoError::Parse(format!(
                    "path '{}' must start with 'm', got '{}'",
                    path, root
                )))
            }
            None => return Err(CryptoError::Parse(format!("empty path '{}'", path))),
        }

        let children = parts
            .map(|segment| {
                segment.parse::<ChildNumber>().map_err(|e| match e {
                    CryptoError::Parse(reason) => {
                        CryptoError::Parse(format!("path '{}': {}", path, reason))
                    }
                    other => other,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self(children))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_standard_path() {
        let path: DerivationPath = "m/44'/118'/0'/0/0".parse().unwrap();
        let expected: Vec<(u32, bool)> =
            vec![(44, true), (118, true), (0, true), (0, false), (0, false)];
        let actual: Vec<(u32, bool)> = path.iter().map(|c| (c.index(), c.is_hardened())).collect();
        assert_eq!(actual, expected);
        assert_eq!(path.to_string(), "m/44'/118'/0'/0/0");
    }

    #[test]
    fn test_identity_paths() {
        assert!("".parse::<DerivationPath>().unwrap().is_empty());
        assert!("m".parse::<DerivationPath>().unwrap().is_empty());
        assert_eq!(DerivationPath::master().to_string(), "m");
    }

    #[test]
    fn test_wrong_root() {
        for bad in ["44'/0'", "M/0", "n/0", "/0", "x"] {
            assert!(
                matches!(bad.parse::<DerivationPath>(), Err(CryptoError::Parse(_))),
                "{} should fail to parse",
                bad
            );
        }
    }

    #[test]
    fn test_malformed_segments() {
        for bad in ["m/", "m//0", "m/abc", "m/0''", "m/'", "m/4'4", "m/-1", "m/+1", "m/0h", "m/ 1"] {
            assert!(
                matches!(bad.parse::<DerivationPath>(), Err(CryptoError::Parse(_))),
                "{} should fail to parse",
                bad
            );
        }
    }

    #[test]
    fn test_index_range() {
        let max: DerivationPath = "m/2147483647'".parse().unwrap();
        assert_eq!(max.as_slice()[0].to_u32(), u32::MAX);

        assert_eq!(
            "m/2147483648".parse::<DerivationPath>(),
            Err(CryptoError::Range(2147483648))
        );
        assert_eq!(
            "m/0'/4294967296'".parse::<DerivationPath>(),
            Err(CryptoError::Range(4294967296))
        );
        assert_eq!(
            "m/99999999999999999999999".parse::<DerivationPath>(),
            Err(CryptoError::Range(u64::MAX))
        );
        assert_eq!(ChildNumber::normal(HARDENED_BIT), Err(CryptoError::Range(HARDENED_BIT as u64)));
    }

    #[test]
    fn test_child_number_serialization() {
        let hardened = ChildNumber::hardened(44).unwrap();
        assert_eq!(hardened.to_be_bytes(), [0x80, 0, 0, 44]);
        assert_eq!(hardened.to_string(), "44'");

        let normal = ChildNumber::normal(5).unwrap();
        assert_eq!(normal.to_be_bytes(), [0, 0, 0, 5]);
        assert_eq!(normal.to_string(), "5");
    }

    #[test]
    fn test_builder() {
        let path = DerivationPath::master()
            .child(ChildNumber::hardened(44).unwrap())
            .child(ChildNumber::normal(1).unwrap());
        assert_eq!(path.to_string(), "m/44'/1");
        assert_eq!(path.len(), 2);
    }
}
