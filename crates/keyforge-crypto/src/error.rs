use thiserror::Error;

/// Errors that can occur in derivation, registry lookup and key handling.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CryptoError {
    /// Bad mnemonic or checksum, passed through from the seed deriver.
    #[error(transparent)]
    SeedDerivation(#[from] bip39::Error),

    #[error("Invalid derivation path: {0}")]
    Parse(String),

    #[error("Derivation index out of range: {0} (max {})", crate::hd::MAX_CHILD_INDEX)]
    Range(u64),

    /// Derivation produced a key the HD standard rejects. Retry with another index.
    #[error("Invalid child key at index {index}")]
    InvalidChild { index: u32 },

    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Invalid key size")]
    InvalidKeySize,

    #[error("Not supported: {0}")]
    NotSupported(String),

    #[error("Invalid private key")]
    InvalidPrivateKey,

    #[error("Invalid public key")]
    InvalidPublicKey,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CryptoError {
    /// Only an invalid child may succeed when retried with a different index.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CryptoError::InvalidChild { .. })
    }
}

impl From<std::io::Error> for CryptoError {
    fn from(e: std::io::Error) -> Self {
        CryptoError::Serialization(e.to_string())
    }
}

impl From<k256::ecdsa::Error> for CryptoError {
    fn from(_: k256::ecdsa::Error) -> Self {
        CryptoError::InvalidSignature
    }
}

impl From<base64::DecodeError> for CryptoError {
    fn from(e: base64::DecodeError) -> Self {
        CryptoError::Serialization(e.to_string())
    }
}
