//! Keyforge Types - Core type definitions shared by the key registry.
//!
//! This crate provides:
//! - Addresses (20-byte key fingerprints, hex and Bech32 text forms)
//! - Key type tags with stable, persisted names

pub mod address;
pub mod key_type;
pub mod error;

#[cfg(any(feature = "serde", feature = "borsh"))]
mod serialization;

pub use address::Address;
pub use key_type::KeyType;
pub use error::TypesError;
