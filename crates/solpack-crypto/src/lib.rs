//! # solpack-crypto
//!
//! Hashing adapter for solpack.
//!
//! - Keccak-256 over raw bytes and over hex/text input
//! - Function selectors
//! - EIP-55 address checksums

#![warn(missing_docs)]
#![warn(clippy::all)]

mod checksum;
mod hash;
mod error;

pub use checksum::{
    check_address_checksum, is_address, to_checksum_address, to_lowercase_address,
    to_uppercase_address,
};
pub use hash::{function_selector, keccak256, sha3, sha3_raw};
pub use error::CryptoError;
