//! # solpack-primitives
//!
//! Fixed-size value types shared by the solpack crates: the 20-byte
//! [`Address`], the 32-byte [`H256`] digest and the 256-bit [`U256`]
//! integer every numeric encoding path goes through.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod address;
mod hash;

pub use address::{Address, AddressError};
pub use hash::{HashError, H256};

// Re-export primitive-types for U256
pub use primitive_types::U256;
