//! Cryptographic errors

use thiserror::Error;

/// Cryptographic operation error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// Input was expected to be hex text
    #[error("invalid hex input: {0}")]
    InvalidHex(String),

    /// Input is not a 40-digit address
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}
