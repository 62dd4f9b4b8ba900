//! CLI error types

use solpack_abi::EncodingError;
use solpack_crypto::CryptoError;
use thiserror::Error;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Parameter normalization or encoding failed
    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),

    /// Address or hash input rejected
    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Config error
    #[error("Config error: {0}")]
    Config(String),
}
