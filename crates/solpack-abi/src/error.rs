//! Encoding error types

use solpack_crypto::CryptoError;
use thiserror::Error;

use crate::types::ParamType;

/// Error raised while normalizing or encoding parameters
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// Non-hex characters where hex is required
    #[error("invalid hex input: {0}")]
    InvalidHexInput(String),

    /// Value is neither valid decimal nor valid hex where a number is required
    #[error("invalid numeric input: {0}")]
    InvalidNumericInput(String),

    /// Value is not a 40-digit hex address
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Text is not one of `true`, `false`, `1`, `0`
    #[error("invalid boolean input: {0}")]
    InvalidBoolInput(String),

    /// Fractional part longer than the unit allows
    #[error("too many decimal places: at most {decimals}, got {found}")]
    TooManyDecimals {
        /// Decimals supported by the unit
        decimals: u32,
        /// Fractional digits supplied
        found: usize,
    },

    /// Value shape does not match the declared kind
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// Declared kind
        expected: ParamType,
        /// Shape of the supplied value
        found: String,
    },

    /// Type tag not recognized
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// A parameter of a list failed to encode
    #[error("parameter {index} ({kind}): {source}")]
    Parameter {
        /// Position in the parameter list
        index: usize,
        /// Declared kind of the failing parameter
        kind: ParamType,
        /// Underlying failure
        source: Box<EncodingError>,
    },
}

impl EncodingError {
    /// Attach the position and kind of the parameter that failed
    pub fn at(self, index: usize, kind: ParamType) -> Self {
        EncodingError::Parameter {
            index,
            kind,
            source: Box::new(self),
        }
    }
}

impl From<hex::FromHexError> for EncodingError {
    fn from(e: hex::FromHexError) -> Self {
        EncodingError::InvalidHexInput(e.to_string())
    }
}

impl From<CryptoError> for EncodingError {
    fn from(e: CryptoError) -> Self {
        match e {
            CryptoError::InvalidHex(msg) => EncodingError::InvalidHexInput(msg),
            CryptoError::InvalidAddress(msg) => EncodingError::InvalidAddress(msg),
        }
    }
}
