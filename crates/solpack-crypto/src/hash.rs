//! Keccak-256 hashing

use solpack_primitives::H256;
use sha3::{Digest, Keccak256};

use crate::CryptoError;

/// Compute Keccak-256 hash of the input data
pub fn keccak256(data: &[u8]) -> H256 {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let result = hasher.finalize();
    H256::from_bytes(result.into())
}

/// Hash text input, returning `None` when there is nothing to hash.
///
/// With `treat_as_nibbles` the input is hex (an optional `0x`/`0X` marker is
/// dropped) and the decoded bytes are hashed; otherwise the UTF-8 bytes of
/// the text itself are hashed.
pub fn sha3(input: &str, treat_as_nibbles: bool) -> Result<Option<H256>, CryptoError> {
    if input.is_empty() {
        return Ok(None);
    }
    sha3_raw(input, treat_as_nibbles).map(Some)
}

/// Like [`sha3`], but empty input hashes the zero-length byte string.
pub fn sha3_raw(input: &str, treat_as_nibbles: bool) -> Result<H256, CryptoError> {
    if !treat_as_nibbles {
        return Ok(keccak256(input.as_bytes()));
    }
    let body = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input);
    let bytes = hex::decode(body).map_err(|e| CryptoError::InvalidHex(e.to_string()))?;
    Ok(keccak256(&bytes))
}

/// Compute function selector (first 4 bytes of keccak256(signature))
pub fn function_selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&hash.as_bytes()[..4]);
    selector
}
