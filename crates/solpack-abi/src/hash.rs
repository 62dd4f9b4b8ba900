//! Keccak digests of encoded parameters

use solpack_crypto::sha3_raw;
use solpack_primitives::H256;

use crate::encode::{encode_parameters, pack_token};
use crate::hexutil::strip_hex_prefix;
use crate::types::TypedParameter;
use crate::EncodingError;

fn digest(encoded: &str) -> Result<H256, EncodingError> {
    Ok(sha3_raw(strip_hex_prefix(encoded), true)?)
}

/// `0x`-prefixed keccak digest of the encoded parameter list.
///
/// An empty list hashes the zero-length byte string.
pub fn hash_parameters(params: &[TypedParameter]) -> Result<String, EncodingError> {
    hash_parameters_raw(params).map(|hash| hash.to_hex())
}

/// Digest of the same bytes as [`hash_parameters`], unformatted
pub fn hash_parameters_raw(params: &[TypedParameter]) -> Result<H256, EncodingError> {
    let encoded = encode_parameters(params)?;
    let hash = digest(&encoded)?;
    tracing::debug!("Hashed {} parameters to {}", params.len(), hash);
    Ok(hash)
}

/// `0x`-prefixed digest of one value's packing, without a head word
pub fn hash_parameter(param: &TypedParameter) -> Result<String, EncodingError> {
    let token = param.normalize()?;
    let hash = digest(&pack_token(&token).to_hex())?;
    tracing::debug!("Hashed {} value to {}", param.kind, hash);
    Ok(hash.to_hex())
}
