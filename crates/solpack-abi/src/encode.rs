//! Parameter list encoding
//!
//! The output has one head word per parameter, followed by the tail. A
//! static parameter's head word is its value. A dynamic parameter's head
//! word is the byte offset of its payload from the start of the tail, and
//! the payload itself is appended to the tail.

use solpack_crypto::function_selector;

use crate::array::{
    pack_address_array, pack_bool_array, pack_bytes_array, pack_string_array, pack_uint_array,
};
use crate::scalar::{pack_address, pack_bool, pack_bytes, pack_string, pack_uint};
use crate::types::{Token, TypedParameter};
use crate::word::{words_to_hex, EncodedValue, Word, WORD_BYTES};
use crate::EncodingError;

/// Encode a single token
pub fn pack_token(token: &Token) -> EncodedValue {
    match token {
        Token::Uint(value) => pack_uint(value),
        Token::Address(address) => pack_address(address),
        Token::Bool(value) => pack_bool(*value),
        Token::Bytes(data) => pack_bytes(data),
        Token::String(s) => pack_string(s),
        Token::UintArray(values) => pack_uint_array(values),
        Token::AddressArray(addresses) => pack_address_array(addresses),
        Token::BoolArray(values) => pack_bool_array(values),
        Token::BytesArray(items) => pack_bytes_array(items),
        Token::StringArray(items) => pack_string_array(items),
    }
}

struct EncodingPlan {
    head: Vec<Word>,
    tail: Vec<Word>,
}

impl EncodingPlan {
    fn with_capacity(params: usize) -> Self {
        Self {
            head: Vec::with_capacity(params),
            tail: Vec::new(),
        }
    }

    /// Bytes already placed in the tail
    fn tail_offset(&self) -> usize {
        self.tail.len() * WORD_BYTES
    }

    fn push(mut self, value: EncodedValue) -> Self {
        match value {
            EncodedValue::Static(word) => self.head.push(word),
            EncodedValue::Dynamic(payload) => {
                self.head.push(Word::from_usize(self.tail_offset()));
                self.tail.extend(payload);
            }
        }
        self
    }

    fn to_hex(&self) -> String {
        let mut out = words_to_hex(&self.head);
        out.push_str(&words_to_hex(&self.tail));
        out
    }
}

/// Encode validated tokens as head followed by tail. Unprefixed lowercase
/// hex; an empty list encodes to `""`.
pub fn encode_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(pack_token)
        .fold(EncodingPlan::with_capacity(tokens.len()), EncodingPlan::push)
        .to_hex()
}

/// Normalize every parameter and encode the list.
///
/// Nothing is emitted unless every parameter is valid; the first failure is
/// reported with its position and declared kind.
pub fn encode_parameters(params: &[TypedParameter]) -> Result<String, EncodingError> {
    let tokens = normalize_all(params)?;
    let encoded = encode_tokens(&tokens);
    tracing::debug!(
        "Encoded {} parameters into {} bytes",
        params.len(),
        encoded.len() / 2
    );
    Ok(encoded)
}

fn normalize_all(params: &[TypedParameter]) -> Result<Vec<Token>, EncodingError> {
    params
        .iter()
        .enumerate()
        .map(|(index, param)| {
            tracing::trace!("Normalizing parameter {} as {}", index, param.kind);
            param.normalize().map_err(|e| {
                tracing::warn!("Rejected parameter {} ({}): {}", index, param.kind, e);
                e.at(index, param.kind)
            })
        })
        .collect()
}

/// 8 hex digits of the selector for a signature such as
/// `transfer(address,uint256)`
pub fn pack_function(signature: &str) -> String {
    hex::encode(function_selector(signature))
}

/// `0x`, the selector, then the encoded arguments
pub fn encode_function_call(
    signature: &str,
    params: &[TypedParameter],
) -> Result<String, EncodingError> {
    let arguments = encode_parameters(params)?;
    Ok(format!("0x{}{}", pack_function(signature), arguments))
}
