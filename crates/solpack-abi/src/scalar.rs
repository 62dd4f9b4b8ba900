//! Single-value packers
//!
//! `uint256`, `address` and `bool` pack to one head word. `bytes` and
//! `string` pack to `offset(0x20) | length | content`, the content
//! right-padded to whole words and never shorter than one word.

use solpack_primitives::{Address, U256};

use crate::word::{EncodedValue, Word, WORD_BYTES};

/// Offset word leading every dynamic payload: its data starts one word in.
pub(crate) fn leading_offset() -> Word {
    Word::from_usize(WORD_BYTES)
}

/// `length | content` for one dynamic value
pub(crate) fn length_prefixed(data: &[u8]) -> Vec<Word> {
    let mut words = Vec::with_capacity(2 + data.len() / WORD_BYTES);
    words.push(Word::from_usize(data.len()));
    words.extend(Word::chunks_right_padded(data));
    words
}

/// Pack a `uint256`
pub fn pack_uint(value: &U256) -> EncodedValue {
    EncodedValue::Static(Word::from_u256(value))
}

/// Pack an `address`
pub fn pack_address(address: &Address) -> EncodedValue {
    EncodedValue::Static(Word::from_address(address))
}

/// Pack a `bool`
pub fn pack_bool(value: bool) -> EncodedValue {
    EncodedValue::Static(Word::from_bool(value))
}

/// Pack dynamic `bytes`
pub fn pack_bytes(data: &[u8]) -> EncodedValue {
    let mut words = vec![leading_offset()];
    words.extend(length_prefixed(data));
    EncodedValue::Dynamic(words)
}

/// Pack a `string` as its UTF-8 bytes
pub fn pack_string(s: &str) -> EncodedValue {
    pack_bytes(s.as_bytes())
}
