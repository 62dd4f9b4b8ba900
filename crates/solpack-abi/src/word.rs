//! The 32-byte word and the encoded shape of one value

use std::fmt;

use solpack_primitives::{Address, U256};

use crate::hexutil::{pad_left, strip_hex_prefix};
use crate::EncodingError;

/// Bytes per word
pub const WORD_BYTES: usize = 32;

/// Hex characters per word
pub const WORD_HEX_LEN: usize = 2 * WORD_BYTES;

/// One 32-byte unit of the encoding. Its hex rendering is always exactly
/// [`WORD_HEX_LEN`] characters.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Word([u8; WORD_BYTES]);

impl Word {
    /// All-zero word
    pub const ZERO: Word = Word([0u8; WORD_BYTES]);

    /// Create from raw bytes
    pub const fn from_bytes(bytes: [u8; WORD_BYTES]) -> Self {
        Word(bytes)
    }

    /// Big-endian integer, left-aligned with zeros
    pub fn from_u256(value: &U256) -> Self {
        let mut bytes = [0u8; WORD_BYTES];
        value.to_big_endian(&mut bytes);
        Word(bytes)
    }

    /// Lengths, counts and offsets
    pub fn from_usize(value: usize) -> Self {
        Self::from_u256(&U256::from(value as u64))
    }

    /// Address in the low 20 bytes
    pub fn from_address(address: &Address) -> Self {
        let mut bytes = [0u8; WORD_BYTES];
        bytes[WORD_BYTES - Address::LEN..].copy_from_slice(address.as_bytes());
        Word(bytes)
    }

    /// `1` for true, `0` for false
    pub fn from_bool(value: bool) -> Self {
        let mut bytes = [0u8; WORD_BYTES];
        bytes[WORD_BYTES - 1] = u8::from(value);
        Word(bytes)
    }

    /// Left-pad hex content (marker optional) to one word. Content wider than
    /// a word is rejected rather than truncated.
    pub fn from_hex_left(content: &str) -> Result<Self, EncodingError> {
        let padded = pad_left(strip_hex_prefix(content), WORD_HEX_LEN, '0');
        if padded.len() != WORD_HEX_LEN {
            return Err(EncodingError::InvalidHexInput(format!(
                "{} does not fit in one word",
                content
            )));
        }
        let mut bytes = [0u8; WORD_BYTES];
        hex::decode_to_slice(&padded, &mut bytes)?;
        Ok(Word(bytes))
    }

    /// Split `data` into words, zero-filling the last one on the right.
    /// Always yields at least one word, so empty content occupies a single
    /// zero word.
    pub fn chunks_right_padded(data: &[u8]) -> Vec<Word> {
        if data.is_empty() {
            return vec![Word::ZERO];
        }
        data.chunks(WORD_BYTES)
            .map(|chunk| {
                let mut bytes = [0u8; WORD_BYTES];
                bytes[..chunk.len()].copy_from_slice(chunk);
                Word(bytes)
            })
            .collect()
    }

    /// Get as bytes
    pub fn as_bytes(&self) -> &[u8; WORD_BYTES] {
        &self.0
    }

    /// Read back as a big-endian integer
    pub fn to_u256(&self) -> U256 {
        U256::from_big_endian(&self.0)
    }

    /// 64 lowercase hex characters, no marker
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word({})", self.to_hex())
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Result of encoding one typed value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodedValue {
    /// Single word placed in the head
    Static(Word),
    /// Payload placed in the tail and referenced by an offset word
    Dynamic(Vec<Word>),
}

impl EncodedValue {
    /// Whether the value lives in the tail
    pub fn is_dynamic(&self) -> bool {
        matches!(self, EncodedValue::Dynamic(_))
    }

    /// The encoded words in order
    pub fn words(&self) -> &[Word] {
        match self {
            EncodedValue::Static(word) => std::slice::from_ref(word),
            EncodedValue::Dynamic(words) => words,
        }
    }

    /// Encoded size in bytes
    pub fn byte_len(&self) -> usize {
        self.words().len() * WORD_BYTES
    }

    /// Concatenated word hex, no marker
    pub fn to_hex(&self) -> String {
        words_to_hex(self.words())
    }
}

/// Concatenate the hex of `words`
pub fn words_to_hex(words: &[Word]) -> String {
    let mut out = String::with_capacity(words.len() * WORD_HEX_LEN);
    for word in words {
        out.push_str(&word.to_hex());
    }
    out
}
