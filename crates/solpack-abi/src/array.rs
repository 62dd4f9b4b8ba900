//! Homogeneous array packers
//!
//! Every array packs to `offset(0x20) | count | body`. For fixed-width
//! elements the body is one word per element. For `bytes[]` and `string[]`
//! the body is an offset table followed by each element's
//! `length | content`, offsets measured from the end of the count word.

use solpack_primitives::{Address, U256};

use crate::scalar::{leading_offset, length_prefixed};
use crate::word::{EncodedValue, Word, WORD_BYTES};

/// Offset of every variable-width element, measured from the start of the
/// offset table.
///
/// With `n` elements whose padded content lengths are `L0..Ln-1`, element
/// `i` sits at `32*n + 32*i + (L0 + .. + Li-1)`: past the table, past one
/// length word per earlier element and past every earlier element's content.
pub fn element_offsets(padded_lengths: &[usize]) -> Vec<usize> {
    let table = WORD_BYTES * padded_lengths.len();
    let (offsets, _) = padded_lengths.iter().enumerate().fold(
        (Vec::with_capacity(padded_lengths.len()), 0usize),
        |(mut offsets, preceding), (i, len)| {
            offsets.push(table + WORD_BYTES * i + preceding);
            (offsets, preceding + len)
        },
    );
    offsets
}

fn fixed_array<I>(elements: I) -> EncodedValue
where
    I: ExactSizeIterator<Item = Word>,
{
    let mut words = Vec::with_capacity(2 + elements.len());
    words.push(leading_offset());
    words.push(Word::from_usize(elements.len()));
    words.extend(elements);
    EncodedValue::Dynamic(words)
}

fn variable_array<'a, I>(elements: I) -> EncodedValue
where
    I: ExactSizeIterator<Item = &'a [u8]>,
{
    let count = elements.len();
    let units: Vec<Vec<Word>> = elements.map(length_prefixed).collect();
    // each unit is one length word plus its padded content
    let padded_lengths: Vec<usize> = units
        .iter()
        .map(|unit| (unit.len() - 1) * WORD_BYTES)
        .collect();

    let body_words: usize = units.iter().map(Vec::len).sum();
    let mut words = Vec::with_capacity(2 + count + body_words);
    words.push(leading_offset());
    words.push(Word::from_usize(count));
    words.extend(element_offsets(&padded_lengths).into_iter().map(Word::from_usize));
    words.extend(units.into_iter().flatten());
    EncodedValue::Dynamic(words)
}

/// Pack `uint256[]`
pub fn pack_uint_array(values: &[U256]) -> EncodedValue {
    fixed_array(values.iter().map(Word::from_u256))
}

/// Pack `address[]`
pub fn pack_address_array(addresses: &[Address]) -> EncodedValue {
    fixed_array(addresses.iter().map(Word::from_address))
}

/// Pack `bool[]`
pub fn pack_bool_array(values: &[bool]) -> EncodedValue {
    fixed_array(values.iter().map(|b| Word::from_bool(*b)))
}

/// Pack `bytes[]`
pub fn pack_bytes_array<T: AsRef<[u8]>>(items: &[T]) -> EncodedValue {
    variable_array(items.iter().map(|item| item.as_ref()))
}

/// Pack `string[]`
pub fn pack_string_array<S: AsRef<str>>(items: &[S]) -> EncodedValue {
    variable_array(items.iter().map(|s| s.as_ref().as_bytes()))
}
