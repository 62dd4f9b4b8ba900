//! Hex text helpers: prefix handling, padding and conversions
//!
//! A hex marker is `0x` or `0X`. Padding never counts the marker towards the
//! requested width and never truncates.

use rand::{rngs::OsRng, RngCore};
use solpack_primitives::U256;

use crate::EncodingError;

fn split_marker(s: &str) -> (&str, &str) {
    if s.starts_with("0x") || s.starts_with("0X") {
        s.split_at(2)
    } else {
        ("", s)
    }
}

/// Whether `s` starts with a hex marker
pub fn has_hex_prefix(s: &str) -> bool {
    !split_marker(s).0.is_empty()
}

/// Whether `s` is hex, with or without a marker. An empty body counts as hex.
pub fn is_hex(s: &str) -> bool {
    split_marker(s).1.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Whether `s` is hex and carries a marker
pub fn is_hex_strict(s: &str) -> bool {
    has_hex_prefix(s) && is_hex(s)
}

/// Whether `s` is a non-empty run of decimal digits
pub fn is_number(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Remove the hex marker, but only when the rest of `s` is valid hex.
pub fn strip_hex_prefix(s: &str) -> &str {
    let (marker, body) = split_marker(s);
    if !marker.is_empty() && is_hex(body) {
        body
    } else {
        s
    }
}

/// Left-fill `s` with `fill` up to `width` characters, keeping any hex
/// marker in front and outside the width.
pub fn pad_left(s: &str, width: usize, fill: char) -> String {
    let (marker, body) = split_marker(s);
    let missing = width.saturating_sub(body.chars().count());
    let mut out = String::with_capacity(marker.len() + body.len() + missing);
    out.push_str(marker);
    out.extend(std::iter::repeat(fill).take(missing));
    out.push_str(body);
    out
}

/// Right-fill `s` with `fill` up to `width` characters, keeping any hex
/// marker in front and outside the width.
pub fn pad_right(s: &str, width: usize, fill: char) -> String {
    let (marker, body) = split_marker(s);
    let missing = width.saturating_sub(body.chars().count());
    let mut out = String::with_capacity(marker.len() + body.len() + missing);
    out.push_str(marker);
    out.push_str(body);
    out.extend(std::iter::repeat(fill).take(missing));
    out
}

/// Lowercase hex of `value` without leading zeros (`"0"` for zero)
pub fn u256_to_hex(value: &U256) -> String {
    format!("{:x}", value)
}

/// Hex rendering of a decimal number string, or of arbitrary text byte by
/// byte. No marker is added.
pub fn to_hex(value: &str) -> Result<String, EncodingError> {
    if is_number(value) {
        let number = U256::from_dec_str(value)
            .map_err(|_| EncodingError::InvalidNumericInput(value.to_string()))?;
        Ok(u256_to_hex(&number))
    } else {
        Ok(hex::encode(value.as_bytes()))
    }
}

/// `0x`-prefixed hex of the UTF-8 bytes of `s`
pub fn utf8_to_hex(s: &str) -> String {
    bytes_to_hex(s.as_bytes())
}

/// `0x`-prefixed hex of ASCII text. ASCII is a subset of UTF-8, so this
/// matches [`utf8_to_hex`] on ASCII input.
pub fn ascii_to_hex(s: &str) -> String {
    bytes_to_hex(s.as_bytes())
}

/// `0x`-prefixed hex, two digits per byte
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// `size` bytes from the OS random source, as lowercase hex with `0x`
/// in front when `prefixed`.
pub fn random_hex(size: usize, prefixed: bool) -> String {
    let mut bytes = vec![0u8; size];
    OsRng.fill_bytes(&mut bytes);
    let body = hex::encode(bytes);
    if prefixed {
        format!("0x{}", body)
    } else {
        body
    }
}

/// Decode `0x`-prefixed hex into bytes
pub fn hex_to_bytes(s: &str) -> Result<Vec<u8>, EncodingError> {
    if !is_hex_strict(s) {
        return Err(EncodingError::InvalidHexInput(s.to_string()));
    }
    Ok(hex::decode(split_marker(s).1)?)
}

/// Decode `0x`-prefixed hex into UTF-8 text
pub fn hex_to_utf8(s: &str) -> Result<String, EncodingError> {
    let bytes = hex_to_bytes(s)?;
    String::from_utf8(bytes).map_err(|e| EncodingError::InvalidHexInput(e.to_string()))
}

/// Decode `0x`-prefixed hex into text, one character per byte
pub fn hex_to_ascii(s: &str) -> Result<String, EncodingError> {
    Ok(hex_to_bytes(s)?.into_iter().map(char::from).collect())
}

/// Parse a number given either as `0x` hex or as decimal digits.
pub fn parse_u256(s: &str) -> Result<U256, EncodingError> {
    let invalid = || EncodingError::InvalidNumericInput(s.to_string());

    if is_hex_strict(s) {
        let digits = split_marker(s).1;
        if digits.is_empty() {
            return Err(invalid());
        }
        let significant = digits.trim_start_matches('0');
        if significant.is_empty() {
            return Ok(U256::zero());
        }
        U256::from_str_radix(significant, 16).map_err(|_| invalid())
    } else if is_number(s) {
        U256::from_dec_str(s).map_err(|_| invalid())
    } else {
        Err(invalid())
    }
}

/// Decimal string of a `0x` hex (or decimal) number
pub fn hex_to_number_string(s: &str) -> Result<String, EncodingError> {
    parse_u256(s).map(|n| n.to_string())
}

/// Smallest multiple of `multiple` not below `n`; `n` itself when
/// `multiple` is zero.
pub fn round_up(n: u64, multiple: u64) -> u64 {
    if multiple == 0 || n % multiple == 0 {
        n
    } else {
        n + multiple - n % multiple
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Detection ====================

    #[test]
    fn test_is_hex() {
        assert!(is_hex("0x0a1B2c3D4e5F6789"));
        assert!(is_hex_strict("0x0a1B2c3D4e5F6789"));
        assert!(!is_hex("0x0g1H2i3J4k5L6789"));
        assert!(!is_hex_strict("0x0g1H2i3J4k5L6789"));
        assert!(is_hex("0a1B2c3D4e5F6789"));
        assert!(!is_hex_strict("0a1B2c3D4e5F6789"));
        assert!(!is_hex("0g1H2i3J4k5L6789"));
    }

    #[test]
    fn test_is_number() {
        assert!(is_number("12345"));
        assert!(!is_number(""));
        assert!(!is_number("12a"));
        assert!(!is_number("-1"));
    }

    // ==================== Prefix stripping ====================

    #[test]
    fn test_strip_hex_prefix() {
        assert_eq!(strip_hex_prefix("0x12345"), "12345");
        assert_eq!(strip_hex_prefix("0X12345"), "12345");
        assert_eq!(strip_hex_prefix("0xghijk"), "0xghijk");
        assert_eq!(strip_hex_prefix(""), "");
        assert_eq!(strip_hex_prefix("abcd"), "abcd");
    }

    // ==================== Padding ====================

    #[test]
    fn test_padding_widths() {
        for size in [10usize, 12, 14, 16] {
            assert_eq!(pad_left("DeaDBeeF", size, '0').len(), size);
            assert_eq!(pad_right("DeaDBeeF", size, '0').len(), size);
            assert_eq!(pad_left("0xDeaDBeeF", size, '0').len(), size + 2);
            assert_eq!(pad_right("0xDeaDBeeF", size, '0').len(), size + 2);
        }
    }

    #[test]
    fn test_padding_keeps_marker_in_front() {
        assert_eq!(pad_left("0xff", 4, '0'), "0x00ff");
        assert_eq!(pad_right("0Xff", 4, '0'), "0Xff00");
        assert_eq!(pad_left("ff", 4, 'x'), "xxff");
    }

    #[test]
    fn test_padding_never_truncates() {
        assert_eq!(pad_left("abcdef", 4, '0'), "abcdef");
        assert_eq!(pad_right("0xabcdef", 4, '0'), "0xabcdef");
    }

    #[test]
    fn test_padding_idempotent() {
        let once = pad_left("0x1", 64, '0');
        assert_eq!(pad_left(&once, 64, '0'), once);
        let once = pad_right("aa", 64, '0');
        assert_eq!(pad_right(&once, 64, '0'), once);
    }

    // ==================== Conversions ====================

    #[test]
    fn test_to_hex() {
        assert_eq!(u256_to_hex(&U256::from(836502639245u64)), "c2c371528d");
        assert_eq!(u256_to_hex(&U256::zero()), "0");
        assert_eq!(to_hex("836502639245").unwrap(), "c2c371528d");
        assert_eq!(to_hex("Test String").unwrap(), "5465737420537472696e67");
    }

    #[test]
    fn test_types_to_hex() {
        assert_eq!(utf8_to_hex("漢字"), "0xe6bca2e5ad97");
        assert_eq!(ascii_to_hex("Test String"), "0x5465737420537472696e67");
        assert_eq!(
            bytes_to_hex(&[84, 101, 115, 116, 32, 83, 116, 114, 105, 110, 103]),
            "0x5465737420537472696e67"
        );
        assert_eq!(bytes_to_hex(&[]), "0x");
    }

    #[test]
    fn test_hex_to_types() {
        assert_eq!(hex_to_utf8("0xe6bca2e5ad97").unwrap(), "漢字");
        assert_eq!(hex_to_ascii("0x5465737420537472696e67").unwrap(), "Test String");
        assert_eq!(
            hex_to_bytes("0x5465737420537472696e67").unwrap(),
            vec![84, 101, 115, 116, 32, 83, 116, 114, 105, 110, 103]
        );
        assert_eq!(
            parse_u256("0x16a5b628c2de92f4").unwrap(),
            U256::from(1631910726175986420u64)
        );
        assert_eq!(hex_to_number_string("0x16a5b628c2de92f4").unwrap(), "1631910726175986420");
    }

    #[test]
    fn test_hex_to_types_requires_marker() {
        assert!(matches!(hex_to_bytes("5465"), Err(EncodingError::InvalidHexInput(_))));
        assert!(matches!(hex_to_utf8("0xzz"), Err(EncodingError::InvalidHexInput(_))));
        assert!(matches!(hex_to_utf8("0xff"), Err(EncodingError::InvalidHexInput(_))));
    }

    // ==================== Random ====================

    #[test]
    fn test_random_hex_shape() {
        let prefixed = random_hex(32, true);
        assert_eq!(prefixed.len(), 66);
        assert!(is_hex_strict(&prefixed));

        let bare = random_hex(20, false);
        assert_eq!(bare.len(), 40);
        assert!(!has_hex_prefix(&bare));
        assert!(is_hex(&bare));
        assert_eq!(bare, bare.to_lowercase());
    }

    #[test]
    fn test_random_hex_sizes() {
        assert_eq!(random_hex(0, true), "0x");
        assert_eq!(random_hex(0, false), "");
        assert_eq!(random_hex(100, false).len(), 200);
        assert_ne!(random_hex(32, false), random_hex(32, false));
    }

    // ==================== Numbers ====================

    #[test]
    fn test_parse_u256() {
        assert_eq!(parse_u256("255").unwrap(), U256::from(255));
        assert_eq!(parse_u256("0xff").unwrap(), U256::from(255));
        assert_eq!(parse_u256("0XFF").unwrap(), U256::from(255));
        assert_eq!(parse_u256("0x0000").unwrap(), U256::zero());
        assert_eq!(parse_u256(&format!("0x{}1", "0".repeat(80))).unwrap(), U256::one());
    }

    #[test]
    fn test_parse_u256_rejects() {
        for input in ["", "0x", "12a", "-5", "1.5", "ff", "0xgg"] {
            assert!(
                matches!(parse_u256(input), Err(EncodingError::InvalidNumericInput(_))),
                "accepted {:?}",
                input
            );
        }
    }

    #[test]
    fn test_parse_u256_overflow() {
        let max = "115792089237316195423570985008687907853269984665640564039457584007913129639935";
        assert_eq!(parse_u256(max).unwrap(), U256::MAX);
        let over = "115792089237316195423570985008687907853269984665640564039457584007913129639936";
        assert!(parse_u256(over).is_err());
        assert!(parse_u256(&format!("0x1{}", "0".repeat(64))).is_err());
    }

    #[test]
    fn test_round_up() {
        assert_eq!(round_up(0, 32), 0);
        assert_eq!(round_up(1, 32), 32);
        assert_eq!(round_up(32, 32), 32);
        assert_eq!(round_up(33, 32), 64);
        assert_eq!(round_up(7, 0), 7);
    }
}
