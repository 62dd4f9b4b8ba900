//! EIP-55 address checksums and case conversions

use crate::{keccak256, CryptoError};

fn strip_marker(address: &str) -> &str {
    address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .unwrap_or(address)
}

fn is_address_body(body: &str) -> bool {
    body.len() == 40 && body.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Whether `address` is a 40-digit hex address. All-lowercase and
/// all-uppercase bodies are accepted as is; mixed case must carry a valid
/// EIP-55 checksum.
pub fn is_address(address: &str) -> bool {
    let body = strip_marker(address);
    if !is_address_body(body) {
        return false;
    }
    let has_lower = body.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = body.bytes().any(|b| b.is_ascii_uppercase());
    if !(has_lower && has_upper) {
        return true;
    }
    check_address_checksum(address)
}

/// Lowercase the address body and re-prefix it with `0x`
pub fn to_lowercase_address(address: &str) -> String {
    format!("0x{}", strip_marker(address).to_ascii_lowercase())
}

/// Uppercase the address body and re-prefix it with `0x`
pub fn to_uppercase_address(address: &str) -> String {
    format!("0x{}", strip_marker(address).to_ascii_uppercase())
}

/// Convert an address to its EIP-55 checksum form
pub fn to_checksum_address(address: &str) -> Result<String, CryptoError> {
    let body = strip_marker(address).to_ascii_lowercase();
    if !is_address_body(&body) {
        return Err(CryptoError::InvalidAddress(address.to_string()));
    }
    let hash_hex = hex::encode(keccak256(body.as_bytes()).as_bytes());

    let mut result = String::with_capacity(42);
    result.push_str("0x");
    for (c, h) in body.chars().zip(hash_hex.bytes()) {
        if c.is_ascii_digit() || nibble(h) < 8 {
            result.push(c);
        } else {
            result.push(c.to_ascii_uppercase());
        }
    }
    Ok(result)
}

/// Verify the EIP-55 letter casing of `address`. Bodies that are not 40 hex
/// digits never pass.
pub fn check_address_checksum(address: &str) -> bool {
    let body = strip_marker(address);
    if !is_address_body(body) {
        return false;
    }
    let hash_hex = hex::encode(keccak256(body.to_ascii_lowercase().as_bytes()).as_bytes());
    body.chars().zip(hash_hex.bytes()).all(|(c, h)| {
        if c.is_ascii_digit() {
            true
        } else if nibble(h) >= 8 {
            c.is_ascii_uppercase()
        } else {
            c.is_ascii_lowercase()
        }
    })
}

fn nibble(hex_char: u8) -> u8 {
    match hex_char {
        b'0'..=b'9' => hex_char - b'0',
        b'a'..=b'f' => hex_char - b'a' + 10,
        _ => 0,
    }
}
