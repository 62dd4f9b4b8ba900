//! Conversions between whole-unit amounts and their smallest denomination

use solpack_primitives::U256;

use crate::hexutil::is_number;
use crate::EncodingError;

/// Largest `decimals` accepted by the conversions; `10^77` is the highest
/// power of ten a `U256` holds.
pub const MAX_DECIMALS: u32 = 77;

fn check_decimals(decimals: u32) -> Result<usize, EncodingError> {
    if decimals > MAX_DECIMALS {
        return Err(EncodingError::InvalidNumericInput(format!(
            "decimals {} exceeds {}",
            decimals, MAX_DECIMALS
        )));
    }
    Ok(decimals as usize)
}

fn scale(decimals: u32) -> Result<U256, EncodingError> {
    check_decimals(decimals)?;
    Ok(U256::exp10(decimals as usize))
}

/// Scale a decimal amount such as `"1.5"` up by `10^decimals`.
///
/// The fractional part may hold at most `decimals` digits. The result has no
/// leading zeros, `"0"` for zero. `decimals` above [`MAX_DECIMALS`] is
/// rejected.
pub fn to_wei(amount: &str, decimals: u32) -> Result<String, EncodingError> {
    let decimals_len = check_decimals(decimals)?;
    let invalid = || EncodingError::InvalidNumericInput(amount.to_string());

    let (whole, fraction) = match amount.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (amount, ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(whole) || !all_digits(fraction) {
        return Err(invalid());
    }

    if fraction.len() > decimals_len {
        return Err(EncodingError::TooManyDecimals {
            decimals,
            found: fraction.len(),
        });
    }

    let mut digits = String::with_capacity(whole.len() + decimals_len);
    digits.push_str(whole);
    digits.push_str(fraction);
    digits.extend(std::iter::repeat('0').take(decimals_len - fraction.len()));

    let trimmed = digits.trim_start_matches('0');
    Ok(if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    })
}

/// Scale an integer amount down by `10^decimals`, keeping every fractional
/// digit: `("1337", 2)` gives `"13.37"`.
pub fn from_wei(amount: &str, decimals: u32) -> Result<String, EncodingError> {
    let decimals_len = check_decimals(decimals)?;
    if !is_number(amount) {
        return Err(EncodingError::InvalidNumericInput(amount.to_string()));
    }
    if decimals_len == 0 {
        return Ok(amount.to_string());
    }

    if amount.len() > decimals_len {
        let (whole, fraction) = amount.split_at(amount.len() - decimals_len);
        Ok(format!("{}.{}", whole, fraction))
    } else {
        Ok(format!("0.{}{}", "0".repeat(decimals_len - amount.len()), amount))
    }
}

/// [`to_wei`] for an integer amount already held as a `U256`
pub fn to_wei_u256(amount: &U256, decimals: u32) -> Result<U256, EncodingError> {
    amount
        .checked_mul(scale(decimals)?)
        .ok_or_else(|| EncodingError::InvalidNumericInput(amount.to_string()))
}

/// [`from_wei`] for an amount held as a `U256`
pub fn from_wei_u256(amount: &U256, decimals: u32) -> Result<String, EncodingError> {
    from_wei(&amount.to_string(), decimals)
}
