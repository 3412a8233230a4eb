//! Conversion between human-readable decimal strings and token smallest units.
//!
//! All arithmetic is checked against the 256-bit word size of the chain: a
//! value that does not fit is an error, never silently truncated.

use std::fmt;

use alloy::primitives::U256;
use num_bigint::BigUint;

use super::error::QuoteError;
use super::QuoteResult;

/// Native ETH precision (1 ETH = 10^18 wei)
pub const NATIVE_DECIMALS: u8 = 18;

/// A token quantity in its smallest unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenAmount {
    pub raw: U256,
    pub decimals: u8,
}

impl TokenAmount {
    pub fn new(raw: U256, decimals: u8) -> Self {
        Self { raw, decimals }
    }

    pub fn native(raw: U256) -> Self {
        Self::new(raw, NATIVE_DECIMALS)
    }

    /// Parse a human-readable amount (e.g. "1.5") for a token with `decimals`
    pub fn parse(amount: &str, decimals: u8) -> QuoteResult<Self> {
        Ok(Self::new(parse_units(amount, decimals)?, decimals))
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_units(self.raw, self.decimals))
    }
}

/// Parse human-readable amount (e.g., "1.5") to smallest unit based on decimals
///
/// # Arguments
/// * `amount` - Non-negative decimal number, digits with at most one `.`
/// * `decimals` - Number of decimal places for the token
///
/// # Examples
/// - "1" with 18 decimals -> 1000000000000000000
/// - "100.5" with 6 decimals -> 100500000
/// - "0.0000005" with 6 decimals -> 1 (excess fraction digits round half-up)
///
/// # Errors
/// * `InvalidAmount` - Empty, signed, exponent or otherwise non-numeric input
/// * `Overflow` - The scaled value exceeds 2^256 - 1
pub fn parse_units(amount: &str, decimals: u8) -> QuoteResult<U256> {
    let amount = amount.trim();
    let (integer, fraction) = amount.split_once('.').unwrap_or((amount, ""));

    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if integer.is_empty() && fraction.is_empty() {
        return Err(QuoteError::InvalidAmount(format!("'{amount}' is not a number")));
    }
    if !is_digits(integer) || !is_digits(fraction) {
        return Err(QuoteError::InvalidAmount(format!(
            "'{amount}' must be a non-negative decimal number"
        )));
    }

    let decimals = decimals as usize;
    let (kept, dropped) = fraction.split_at(fraction.len().min(decimals));
    let round_up = dropped.bytes().next().is_some_and(|digit| digit >= b'5');

    let mut digits = String::with_capacity(integer.len() + decimals);
    digits.push_str(integer);
    digits.push_str(kept);
    digits.extend(std::iter::repeat_n('0', decimals - kept.len()));

    let mut value = BigUint::parse_bytes(digits.as_bytes(), 10).unwrap_or_default();
    if round_up {
        value += 1u32;
    }

    biguint_to_u256(&value).map_err(|_| {
        QuoteError::Overflow(format!("'{amount}' with {decimals} decimals exceeds 256 bits"))
    })
}

/// Format an amount from smallest unit to human-readable form
///
/// Trailing fractional zeros are removed; whole numbers carry no decimal point.
pub fn format_units(value: U256, decimals: u8) -> String {
    let digits = value.to_string();
    let decimals = decimals as usize;
    if decimals == 0 {
        return digits;
    }

    let padded = format!("{digits:0>width$}", width = decimals + 1);
    let (whole, fraction) = padded.split_at(padded.len() - decimals);
    let fraction = fraction.trim_end_matches('0');

    if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{whole}.{fraction}")
    }
}

pub(crate) fn u256_to_biguint(value: U256) -> BigUint {
    BigUint::from_bytes_be(&value.to_be_bytes::<32>())
}

/// Narrows an arbitrary-precision value back to 256 bits.
pub(crate) fn biguint_to_u256(value: &BigUint) -> Result<U256, QuoteError> {
    let bytes = value.to_bytes_be();
    if bytes.len() > 32 {
        return Err(QuoteError::Overflow(format!("{value} exceeds 256 bits")));
    }
    Ok(U256::from_be_slice(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_parse_units_eth_should_work() {
        let amount = parse_units("1.5", 18).unwrap();
        assert_eq!(amount, U256::from_str("1500000000000000000").unwrap());
    }

    #[test]
    fn test_parse_units_usdc_should_work() {
        assert_eq!(parse_units("100.5", 6).unwrap(), U256::from(100500000u64));
        assert_eq!(parse_units("10", 0).unwrap(), U256::from(10u64));
    }

    #[test]
    fn test_parse_units_partial_forms() {
        assert_eq!(parse_units(".5", 1).unwrap(), U256::from(5u64));
        assert_eq!(parse_units("2.", 2).unwrap(), U256::from(200u64));
        assert_eq!(parse_units(" 3 ", 0).unwrap(), U256::from(3u64));
        assert_eq!(parse_units("0", 18).unwrap(), U256::ZERO);
    }

    #[test]
    fn test_parse_units_excess_fraction_rounds_half_up() {
        assert_eq!(parse_units("1.234", 2).unwrap(), U256::from(123u64));
        assert_eq!(parse_units("1.235", 2).unwrap(), U256::from(124u64));
        assert_eq!(parse_units("0.0000005", 6).unwrap(), U256::from(1u64));
        assert_eq!(parse_units("0.9", 0).unwrap(), U256::from(1u64));
    }

    #[test]
    fn test_parse_units_invalid_input_should_fail() {
        for input in ["", ".", "-1", "+1", "abc", "1e18", "1.2.3", "1,5", "0x10"] {
            assert!(
                matches!(parse_units(input, 18), Err(QuoteError::InvalidAmount(_))),
                "'{input}' should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_units_overflow_should_fail() {
        let max = U256::MAX.to_string();
        assert_eq!(parse_units(&max, 0).unwrap(), U256::MAX);

        assert!(matches!(parse_units(&max, 1), Err(QuoteError::Overflow(_))));
        assert!(matches!(parse_units("1", 78), Err(QuoteError::Overflow(_))));
    }

    #[test]
    fn test_format_units_should_work() {
        let wei = U256::from_str("1500000000000000000").unwrap();
        assert_eq!(format_units(wei, 18), "1.5");
        assert_eq!(format_units(U256::from(100500000u64), 6), "100.5");
        assert_eq!(format_units(U256::from(1u64), 6), "0.000001");
        assert_eq!(format_units(U256::from(2000u64), 3), "2");
        assert_eq!(format_units(U256::ZERO, 18), "0");
        assert_eq!(format_units(U256::from(42u64), 0), "42");
    }

    #[test]
    fn test_decimal_string_round_trip() {
        let cases = [
            ("10", 18),
            ("0.000000000000000001", 18),
            ("123456789.123456", 6),
            ("1", 0),
            ("99999999999999999999.5", 1),
        ];

        for (amount, decimals) in cases {
            let raw = parse_units(amount, decimals).unwrap();
            assert_eq!(format_units(raw, decimals), amount);
        }
    }

    #[test]
    fn test_token_amount_display() {
        let amount = TokenAmount::parse("10", 18).unwrap();
        assert_eq!(amount.raw, U256::from(10u64).pow(U256::from(19u64)));
        assert_eq!(amount.to_string(), "10");
        assert_eq!(TokenAmount::native(U256::from(1u64)).decimals, NATIVE_DECIMALS);
    }

    #[test]
    fn test_biguint_conversion_bounds() {
        let max = u256_to_biguint(U256::MAX);
        assert_eq!(biguint_to_u256(&max).unwrap(), U256::MAX);

        let too_big = max + 1u32;
        assert!(matches!(biguint_to_u256(&too_big), Err(QuoteError::Overflow(_))));
    }
}
