//! Positional numeral conversion between big integers and symbol strings.
//!
//! Encoding is plain place-value notation, most significant symbol first,
//! using the alphabet's symbols as digits. Zero is the alphabet's first symbol
//! (never an empty string). Negative values carry a leading [`SIGN_MARKER`].
//!
//! # Examples
//!
//! ```text
//! base 36:   0 -> "0"    36 -> "10"    69 -> "1x"    -33 -> "-x"
//! base 29:   0 -> "a"    29 -> "ba"    69 -> "cl"    -33 -> "-be"
//! ```
//!
//! # Strategy
//!
//! Digits are produced by `num-bigint`'s radix conversion, which extracts bit
//! groups for power-of-two bases and divides repeatedly otherwise. The same
//! routine is used for every base in both directions.

use crate::alphabet::Alphabet;
use crate::error::{NumeralError, Result};
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::Zero;

/// Marks a negative value. Only meaningful for alphabets that lack it.
pub const SIGN_MARKER: u8 = b'-';

/// Encode an unsigned value as digit symbols.
pub fn encode_unsigned(value: &BigUint, alphabet: &Alphabet) -> Vec<u8> {
    if value.is_zero() {
        return vec![alphabet.zero()];
    }

    // Digits are < base, so symbol lookup cannot miss
    value
        .to_radix_be(alphabet.base() as u32)
        .into_iter()
        .map(|digit| alphabet.symbols()[digit as usize])
        .collect()
}

/// Encode a signed value, prefixing [`SIGN_MARKER`] when negative.
///
/// # Errors
/// Returns `NumeralError::SignUnrepresentable` for a negative value when the
/// alphabet itself contains the sign marker (the byte alphabet, for example).
pub fn encode(value: &BigInt, alphabet: &Alphabet) -> Result<Vec<u8>> {
    let digits = encode_unsigned(value.magnitude(), alphabet);
    if value.sign() != Sign::Minus {
        return Ok(digits);
    }

    if alphabet.contains(SIGN_MARKER) {
        return Err(NumeralError::SignUnrepresentable {
            base: alphabet.base(),
        }
        .into());
    }

    let mut signed = Vec::with_capacity(digits.len() + 1);
    signed.push(SIGN_MARKER);
    signed.extend_from_slice(&digits);
    Ok(signed)
}

/// Decode digit symbols with no sign.
///
/// # Errors
/// - `NumeralError::Empty` for an empty input
/// - `AlphabetError::SymbolNotInAlphabet` for a symbol without a digit value
pub fn decode_unsigned(symbols: &[u8], alphabet: &Alphabet) -> Result<BigUint> {
    if symbols.is_empty() {
        return Err(NumeralError::Empty.into());
    }

    let digits = symbols
        .iter()
        .map(|&s| alphabet.index_of(s))
        .collect::<Result<Vec<u8>>>()?;

    // Every digit was looked up in the alphabet, so each is < base
    Ok(BigUint::from_radix_be(&digits, alphabet.base() as u32).unwrap_or_default())
}

/// Decode symbols, honouring a leading [`SIGN_MARKER`].
///
/// The marker is only treated as a sign when it is not a digit of the
/// alphabet.
pub fn decode(symbols: &[u8], alphabet: &Alphabet) -> Result<BigInt> {
    match symbols.split_first() {
        Some((&SIGN_MARKER, rest)) if !alphabet.contains(SIGN_MARKER) => {
            let magnitude = decode_unsigned(rest, alphabet)?;
            Ok(BigInt::from_biguint(Sign::Minus, magnitude))
        }
        _ => Ok(BigInt::from(decode_unsigned(symbols, alphabet)?)),
    }
}
