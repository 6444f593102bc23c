//! Conversion between digit strings in bases 2 to 36 and big integers.
//!
//! The digit alphabet is `0-9` followed by `a-z`, matched case-insensitively.

use num_bigint::{BigInt, BigUint};

use crate::{Error, Result};

pub const MIN_BASE: u32 = 2;
pub const MAX_BASE: u32 = 36;

fn check_base(base: u32) -> Result<()> {
	if (MIN_BASE..=MAX_BASE).contains(&base) {
		Ok(())
	} else {
		Err(Error::InvalidBase { base })
	}
}

/// Decode `digits` in `base` into a non-negative big integer.
///
/// There is no width limit, every character must be a digit of `base`.
/// Signs, separators and whitespace are rejected like any other invalid digit.
pub fn decode(base: u32, digits: &str) -> Result<BigInt> {
	check_base(base)?;
	if digits.is_empty() {
		return Err(Error::EmptyDigits { base });
	}

	let values = digits
		.chars()
		.enumerate()
		.map(|(position, digit)| {
			digit.to_digit(base).map(|d| d as u8).ok_or(Error::InvalidDigit { base, digit, position })
		})
		.collect::<Result<Vec<u8>>>()?;

	// every digit is below `base`, so this can not fail
	let magnitude = BigUint::from_radix_be(&values, base).ok_or(Error::InvalidBase { base })?;
	Ok(BigInt::from(magnitude))
}

/// Encode `value` as lower case digits in `base`, the inverse of [`decode`].
pub fn encode(base: u32, value: &BigUint) -> Result<String> {
	check_base(base)?;
	Ok(value.to_str_radix(base))
}
