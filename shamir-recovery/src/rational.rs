//! Exact rationals over big integers.
//!
//! A [`Rational`] is always stored reduced, with a strictly positive
//! denominator. Equality and [`Rational::is_integer`] rely on that.

use std::fmt;
use std::ops::{Add, Mul, Sub};

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rational {
	numer: BigInt,
	denom: BigInt,
}

impl Rational {
	/// Create `numer / denom` in lowest terms.
	pub fn new(numer: BigInt, denom: BigInt) -> Result<Self> {
		if denom.is_zero() {
			return Err(Error::ZeroDenominator);
		}
		Ok(Self::reduced(numer, denom))
	}

	pub fn from_integer(value: BigInt) -> Self {
		Self { numer: value, denom: BigInt::one() }
	}

	// `denom` must be non-zero
	fn reduced(numer: BigInt, denom: BigInt) -> Self {
		let gcd = numer.gcd(&denom);
		let (mut numer, mut denom) = (numer / &gcd, denom / &gcd);
		if denom.is_negative() {
			numer = -numer;
			denom = -denom;
		}
		Self { numer, denom }
	}

	pub fn numer(&self) -> &BigInt {
		&self.numer
	}

	pub fn denom(&self) -> &BigInt {
		&self.denom
	}

	pub fn is_integer(&self) -> bool {
		self.denom.is_one()
	}

	/// The integer value, fails if the denominator is not one.
	pub fn to_integer(&self) -> Result<BigInt> {
		if self.is_integer() {
			Ok(self.numer.clone())
		} else {
			Err(Error::NonIntegerResult { value: self.clone() })
		}
	}

	pub fn into_integer(self) -> Result<BigInt> {
		if self.is_integer() {
			Ok(self.numer)
		} else {
			Err(Error::NonIntegerResult { value: self })
		}
	}
}

impl From<BigInt> for Rational {
	fn from(value: BigInt) -> Self {
		Self::from_integer(value)
	}
}

impl From<i64> for Rational {
	fn from(value: i64) -> Self {
		Self::from_integer(BigInt::from(value))
	}
}

impl fmt::Display for Rational {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.is_integer() {
			write!(f, "{}", self.numer)
		} else {
			write!(f, "{}/{}", self.numer, self.denom)
		}
	}
}

impl<'a, 'b> Add<&'b Rational> for &'a Rational {
	type Output = Rational;
	fn add(self, rhs: &'b Rational) -> Rational {
		if self.denom == rhs.denom {
			return Rational::reduced(&self.numer + &rhs.numer, self.denom.clone());
		}
		Rational::reduced(&self.numer * &rhs.denom + &rhs.numer * &self.denom, &self.denom * &rhs.denom)
	}
}

impl<'a, 'b> Sub<&'b Rational> for &'a Rational {
	type Output = Rational;
	fn sub(self, rhs: &'b Rational) -> Rational {
		if self.denom == rhs.denom {
			return Rational::reduced(&self.numer - &rhs.numer, self.denom.clone());
		}
		Rational::reduced(&self.numer * &rhs.denom - &rhs.numer * &self.denom, &self.denom * &rhs.denom)
	}
}

impl<'a, 'b> Mul<&'b Rational> for &'a Rational {
	type Output = Rational;
	fn mul(self, rhs: &'b Rational) -> Rational {
		Rational::reduced(&self.numer * &rhs.numer, &self.denom * &rhs.denom)
	}
}

/// Forward the owned operand combinations to the by-reference impls.
macro_rules! forward_binop {
	($imp:ident, $method:ident) => {
		impl $imp<Rational> for Rational {
			type Output = Rational;
			fn $method(self, rhs: Rational) -> Rational {
				(&self).$method(&rhs)
			}
		}

		impl<'b> $imp<&'b Rational> for Rational {
			type Output = Rational;
			fn $method(self, rhs: &'b Rational) -> Rational {
				(&self).$method(rhs)
			}
		}

		impl<'a> $imp<Rational> for &'a Rational {
			type Output = Rational;
			fn $method(self, rhs: Rational) -> Rational {
				self.$method(&rhs)
			}
		}
	};
}

forward_binop!(Add, add);
forward_binop!(Sub, sub);
forward_binop!(Mul, mul);

impl Zero for Rational {
	fn zero() -> Self {
		Self::from_integer(BigInt::zero())
	}

	fn is_zero(&self) -> bool {
		self.numer.is_zero()
	}
}

impl One for Rational {
	fn one() -> Self {
		Self::from_integer(BigInt::one())
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use assert_matches::assert_matches;

	fn q(numer: i64, denom: i64) -> Rational {
		Rational::new(BigInt::from(numer), BigInt::from(denom)).unwrap()
	}

	#[test]
	fn stays_reduced_with_positive_denominator() {
		let r = q(6, -4);
		assert_eq!(r.numer(), &BigInt::from(-3));
		assert_eq!(r.denom(), &BigInt::from(2));

		let r = q(-10, -5);
		assert!(r.is_integer());
		assert_eq!(r.to_integer().unwrap(), BigInt::from(2));

		assert_eq!(q(0, -7), Rational::zero());
		assert_eq!(q(0, 7).denom(), &BigInt::from(1));
	}

	#[test]
	fn zero_denominator() {
		assert_matches!(Rational::new(BigInt::from(1), BigInt::zero()), Err(Error::ZeroDenominator));
	}

	#[test]
	fn arithmetic() {
		assert_eq!(q(1, 2) + q(1, 3), q(5, 6));
		assert_eq!(q(1, 2) + q(1, 2), Rational::one());
		assert_eq!(q(1, 2) - q(1, 3), q(1, 6));
		assert_eq!(q(1, 3) - q(1, 2), q(-1, 6));
		assert_eq!(q(2, 3) * q(9, 4), q(3, 2));
		assert_eq!(q(-2, 3) * q(3, -2), Rational::one());
		assert_eq!(&q(1, 4) * &Rational::zero(), Rational::zero());
	}

	#[test]
	fn integer_exactness() {
		let half = q(1, 2);
		assert!(!half.is_integer());
		assert_matches!(half.to_integer(), Err(Error::NonIntegerResult { value }) if value == q(1, 2));
		assert_matches!(q(7, 2).into_integer(), Err(Error::NonIntegerResult { .. }));
		assert_eq!(Rational::from(42).into_integer().unwrap(), BigInt::from(42));
	}

	#[test]
	fn display() {
		assert_eq!(q(3, 1).to_string(), "3");
		assert_eq!(q(-3, 6).to_string(), "-1/2");
	}
}
