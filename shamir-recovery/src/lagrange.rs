//! Lagrange interpolation over exact rationals.
//!
//! For a basis of `t` points with distinct `x`, the unique polynomial of degree
//! below `t` through them is evaluated at `x0` as
//!
//! ```text
//! P(x0) = Σ_i y_i · Π_{j≠i} (x0 - x_j) / (x_i - x_j)
//! ```
//!
//! Each basis value is formed as one reduced rational and the terms are summed
//! exactly, so the result is integral exactly when the basis points lie on an
//! integer polynomial.

use itertools::Itertools;
use num_bigint::BigInt;
use num_traits::{One, Zero};

use crate::{Error, Rational, Result, Share};

#[derive(Debug, Clone, Copy)]
pub struct Interpolator<'a> {
	basis: &'a [Share],
}

impl<'a> Interpolator<'a> {
	/// Requires at least one share, and no two shares with the same index.
	pub fn new(basis: &'a [Share]) -> Result<Self> {
		if basis.is_empty() {
			return Err(Error::InsufficientShares { have: 0, min: 1 });
		}
		if let Some(index) = basis.iter().map(|share| share.x).duplicates().next() {
			return Err(Error::DuplicateIndex { index });
		}
		Ok(Self { basis })
	}

	pub fn basis(&self) -> &'a [Share] {
		self.basis
	}

	pub fn indices(&self) -> Vec<u64> {
		self.basis.iter().map(|share| share.x).collect()
	}

	/// Evaluate the interpolating polynomial at `x0`.
	pub fn evaluate_at(&self, x0: &BigInt) -> Result<Rational> {
		if let [single] = self.basis {
			return Ok(Rational::from_integer(single.y.clone()));
		}

		let xs = self.basis.iter().map(|share| BigInt::from(share.x)).collect::<Vec<_>>();

		let mut acc = Rational::zero();
		for (i, share) in self.basis.iter().enumerate() {
			let (numer, denom) = xs.iter().enumerate().filter(|&(j, _)| j != i).fold(
				(BigInt::one(), BigInt::one()),
				|(numer, denom), (_, x_j)| (numer * (x0 - x_j), denom * (&xs[i] - x_j)),
			);
			let l_i = Rational::new(numer, denom)?;
			acc = acc + l_i * Rational::from_integer(share.y.clone());
		}
		Ok(acc)
	}

	/// The polynomial's value at the integer `x`.
	///
	/// Fails with [`Error::InconsistentBasis`] if that value is not an integer.
	pub fn predict(&self, x: u64) -> Result<BigInt> {
		let value = self.evaluate_at(&BigInt::from(x))?;
		value.into_integer().map_err(|err| match err {
			Error::NonIntegerResult { value } => Error::InconsistentBasis { basis: self.indices(), at: x, value },
			err => err,
		})
	}

	/// The constant term, i.e. the shared secret.
	pub fn secret(&self) -> Result<BigInt> {
		self.predict(0)
	}
}

/// Evaluate the polynomial through `basis` at `x0`.
pub fn evaluate_at(basis: &[Share], x0: &BigInt) -> Result<Rational> {
	Interpolator::new(basis)?.evaluate_at(x0)
}
