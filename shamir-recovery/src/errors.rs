use crate::Rational;

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	#[error("Base {base} is outside of the supported range 2..=36")]
	InvalidBase { base: u32 },

	#[error("Digit {digit:?} at position {position} is not valid in base {base}")]
	InvalidDigit { base: u32, digit: char, position: usize },

	#[error("Digit string for base {base} is empty")]
	EmptyDigits { base: u32 },

	#[error("No share record for index {index}")]
	MissingShare { index: u64 },

	#[error("Needs at least {min} shares to reconstruct, have {have}")]
	InsufficientShares { have: usize, min: usize },

	#[error("Threshold k (= {k}) must be at least 1, with n (= {n}) shares")]
	InvalidThreshold { n: usize, k: usize },

	#[error("Share index {index} occurs more than once")]
	DuplicateIndex { index: u64 },

	#[error("Denominator of a rational must not be zero")]
	ZeroDenominator,

	#[error("Expected an integer, but got {value}")]
	NonIntegerResult { value: Rational },

	#[error("Basis {basis:?} evaluates to non-integer {value} at x = {at}")]
	InconsistentBasis { basis: Vec<u64>, at: u64, value: Rational },

	#[error("No unique best polynomial through {k} of {n} shares, best support is {support}")]
	NoMajority { n: usize, k: usize, support: usize },

	#[error("Searching {subsets} subsets of {k} out of {n} shares exceeds the limit of {limit}")]
	TooManySubsets { n: usize, k: usize, subsets: usize, limit: usize },

	#[error("Share key {key:?} is not a positive integer index")]
	InvalidShareKey { key: String },

	#[error("Base {base:?} of share {index} is not an integer")]
	InvalidBaseField { index: u64, base: String },
}

pub type Result<T> = std::result::Result<T, Error>;
