//! Exact reconstruction of secrets split with a threshold sharing scheme.
//!
//! Share values arrive as digit strings in bases 2 to 36 and routinely exceed
//! native integer widths, so all arithmetic is done on arbitrary precision
//! integers and reduced rationals. Nothing is ever rounded: an interpolation
//! that does not land on an integer is reported as an inconsistent basis.

pub mod errors;
pub use errors::*;

pub mod radix;
pub use radix::{decode, encode};

pub mod rational;
pub use rational::Rational;

pub mod share;
pub use share::{RawShareRecord, Share, TestCase};

pub mod lagrange;
pub use lagrange::{evaluate_at, Interpolator};

pub mod validate;
pub use validate::{validate, Validation};

pub mod reconstruct;
pub use reconstruct::{
	reconstruct, reconstruct_batch, BasisPolicy, ReconstructionResult, Reconstructor, MAX_SUBSET_SEARCH,
};

pub mod util;
