//! Reconstruction of a whole test case: decoding, basis selection,
//! interpolation of the secret and validation of the surplus shares.

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use num_bigint::BigInt;
use rayon::prelude::*;
use serde::Serialize;

use crate::share::serialize_decimal;
use crate::util::binomial;
use crate::validate::validate_with;
use crate::{Error, Interpolator, Result, Share, TestCase};

/// Upper bound on the number of subsets [`BasisPolicy::MajorityVote`] will try.
pub const MAX_SUBSET_SEARCH: usize = 100_000;

/// How the `k` shares driving the interpolation are chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BasisPolicy {
	/// The first `k` shares by ascending index.
	#[default]
	Fixed,
	/// [`BasisPolicy::Fixed`], retried as [`BasisPolicy::MajorityVote`] if the basis is inconsistent
	/// or most surplus shares disagree with it.
	Fallback,
	/// The polynomial agreed on by the largest set of shares, over all `k` subsets.
	MajorityVote,
}

impl FromStr for BasisPolicy {
	type Err = String;

	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		match s {
			"fixed" => Ok(Self::Fixed),
			"fallback" => Ok(Self::Fallback),
			"majority" => Ok(Self::MajorityVote),
			other => Err(format!("unknown basis policy {other:?}, expected one of fixed, fallback, majority")),
		}
	}
}

impl fmt::Display for BasisPolicy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Fixed => "fixed",
			Self::Fallback => "fallback",
			Self::MajorityVote => "majority",
		})
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconstructionResult {
	#[serde(serialize_with = "serialize_decimal")]
	pub secret: BigInt,
	/// Shares the secret was interpolated from, ascending by index.
	pub basis: Vec<Share>,
	/// Shares not on the reconstructed polynomial, ascending by index.
	pub wrong_shares: Vec<Share>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Reconstructor {
	policy: BasisPolicy,
}

impl Reconstructor {
	pub fn new(policy: BasisPolicy) -> Self {
		Self { policy }
	}

	pub fn policy(&self) -> BasisPolicy {
		self.policy
	}

	pub fn reconstruct(&self, case: &TestCase) -> Result<ReconstructionResult> {
		let _span = tracing::debug_span!("reconstruct", n = case.n, k = case.k, policy = %self.policy).entered();

		check_threshold(case.n, case.k)?;
		let shares = case.decode_shares()?;

		match self.policy {
			BasisPolicy::Fixed => fixed_basis(&shares, case.k),
			BasisPolicy::MajorityVote => majority_vote(&shares, case.k),
			BasisPolicy::Fallback => {
				let fixed = fixed_basis(&shares, case.k);
				if !should_retry(&fixed, shares.len() - case.k) {
					return fixed;
				}
				// keep the fixed outcome when no polynomial stands out either
				majority_vote(&shares, case.k).or(fixed)
			}
		}
	}

	/// Reconstruct every case in parallel, results are in input order.
	pub fn reconstruct_batch(&self, cases: &[TestCase]) -> Vec<Result<ReconstructionResult>> {
		cases.par_iter().map(|case| self.reconstruct(case)).collect()
	}
}

/// Reconstruct with the first `k` shares as basis.
pub fn reconstruct(case: &TestCase) -> Result<ReconstructionResult> {
	Reconstructor::default().reconstruct(case)
}

pub fn reconstruct_batch(cases: &[TestCase], policy: BasisPolicy) -> Vec<Result<ReconstructionResult>> {
	Reconstructor::new(policy).reconstruct_batch(cases)
}

fn check_threshold(n: usize, k: usize) -> Result<()> {
	if k == 0 {
		return Err(Error::InvalidThreshold { n, k });
	}
	if k > n {
		return Err(Error::InsufficientShares { have: n, min: k });
	}
	Ok(())
}

/// Whether a fixed basis outcome is suspicious enough to search all subsets.
fn should_retry(fixed: &Result<ReconstructionResult>, surplus: usize) -> bool {
	match fixed {
		Err(Error::InconsistentBasis { basis, at, value }) => {
			tracing::warn!(?basis, at, %value, "Fixed basis is inconsistent, searching all subsets");
			true
		}
		Ok(result) if result.wrong_shares.len() * 2 > surplus => {
			tracing::warn!(wrong = result.wrong_shares.len(), surplus, "Fixed basis is outvoted, searching all subsets");
			true
		}
		_ => false,
	}
}

fn fixed_basis(shares: &[Share], k: usize) -> Result<ReconstructionResult> {
	if shares.len() < k {
		return Err(Error::InsufficientShares { have: shares.len(), min: k });
	}
	let (basis, surplus) = shares.split_at(k);
	let interpolator = Interpolator::new(basis)?;
	let secret = interpolator.secret()?;
	tracing::debug!(basis = ?interpolator.indices(), %secret, "Interpolated secret");

	let validation = validate_with(&interpolator, surplus)?;
	if !validation.is_clean() {
		tracing::debug!(
			consistent = validation.consistent.len(),
			wrong = validation.wrong.len(),
			"Surplus shares disagree with the basis"
		);
	}
	Ok(ReconstructionResult { secret, basis: basis.to_vec(), wrong_shares: validation.wrong })
}

/// A polynomial found through some `k` subset, and all shares on it.
struct Candidate {
	secret: BigInt,
	support: Vec<usize>,
}

fn majority_vote(shares: &[Share], k: usize) -> Result<ReconstructionResult> {
	let n = shares.len();
	if n < k {
		return Err(Error::InsufficientShares { have: n, min: k });
	}
	let subsets = binomial(n, k).unwrap_or(usize::MAX);
	if subsets > MAX_SUBSET_SEARCH {
		return Err(Error::TooManySubsets { n, k, subsets, limit: MAX_SUBSET_SEARCH });
	}
	tracing::debug!(n, k, subsets, "Searching for the best supported basis");

	let mut candidates = Vec::<Candidate>::new();
	for subset in (0..n).combinations(k) {
		// k points pin down the polynomial, so a subset inside a known support adds nothing
		if candidates.iter().any(|c| subset.iter().all(|i| c.support.binary_search(i).is_ok())) {
			continue;
		}
		let basis = subset.iter().map(|&i| shares[i].clone()).collect::<Vec<_>>();
		let interpolator = Interpolator::new(&basis)?;
		let secret = match interpolator.secret() {
			Ok(secret) => secret,
			Err(Error::InconsistentBasis { .. }) => continue,
			Err(err) => return Err(err),
		};

		let mut support = Vec::with_capacity(n);
		for (i, share) in shares.iter().enumerate() {
			let fits = match interpolator.predict(share.x) {
				Ok(predicted) => predicted == share.y,
				Err(Error::InconsistentBasis { .. }) => false,
				Err(err) => return Err(err),
			};
			if fits {
				support.push(i);
			}
		}
		tracing::trace!(?subset, %secret, support = support.len(), "Evaluated subset");
		candidates.push(Candidate { secret, support });
	}

	candidates.sort_by(|a, b| b.support.len().cmp(&a.support.len()));
	let best = match candidates.as_slice() {
		[] => return Err(Error::NoMajority { n, k, support: 0 }),
		[best, runner_up, ..] if runner_up.support.len() == best.support.len() => {
			return Err(Error::NoMajority { n, k, support: best.support.len() });
		}
		[best, ..] => best,
	};
	tracing::debug!(secret = %best.secret, support = best.support.len(), "Found best supported polynomial");

	let basis = best.support.iter().take(k).map(|&i| shares[i].clone()).collect();
	let wrong_shares = shares
		.iter()
		.enumerate()
		.filter(|(i, _)| best.support.binary_search(i).is_err())
		.map(|(_, share)| share.clone())
		.collect::<Vec<_>>();
	for share in &wrong_shares {
		tracing::warn!(x = share.x, "Share disagrees with the majority polynomial");
	}
	Ok(ReconstructionResult { secret: best.secret.clone(), basis, wrong_shares })
}
