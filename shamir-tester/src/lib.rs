//! Fixtures shared by the tests, fuzzers and benches: random integer
//! polynomials, shares sampled from them in random bases, and corruption of
//! some of those shares.

use itertools::Itertools;
use num_bigint::{BigInt, RandBigInt};
use num_traits::Zero;
use rand::prelude::*;
use rand::rngs::SmallRng;
use serde_json::{json, Value};
use std::result;

pub static SMALL_RNG_SEED: [u8; 32] = [
	0, 6, 0xFA, 0, 0x37, 3, 19, 89, 32, 32, 0x37, 0x77, 77, 0b11, 112, 52, 12, 40, 82, 34, 0, 0, 0, 1, 4, 4, 1, 4, 99,
	127, 121, 107,
];

/// Shared number of shares for quick turnaround tests.
pub const N_SHARES: usize = 10;
/// Shared threshold for quick turnaround tests.
pub const THRESHOLD: usize = 4;
/// Coefficient width, well past any native integer.
pub const COEFFICIENT_BITS: u64 = 256;

/// Integer polynomial, lowest degree coefficient first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polynomial {
	coefficients: Vec<BigInt>,
}

impl Polynomial {
	pub fn new(coefficients: Vec<BigInt>) -> Self {
		assert!(!coefficients.is_empty(), "a polynomial needs at least a constant term");
		Self { coefficients }
	}

	/// Non-negative random coefficients of up to `bits` bits.
	pub fn random<R: Rng>(threshold: usize, bits: u64, rng: &mut R) -> Self {
		let coefficients = (0..threshold).map(|_| BigInt::from(rng.gen_biguint(bits))).collect();
		Self::new(coefficients)
	}

	pub fn secret(&self) -> &BigInt {
		&self.coefficients[0]
	}

	/// Number of points required to pin down the polynomial.
	pub fn threshold(&self) -> usize {
		self.coefficients.len()
	}

	pub fn eval(&self, x: &BigInt) -> BigInt {
		self.coefficients.iter().rev().fold(BigInt::zero(), |acc, c| acc * x + c)
	}
}

/// A share together with one textual encoding of its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampledShare {
	pub x: u64,
	pub y: BigInt,
	pub base: u32,
	pub digits: String,
}

impl SampledShare {
	fn set_value<R: Rng>(&mut self, y: BigInt, rng: &mut R) {
		self.base = rng.gen_range(2..=36);
		let digits = y.to_str_radix(self.base);
		self.digits = if rng.gen_bool(0.5) { digits.to_uppercase() } else { digits };
		self.y = y;
	}
}

/// Evaluate `poly` at `1..=n`, each value encoded in a random base and letter case.
pub fn sample_shares<R: Rng>(poly: &Polynomial, n: usize, rng: &mut R) -> Vec<SampledShare> {
	(1..=n as u64)
		.map(|x| {
			let mut share = SampledShare { x, y: BigInt::zero(), base: 10, digits: String::new() };
			share.set_value(poly.eval(&BigInt::from(x)), rng);
			share
		})
		.collect()
}

fn corrupt_at<R: Rng>(shares: &mut [SampledShare], positions: impl IntoIterator<Item = usize>, rng: &mut R) -> Vec<u64> {
	let mut corrupted = positions
		.into_iter()
		.map(|pos| {
			let share = &mut shares[pos];
			let y = &share.y + rng.gen_range(1_u32..=1000);
			share.set_value(y, rng);
			share.x
		})
		.collect::<Vec<_>>();
	corrupted.sort_unstable();
	corrupted
}

/// Corrupt `count` shares outside of the first `k`.
pub fn corrupt_surplus<R: Rng>(shares: &mut [SampledShare], k: usize, count: usize, rng: &mut R) -> Vec<u64> {
	let surplus = shares.len() - k;
	assert!(count <= surplus, "can not corrupt {count} of {surplus} surplus shares");
	let iv = rand::seq::index::sample(rng, surplus, count);
	corrupt_at(shares, iv.into_iter().map(|i| i + k), rng)
}

/// Corrupt any `count` shares, basis shares included.
///
/// Another polynomial of degree below `k` meets the true one in at most `k - 1`
/// points, so it is backed by at most `k - 1 + count` shares. The intact
/// `l - count` shares only win outright if `l >= 2 * count + k`.
pub fn corrupt_any<R: Rng>(shares: &mut [SampledShare], k: usize, count: usize, rng: &mut R) -> Vec<u64> {
	let l = shares.len();
	assert!(l >= 2 * count + k, "{count} corrupted shares of {l} leave no clear majority for k = {k}");
	let iv = rand::seq::index::sample(rng, l, count);
	corrupt_at(shares, iv, rng)
}

/// Render the shares as a test case document.
pub fn to_json(n: usize, k: usize, shares: &[SampledShare]) -> Value {
	let mut doc = json!({ "keys": { "n": n, "k": k } });
	for share in shares {
		doc[share.x.to_string()] = json!({ "base": share.base.to_string(), "value": share.digits });
	}
	doc
}

/// Assert the secret was recovered and exactly the corrupted shares were flagged.
pub fn assert_recovery(poly: &Polynomial, corrupted: &[u64], secret: &BigInt, wrong: &[u64]) {
	assert_eq!(secret, poly.secret(), "Recovered secret must match the constant term");
	itertools::assert_equal(wrong.iter().copied().sorted(), corrupted.iter().copied());
}

/// Sample `n` shares of `poly`, corrupt `corrupt_count` surplus shares and
/// check `reconstruct` finds the secret and exactly the corrupted shares.
///
/// `reconstruct` receives the test case document and returns the secret and
/// the indices of the shares it considers wrong.
pub fn roundtrip<Recon, E>(reconstruct: Recon, poly: &Polynomial, n: usize, corrupt_count: usize) -> result::Result<(), E>
where
	Recon: Fn(Value) -> result::Result<(BigInt, Vec<u64>), E>,
{
	roundtrip_w_corrupt_closure::<Recon, _, SmallRng, E>(reconstruct, poly, n, corrupt_count, corrupt_surplus)
}

pub fn roundtrip_w_corrupt_closure<Recon, CorruptFun, RandGen, E>(
	reconstruct: Recon,
	poly: &Polynomial,
	n: usize,
	corrupt_count: usize,
	mut corrupt: CorruptFun,
) -> result::Result<(), E>
where
	Recon: Fn(Value) -> result::Result<(BigInt, Vec<u64>), E>,
	CorruptFun: FnMut(&mut [SampledShare], usize, usize, &mut RandGen) -> Vec<u64>,
	RandGen: rand::Rng + rand::SeedableRng<Seed = [u8; 32]>,
{
	let mut rng = <RandGen as rand::SeedableRng>::from_seed(SMALL_RNG_SEED);
	let k = poly.threshold();

	let mut shares = sample_shares(poly, n, &mut rng);
	let corrupted = corrupt(shares.as_mut_slice(), k, corrupt_count, &mut rng);

	let (secret, wrong) = reconstruct(to_json(n, k, &shares))?;

	assert_recovery(poly, &corrupted, &secret, &wrong);
	Ok(())
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn eval_horner() {
		let poly = Polynomial::new(vec![5.into(), 2.into(), 3.into()]);
		assert_eq!(poly.eval(&BigInt::from(4)), BigInt::from(61));
		assert_eq!(poly.eval(&BigInt::zero()), BigInt::from(5));
		assert_eq!(poly.threshold(), 3);
	}

	#[test]
	fn corruption_changes_only_selected_shares() {
		let mut rng = SmallRng::from_seed(SMALL_RNG_SEED);
		let poly = Polynomial::random(THRESHOLD, COEFFICIENT_BITS, &mut rng);
		let clean = sample_shares(&poly, N_SHARES, &mut rng);

		let mut shares = clean.clone();
		let corrupted = corrupt_surplus(&mut shares, THRESHOLD, 3, &mut rng);
		assert_eq!(corrupted.len(), 3);
		assert!(corrupted.iter().all(|&x| x as usize > THRESHOLD));

		for (before, after) in clean.iter().zip(shares.iter()) {
			assert_eq!(before.y != after.y, corrupted.contains(&after.x));
			assert_eq!(BigInt::parse_bytes(after.digits.as_bytes(), after.base).as_ref(), Some(&after.y));
		}
	}

	#[test]
	fn renders_test_case_document() {
		let poly = Polynomial::new(vec![3.into(), 0.into(), 1.into()]);
		let mut rng = SmallRng::from_seed(SMALL_RNG_SEED);
		let shares = sample_shares(&poly, 2, &mut rng);
		let doc = to_json(2, 2, &shares);
		assert_eq!(doc["keys"]["n"], 2);
		assert_eq!(doc["2"]["value"], Value::from(shares[1].digits.clone()));
		assert_eq!(doc["2"]["base"], Value::from(shares[1].base.to_string()));
	}
}
