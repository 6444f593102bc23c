use honggfuzz::fuzz;

use arbitrary::*;

use num_bigint::BigInt;
use rand::SeedableRng;
use recovery::{BasisPolicy, Reconstructor, TestCase};
use tester::{corrupt_surplus, sample_shares, to_json, Polynomial};

#[derive(Debug, Clone)]
struct RoundtripFeed {
	coefficients: Vec<u64>,
	n: usize,
	corrupt_count: usize,
	seed: [u8; 32],
}

impl<'a> Arbitrary<'a> for RoundtripFeed {
	fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
		let k = u.int_in_range(1_usize..=12)?;
		let coefficients = (0..k).map(|_| u64::arbitrary(u)).collect::<Result<Vec<_>>>()?;
		let n = u.int_in_range(k..=k + 12)?;
		let corrupt_count = u.int_in_range(0..=n - k)?;
		Ok(Self { coefficients, n, corrupt_count, seed: u.arbitrary()? })
	}
}

fn main() {
	loop {
		fuzz!(|feed: RoundtripFeed| {
			let poly = Polynomial::new(feed.coefficients.iter().map(|&c| BigInt::from(c)).collect());
			let k = poly.threshold();
			let mut rng = rand_chacha::ChaCha8Rng::from_seed(feed.seed);

			let mut shares = sample_shares(&poly, feed.n, &mut rng);
			let corrupted = corrupt_surplus(&mut shares, k, feed.corrupt_count, &mut rng);
			let case: TestCase = serde_json::from_value(to_json(feed.n, k, &shares)).expect("fixture is well formed");

			let result = Reconstructor::new(BasisPolicy::Fixed).reconstruct(&case).expect("basis is intact");
			let wrong = result.wrong_shares.iter().map(|share| share.x).collect::<Vec<_>>();
			tester::assert_recovery(&poly, &corrupted, &result.secret, &wrong);
		});
	}
}
