use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use num_bigint::BigInt;
use rand::{rngs::SmallRng, SeedableRng};
use shamir_recovery::{decode, evaluate_at, BasisPolicy, Reconstructor, Share, TestCase};
use shamir_tester::{corrupt_any, sample_shares, to_json, Polynomial, COEFFICIENT_BITS, SMALL_RNG_SEED};

/// Number of digits of the decoded values, far beyond any native width.
const DIGITS: usize = 4096;

pub fn bench_decode(crit: &mut Criterion) {
	let mut group = crit.benchmark_group("decode");
	for base in [2_u32, 10, 16, 36] {
		let digits = std::iter::repeat(std::char::from_digit(base - 1, base).unwrap()).take(DIGITS).collect::<String>();
		group.bench_with_input(BenchmarkId::from_parameter(base), &digits, |b, digits| {
			b.iter(|| decode(black_box(base), black_box(digits)))
		});
	}
	group.finish();
}

pub fn bench_interpolate(crit: &mut Criterion) {
	let mut rng = SmallRng::from_seed(SMALL_RNG_SEED);
	let mut group = crit.benchmark_group("interpolate secret");
	for threshold in [2_usize, 4, 16, 64] {
		let poly = Polynomial::random(threshold, COEFFICIENT_BITS, &mut rng);
		let basis = (1..=threshold as u64).map(|x| Share::new(x, poly.eval(&BigInt::from(x)))).collect::<Vec<_>>();
		group.bench_with_input(BenchmarkId::from_parameter(threshold), &basis, |b, basis| {
			b.iter(|| evaluate_at(black_box(basis), &BigInt::from(0)))
		});
	}
	group.finish();
}

fn corrupted_case(threshold: usize, n: usize, corrupt_count: usize) -> TestCase {
	let mut rng = SmallRng::from_seed(SMALL_RNG_SEED);
	let poly = Polynomial::random(threshold, COEFFICIENT_BITS, &mut rng);
	let mut shares = sample_shares(&poly, n, &mut rng);
	corrupt_any(&mut shares, threshold, corrupt_count, &mut rng);
	serde_json::from_value(to_json(n, threshold, &shares)).unwrap()
}

pub fn bench_reconstruct(crit: &mut Criterion) {
	let case = corrupted_case(4, 12, 2);
	let mut group = crit.benchmark_group("reconstruct n=12 k=4");
	for policy in [BasisPolicy::Fixed, BasisPolicy::Fallback, BasisPolicy::MajorityVote] {
		let reconstructor = Reconstructor::new(policy);
		group.bench_function(BenchmarkId::from_parameter(policy), |b| {
			b.iter(|| reconstructor.reconstruct(black_box(&case)))
		});
	}
	group.finish();
}

pub fn bench_batch(crit: &mut Criterion) {
	let cases = (0..64).map(|i| corrupted_case(4 + i % 4, 16, 1)).collect::<Vec<_>>();
	let reconstructor = Reconstructor::new(BasisPolicy::Fixed);
	crit.bench_function("reconstruct batch of 64", |b| b.iter(|| reconstructor.reconstruct_batch(black_box(&cases))));
}

criterion_group!(benches, bench_decode, bench_interpolate, bench_reconstruct, bench_batch);
criterion_main!(benches);
