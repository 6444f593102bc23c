use honggfuzz::fuzz;

use arbitrary::*;

use recovery::{BasisPolicy, RawShareRecord, Reconstructor, TestCase};

#[derive(Debug, Clone)]
struct ReconstructionFeed {
	policy: BasisPolicy,
	case: TestCase,
}

impl<'a> Arbitrary<'a> for ReconstructionFeed {
	fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
		let policy = match u.int_in_range(0_u8..=2)? {
			0 => BasisPolicy::Fixed,
			1 => BasisPolicy::Fallback,
			_ => BasisPolicy::MajorityVote,
		};
		let n = u.int_in_range(0_usize..=16)?;
		let k = u.int_in_range(0_usize..=n + 1)?;

		let mut case = TestCase::new(n, k);
		// occasionally leave gaps or add records past `n`
		let records = u.int_in_range(0_u64..=n as u64 + 2)?;
		for index in 1..=records {
			if u.ratio(1_u8, 16)? {
				continue;
			}
			let base = u.int_in_range(0_u32..=40)?;
			let digits = <&str>::arbitrary(u)?;
			case.shares.insert(index, RawShareRecord::new(base, digits));
		}

		Ok(Self { policy, case })
	}
}

fn main() {
	loop {
		fuzz!(|feed: ReconstructionFeed| {
			let reconstructor = Reconstructor::new(feed.policy);
			let first = reconstructor.reconstruct(&feed.case);
			assert_eq!(first, reconstructor.reconstruct(&feed.case));
			if let Ok(result) = first {
				assert_eq!(result.basis.len(), feed.case.k);
				assert!(result.wrong_shares.len() <= feed.case.n - feed.case.k);
			}
		});
	}
}
