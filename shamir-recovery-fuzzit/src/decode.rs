use honggfuzz::fuzz;

use arbitrary::*;

#[derive(Debug, Clone, Copy, Arbitrary)]
struct DecodeFeed<'a> {
	base: u8,
	digits: &'a str,
}

fn main() {
	loop {
		fuzz!(|feed: DecodeFeed| {
			let base = u32::from(feed.base);
			if let Ok(value) = recovery::decode(base, feed.digits) {
				let magnitude = value.to_biguint().expect("decoded values are never negative");
				let encoded = recovery::encode(base, &magnitude).expect("base was accepted by decode");
				assert_eq!(value.bits() == 0, feed.digits.chars().all(|c| c == '0'));
				assert_eq!(recovery::decode(base, &encoded).ok(), Some(value));
			}
		});
	}
}
