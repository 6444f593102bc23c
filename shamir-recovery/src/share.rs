//! Shares and the test case records they are decoded from.

use std::collections::BTreeMap;
use std::ops::Bound;

use num_bigint::BigInt;
use serde::{Deserialize, Serialize, Serializer};

use crate::{radix, Error, Result};

/// One decoded point `(x, y)` of the sharing polynomial.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Share {
	pub x: u64,
	#[serde(serialize_with = "serialize_decimal")]
	pub y: BigInt,
}

impl Share {
	pub fn new(x: u64, y: impl Into<BigInt>) -> Self {
		Self { x, y: y.into() }
	}

	/// Decode the share with index `x` from its raw record.
	pub fn decode(x: u64, record: &RawShareRecord) -> Result<Self> {
		let y = radix::decode(record.base, &record.digits)?;
		Ok(Self { x, y })
	}
}

/// A share value as it is stored, before decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawShareRecord {
	pub base: u32,
	pub digits: String,
}

impl RawShareRecord {
	pub fn new(base: u32, digits: impl Into<String>) -> Self {
		Self { base, digits: digits.into() }
	}
}

/// `n` supplied share records of which `k` determine the secret.
///
/// Deserializes from
/// `{ "keys": { "n": 4, "k": 3 }, "1": { "base": "10", "value": "4" }, ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "WireTestCase")]
pub struct TestCase {
	pub n: usize,
	pub k: usize,
	pub shares: BTreeMap<u64, RawShareRecord>,
}

impl TestCase {
	pub fn new(n: usize, k: usize) -> Self {
		Self { n, k, shares: BTreeMap::new() }
	}

	pub fn with_share(mut self, index: u64, record: RawShareRecord) -> Self {
		self.shares.insert(index, record);
		self
	}

	/// Decode the shares for indices `1..=n`, in ascending index order.
	///
	/// Records with an index beyond `n` are not part of the case and are skipped.
	pub fn decode_shares(&self) -> Result<Vec<Share>> {
		if let Some((&index, _)) = self.shares.range((Bound::Excluded(self.n as u64), Bound::Unbounded)).next() {
			tracing::warn!(index, n = self.n, "Ignoring share records beyond n");
		}
		(1..=self.n as u64)
			.map(|index| {
				let record = self.shares.get(&index).ok_or(Error::MissingShare { index })?;
				Share::decode(index, record)
			})
			.collect()
	}
}

#[derive(Deserialize)]
struct WireKeys {
	n: usize,
	k: usize,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireBase {
	Number(u32),
	Text(String),
	Other(serde_json::Value),
}

#[derive(Deserialize)]
struct WireShare {
	base: WireBase,
	value: String,
}

#[derive(Deserialize)]
struct WireTestCase {
	keys: WireKeys,
	#[serde(flatten)]
	shares: BTreeMap<String, WireShare>,
}

impl TryFrom<WireTestCase> for TestCase {
	type Error = Error;

	fn try_from(wire: WireTestCase) -> Result<Self> {
		let mut case = TestCase::new(wire.keys.n, wire.keys.k);
		for (key, share) in wire.shares {
			let index = match key.parse::<u64>() {
				Ok(index) if index > 0 => index,
				_ => return Err(Error::InvalidShareKey { key }),
			};
			let base = match share.base {
				WireBase::Number(base) => base,
				WireBase::Text(text) => {
					text.trim().parse::<u32>().map_err(|_| Error::InvalidBaseField { index, base: text })?
				}
				WireBase::Other(value) => return Err(Error::InvalidBaseField { index, base: value.to_string() }),
			};
			if case.shares.insert(index, RawShareRecord::new(base, share.value)).is_some() {
				return Err(Error::DuplicateIndex { index });
			}
		}
		Ok(case)
	}
}

pub(crate) fn serialize_decimal<S: Serializer>(value: &BigInt, serializer: S) -> std::result::Result<S::Ok, S::Error> {
	serializer.collect_str(value)
}

#[cfg(test)]
mod test {
	use super::*;
	use assert_matches::assert_matches;

	#[test]
	fn parses_wire_format() {
		let case: TestCase = serde_json::from_str(
			r#"{
				"keys": { "n": 4, "k": 3 },
				"1": { "base": "10", "value": "4" },
				"2": { "base": "2", "value": "111" },
				"3": { "base": 10, "value": "12" },
				"4": { "base": "4", "value": "103" }
			}"#,
		)
		.unwrap();

		assert_eq!((case.n, case.k), (4, 3));
		assert_eq!(case.shares[&2], RawShareRecord::new(2, "111"));
		assert_eq!(case.shares[&3], RawShareRecord::new(10, "12"));
		assert_eq!(
			case.decode_shares().unwrap(),
			vec![Share::new(1, 4), Share::new(2, 7), Share::new(3, 12), Share::new(4, 19)]
		);
	}

	#[test]
	fn rejects_bad_keys_and_bases() {
		let err = serde_json::from_str::<TestCase>(r#"{ "keys": { "n": 1, "k": 1 }, "x": { "base": "10", "value": "1" } }"#)
			.unwrap_err();
		assert!(err.to_string().contains("\"x\""), "{err}");

		for key in ["0", "-1", "18446744073709551616"] {
			let doc = format!(r#"{{ "keys": {{ "n": 1, "k": 1 }}, "{key}": {{ "base": "10", "value": "1" }} }}"#);
			let err = serde_json::from_str::<TestCase>(&doc).unwrap_err();
			assert!(err.to_string().contains(&format!("Share key \"{key}\" is not a positive integer index")), "{err}");
		}

		let err = serde_json::from_str::<TestCase>(r#"{ "keys": { "n": 1, "k": 1 }, "1": { "base": "ten", "value": "1" } }"#)
			.unwrap_err();
		assert!(err.to_string().contains("\"ten\""), "{err}");

		for (base, shown) in [("-1", "-1"), ("10.5", "10.5"), ("true", "true")] {
			let doc = format!(r#"{{ "keys": {{ "n": 1, "k": 1 }}, "1": {{ "base": {base}, "value": "1" }} }}"#);
			let err = serde_json::from_str::<TestCase>(&doc).unwrap_err();
			assert!(err.to_string().contains(&format!("Base \"{shown}\" of share 1 is not an integer")), "{err}");
		}

		let err = serde_json::from_str::<TestCase>(
			r#"{ "keys": { "n": 1, "k": 1 }, "1": { "base": "10", "value": "1" }, "01": { "base": "10", "value": "1" } }"#,
		)
		.unwrap_err();
		assert!(err.to_string().contains("more than once"), "{err}");
	}

	#[test]
	fn missing_and_surplus_records() {
		let case = TestCase::new(3, 2)
			.with_share(1, RawShareRecord::new(10, "5"))
			.with_share(3, RawShareRecord::new(10, "9"))
			.with_share(6, RawShareRecord::new(10, "17"));
		assert_matches!(case.decode_shares(), Err(Error::MissingShare { index: 2 }));

		let case = case.with_share(2, RawShareRecord::new(16, "7"));
		assert_eq!(case.decode_shares().unwrap(), vec![Share::new(1, 5), Share::new(2, 7), Share::new(3, 9)]);
	}

	#[test]
	fn huge_share_count_is_not_an_overflow() {
		let case: TestCase = serde_json::from_str(
			r#"{ "keys": { "n": 18446744073709551615, "k": 1 }, "1": { "base": "10", "value": "4" } }"#,
		)
		.unwrap();
		assert_eq!(case.n as u64, u64::MAX);
		assert_matches!(case.decode_shares(), Err(Error::MissingShare { index: 2 }));
	}

	#[test]
	fn decode_errors_carry_the_record() {
		let case = TestCase::new(1, 1).with_share(1, RawShareRecord::new(8, "19"));
		assert_matches!(case.decode_shares(), Err(Error::InvalidDigit { base: 8, digit: '9', position: 1 }));
	}

	#[test]
	fn serializes_values_as_decimal_strings() {
		let share = Share::new(7, BigInt::from(u128::MAX) * 3);
		let json = serde_json::to_string(&share).unwrap();
		assert_eq!(json, r#"{"x":7,"y":"1020847100762815390390123822295304634365"}"#);
	}
}
