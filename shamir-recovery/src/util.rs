/// Number of `k` element subsets of `n` elements, `None` on overflow.
pub fn binomial(n: usize, k: usize) -> Option<usize> {
	if k > n {
		return Some(0);
	}
	let k = k.min(n - k);
	let mut acc = 1_usize;
	for i in 0..k {
		// the product of `i + 1` consecutive integers is divisible by `(i + 1)!`
		acc = acc.checked_mul(n - i)? / (i + 1);
	}
	Some(acc)
}

#[test]
fn binomial_small() {
	assert_eq!(binomial(0, 0), Some(1));
	assert_eq!(binomial(4, 0), Some(1));
	assert_eq!(binomial(4, 5), Some(0));
	assert_eq!(binomial(4, 3), Some(4));
	assert_eq!(binomial(10, 3), Some(120));
	assert_eq!(binomial(10, 7), Some(120));
	assert_eq!(binomial(52, 5), Some(2_598_960));
	assert_eq!(binomial(usize::MAX, 2), None);
}
