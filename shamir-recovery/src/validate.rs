use crate::{Interpolator, Result, Share};

/// Surplus shares split by whether they lie on the basis polynomial.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
	pub consistent: Vec<Share>,
	pub wrong: Vec<Share>,
}

impl Validation {
	pub fn is_clean(&self) -> bool {
		self.wrong.is_empty()
	}
}

/// Check every candidate against the polynomial through `basis`.
///
/// The comparison is exact. A non-integer prediction means the basis itself is
/// broken, which is returned as an error instead of blaming the candidate.
pub fn validate(basis: &[Share], candidates: &[Share]) -> Result<Validation> {
	let interpolator = Interpolator::new(basis)?;
	validate_with(&interpolator, candidates)
}

pub(crate) fn validate_with(interpolator: &Interpolator<'_>, candidates: &[Share]) -> Result<Validation> {
	let mut validation = Validation::default();
	for candidate in candidates {
		let predicted = interpolator.predict(candidate.x)?;
		tracing::trace!(x = candidate.x, %predicted, actual = %candidate.y, "Checked share");
		if predicted == candidate.y {
			validation.consistent.push(candidate.clone());
		} else {
			tracing::warn!(x = candidate.x, %predicted, actual = %candidate.y, "Share does not fit the polynomial");
			validation.wrong.push(candidate.clone());
		}
	}
	Ok(validation)
}
