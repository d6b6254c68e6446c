use rand::Rng;

/// A uniform sample on [-1, 1].
pub fn signed_unit<R: Rng + ?Sized>(rng: &mut R) -> f32 {
	rng.random_range(-1.0..=1.0)
}

/// `base ± variance`, uniformly distributed.
///
/// The sign of `variance` does not matter.
pub fn vary<R: Rng + ?Sized>(rng: &mut R, base: f32, variance: f32) -> f32 {
	base + signed_unit(rng) * variance
}

/// A uniform sample between 0 and `extent`, which may be negative.
pub fn up_to<R: Rng + ?Sized>(rng: &mut R, extent: f32) -> f32 {
	rng.random::<f32>() * extent
}

/// A uniform sample on `[min, max)`, collapsing to `min` for empty ranges.
pub fn within<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
	if max > min {
		rng.random_range(min..max)
	} else {
		min
	}
}
