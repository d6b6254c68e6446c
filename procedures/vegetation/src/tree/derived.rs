use crate::tree::{variation, TreeParameters};
use crate::PennResult;
use rand::Rng;

/// Tree-wide values computed once per generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedParameters {
	/// `Scale ± ScaleV`, the only randomized global size.
	pub scale_tree: f32,
	pub length_trunk: f32,
	pub per_segment_length_trunk: f32,
	/// Length of the bare, branchless foot of the trunk.
	pub length_base: f32,
}

impl DerivedParameters {
	/// Draws exactly one sample from `rng`.
	pub fn compute<R: Rng + ?Sized>(params: &TreeParameters, rng: &mut R) -> PennResult<Self> {
		let trunk = params.level(0)?;

		let scale_tree = variation::vary(rng, params.scale, params.scale_v);
		let length_trunk = trunk.length * scale_tree;

		Ok(Self {
			scale_tree,
			length_trunk,
			per_segment_length_trunk: length_trunk / trunk.curve_res as f32,
			length_base: params.base_size * params.scale,
		})
	}

	/// Length of the trunk that may carry branches.
	pub fn length_branching(&self) -> f32 {
		self.length_trunk - self.length_base
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::rngs::StdRng;
	use rand::SeedableRng;

	#[test]
	fn test_compute_without_variance() -> PennResult<()> {
		let params = TreeParameters::default().with_base_size(0.2);
		let mut rng = StdRng::seed_from_u64(1);
		let derived = DerivedParameters::compute(&params, &mut rng)?;

		assert_eq!(derived.scale_tree, 10.0);
		assert_eq!(derived.length_trunk, 10.0);
		assert_eq!(derived.per_segment_length_trunk, 2.0);
		assert_eq!(derived.length_base, 2.0);
		assert_eq!(derived.length_branching(), 8.0);
		Ok(())
	}

	#[test]
	fn test_scale_variance_bounds() -> PennResult<()> {
		let params = TreeParameters::quaking_aspen();
		for seed in 0..32 {
			let mut rng = StdRng::seed_from_u64(seed);
			let derived = DerivedParameters::compute(&params, &mut rng)?;
			assert!((10.0..=16.0).contains(&derived.scale_tree), "scale {}", derived.scale_tree);
			// the bare base follows the nominal scale
			assert!((derived.length_base - 5.2).abs() < 1e-5);
		}
		Ok(())
	}
}
