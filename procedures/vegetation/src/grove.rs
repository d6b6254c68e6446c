use crate::tree::{PointsByLevel, Tree, TreeParameters};
use crate::PennResult;
use bevy::prelude::*;
use noise::{NoiseFn, Perlin};
use rayon::prelude::*;

/// Lays out a patch of trees sharing one parameter set.
///
/// Candidate anchors sit on a `count` x `count` grid in the XZ plane, nudged by
/// noise, and are kept where the placement noise clears `threshold`.
#[derive(Debug, Clone)]
pub struct GroveBuilder {
	parameters: TreeParameters,
	seed: u64,
	anchor: Vec3,
	step_size: f32,
	count: usize,
	threshold: f32,
	noise_frequency: f32,
}

impl GroveBuilder {
	pub fn new(parameters: TreeParameters) -> Self {
		Self {
			parameters,
			seed: 0,
			anchor: Vec3::ZERO,
			step_size: 20.0,
			count: 4,
			threshold: 0.5,
			noise_frequency: 0.037,
		}
	}

	pub fn with_seed(mut self, seed: u64) -> Self {
		self.seed = seed;
		self
	}

	pub fn with_anchor(mut self, anchor: Vec3) -> Self {
		self.anchor = anchor;
		self
	}

	pub fn with_step_size(mut self, step_size: f32) -> Self {
		self.step_size = step_size;
		self
	}

	pub fn with_count(mut self, count: usize) -> Self {
		self.count = count;
		self
	}

	pub fn with_threshold(mut self, threshold: f32) -> Self {
		self.threshold = threshold;
		self
	}

	pub fn with_noise_frequency(mut self, noise_frequency: f32) -> Self {
		self.noise_frequency = noise_frequency;
		self
	}

	fn sample(&self, noise: &Perlin, position: Vec3, channel: f64) -> f32 {
		noise.get([
			position.x as f64 * self.noise_frequency as f64,
			channel,
			position.z as f64 * self.noise_frequency as f64,
		]) as f32
	}

	/// Placement noise mapped onto the unit interval.
	fn meets_threshold(&self, noise: &Perlin, position: Vec3) -> bool {
		self.sample(noise, position, 0.5) * 0.5 + 0.5 > self.threshold
	}

	/// Offset of up to a quarter step in x and z.
	fn inner_noise(&self, noise: &Perlin, position: Vec3) -> Vec3 {
		let quarter = self.step_size / 4.0;
		Vec3::new(
			self.sample(noise, position, 17.3) * quarter,
			0.0,
			self.sample(noise, position, -17.3) * quarter,
		)
	}

	/// Seed of the tree at `index`, decorrelated from its neighbours.
	fn tree_seed(&self, index: usize) -> u64 {
		self.seed ^ (index as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
	}

	pub fn anchors(&self) -> Vec<Vec3> {
		let noise = Perlin::new((self.seed ^ (self.seed >> 32)) as u32);

		let mut anchors = Vec::new();
		for i in 0..self.count {
			for j in 0..self.count {
				let pre_position = self.anchor
					+ Vec3::new(i as f32 * self.step_size, 0.0, j as f32 * self.step_size);
				let position = pre_position + self.inner_noise(&noise, pre_position);

				if self.meets_threshold(&noise, position) {
					anchors.push(position);
				}
			}
		}
		anchors
	}

	/// Validates once, then grows every tree in parallel.
	pub fn build(&self) -> PennResult<Grove> {
		self.parameters.validate()?;

		let trees = self
			.anchors()
			.into_par_iter()
			.enumerate()
			.map(|(index, anchor)| {
				let seed = self.tree_seed(index);
				Tree::generate(self.parameters.clone(), seed)
					.map(|tree| PlacedTree { anchor, seed, tree })
			})
			.collect::<PennResult<Vec<_>>>()?;

		log::info!("grew a grove of {} trees from {} candidates", trees.len(), self.count * self.count);

		Ok(Grove { trees })
	}
}

/// A tree and where it stands.
#[derive(Debug, Clone)]
pub struct PlacedTree {
	pub anchor: Vec3,
	pub seed: u64,
	pub tree: Tree,
}

#[derive(Debug, Clone, Default)]
pub struct Grove {
	trees: Vec<PlacedTree>,
}

impl Grove {
	pub fn trees(&self) -> &[PlacedTree] {
		&self.trees
	}

	pub fn len(&self) -> usize {
		self.trees.len()
	}

	pub fn is_empty(&self) -> bool {
		self.trees.is_empty()
	}

	/// All trees' segments in world space.
	pub fn points_by_level(&self) -> PointsByLevel {
		let mut points = PointsByLevel::default();
		for placed in &self.trees {
			points.extend(placed.tree.points_by_level().translated(placed.anchor));
		}
		points
	}
}
