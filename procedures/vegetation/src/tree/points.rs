use bevy::prelude::*;

/// Number of level buckets always present: trunk and three branching levels.
pub const LEVEL_BUCKETS: usize = 4;

/// Base and tip of one rendered line segment.
pub type PointPair = (Vec3, Vec3);

/// Line segments grouped by branching level.
///
/// Ordering within a level follows the tree walk and carries no meaning.
#[derive(Debug, Clone, PartialEq)]
pub struct PointsByLevel {
	levels: Vec<Vec<PointPair>>,
}

impl Default for PointsByLevel {
	fn default() -> Self {
		Self::with_levels(LEVEL_BUCKETS)
	}
}

impl PointsByLevel {
	/// At least [`LEVEL_BUCKETS`] buckets, more when `levels` asks for them.
	pub fn with_levels(levels: usize) -> Self {
		Self { levels: vec![Vec::new(); levels.max(LEVEL_BUCKETS)] }
	}

	pub fn push(&mut self, level: usize, pair: PointPair) {
		if level >= self.levels.len() {
			self.levels.resize_with(level + 1, Vec::new);
		}
		self.levels[level].push(pair);
	}

	/// Pairs on `level`, empty past the deepest bucket.
	pub fn level(&self, level: usize) -> &[PointPair] {
		self.levels.get(level).map(Vec::as_slice).unwrap_or_default()
	}

	pub fn level_count(&self) -> usize {
		self.levels.len()
	}

	/// Total number of pairs across all levels.
	pub fn len(&self) -> usize {
		self.levels.iter().map(Vec::len).sum()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn iter(&self) -> impl Iterator<Item = (usize, &[PointPair])> {
		self.levels.iter().map(Vec::as_slice).enumerate()
	}

	/// Interleaved base, tip, base, tip... for a line-list renderer.
	pub fn flattened(&self, level: usize) -> Vec<Vec3> {
		self.level(level).iter().flat_map(|(base, tip)| [*base, *tip]).collect()
	}

	pub fn translated(mut self, offset: Vec3) -> Self {
		for (base, tip) in self.levels.iter_mut().flatten() {
			*base += offset;
			*tip += offset;
		}
		self
	}

	pub fn extend(&mut self, other: PointsByLevel) {
		for (level, pairs) in other.levels.into_iter().enumerate() {
			if level >= self.levels.len() {
				self.levels.resize_with(level + 1, Vec::new);
			}
			self.levels[level].extend(pairs);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn pair(y: f32) -> PointPair {
		(Vec3::new(0.0, y, 0.0), Vec3::new(0.0, y + 1.0, 0.0))
	}

	#[test]
	fn test_buckets_grow_on_demand() {
		let mut points = PointsByLevel::default();
		assert_eq!(points.level_count(), LEVEL_BUCKETS);

		points.push(0, pair(0.0));
		points.push(5, pair(1.0));
		assert_eq!(points.level_count(), 6);
		assert_eq!(points.len(), 2);
		assert!(points.level(4).is_empty());
		assert!(points.level(9).is_empty());
	}

	#[test]
	fn test_flattened_interleaves() {
		let mut points = PointsByLevel::default();
		points.push(1, pair(0.0));
		points.push(1, pair(2.0));

		let flat = points.flattened(1);
		assert_eq!(flat.len(), 4);
		assert_eq!(flat[1], Vec3::new(0.0, 1.0, 0.0));
		assert_eq!(flat[2], Vec3::new(0.0, 2.0, 0.0));
	}

	#[test]
	fn test_translated_and_extend() {
		let mut left = PointsByLevel::default();
		left.push(0, pair(0.0));

		let mut right = PointsByLevel::default();
		right.push(0, pair(0.0));
		right.push(2, pair(3.0));

		left.extend(right.translated(Vec3::X));
		assert_eq!(left.level(0).len(), 2);
		assert_eq!(left.level(0)[1].0, Vec3::X);
		assert_eq!(left.level(2)[0].1, Vec3::new(1.0, 4.0, 0.0));
	}
}
