use crate::tree::SegmentId;

/// Index of a [`Stem`] within its [`crate::Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StemId(pub(crate) usize);

impl StemId {
	pub fn index(self) -> usize {
		self.0
	}
}

/// One continuous branch run, shared by every segment along it.
#[derive(Debug, Clone, PartialEq)]
pub struct Stem {
	pub level: usize,
	/// Total intended length, fixed at creation.
	pub length: f32,
	pub per_segment_length: f32,
	/// Azimuth, in degrees, of the most recent lateral child spawned from this
	/// stem. Each new child continues from here.
	pub last_rotation: f32,
	pub child_count: usize,
	/// Distance from the parent stem's base to where this stem attaches.
	/// `None` for the trunk.
	pub offset_along_parent: Option<f32>,
	/// The parent segment this stem sprouts from. `None` for the trunk.
	pub parent: Option<SegmentId>,
}

impl Stem {
	pub fn trunk(length: f32, per_segment_length: f32) -> Self {
		Self {
			level: 0,
			length,
			per_segment_length,
			last_rotation: 0.0,
			child_count: 0,
			offset_along_parent: None,
			parent: None,
		}
	}

	pub fn lateral(
		level: usize,
		length: f32,
		curve_res: u32,
		parent: SegmentId,
		offset_along_parent: f32,
	) -> Self {
		Self {
			level,
			length,
			per_segment_length: length / curve_res as f32,
			last_rotation: 0.0,
			child_count: 0,
			offset_along_parent: Some(offset_along_parent),
			parent: Some(parent),
		}
	}

	pub fn is_trunk(&self) -> bool {
		self.parent.is_none()
	}

	/// Advances the helical azimuth by `increment` degrees and returns the
	/// new azimuth.
	pub fn advance_rotation(&mut self, increment: f32) -> f32 {
		self.last_rotation = (self.last_rotation + increment).rem_euclid(360.0);
		self.last_rotation
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_advance_rotation_wraps() {
		let mut stem = Stem::trunk(10.0, 2.0);
		assert_eq!(stem.advance_rotation(140.0), 140.0);
		assert_eq!(stem.advance_rotation(140.0), 280.0);
		assert_eq!(stem.advance_rotation(140.0), 60.0);
		assert_eq!(stem.last_rotation, 60.0);
	}

	#[test]
	fn test_lateral_per_segment_length() {
		let stem = Stem::lateral(1, 3.0, 3, SegmentId(4), 2.5);
		assert_eq!(stem.per_segment_length, 1.0);
		assert_eq!(stem.offset_along_parent, Some(2.5));
		assert!(!stem.is_trunk());
	}
}
