use serde::{Deserialize, Serialize};

/// Per-level stem behavior.
///
/// Angles are in degrees. `Branches` on level `n` is the number of level `n`
/// stems spawned along one full level `n - 1` stem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LevelParam {
	/// Angle between a child and its parent's axis.
	pub down_angle: f32,
	pub down_angle_v: f32,
	/// Azimuth increment between successive children on the same parent stem.
	pub rotate: f32,
	pub rotate_v: f32,
	pub branches: f32,
	/// Relative length of stems on this level.
	pub length: f32,
	pub length_v: f32,
	pub taper: f32,
	pub seg_splits: f32,
	pub split_angle: f32,
	pub split_angle_v: f32,
	/// Number of segments composing one stem on this level.
	pub curve_res: u32,
	/// Total bend of a stem, spread evenly over its segments.
	pub curve: f32,
	pub curve_back: f32,
	/// Maximum random bend added per stem, spread over its segments.
	pub curve_v: f32,
}

impl Default for LevelParam {
	fn default() -> Self {
		Self {
			down_angle: 45.0,
			down_angle_v: 0.0,
			rotate: 140.0,
			rotate_v: 0.0,
			branches: 0.0,
			length: 1.0,
			length_v: 0.0,
			taper: 1.0,
			seg_splits: 0.0,
			split_angle: 0.0,
			split_angle_v: 0.0,
			curve_res: 1,
			curve: 0.0,
			curve_back: 0.0,
			curve_v: 0.0,
		}
	}
}

impl LevelParam {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_down_angle(mut self, down_angle: f32, variance: f32) -> Self {
		self.down_angle = down_angle;
		self.down_angle_v = variance;
		self
	}

	pub fn with_rotate(mut self, rotate: f32, variance: f32) -> Self {
		self.rotate = rotate;
		self.rotate_v = variance;
		self
	}

	pub fn with_branches(mut self, branches: f32) -> Self {
		self.branches = branches;
		self
	}

	pub fn with_length(mut self, length: f32, variance: f32) -> Self {
		self.length = length;
		self.length_v = variance;
		self
	}

	pub fn with_curve_res(mut self, curve_res: u32) -> Self {
		self.curve_res = curve_res;
		self
	}

	pub fn with_curve(mut self, curve: f32, curve_back: f32, variance: f32) -> Self {
		self.curve = curve;
		self.curve_back = curve_back;
		self.curve_v = variance;
		self
	}

	pub fn with_splits(mut self, seg_splits: f32, split_angle: f32, variance: f32) -> Self {
		self.seg_splits = seg_splits;
		self.split_angle = split_angle;
		self.split_angle_v = variance;
		self
	}

	/// Deterministic bend per segment, in degrees.
	pub fn curve_per_segment(&self) -> f32 {
		self.curve / self.curve_res as f32
	}

	/// Upper bound of the random bend per segment, in degrees.
	pub fn curve_v_per_segment(&self) -> f32 {
		self.curve_v / self.curve_res as f32
	}
}
