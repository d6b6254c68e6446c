use crate::error::PennError;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

/// The overall silhouette of a tree, governing how primary branch length
/// varies with height along the trunk.
///
/// The discriminants are the classic numeric shape ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "ShapeRepr")]
pub enum ShapeArchetype {
	#[default]
	Conical = 0,
	Spherical = 1,
	Hemispherical = 2,
	Cylindrical = 3,
	TaperedCylindrical = 4,
	Flame = 5,
	InverseConical = 6,
	TendFlame = 7,
	/// Reserved for the pruning envelope.
	Envelope = 8,
}

impl ShapeArchetype {
	pub const ALL: [ShapeArchetype; 9] = [
		Self::Conical,
		Self::Spherical,
		Self::Hemispherical,
		Self::Cylindrical,
		Self::TaperedCylindrical,
		Self::Flame,
		Self::InverseConical,
		Self::TendFlame,
		Self::Envelope,
	];

	pub fn id(self) -> u8 {
		self as u8
	}

	pub fn name(self) -> &'static str {
		match self {
			Self::Conical => "Conical",
			Self::Spherical => "Spherical",
			Self::Hemispherical => "Hemispherical",
			Self::Cylindrical => "Cylindrical",
			Self::TaperedCylindrical => "TaperedCylindrical",
			Self::Flame => "Flame",
			Self::InverseConical => "InverseConical",
			Self::TendFlame => "TendFlame",
			Self::Envelope => "Envelope",
		}
	}
}

/// Maps a shape archetype and a normalized trunk position to a relative
/// length scale.
///
/// `Envelope` is reserved and always yields 0.
pub fn shape_ratio(shape: ShapeArchetype, ratio: f32) -> f32 {
	match shape {
		ShapeArchetype::Conical => 0.2 + 0.8 * ratio,
		ShapeArchetype::Spherical => 0.2 + 0.8 * (PI * ratio).sin(),
		ShapeArchetype::Hemispherical => 0.2 + 0.8 * (0.5 * PI * ratio).sin(),
		ShapeArchetype::Cylindrical => 1.0,
		ShapeArchetype::TaperedCylindrical => 0.5 + 0.5 * ratio,
		ShapeArchetype::Flame => ratio / 0.7,
		ShapeArchetype::InverseConical => 1.0 - 0.8 * ratio,
		ShapeArchetype::TendFlame => {
			if ratio <= 0.7 {
				0.5 + 0.5 * ratio
			} else {
				0.5 + 0.5 * (1.0 - ratio) / 0.3
			}
		}
		ShapeArchetype::Envelope => 0.0,
	}
}

impl fmt::Display for ShapeArchetype {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl TryFrom<u8> for ShapeArchetype {
	type Error = PennError;

	fn try_from(id: u8) -> Result<Self, Self::Error> {
		Self::ALL
			.get(usize::from(id))
			.copied()
			.ok_or_else(|| PennError::UnknownShape(id.to_string()))
	}
}

impl FromStr for ShapeArchetype {
	type Err = PennError;

	/// Accepts the variant name in any case, with or without `_`/`-`
	/// separators, or a numeric id.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		if let Ok(id) = s.trim().parse::<u8>() {
			return Self::try_from(id);
		}

		let folded: String = s
			.chars()
			.filter(|c| *c != '_' && *c != '-' && !c.is_whitespace())
			.map(|c| c.to_ascii_lowercase())
			.collect();

		Self::ALL
			.iter()
			.copied()
			.find(|shape| shape.name().to_ascii_lowercase() == folded)
			.ok_or_else(|| PennError::UnknownShape(s.to_string()))
	}
}

/// Wire form of a shape: either its numeric id or its name.
#[derive(Deserialize)]
#[serde(untagged)]
enum ShapeRepr {
	Id(u8),
	Name(String),
}

impl TryFrom<ShapeRepr> for ShapeArchetype {
	type Error = PennError;

	fn try_from(repr: ShapeRepr) -> Result<Self, Self::Error> {
		match repr {
			ShapeRepr::Id(id) => Self::try_from(id),
			ShapeRepr::Name(name) => name.parse(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const SAMPLES: [f32; 4] = [0.0, 0.35, 0.7, 1.0];

	fn assert_profile(shape: ShapeArchetype, expected: [f32; 4]) {
		for (ratio, expected) in SAMPLES.iter().zip(expected) {
			let actual = shape_ratio(shape, *ratio);
			assert!(
				(actual - expected).abs() < 1e-5,
				"{shape} at {ratio}: expected {expected}, got {actual}"
			);
		}
	}

	#[test]
	fn test_shape_ratio_spot_checks() {
		assert_profile(ShapeArchetype::Conical, [0.2, 0.48, 0.76, 1.0]);
		assert_profile(ShapeArchetype::Spherical, [0.2, 0.912_806, 0.847_214, 0.2]);
		assert_profile(ShapeArchetype::Hemispherical, [0.2, 0.617_999, 0.912_806, 1.0]);
		assert_profile(ShapeArchetype::Cylindrical, [1.0, 1.0, 1.0, 1.0]);
		assert_profile(ShapeArchetype::TaperedCylindrical, [0.5, 0.675, 0.85, 1.0]);
		assert_profile(ShapeArchetype::Flame, [0.0, 0.5, 1.0, 1.428_571_4]);
		assert_profile(ShapeArchetype::InverseConical, [1.0, 0.72, 0.44, 0.2]);
		assert_profile(ShapeArchetype::TendFlame, [0.5, 0.675, 0.85, 0.5]);
		assert_profile(ShapeArchetype::Envelope, [0.0, 0.0, 0.0, 0.0]);
	}

	#[test]
	fn test_tend_flame_breakpoint() {
		// 0.7 itself still belongs to the rising half
		assert!((shape_ratio(ShapeArchetype::TendFlame, 0.7) - 0.85).abs() < 1e-6);
		let above = shape_ratio(ShapeArchetype::TendFlame, 0.85);
		assert!((above - 0.75).abs() < 1e-5, "got {above}");
	}

	#[test]
	fn test_shape_from_id_and_name() -> Result<(), PennError> {
		assert_eq!(ShapeArchetype::try_from(7u8)?, ShapeArchetype::TendFlame);
		assert_eq!("tapered_cylindrical".parse::<ShapeArchetype>()?, ShapeArchetype::TaperedCylindrical);
		assert_eq!("InverseConical".parse::<ShapeArchetype>()?, ShapeArchetype::InverseConical);
		assert_eq!("3".parse::<ShapeArchetype>()?, ShapeArchetype::Cylindrical);
		assert!(ShapeArchetype::try_from(9u8).is_err());
		assert!("willow".parse::<ShapeArchetype>().is_err());
		Ok(())
	}

	#[test]
	fn test_shape_ids_round_trip() -> Result<(), PennError> {
		for shape in ShapeArchetype::ALL {
			assert_eq!(ShapeArchetype::try_from(shape.id())?, shape);
		}
		Ok(())
	}
}
