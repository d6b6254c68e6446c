pub mod level;
pub mod presets;

pub use level::LevelParam;

use crate::error::{PennError, PennResult, UnsupportedFeature};
use crate::tree::ShapeArchetype;
use serde::{Deserialize, Serialize};

/// Highest supported value of [`TreeParameters::levels`].
pub const MAX_LEVELS: usize = 4;

/// The declarative description of a tree, using the conventional
/// Weber-Penn parameter names on the wire.
///
/// Fields missing from a parameter file fall back to [`TreeParameters::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TreeParameters {
	pub shape: ShapeArchetype,
	/// Fraction of the trunk, scaled by `Scale`, kept free of branches.
	pub base_size: f32,
	pub scale: f32,
	pub scale_v: f32,
	pub z_scale: f32,
	pub z_scale_v: f32,
	/// Deepest branching level grown; 0 grows only the trunk.
	pub levels: usize,
	pub ratio: f32,
	pub ratio_power: f32,
	pub lobes: u32,
	pub lobe_depth: f32,
	pub flare: f32,
	pub scale_0: f32,
	pub scale_v_0: f32,
	pub base_splits_0: u32,
	pub leaves: i32,
	pub leaf_shape: u32,
	pub leaf_scale: f32,
	pub leaf_scale_x: f32,
	pub attraction_up: f32,
	pub prune_ratio: f32,
	pub prune_width: f32,
	pub prune_width_peak: f32,
	pub prune_power_low: f32,
	pub prune_power_high: f32,
	#[serde(rename = "LevelParam")]
	pub level_params: Vec<LevelParam>,
}

impl TreeParameters {
	pub fn with_shape(mut self, shape: ShapeArchetype) -> Self {
		self.shape = shape;
		self
	}

	pub fn with_base_size(mut self, base_size: f32) -> Self {
		self.base_size = base_size;
		self
	}

	pub fn with_scale(mut self, scale: f32, variance: f32) -> Self {
		self.scale = scale;
		self.scale_v = variance;
		self
	}

	pub fn with_levels(mut self, levels: usize) -> Self {
		self.levels = levels;
		self
	}

	/// Sets the parameters of one level, padding any missing lower levels
	/// with defaults.
	pub fn with_level_param(mut self, level: usize, param: LevelParam) -> Self {
		if self.level_params.len() <= level {
			self.level_params.resize_with(level + 1, LevelParam::default);
		}
		self.level_params[level] = param;
		self
	}

	pub fn with_level_params(mut self, level_params: Vec<LevelParam>) -> Self {
		self.level_params = level_params;
		self
	}

	/// The parameters of `level`.
	pub fn level(&self, level: usize) -> PennResult<&LevelParam> {
		self.level_params
			.get(level)
			.ok_or(PennError::MissingLevel { level, available: self.level_params.len() })
	}

	/// Checks everything generation relies on, so that a tree either fails up
	/// front or grows completely.
	pub fn validate(&self) -> PennResult<()> {
		if self.levels > MAX_LEVELS {
			return Err(PennError::LevelsOutOfRange { levels: self.levels, max: MAX_LEVELS });
		}

		if self.base_splits_0 > 0 {
			return Err(PennError::Unsupported { feature: UnsupportedFeature::BaseSplits, level: 0 });
		}

		// shape only drives primary branch lengths
		if self.levels >= 1 && self.shape == ShapeArchetype::Envelope {
			return Err(PennError::Unsupported {
				feature: UnsupportedFeature::EnvelopeShape,
				level: 1,
			});
		}

		for level in 0..=self.levels {
			let param = self.level(level)?;

			if param.curve_res == 0 {
				return Err(PennError::InvalidCurveRes { level });
			}

			if param.curve_back != 0.0 {
				return Err(PennError::Unsupported { feature: UnsupportedFeature::CurveBack, level });
			}

			if param.seg_splits > 0.0 {
				return Err(PennError::Unsupported { feature: UnsupportedFeature::SegSplits, level });
			}

			if level > 0 && param.rotate <= 0.0 {
				return Err(PennError::Unsupported {
					feature: UnsupportedFeature::AlternateRotation,
					level,
				});
			}
		}

		Ok(())
	}

	pub fn from_toml_str(source: &str) -> PennResult<Self> {
		Ok(toml::from_str(source)?)
	}

	pub fn from_json_str(source: &str) -> PennResult<Self> {
		Ok(serde_json::from_str(source)?)
	}

	pub fn to_toml_string(&self) -> PennResult<String> {
		Ok(toml::to_string(self)?)
	}

	pub fn to_json_string(&self) -> PennResult<String> {
		Ok(serde_json::to_string_pretty(self)?)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_presets_validate() -> PennResult<()> {
		TreeParameters::default().validate()?;
		TreeParameters::quaking_aspen().validate()?;
		Ok(())
	}

	#[test]
	fn test_zero_curve_res_is_rejected() {
		let params = TreeParameters::default()
			.with_level_param(1, LevelParam::new().with_branches(20.0).with_curve_res(0));

		match params.validate() {
			Err(PennError::InvalidCurveRes { level }) => assert_eq!(level, 1),
			other => panic!("expected InvalidCurveRes, got {other:?}"),
		}
	}

	#[test]
	fn test_unreachable_levels_are_not_checked() -> PennResult<()> {
		// level 1 is broken but never grown
		let params = TreeParameters::default()
			.with_levels(0)
			.with_level_param(1, LevelParam::new().with_curve_res(0).with_rotate(-10.0, 0.0));
		params.validate()
	}

	#[test]
	fn test_missing_level_is_rejected() {
		let params = TreeParameters::default().with_levels(2);

		match params.validate() {
			Err(PennError::MissingLevel { level, available }) => {
				assert_eq!(level, 2);
				assert_eq!(available, 2);
			}
			other => panic!("expected MissingLevel, got {other:?}"),
		}
	}

	#[test]
	fn test_too_many_levels_is_rejected() {
		let params = TreeParameters::default().with_levels(MAX_LEVELS + 1);
		assert!(matches!(params.validate(), Err(PennError::LevelsOutOfRange { .. })));
	}

	#[test]
	fn test_reserved_features_are_rejected() {
		let curve_back = TreeParameters::default()
			.with_level_param(0, LevelParam::new().with_curve_res(5).with_curve(20.0, -20.0, 0.0));
		assert!(matches!(
			curve_back.validate(),
			Err(PennError::Unsupported { feature: UnsupportedFeature::CurveBack, level: 0 })
		));

		let alternate = TreeParameters::default()
			.with_level_param(1, LevelParam::new().with_curve_res(3).with_rotate(-90.0, 0.0));
		assert!(matches!(
			alternate.validate(),
			Err(PennError::Unsupported { feature: UnsupportedFeature::AlternateRotation, level: 1 })
		));

		let envelope = TreeParameters::default().with_shape(ShapeArchetype::Envelope);
		assert!(matches!(
			envelope.validate(),
			Err(PennError::Unsupported { feature: UnsupportedFeature::EnvelopeShape, .. })
		));

		let splits = TreeParameters::default()
			.with_level_param(0, LevelParam::new().with_curve_res(5).with_splits(1.0, 20.0, 0.0));
		assert!(matches!(
			splits.validate(),
			Err(PennError::Unsupported { feature: UnsupportedFeature::SegSplits, level: 0 })
		));

		let mut base_splits = TreeParameters::default();
		base_splits.base_splits_0 = 2;
		assert!(matches!(
			base_splits.validate(),
			Err(PennError::Unsupported { feature: UnsupportedFeature::BaseSplits, .. })
		));
	}

	#[test]
	fn test_from_toml_str() -> PennResult<()> {
		let params = TreeParameters::from_toml_str(
			r#"
			Shape = "TendFlame"
			BaseSize = 0.25
			Scale = 12
			Levels = 1

			[[LevelParam]]
			Length = 1.0
			CurveRes = 4
			CurveV = 10

			[[LevelParam]]
			DownAngle = 50
			DownAngleV = 5
			Rotate = 137.5
			Branches = 12
			Length = 0.4
			CurveRes = 2
			"#,
		)?;

		assert_eq!(params.shape, ShapeArchetype::TendFlame);
		assert_eq!(params.levels, 1);
		assert_eq!(params.scale, 12.0);
		assert_eq!(params.level_params.len(), 2);
		assert_eq!(params.level(0)?.curve_res, 4);
		assert_eq!(params.level(1)?.rotate, 137.5);
		// absent fields fall back to defaults
		assert_eq!(params.level(1)?.taper, 1.0);
		params.validate()
	}

	#[test]
	fn test_from_json_str_with_numeric_shape() -> PennResult<()> {
		let params = TreeParameters::from_json_str(
			r#"{ "Shape": 2, "Scale": 8, "Levels": 0, "LevelParam": [{ "CurveRes": 6 }] }"#,
		)?;

		assert_eq!(params.shape, ShapeArchetype::Hemispherical);
		assert_eq!(params.level(0)?.curve_res, 6);
		Ok(())
	}

	#[test]
	fn test_unknown_shape_fails_to_load() {
		let result = TreeParameters::from_json_str(r#"{ "Shape": "Willow" }"#);
		assert!(matches!(result, Err(PennError::Json(_))));
	}

	#[test]
	fn test_toml_export_reloads() -> PennResult<()> {
		let aspen = TreeParameters::quaking_aspen();
		let reloaded = TreeParameters::from_toml_str(&aspen.to_toml_string()?)?;
		assert_eq!(reloaded, aspen);
		Ok(())
	}
}
