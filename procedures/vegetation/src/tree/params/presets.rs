use super::{LevelParam, TreeParameters};
use crate::tree::ShapeArchetype;

impl Default for TreeParameters {
	/// A small conical tree: a five segment trunk carrying twenty primary
	/// branches.
	fn default() -> Self {
		Self {
			shape: ShapeArchetype::Conical,
			base_size: 0.0,
			scale: 10.0,
			scale_v: 0.0,
			z_scale: 1.0,
			z_scale_v: 0.0,
			levels: 1,
			ratio: 0.015,
			ratio_power: 1.2,
			lobes: 0,
			lobe_depth: 0.0,
			flare: 0.0,
			scale_0: 1.0,
			scale_v_0: 0.0,
			base_splits_0: 0,
			leaves: 0,
			leaf_shape: 0,
			leaf_scale: 0.0,
			leaf_scale_x: 1.0,
			attraction_up: 0.0,
			prune_ratio: 0.0,
			prune_width: 0.5,
			prune_width_peak: 0.5,
			prune_power_low: 0.5,
			prune_power_high: 0.5,
			level_params: vec![
				LevelParam::new().with_down_angle(0.0, 0.0).with_rotate(0.0, 0.0).with_curve_res(5),
				LevelParam::new()
					.with_down_angle(60.0, 0.0)
					.with_rotate(140.0, 0.0)
					.with_branches(20.0)
					.with_length(0.3, 0.0)
					.with_curve_res(3),
			],
		}
	}
}

impl TreeParameters {
	/// The Weber-Penn Quaking Aspen (Populus tremuloides).
	///
	/// Levels counts branching levels below the trunk, so the table's three
	/// stem levels become `levels = 2`. The level 3 row is kept for
	/// completeness; its zero length means no stems are ever grown from it.
	pub fn quaking_aspen() -> Self {
		Self {
			shape: ShapeArchetype::TendFlame,
			base_size: 0.4,
			scale: 13.0,
			scale_v: 3.0,
			z_scale: 1.0,
			z_scale_v: 0.0,
			levels: 2,
			ratio: 0.015,
			ratio_power: 1.2,
			lobes: 5,
			lobe_depth: 0.07,
			flare: 0.6,
			scale_0: 1.0,
			scale_v_0: 0.0,
			base_splits_0: 0,
			leaves: 25,
			leaf_shape: 0,
			leaf_scale: 0.17,
			leaf_scale_x: 1.0,
			attraction_up: 0.5,
			prune_ratio: 0.0,
			prune_width: 0.5,
			prune_width_peak: 0.5,
			prune_power_low: 0.5,
			prune_power_high: 0.5,
			level_params: vec![
				LevelParam::new()
					.with_down_angle(0.0, 0.0)
					.with_rotate(0.0, 0.0)
					.with_curve_res(3)
					.with_curve(0.0, 0.0, 20.0),
				LevelParam::new()
					.with_down_angle(60.0, -50.0)
					.with_rotate(140.0, 0.0)
					.with_branches(50.0)
					.with_length(0.3, 0.0)
					.with_curve_res(5)
					.with_curve(-40.0, 0.0, 50.0),
				LevelParam::new()
					.with_down_angle(45.0, 10.0)
					.with_rotate(140.0, 0.0)
					.with_branches(30.0)
					.with_length(0.6, 0.0)
					.with_curve_res(3)
					.with_curve(-40.0, 0.0, 75.0),
				LevelParam::new()
					.with_down_angle(45.0, 10.0)
					.with_rotate(77.0, 0.0)
					.with_branches(10.0)
					.with_length(0.0, 0.0)
					.with_curve_res(1),
			],
		}
	}

	/// Looks a preset up by name.
	pub fn preset(name: &str) -> Option<Self> {
		match name.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
			"aspen" | "quakingaspen" => Some(Self::quaking_aspen()),
			"default" | "conical" => Some(Self::default()),
			_ => None,
		}
	}
}
