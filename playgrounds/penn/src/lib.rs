use anyhow::Context;
use serde::Serialize;
use std::path::Path;
use vegetation_penn::{PennError, PointsByLevel, TreeParameters};

/// Reads tree parameters from a `.toml` or `.json` file.
pub fn load_parameters(path: &Path) -> anyhow::Result<TreeParameters> {
	let source = std::fs::read_to_string(path)
		.with_context(|| format!("failed to read parameters from {}", path.display()))?;

	let params = match path.extension().and_then(|extension| extension.to_str()) {
		Some("json") => TreeParameters::from_json_str(&source),
		Some("toml") | None => TreeParameters::from_toml_str(&source),
		Some(other) => anyhow::bail!("unsupported parameter file extension: .{other}"),
	}
	.with_context(|| format!("invalid parameters in {}", path.display()))?;

	log::info!("loaded {} tree parameters from {}", params.shape, path.display());
	Ok(params)
}

/// Resolves the parameter source of a command: a file wins over a preset.
pub fn resolve_parameters(path: Option<&Path>, preset: &str) -> anyhow::Result<TreeParameters> {
	match path {
		Some(path) => load_parameters(path),
		None => TreeParameters::preset(preset)
			.ok_or_else(|| anyhow::anyhow!("unknown preset {preset:?}, try \"aspen\" or \"default\"")),
	}
}

/// Line segments of one level as `[[x, y, z], [x, y, z]]` pairs.
#[derive(Debug, Serialize)]
pub struct LevelLines {
	pub level: usize,
	pub lines: Vec<[[f32; 3]; 2]>,
}

pub fn level_lines(points: &PointsByLevel) -> Vec<LevelLines> {
	points
		.iter()
		.map(|(level, pairs)| LevelLines {
			level,
			lines: pairs.iter().map(|(base, tip)| [base.to_array(), tip.to_array()]).collect(),
		})
		.collect()
}

pub fn render_json(points: &PointsByLevel) -> Result<String, PennError> {
	Ok(serde_json::to_string_pretty(&level_lines(points))?)
}

/// One line per level with its segment count.
pub fn render_summary(points: &PointsByLevel) -> String {
	points
		.iter()
		.map(|(level, pairs)| format!("level {level}: {} segments", pairs.len()))
		.collect::<Vec<_>>()
		.join("\n")
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;
	use vegetation_penn::Tree;

	#[test]
	fn test_load_toml_and_json() -> anyhow::Result<()> {
		let dir = tempfile::tempdir()?;

		let toml_path = dir.path().join("aspen.toml");
		std::fs::File::create(&toml_path)?
			.write_all(TreeParameters::quaking_aspen().to_toml_string()?.as_bytes())?;
		assert_eq!(load_parameters(&toml_path)?, TreeParameters::quaking_aspen());

		let json_path = dir.path().join("default.json");
		std::fs::File::create(&json_path)?
			.write_all(TreeParameters::default().to_json_string()?.as_bytes())?;
		assert_eq!(load_parameters(&json_path)?, TreeParameters::default());
		Ok(())
	}

	#[test]
	fn test_unknown_extension_is_rejected() -> anyhow::Result<()> {
		let dir = tempfile::tempdir()?;
		let path = dir.path().join("tree.yaml");
		std::fs::write(&path, "Shape: Conical")?;
		assert!(load_parameters(&path).is_err());
		Ok(())
	}

	#[test]
	fn test_resolve_preset() -> anyhow::Result<()> {
		assert_eq!(resolve_parameters(None, "Quaking-Aspen")?, TreeParameters::quaking_aspen());
		assert!(resolve_parameters(None, "baobab").is_err());
		Ok(())
	}

	#[test]
	fn test_render_outputs() -> anyhow::Result<()> {
		let points = Tree::generate(TreeParameters::default(), 3)?.points_by_level();

		let json: serde_json::Value = serde_json::from_str(&render_json(&points)?)?;
		assert_eq!(json[0]["level"], 0);
		assert_eq!(json[0]["lines"].as_array().map(Vec::len), Some(5));
		assert_eq!(json[0]["lines"][0][0], serde_json::json!([0.0, 0.0, 0.0]));

		let summary = render_summary(&points);
		assert!(summary.starts_with("level 0: 5 segments"));
		assert!(summary.contains("level 1: 60 segments"));
		Ok(())
	}
}
