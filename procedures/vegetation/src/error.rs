use std::fmt;

/// Reserved Weber-Penn capabilities that the generator does not produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsupportedFeature {
	/// `CurveBack != 0`, the S-shaped reversal of a stem's bend.
	CurveBack,
	/// `Rotate <= 0`, the alternating azimuth distribution.
	AlternateRotation,
	/// The pruning envelope shape.
	EnvelopeShape,
	/// `SegSplits > 0`, stem forking along a stem.
	SegSplits,
	/// `BaseSplits0 > 0`, forking at the base of the trunk.
	BaseSplits,
}

impl fmt::Display for UnsupportedFeature {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::CurveBack => "CurveBack",
			Self::AlternateRotation => "Rotate <= 0",
			Self::EnvelopeShape => "Envelope shape",
			Self::SegSplits => "SegSplits",
			Self::BaseSplits => "BaseSplits0",
		};
		f.write_str(name)
	}
}

/// Errors surfaced while configuring or generating a tree.
///
/// All of these are deterministic configuration errors; generation itself
/// cannot fail once the parameters validate.
#[derive(Debug, thiserror::Error)]
pub enum PennError {
	#[error("Levels is {levels}, at most {max} branching levels are supported")]
	LevelsOutOfRange { levels: usize, max: usize },

	#[error("level {level} is reachable but only {available} LevelParam entries are configured")]
	MissingLevel { level: usize, available: usize },

	#[error("CurveRes must be at least 1 at level {level}")]
	InvalidCurveRes { level: usize },

	#[error("unsupported configuration at level {level}: {feature}")]
	Unsupported { feature: UnsupportedFeature, level: usize },

	#[error("unknown tree shape: {0}")]
	UnknownShape(String),

	#[error("TOML parameter error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("TOML serialization error: {0}")]
	TomlSerialize(#[from] toml::ser::Error),

	#[error("JSON parameter error: {0}")]
	Json(#[from] serde_json::Error),
}

pub type PennResult<T> = Result<T, PennError>;
