pub mod error;
pub mod grove;
pub mod tree;

pub use error::{PennError, PennResult, UnsupportedFeature};
pub use grove::{Grove, GroveBuilder, PlacedTree};
pub use tree::{
	DerivedParameters, LevelParam, PointPair, PointsByLevel, Segment, SegmentId, ShapeArchetype,
	Stem, StemId, Tree, TreeParameters,
};
