//! Weber-Penn skeletal tree generation.
//!
//! A [`Tree`] is grown from [`TreeParameters`] and a seed. The trunk and every
//! branch are stems, each made of `CurveRes` straight segments; lateral child
//! stems sprout from segments of the level above until `Levels` is reached.

mod builder;
pub mod derived;
pub mod params;
pub mod points;
pub mod segment;
pub mod shape;
pub mod stem;
pub mod variation;

pub use derived::DerivedParameters;
pub use params::{LevelParam, TreeParameters, MAX_LEVELS};
pub use points::{PointPair, PointsByLevel, LEVEL_BUCKETS};
pub use segment::{Segment, SegmentId};
pub use shape::{shape_ratio, ShapeArchetype};
pub use stem::{Stem, StemId};

use crate::PennResult;
use bevy::prelude::Vec3;
use builder::TreeBuilder;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// One generated tree: an arena of stems and segments rooted at the base of
/// the trunk, at the origin, growing along +Y.
#[derive(Debug, Clone)]
pub struct Tree {
	parameters: TreeParameters,
	derived: DerivedParameters,
	stems: Vec<Stem>,
	segments: Vec<Segment>,
}

impl Tree {
	/// Grows a tree from a seed. The same parameters and seed always produce
	/// the same tree.
	pub fn generate(parameters: TreeParameters, seed: u64) -> PennResult<Self> {
		let mut rng = StdRng::seed_from_u64(seed);
		Self::generate_with_rng(parameters, &mut rng)
	}

	/// Grows a tree drawing every random sample from `rng`.
	pub fn generate_with_rng<R: Rng + ?Sized>(
		parameters: TreeParameters,
		rng: &mut R,
	) -> PennResult<Self> {
		parameters.validate()?;

		let derived = DerivedParameters::compute(&parameters, rng)?;
		let grown = TreeBuilder::new(&parameters, derived, rng).build();

		let tree = Self { parameters, derived, stems: grown.stems, segments: grown.segments };

		log::info!(
			"grew {} tree: trunk {:.3}, {} stems, {} segments per level {:?}",
			tree.parameters.shape,
			tree.derived.length_trunk,
			tree.stems.len(),
			tree.segments.len(),
			tree.segments_per_level()
		);

		Ok(tree)
	}

	pub fn parameters(&self) -> &TreeParameters {
		&self.parameters
	}

	pub fn derived(&self) -> &DerivedParameters {
		&self.derived
	}

	/// The first segment of the trunk.
	pub fn root(&self) -> &Segment {
		&self.segments[0]
	}

	pub fn root_id(&self) -> SegmentId {
		SegmentId(0)
	}

	pub fn segment(&self, id: SegmentId) -> Option<&Segment> {
		self.segments.get(id.0)
	}

	pub fn stem(&self, id: StemId) -> Option<&Stem> {
		self.stems.get(id.0)
	}

	pub fn segments(&self) -> &[Segment] {
		&self.segments
	}

	pub fn stems(&self) -> &[Stem] {
		&self.stems
	}

	/// The stem `segment` belongs to, if it belongs to this tree.
	pub fn stem_of(&self, segment: &Segment) -> Option<&Stem> {
		self.stem(segment.stem)
	}

	/// Tip of `segment`, one segment length along its axis.
	pub fn tip(&self, segment: &Segment) -> Option<Vec3> {
		self.stem_of(segment).map(|stem| segment.tip(stem.per_segment_length))
	}

	pub fn segments_per_level(&self) -> Vec<usize> {
		let mut counts = vec![0; self.parameters.levels + 1];
		for segment in &self.segments {
			counts[segment.level] += 1;
		}
		counts
	}

	/// Depth first, parent before children, continuation before laterals.
	pub fn walk(&self) -> Walk<'_> {
		Walk { tree: self, stack: vec![self.root_id()] }
	}

	/// Every segment as a (base, tip) pair, bucketed by level.
	pub fn points_by_level(&self) -> PointsByLevel {
		let mut points = PointsByLevel::with_levels(self.parameters.levels + 1);
		for segment in self.walk() {
			if let Some(tip) = self.tip(segment) {
				points.push(segment.level, (segment.position, tip));
			}
		}
		points
	}
}

/// Iterator returned by [`Tree::walk`].
#[derive(Debug, Clone)]
pub struct Walk<'a> {
	tree: &'a Tree,
	stack: Vec<SegmentId>,
}

impl<'a> Iterator for Walk<'a> {
	type Item = &'a Segment;

	fn next(&mut self) -> Option<Self::Item> {
		let id = self.stack.pop()?;
		let segment = self.tree.segment(id)?;
		self.stack.extend(segment.laterals.iter().rev().copied());
		self.stack.extend(segment.next);
		Some(segment)
	}
}
