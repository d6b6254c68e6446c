use crate::tree::StemId;
use bevy::prelude::*;

/// Index of a [`Segment`] within its [`crate::Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentId(pub(crate) usize);

impl SegmentId {
	pub fn index(self) -> usize {
		self.0
	}
}

/// A short, straight, oriented piece of a stem.
///
/// Segments are owned by the tree's arena; `next` and `laterals` are the
/// owning edges, `parent` is a plain back-reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
	pub stem: StemId,
	pub level: usize,
	/// Index along the stem, starting at 0 on the stem's base.
	pub segment_number: u32,
	/// Distance from the stem's own base to this segment's base.
	pub position_along_stem: f32,
	/// World space base of the segment.
	pub position: Vec3,
	/// World space orientation; local +Y runs along the stem.
	pub rotation: Quat,
	pub parent: Option<SegmentId>,
	/// Continuation of the same stem.
	pub next: Option<SegmentId>,
	/// First segments of child stems sprouting from this segment.
	pub laterals: Vec<SegmentId>,
}

impl Segment {
	/// The unit direction the segment grows in.
	pub fn direction(&self) -> Vec3 {
		self.rotation * Vec3::Y
	}

	/// The point `distance` along this segment's axis; with the stem's
	/// segment length this is the segment's tip.
	pub fn tip(&self, distance: f32) -> Vec3 {
		self.position + self.direction() * distance
	}

	/// Continuation first, then laterals.
	pub fn children(&self) -> impl Iterator<Item = SegmentId> + '_ {
		self.next.into_iter().chain(self.laterals.iter().copied())
	}
}
