use crate::tree::{
	shape_ratio, variation, DerivedParameters, LevelParam, Segment, SegmentId, Stem, StemId,
	TreeParameters,
};
use bevy::prelude::*;
use rand::Rng;

/// A pending piece of growth on the work list.
#[derive(Debug, Clone, Copy)]
enum Growth {
	/// The first segment of `stem`, sprouting laterally from `parent`.
	Start { stem: StemId, parent: Option<SegmentId>, position: Vec3, rotation: Quat },
	/// The segment following `from` on the same stem.
	Continue { from: SegmentId },
}

/// Where lateral children may attach on one segment, as a distance range
/// from the segment's base and the share of the expected children kept.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Window {
	start: f32,
	fraction: f32,
}

/// The stems and segments of one generation. The root segment is always
/// the first one.
pub(crate) struct Grown {
	pub stems: Vec<Stem>,
	pub segments: Vec<Segment>,
}

/// Grows the segment arena of a single tree.
///
/// Parameters must have been validated: every level up to `levels` exists and
/// has a positive `curve_res`.
pub(crate) struct TreeBuilder<'a, R: Rng + ?Sized> {
	params: &'a TreeParameters,
	derived: DerivedParameters,
	rng: &'a mut R,
	stems: Vec<Stem>,
	segments: Vec<Segment>,
}

impl<'a, R: Rng + ?Sized> TreeBuilder<'a, R> {
	pub fn new(params: &'a TreeParameters, derived: DerivedParameters, rng: &'a mut R) -> Self {
		Self { params, derived, rng, stems: Vec::new(), segments: Vec::new() }
	}

	fn level(&self, level: usize) -> &'a LevelParam {
		&self.params.level_params[level]
	}

	/// Depth first over an explicit work list. A segment's laterals are fully
	/// grown before its continuation, and the continuation of every stem is
	/// grown in order, so each stem's helical azimuth advances sequentially.
	pub fn build(mut self) -> Grown {
		let trunk = self.push_stem(Stem::trunk(
			self.derived.length_trunk,
			self.derived.per_segment_length_trunk,
		));

		let mut work = vec![Growth::Start {
			stem: trunk,
			parent: None,
			position: Vec3::ZERO,
			rotation: Quat::IDENTITY,
		}];

		while let Some(growth) = work.pop() {
			let id = match growth {
				Growth::Start { stem, parent, position, rotation } => {
					self.start_stem(stem, parent, position, rotation)
				}
				Growth::Continue { from } => self.continue_stem(from),
			};

			let segment = &self.segments[id.0];
			if segment.segment_number + 1 < self.level(segment.level).curve_res {
				work.push(Growth::Continue { from: id });
			}

			let laterals = self.spawn_laterals(id);
			work.extend(laterals.into_iter().rev());
		}

		Grown { stems: self.stems, segments: self.segments }
	}

	fn push_stem(&mut self, stem: Stem) -> StemId {
		self.stems.push(stem);
		StemId(self.stems.len() - 1)
	}

	fn push_segment(&mut self, segment: Segment) -> SegmentId {
		self.segments.push(segment);
		SegmentId(self.segments.len() - 1)
	}

	fn start_stem(
		&mut self,
		stem: StemId,
		parent: Option<SegmentId>,
		position: Vec3,
		rotation: Quat,
	) -> SegmentId {
		let id = self.push_segment(Segment {
			stem,
			level: self.stems[stem.0].level,
			segment_number: 0,
			position_along_stem: 0.0,
			position,
			rotation,
			parent,
			next: None,
			laterals: Vec::new(),
		});

		if let Some(parent) = parent {
			self.segments[parent.0].laterals.push(id);
		}

		id
	}

	/// Advances along the predecessor's axis, then bends the new segment's
	/// frame about its local Z.
	fn continue_stem(&mut self, from: SegmentId) -> SegmentId {
		let previous = &self.segments[from.0];
		let (stem, level, segment_number) = (previous.stem, previous.level, previous.segment_number);
		let per_segment_length = self.stems[stem.0].per_segment_length;

		let position = previous.tip(per_segment_length);
		let position_along_stem = previous.position_along_stem + per_segment_length;

		let param = self.level(level);
		let jitter = variation::up_to(self.rng, param.curve_v_per_segment());
		let rotation = (previous.rotation
			* Quat::from_rotation_z(param.curve_per_segment().to_radians())
			* Quat::from_rotation_z(jitter.to_radians()))
		.normalize();

		let id = self.push_segment(Segment {
			stem,
			level,
			segment_number: segment_number + 1,
			position_along_stem,
			position,
			rotation,
			parent: Some(from),
			next: None,
			laterals: Vec::new(),
		});
		self.segments[from.0].next = Some(id);

		id
	}

	/// Branch-bearing part of a segment. Only the trunk has a bare base; a
	/// segment straddling its end keeps children in proportion to the share
	/// of the segment above it.
	fn window(&self, segment: &Segment, per_segment_length: f32) -> Option<Window> {
		let length_base = self.derived.length_base;
		let base = segment.position_along_stem;

		if segment.level > 0 || base >= length_base {
			return Some(Window { start: 0.0, fraction: 1.0 });
		}

		let top = base + per_segment_length;
		if top <= length_base {
			return None;
		}

		Some(Window { start: length_base - base, fraction: (top - length_base) / per_segment_length })
	}

	/// Length of a child stem attached `offset` from its parent stem's base.
	fn child_length(&mut self, child_level: usize, parent_length: f32, offset: f32) -> f32 {
		let param = self.level(child_level);
		let length_factor = variation::vary(self.rng, param.length, param.length_v);

		if child_level == 1 {
			let length_trunk = self.derived.length_trunk;
			let branching = self.derived.length_branching();
			if branching <= 0.0 {
				return 0.0;
			}
			length_trunk
				* length_factor
				* shape_ratio(self.params.shape, (length_trunk - offset) / branching)
		} else {
			length_factor * (parent_length - 0.6 * offset)
		}
	}

	/// Queues the child stems sprouting from `id`, in spawn order.
	fn spawn_laterals(&mut self, id: SegmentId) -> Vec<Growth> {
		let segment = &self.segments[id.0];
		let child_level = segment.level + 1;
		if child_level > self.params.levels {
			return Vec::new();
		}

		let parent_stem = segment.stem;
		let (parent_length, per_segment_length) = {
			let stem = &self.stems[parent_stem.0];
			(stem.length, stem.per_segment_length)
		};

		let Some(window) = self.window(segment, per_segment_length) else {
			log::trace!(
				"segment {} lies within the bare base ({} < {})",
				segment.segment_number,
				segment.position_along_stem + per_segment_length,
				self.derived.length_base
			);
			return Vec::new();
		};

		let (base, base_along, frame) = (segment.position, segment.position_along_stem, segment.rotation);
		let parent_param = self.level(segment.level);
		let child_param = self.level(child_level);

		let expected = child_param.branches / parent_param.curve_res as f32 * window.fraction;
		let count = expected.floor().max(0.0) as usize;

		let mut laterals = Vec::with_capacity(count);
		for _ in 0..count {
			let offset = variation::within(self.rng, window.start, per_segment_length);
			let offset_along_parent = base_along + offset;

			let length = self.child_length(child_level, parent_length, offset_along_parent);
			if length <= 0.0 {
				log::trace!(
					"discarding level {} child at {} with length {}",
					child_level,
					offset_along_parent,
					length
				);
				continue;
			}

			let down_angle = variation::vary(self.rng, child_param.down_angle, child_param.down_angle_v);
			let increment = variation::vary(self.rng, child_param.rotate, child_param.rotate_v);
			let azimuth = self.stems[parent_stem.0].advance_rotation(increment);
			self.stems[parent_stem.0].child_count += 1;

			let rotation = (frame
				* Quat::from_rotation_y(azimuth.to_radians())
				* Quat::from_rotation_z(down_angle.to_radians()))
			.normalize();
			let position = base + frame * Vec3::Y * offset;

			let stem = self.push_stem(Stem::lateral(
				child_level,
				length,
				child_param.curve_res,
				id,
				offset_along_parent,
			));

			log::debug!(
				"level {} stem {} at {:.3} along its parent: length {:.3}, down {:.1}, azimuth {:.1}",
				child_level,
				stem.0,
				offset_along_parent,
				length,
				down_angle,
				azimuth
			);

			laterals.push(Growth::Start { stem, parent: Some(id), position, rotation });
		}

		laterals
	}
}
