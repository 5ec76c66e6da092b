//! Clipping against the buffered tile square.
//!
//! Rings are clipped edge by edge (Sutherland-Hodgman), lines segment by segment
//! (Liang-Barsky). Both work on unquantized working-space positions.

use crate::{Coordinates0, Coordinates1};

/// The square `[min, max] x [min, max]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipBox {
	pub min: f64,
	pub max: f64,
}

impl ClipBox {
	pub fn new(min: f64, max: f64) -> ClipBox {
		ClipBox { min, max }
	}

	pub fn contains(&self, position: Coordinates0) -> bool {
		position.iter().all(|v| *v >= self.min && *v <= self.max)
	}

	fn clamp(&self, position: Coordinates0) -> Coordinates0 {
		[
			position[0].clamp(self.min, self.max),
			position[1].clamp(self.min, self.max),
		]
	}

	/// Clips a closed ring. The result is closed again, or empty when less than a triangle is
	/// left inside.
	pub fn clip_ring(&self, ring: &[Coordinates0]) -> Coordinates1 {
		if ring.iter().all(|p| self.contains(*p)) {
			return ring.to_vec();
		}

		let mut open = ring.to_vec();
		if open.len() > 1 && open.first() == open.last() {
			open.pop();
		}
		for (axis, bound, keep_above) in [
			(0, self.min, true),
			(0, self.max, false),
			(1, self.min, true),
			(1, self.max, false),
		] {
			open = clip_against_edge(&open, axis, bound, keep_above);
			if open.is_empty() {
				return open;
			}
		}

		let mut result: Coordinates1 = Vec::with_capacity(open.len() + 1);
		for position in open {
			if result.last() != Some(&position) {
				result.push(position);
			}
		}
		if result.len() > 1 && result.first() == result.last() {
			result.pop();
		}
		if result.len() < 3 {
			return Vec::new();
		}
		result.push(result[0]);
		result
	}

	/// Clips a line. Every stretch that stays inside becomes a line of its own.
	pub fn clip_line(&self, line: &[Coordinates0]) -> Vec<Coordinates1> {
		let mut lines: Vec<Coordinates1> = Vec::new();
		let mut current: Coordinates1 = Vec::new();
		let mut flush = |current: &mut Coordinates1| {
			if current.len() >= 2 {
				lines.push(std::mem::take(current));
			} else {
				current.clear();
			}
		};

		for segment in line.windows(2) {
			let Some((start, end)) = self.clip_segment(segment[0], segment[1]) else {
				flush(&mut current);
				continue;
			};
			if current.last() != Some(&start) {
				flush(&mut current);
				current.push(start);
			}
			current.push(end);
			if end != segment[1] {
				flush(&mut current);
			}
		}
		flush(&mut current);
		lines
	}

	fn clip_segment(&self, a: Coordinates0, b: Coordinates0) -> Option<(Coordinates0, Coordinates0)> {
		let d = [b[0] - a[0], b[1] - a[1]];
		let (mut t0, mut t1) = (0.0f64, 1.0f64);
		// the box edge each end was cut at, as (axis, bound)
		let (mut enter, mut exit) = (None, None);
		for axis in 0..2 {
			for (p, q, bound) in [
				(-d[axis], a[axis] - self.min, self.min),
				(d[axis], self.max - a[axis], self.max),
			] {
				if p == 0.0 {
					if q < 0.0 {
						return None;
					}
					continue;
				}
				let t = q / p;
				if p < 0.0 {
					if t > t1 {
						return None;
					}
					if t > t0 {
						t0 = t;
						enter = Some((axis, bound));
					}
				} else {
					if t < t0 {
						return None;
					}
					if t < t1 {
						t1 = t;
						exit = Some((axis, bound));
					}
				}
			}
		}

		// far-away endpoints lose precision when interpolated, so cut points are pinned to the box
		let cut = |t: f64, edge: Option<(usize, f64)>, end: Coordinates0| match edge {
			None => end,
			Some((axis, bound)) => {
				let mut position = self.clamp([a[0] + t * d[0], a[1] + t * d[1]]);
				position[axis] = bound;
				position
			}
		};
		Some((cut(t0, enter, a), cut(t1, exit, b)))
	}
}

/// One Sutherland-Hodgman pass over an open ring: keeps the half-plane on one side of
/// `position[axis] == bound`.
fn clip_against_edge(vertices: &[Coordinates0], axis: usize, bound: f64, keep_above: bool) -> Coordinates1 {
	let inside = |p: &Coordinates0| {
		if keep_above {
			p[axis] >= bound
		} else {
			p[axis] <= bound
		}
	};
	let intersect = |a: &Coordinates0, b: &Coordinates0| {
		let t = (bound - a[axis]) / (b[axis] - a[axis]);
		let other = 1 - axis;
		let mut position = [0.0; 2];
		position[axis] = bound;
		position[other] = a[other] + t * (b[other] - a[other]);
		position
	};

	let mut output = Vec::with_capacity(vertices.len() + 4);
	for (index, current) in vertices.iter().enumerate() {
		let next = &vertices[(index + 1) % vertices.len()];
		match (inside(current), inside(next)) {
			(true, true) => output.push(*current),
			(true, false) => {
				output.push(*current);
				output.push(intersect(current, next));
			}
			(false, true) => output.push(intersect(current, next)),
			(false, false) => {}
		}
	}
	output
}
