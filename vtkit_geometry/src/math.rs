//! Planar helpers over rings of positions.

use crate::Coordinates0;

/// Signed area of a ring, closed or open. Positive when the ring runs clockwise in a y-down
/// grid, which is how exterior rings are stored in vector tiles.
pub fn ring_area(ring: &[Coordinates0]) -> f64 {
	let Some(mut previous) = ring.last() else {
		return 0.0;
	};
	let mut sum = 0.0;
	for point in ring {
		sum += previous[0] * point[1] - point[0] * previous[1];
		previous = point;
	}
	sum / 2.0
}

/// Rotates an open ring so that it starts at the position chosen by `pick`.
pub fn rotate_ring_start<T: Copy>(ring: &mut [T], pick: impl Fn(&T, &T) -> std::cmp::Ordering) {
	if let Some((index, _)) = ring.iter().enumerate().min_by(|a, b| pick(a.1, b.1)) {
		ring.rotate_left(index);
	}
}

fn segment_distance(p: Coordinates0, a: Coordinates0, b: Coordinates0) -> f64 {
	let dx = b[0] - a[0];
	let dy = b[1] - a[1];
	let length2 = dx * dx + dy * dy;
	if length2 == 0.0 {
		return (p[0] - a[0]).hypot(p[1] - a[1]);
	}
	let t = (((p[0] - a[0]) * dx + (p[1] - a[1]) * dy) / length2).clamp(0.0, 1.0);
	(p[0] - (a[0] + t * dx)).hypot(p[1] - (a[1] + t * dy))
}

/// Douglas-Peucker simplification. The first and last positions are always kept, so a closed
/// ring stays closed.
pub fn simplify_line(points: &[Coordinates0], tolerance: f64) -> Vec<Coordinates0> {
	if points.len() < 3 || tolerance <= 0.0 {
		return points.to_vec();
	}
	let mut keep = vec![false; points.len()];
	keep[0] = true;
	keep[points.len() - 1] = true;

	let mut stack = vec![(0, points.len() - 1)];
	while let Some((start, end)) = stack.pop() {
		let mut max_distance = 0.0;
		let mut max_index = start;
		for index in (start + 1)..end {
			let distance = segment_distance(points[index], points[start], points[end]);
			if distance > max_distance {
				max_distance = distance;
				max_index = index;
			}
		}
		if max_distance > tolerance {
			keep[max_index] = true;
			stack.push((start, max_index));
			stack.push((max_index, end));
		}
	}

	points
		.iter()
		.zip(keep)
		.filter_map(|(point, keep)| keep.then_some(*point))
		.collect()
}
