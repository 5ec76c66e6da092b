use super::{BooleanBackend, FillType};
use crate::{Coordinates0, Coordinates2, Coordinates3};
use geo::{
	Area, BooleanOps, Contains, LineString, MultiPolygon, Polygon,
	algorithm::line_intersection::{LineIntersection, line_intersection},
	unary_union,
};

/// Boolean operations from the `geo` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct GeoBackend;

fn to_line_string(ring: &[Coordinates0]) -> LineString<f64> {
	LineString::from(ring.iter().map(|p| (p[0], p[1])).collect::<Vec<_>>())
}

fn to_polygon(rings: &Coordinates2) -> Polygon<f64> {
	let mut iter = rings.iter();
	let exterior = iter.next().map_or_else(|| LineString::new(vec![]), |r| to_line_string(r));
	Polygon::new(exterior, iter.map(|r| to_line_string(r)).collect())
}

fn from_line_string(line: &LineString<f64>) -> Vec<Coordinates0> {
	line.coords().map(|c| [c.x, c.y]).collect()
}

fn from_multi_polygon(multi_polygon: &MultiPolygon<f64>) -> Coordinates3 {
	multi_polygon
		.iter()
		.map(|polygon| {
			std::iter::once(polygon.exterior())
				.chain(polygon.interiors())
				.map(from_line_string)
				.collect()
		})
		.collect()
}

/// Consecutive duplicates removed, so that every segment has a length.
fn segments(ring: &[Coordinates0]) -> Vec<geo::Line<f64>> {
	let mut points: Vec<Coordinates0> = Vec::with_capacity(ring.len());
	for point in ring {
		if points.last() != Some(point) {
			points.push(*point);
		}
	}
	points
		.windows(2)
		.map(|w| geo::Line::new((w[0][0], w[0][1]), (w[1][0], w[1][1])))
		.collect()
}

impl BooleanBackend for GeoBackend {
	fn name(&self) -> &'static str {
		"geo"
	}

	fn union(&self, polygons: &[Coordinates2], fill_type: FillType) -> Coordinates3 {
		let polygons: Vec<Polygon<f64>> = polygons.iter().map(to_polygon).collect();
		let result = match fill_type {
			FillType::NonZero => unary_union(&polygons),
			FillType::EvenOdd => polygons
				.iter()
				.fold(MultiPolygon::new(vec![]), |acc, polygon| acc.xor(polygon)),
		};
		from_multi_polygon(&result)
	}

	fn make_simple(&self, polygon: &Coordinates2) -> Coordinates3 {
		from_multi_polygon(&unary_union(&[to_polygon(polygon)]))
	}

	fn ring_is_simple(&self, ring: &[Coordinates0]) -> bool {
		let segments = segments(ring);
		let n = segments.len();
		for i in 0..n {
			for j in (i + 1)..n {
				let adjacent = j == i + 1 || (i == 0 && j == n - 1);
				match line_intersection(segments[i], segments[j]) {
					None => {}
					Some(LineIntersection::SinglePoint { .. }) if adjacent => {}
					Some(_) => return false,
				}
			}
		}
		true
	}

	fn ring_within(&self, inner: &[Coordinates0], outer: &[Coordinates0]) -> bool {
		Polygon::new(to_line_string(outer), vec![]).contains(&to_line_string(inner))
	}

	fn rings_overlap(&self, a: &[Coordinates0], b: &[Coordinates0]) -> bool {
		let a = Polygon::new(to_line_string(a), vec![]);
		let b = Polygon::new(to_line_string(b), vec![]);
		a.intersection(&b).unsigned_area() > 0.0
	}
}
