//! Inspections of parsed layers: solid-tile detection and OGC validity/simplicity reports.

use crate::{
	Coordinates0, Geometry,
	boolean::{BooleanBackend, require_backend},
	math::ring_area,
	vector_tile::{GeomType, VectorTileFeature, VectorTileLayer},
};
use anyhow::{Context, Result};
use log::{debug, trace};
use serde_json::{Value, json};
use std::{fmt, sync::Arc};

/// Checks whether every layer draws nothing but one box covering the whole tile.
///
/// A feature counts as solid when it is a single axis-aligned rectangle whose edges reach the
/// tile's own corners and whose vertices stay inside the buffered extent. `buffer_size` is given
/// in pixels of a tile `tile_width` pixels wide. Returns the layer names joined with `-` as key;
/// a tile without layers is solid with an empty key.
pub fn is_solid(layers: &[VectorTileLayer], buffer_size: i64, tile_width: u32) -> Result<(bool, String)> {
	let mut names = Vec::with_capacity(layers.len());
	for layer in layers {
		if !layer_is_solid(layer, buffer_size, tile_width)
			.with_context(|| format!("Failed to analyze layer '{}'", layer.name))?
		{
			debug!("layer '{}' is not solid", layer.name);
			return Ok((false, String::new()));
		}
		names.push(layer.name.as_str());
	}
	Ok((true, names.join("-")))
}

fn layer_is_solid(layer: &VectorTileLayer, buffer_size: i64, tile_width: u32) -> Result<bool> {
	if layer.features.is_empty() {
		return Ok(false);
	}
	let extent = f64::from(layer.extent);
	let buffer = buffer_size as f64 * extent / f64::from(tile_width.max(1));
	for feature in &layer.features {
		if feature.raster.is_some() || feature.geom_type != GeomType::Polygon {
			return Ok(false);
		}
		let Some(Geometry::Polygon(rings)) = feature.to_tile_geometry()? else {
			return Ok(false);
		};
		if rings.len() != 1 || !ring_is_full_box(&rings[0], extent, buffer) {
			return Ok(false);
		}
	}
	Ok(true)
}

fn ring_is_full_box(ring: &[Coordinates0], extent: f64, buffer: f64) -> bool {
	let mut corners: Vec<Coordinates0> = ring.to_vec();
	if corners.len() > 1 && corners.first() == corners.last() {
		corners.pop();
	}
	if corners.len() != 4 {
		return false;
	}

	let min_x = corners.iter().map(|p| p[0]).fold(f64::INFINITY, f64::min);
	let max_x = corners.iter().map(|p| p[0]).fold(f64::NEG_INFINITY, f64::max);
	let min_y = corners.iter().map(|p| p[1]).fold(f64::INFINITY, f64::min);
	let max_y = corners.iter().map(|p| p[1]).fold(f64::NEG_INFINITY, f64::max);

	let axis_aligned = [[min_x, min_y], [max_x, min_y], [max_x, max_y], [min_x, max_y]]
		.iter()
		.all(|corner| corners.contains(corner));
	let covers = min_x <= 0.0 && min_y <= 0.0 && max_x >= extent && max_y >= extent;
	let inside_buffer = min_x >= -buffer && min_y >= -buffer && max_x <= extent + buffer && max_y <= extent + buffer;

	axis_aligned && covers && inside_buffer
}

/// The ways a decoded geometry breaks the OGC simple feature rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Violation {
	/// A ring with fewer than three distinct positions or without area, or a line with fewer
	/// than two distinct positions.
	TooFewPoints,
	SelfIntersection,
	/// The first ring of a polygon winds like a hole.
	WrongWinding,
	HoleOutsideShell,
	OverlappingHoles,
	OverlappingPolygons,
}

impl Violation {
	pub fn as_str(&self) -> &'static str {
		match self {
			Violation::TooFewPoints => "too_few_points",
			Violation::SelfIntersection => "self_intersection",
			Violation::WrongWinding => "wrong_winding",
			Violation::HoleOutsideShell => "hole_outside_shell",
			Violation::OverlappingHoles => "overlapping_holes",
			Violation::OverlappingPolygons => "overlapping_polygons",
		}
	}
}

impl fmt::Display for Violation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct GeometryReport {
	pub layer: String,
	pub feature_id: Option<u64>,
	/// Index of the path inside the feature's command stream.
	pub ring_index: usize,
	pub violation: Violation,
}

impl GeometryReport {
	pub fn to_json(&self) -> Value {
		json!({
			"layer": self.layer,
			"feature_id": self.feature_id,
			"ring_index": self.ring_index,
			"violation": self.violation.as_str(),
		})
	}
}

/// Lists every self-intersecting line or ring.
pub fn report_simplicity(
	layers: &[VectorTileLayer],
	backend: Option<&Arc<dyn BooleanBackend>>,
) -> Result<Vec<GeometryReport>> {
	let backend = require_backend(backend, "reportGeometrySimplicity")?;
	report(layers, |feature| {
		let mut violations = Vec::new();
		if matches!(feature.geom_type, GeomType::LineString | GeomType::Polygon) {
			for (index, path) in decoded_paths(feature)?.iter().enumerate() {
				if !backend.ring_is_simple(path) {
					violations.push((index, Violation::SelfIntersection));
				}
			}
		}
		Ok(violations)
	})
}

/// Lists every OGC validity violation of lines and polygons.
pub fn report_validity(
	layers: &[VectorTileLayer],
	backend: Option<&Arc<dyn BooleanBackend>>,
) -> Result<Vec<GeometryReport>> {
	let backend = require_backend(backend, "reportGeometryValidity")?;
	report(layers, |feature| match feature.geom_type {
		GeomType::LineString => Ok(decoded_paths(feature)?
			.iter()
			.enumerate()
			.filter(|(_, line)| distinct_points(line) < 2)
			.map(|(index, _)| (index, Violation::TooFewPoints))
			.collect()),
		GeomType::Polygon => Ok(polygon_violations(backend, &decoded_paths(feature)?)),
		GeomType::Point | GeomType::Unknown => Ok(vec![]),
	})
}

fn report(
	layers: &[VectorTileLayer],
	check: impl Fn(&VectorTileFeature) -> Result<Vec<(usize, Violation)>>,
) -> Result<Vec<GeometryReport>> {
	let mut reports = Vec::new();
	for layer in layers {
		for (index, feature) in layer.features.iter().enumerate() {
			if feature.raster.is_some() {
				continue;
			}
			let violations = check(feature)
				.with_context(|| format!("Failed to check feature #{index} of layer '{}'", layer.name))?;
			reports.extend(violations.into_iter().map(|(ring_index, violation)| GeometryReport {
				layer: layer.name.clone(),
				feature_id: feature.id,
				ring_index,
				violation,
			}));
		}
	}
	debug!("geometry check found {} violation(s)", reports.len());
	Ok(reports)
}

/// Paths as float coordinates, closed paths with their first position repeated.
fn decoded_paths(feature: &VectorTileFeature) -> Result<Vec<Vec<Coordinates0>>> {
	Ok(feature
		.paths()?
		.into_iter()
		.map(|path| {
			let mut points: Vec<Coordinates0> = path.points.iter().map(|p| [p[0] as f64, p[1] as f64]).collect();
			if path.closed
				&& let Some(first) = points.first().copied()
			{
				points.push(first);
			}
			points
		})
		.collect())
}

fn distinct_points(path: &[Coordinates0]) -> usize {
	let mut points: Vec<Coordinates0> = Vec::with_capacity(path.len());
	for point in path {
		if !points.contains(point) {
			points.push(*point);
		}
	}
	points.len()
}

struct Shell {
	index: usize,
	holes: Vec<usize>,
}

fn polygon_violations(backend: &dyn BooleanBackend, rings: &[Vec<Coordinates0>]) -> Vec<(usize, Violation)> {
	let mut violations = Vec::new();
	let mut shells: Vec<Shell> = Vec::new();

	for (index, ring) in rings.iter().enumerate() {
		let area = ring_area(ring);
		if distinct_points(ring) < 3 || area == 0.0 {
			trace!("ring {index} has no area");
			violations.push((index, Violation::TooFewPoints));
			continue;
		}
		if !backend.ring_is_simple(ring) {
			violations.push((index, Violation::SelfIntersection));
		}
		if area > 0.0 {
			shells.push(Shell { index, holes: vec![] });
			continue;
		}
		let Some(shell) = shells.last_mut() else {
			violations.push((index, Violation::WrongWinding));
			continue;
		};
		if !backend.ring_within(ring, &rings[shell.index]) {
			violations.push((index, Violation::HoleOutsideShell));
		}
		if shell.holes.iter().any(|&other| backend.rings_overlap(ring, &rings[other])) {
			violations.push((index, Violation::OverlappingHoles));
		}
		shell.holes.push(index);
	}

	for (position, shell) in shells.iter().enumerate() {
		if shells[..position]
			.iter()
			.any(|other| backend.rings_overlap(&rings[shell.index], &rings[other.index]))
		{
			violations.push((shell.index, Violation::OverlappingPolygons));
		}
	}

	violations.sort_by_key(|(index, _)| *index);
	violations
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		GeoProperties,
		boolean::default_backend,
		vector_tile::commands::{CommandWriter, TilePoint},
	};
	use pretty_assertions::assert_eq;
	use rstest::rstest;
	use vtkit_core::{Blob, ErrorKind, TileError};

	fn rect(min: i64, max: i64) -> Vec<TilePoint> {
		vec![[min, min], [max, min], [max, max], [min, max]]
	}

	fn polygon_layer(name: &str, rings: &[Vec<TilePoint>]) -> VectorTileLayer {
		let mut writer = CommandWriter::new();
		for ring in rings {
			writer.write_ring(ring).unwrap();
		}
		let mut layer = VectorTileLayer::new_standard(name);
		layer.add_feature(
			VectorTileFeature {
				id: Some(1),
				geom_type: GeomType::Polygon,
				geometry: writer.into_vec(),
				..VectorTileFeature::default()
			},
			&GeoProperties::new(),
		);
		layer
	}

	#[test]
	fn empty_tile_is_solid() -> Result<()> {
		assert_eq!(is_solid(&[], 128, 256)?, (true, String::new()));
		Ok(())
	}

	#[test]
	fn full_boxes_are_solid() -> Result<()> {
		let layers = vec![
			polygon_layer("world", &[rect(0, 4096)]),
			polygon_layer("world2", &[rect(-64, 4160)]),
		];
		assert_eq!(is_solid(&layers, 128, 256)?, (true, "world-world2".to_string()));
		Ok(())
	}

	#[rstest]
	#[case::gap(rect(1, 4096))]
	#[case::beyond_buffer(rect(-5000, 9000))]
	#[case::not_a_box(vec![[0, 0], [4096, 0], [4096, 4096], [0, 4000]])]
	fn not_solid(#[case] ring: Vec<TilePoint>) -> Result<()> {
		let layers = vec![polygon_layer("world", &[ring])];
		assert_eq!(is_solid(&layers, 128, 256)?, (false, String::new()));
		Ok(())
	}

	#[test]
	fn layers_without_boxes_are_not_solid() -> Result<()> {
		let mut raster = VectorTileLayer::new_standard("image");
		raster.add_feature(
			VectorTileFeature::new_raster(Blob::from(&[1u8])),
			&GeoProperties::new(),
		);
		assert!(!is_solid(&[raster], 128, 256)?.0);
		assert!(!is_solid(&[VectorTileLayer::new_standard("empty")], 128, 256)?.0);
		Ok(())
	}

	fn violations(reports: &[GeometryReport]) -> Vec<(usize, Violation)> {
		reports.iter().map(|r| (r.ring_index, r.violation)).collect()
	}

	#[test]
	fn valid_polygon_with_hole() -> Result<()> {
		let mut hole = rect(10, 20);
		hole.reverse();
		let layers = vec![polygon_layer("world", &[rect(0, 100), hole])];
		let backend = default_backend();
		assert_eq!(report_validity(&layers, Some(&backend))?, vec![]);
		assert_eq!(report_simplicity(&layers, Some(&backend))?, vec![]);
		Ok(())
	}

	#[test]
	fn bowtie_is_not_simple() -> Result<()> {
		let layers = vec![polygon_layer("world", &[vec![[0, 0], [10, 10], [10, 0], [0, 10]]])];
		let backend = default_backend();
		let reports = report_simplicity(&layers, Some(&backend))?;
		assert_eq!(violations(&reports), vec![(0, Violation::SelfIntersection)]);
		assert_eq!(
			reports[0].to_json(),
			json!({"layer": "world", "feature_id": 1, "ring_index": 0, "violation": "self_intersection"})
		);
		Ok(())
	}

	#[test]
	fn invalid_rings() -> Result<()> {
		let mut outside = rect(200, 210);
		outside.reverse();
		let mut inner_a = rect(10, 30);
		inner_a.reverse();
		let mut inner_b = rect(20, 40);
		inner_b.reverse();
		let layers = vec![polygon_layer("world", &[rect(0, 100), outside, inner_a, inner_b])];
		let backend = default_backend();
		assert_eq!(
			violations(&report_validity(&layers, Some(&backend))?),
			vec![(1, Violation::HoleOutsideShell), (3, Violation::OverlappingHoles)]
		);
		Ok(())
	}

	#[test]
	fn reversed_exterior() -> Result<()> {
		let mut ring = rect(0, 100);
		ring.reverse();
		let layers = vec![polygon_layer("world", &[ring])];
		let backend = default_backend();
		assert_eq!(
			violations(&report_validity(&layers, Some(&backend))?),
			vec![(0, Violation::WrongWinding)]
		);
		Ok(())
	}

	#[test]
	fn overlapping_polygons() -> Result<()> {
		let layers = vec![polygon_layer("world", &[rect(0, 100), rect(50, 150)])];
		let backend = default_backend();
		assert_eq!(
			violations(&report_validity(&layers, Some(&backend))?),
			vec![(1, Violation::OverlappingPolygons)]
		);
		Ok(())
	}

	#[test]
	fn reports_need_a_backend() {
		for result in [report_validity(&[], None), report_simplicity(&[], None)] {
			let err = result.unwrap_err();
			assert_eq!(TileError::kind_of(&err), Some(ErrorKind::NotSupported));
		}
	}
}
