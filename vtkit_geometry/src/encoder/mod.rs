//! Turns geographic features into vector tile features.
//!
//! Positions are projected into the tile's grid and scaled by `path_multiplier`. Polygon rings
//! are then filtered, optionally unioned, simplified, clipped to the buffered tile and made
//! simple, before everything is quantized back to the grid and written as command streams.

mod clip;
mod options;

pub use clip::ClipBox;
pub use options::*;

use crate::{
	Coordinates0, Coordinates1, Coordinates2, GeoCollection, Geometry,
	boolean::{BooleanBackend, require_backend},
	math::{ring_area, rotate_ring_start, simplify_line},
	vector_tile::{
		GeomType, VectorTileFeature, VectorTileLayer,
		commands::{CommandWriter, TilePoint},
	},
};
use anyhow::{Context, Result, bail};
use log::{debug, trace, warn};
use std::sync::Arc;
use vtkit_core::{TileCoord, TileError};

/// Rings with less area than this (in tile units) count as collapsed.
const MIN_RING_AREA: f64 = 1e-9;

/// Working-space positions must stay whole numbers, i.e. below 2^52 in magnitude.
const MAX_WORKING_COORDINATE: f64 = 4_503_599_627_370_496.0;

enum RingCheck {
	Keep,
	TooSmall,
	Degenerate,
}

/// Marker for a feature that lost a ring while `process_all_rings` is off.
struct Disqualified;

pub struct GeometryEncoder<'a> {
	coord: TileCoord,
	extent: u32,
	tile_width: u32,
	options: &'a EncodeOptions,
	backend: Option<&'a dyn BooleanBackend>,
}

impl<'a> GeometryEncoder<'a> {
	/// Fails with `NotSupported` when `multi_polygon_union` is requested without a backend.
	pub fn new(
		coord: TileCoord,
		extent: u32,
		tile_width: u32,
		options: &'a EncodeOptions,
		backend: Option<&'a Arc<dyn BooleanBackend>>,
	) -> Result<GeometryEncoder<'a>> {
		if options.multi_polygon_union {
			require_backend(backend, "multi_polygon_union")?;
		}
		Ok(GeometryEncoder {
			coord,
			extent,
			tile_width,
			options,
			backend: backend.map(Arc::as_ref),
		})
	}

	/// Encodes every feature of `collection` into a new layer named `name`. Features without a
	/// GeoJSON id are numbered 1, 2, 3, ... in the order they are written.
	pub fn encode_layer(&self, name: &str, collection: &GeoCollection) -> Result<VectorTileLayer> {
		let mut layer = VectorTileLayer::new_standard(name);
		layer.extent = self.extent;
		let mut next_id = 0;

		for (index, feature) in collection.features.iter().enumerate() {
			let encoded = self
				.encode_geometry(&feature.geometry)
				.with_context(|| format!("Failed to encode feature #{index} of layer '{name}'"))?;
			let Some((geom_type, geometry)) = encoded else {
				trace!("feature #{index} of layer '{name}' produced no geometry");
				continue;
			};
			layer.add_feature(
				VectorTileFeature {
					id: Some(feature.id.unwrap_or_else(|| {
						next_id += 1;
						next_id
					})),
					geom_type,
					geometry,
					..VectorTileFeature::default()
				},
				&feature.properties,
			);
		}

		debug!(
			"encoded layer '{name}' with {} of {} features",
			layer.features.len(),
			collection.len()
		);
		Ok(layer)
	}

	/// Returns the geometry type and command stream, or `None` when nothing is left to draw.
	///
	/// # Errors
	/// Positions that are not finite, or that project too far from the tile to be represented,
	/// are an `InvalidArgument` error.
	pub fn encode_geometry(&self, geometry: &Geometry) -> Result<Option<(GeomType, Vec<u32>)>> {
		self.check_positions(geometry)?;
		match geometry {
			Geometry::Point(p) => self.encode_points(std::slice::from_ref(p)),
			Geometry::MultiPoint(c) => self.encode_points(c),
			Geometry::LineString(c) => self.encode_lines(std::slice::from_ref(c)),
			Geometry::MultiLineString(c) => self.encode_lines(c),
			Geometry::Polygon(c) => self.encode_polygons(std::slice::from_ref(c)),
			Geometry::MultiPolygon(c) => self.encode_polygons(c),
		}
	}

	fn check_positions(&self, geometry: &Geometry) -> Result<()> {
		let positions: Box<dyn Iterator<Item = &Coordinates0> + '_> = match geometry {
			Geometry::Point(p) => Box::new(std::iter::once(p)),
			Geometry::MultiPoint(c) | Geometry::LineString(c) => Box::new(c.iter()),
			Geometry::MultiLineString(c) | Geometry::Polygon(c) => Box::new(c.iter().flatten()),
			Geometry::MultiPolygon(c) => Box::new(c.iter().flatten().flatten()),
		};
		for position in positions {
			let working = self.to_working(*position);
			if !working.iter().all(|v| v.is_finite() && v.abs() <= MAX_WORKING_COORDINATE) {
				bail!(TileError::invalid_argument(format!(
					"position {position:?} cannot be projected into tile {:?}",
					self.coord
				)));
			}
		}
		Ok(())
	}

	fn multiplier(&self) -> f64 {
		f64::from(self.options.path_multiplier)
	}

	/// The buffered tile box in tile units.
	fn clip_box(&self) -> ClipBox {
		let extent = f64::from(self.extent);
		let buffer = f64::from(self.options.buffer_size) * extent / f64::from(self.tile_width);
		ClipBox::new(-buffer, extent + buffer)
	}

	/// The buffered tile box in working space.
	fn working_clip_box(&self) -> ClipBox {
		let ClipBox { min, max } = self.clip_box();
		let m = self.multiplier();
		ClipBox::new(min * m, max * m)
	}

	fn to_working(&self, position: Coordinates0) -> Coordinates0 {
		let [x, y] = self.coord.project(position[0], position[1], f64::from(self.extent));
		let m = self.multiplier();
		[(x * m).round(), (y * m).round()]
	}

	fn quantize(&self, position: Coordinates0) -> TilePoint {
		let m = self.multiplier();
		[(position[0] / m).round() as i64, (position[1] / m).round() as i64]
	}

	fn quantize_path(&self, path: &[Coordinates0]) -> Vec<TilePoint> {
		let mut result: Vec<TilePoint> = Vec::with_capacity(path.len());
		for position in path {
			let point = self.quantize(*position);
			if result.last() != Some(&point) {
				result.push(point);
			}
		}
		result
	}

	fn encode_points(&self, points: &[Coordinates0]) -> Result<Option<(GeomType, Vec<u32>)>> {
		let clip_box = self.clip_box();
		let points: Vec<TilePoint> = points
			.iter()
			.map(|p| self.quantize(self.to_working(*p)))
			.filter(|p| {
				let inside = clip_box.contains([p[0] as f64, p[1] as f64]);
				if !inside {
					trace!("dropping point {p:?} outside the buffered tile");
				}
				inside
			})
			.collect();
		if points.is_empty() {
			return Ok(None);
		}
		let mut writer = CommandWriter::new();
		writer.write_points(&points)?;
		Ok(Some((GeomType::Point, writer.into_vec())))
	}

	fn encode_lines(&self, lines: &[Coordinates1]) -> Result<Option<(GeomType, Vec<u32>)>> {
		let tolerance = self.options.simplify_distance * self.multiplier();
		let clip_box = self.working_clip_box();
		let mut writer = CommandWriter::new();
		let mut count = 0;
		for line in lines {
			let working: Coordinates1 = line.iter().map(|p| self.to_working(*p)).collect();
			let clipped = clip_box.clip_line(&simplify_line(&working, tolerance));
			if clipped.is_empty() {
				trace!("dropping line outside the buffered tile");
			}
			for part in clipped {
				let points = self.quantize_path(&part);
				if points.len() < 2 {
					trace!("dropping line collapsed to {} position(s)", points.len());
					continue;
				}
				writer.write_line(&points)?;
				count += 1;
			}
		}
		Ok((count > 0).then(|| (GeomType::LineString, writer.into_vec())))
	}

	/// Projects a ring into working space, closes it and classifies it.
	fn prepare_ring(&self, ring: &Coordinates1) -> (Coordinates1, RingCheck) {
		let mut working: Coordinates1 = Vec::with_capacity(ring.len() + 1);
		for position in ring {
			let p = self.to_working(*position);
			if working.last() != Some(&p) {
				working.push(p);
			}
		}
		if let Some(first) = working.first().copied()
			&& working.last() != Some(&first)
		{
			working.push(first);
		}

		let m = self.multiplier();
		let area = ring_area(&working).abs() / (m * m);
		let check = if working.len() < 4 || area < MIN_RING_AREA {
			RingCheck::Degenerate
		} else if area < self.options.area_threshold {
			RingCheck::TooSmall
		} else {
			RingCheck::Keep
		};
		(working, check)
	}

	fn prepare_polygon(&self, rings: &Coordinates2) -> Result<Option<Coordinates2>, Disqualified> {
		let mut polygon: Coordinates2 = Vec::with_capacity(rings.len());
		for (index, ring) in rings.iter().enumerate() {
			let (working, check) = self.prepare_ring(ring);
			match check {
				RingCheck::Keep => polygon.push(working),
				RingCheck::TooSmall if index == 0 => {
					trace!("dropping polygon whose exterior ring is below the area threshold");
					return Ok(None);
				}
				RingCheck::TooSmall => trace!("dropping hole #{index} below the area threshold"),
				RingCheck::Degenerate if self.options.process_all_rings => {
					debug!("skipping degenerate ring #{index}");
				}
				RingCheck::Degenerate => return Err(Disqualified),
			}
		}
		Ok((!polygon.is_empty()).then_some(polygon))
	}

	/// Clips every ring to the buffered tile. Holes that vanish are dropped, and so are polygons
	/// whose exterior vanishes.
	fn clip_polygons(&self, polygons: Vec<Coordinates2>) -> Vec<Coordinates2> {
		let clip_box = self.working_clip_box();
		polygons
			.into_iter()
			.filter_map(|polygon| {
				let mut rings = polygon.iter().map(|ring| clip_box.clip_ring(ring));
				let exterior = rings.next().filter(|ring| !ring.is_empty());
				let Some(exterior) = exterior else {
					trace!("dropping polygon outside the buffered tile");
					return None;
				};
				Some(
					std::iter::once(exterior)
						.chain(rings.filter(|ring| !ring.is_empty()))
						.collect(),
				)
			})
			.collect()
	}

	fn encode_polygons(&self, input: &[Coordinates2]) -> Result<Option<(GeomType, Vec<u32>)>> {
		let mut polygons: Vec<Coordinates2> = Vec::with_capacity(input.len());
		for rings in input {
			match self.prepare_polygon(rings) {
				Ok(Some(polygon)) => polygons.push(polygon),
				Ok(None) => {}
				Err(Disqualified) => {
					warn!("dropping feature with a degenerate ring, since process_all_rings is off");
					return Ok(None);
				}
			}
		}
		if polygons.is_empty() {
			return Ok(None);
		}

		if self.options.multi_polygon_union
			&& polygons.len() > 1
			&& let Some(backend) = self.backend
		{
			polygons = backend.union(&polygons, self.options.fill_type);
		}

		if self.options.simplify_distance > 0.0 {
			let tolerance = self.options.simplify_distance * self.multiplier();
			for polygon in &mut polygons {
				for ring in polygon.iter_mut() {
					*ring = simplify_line(ring, tolerance);
				}
			}
		}

		polygons = self.clip_polygons(polygons);

		if self.options.strictly_simple {
			match self.backend {
				Some(backend) => polygons = polygons.iter().flat_map(|p| backend.make_simple(p)).collect(),
				None => debug!("no boolean backend, polygons are not made strictly simple"),
			}
		}

		let mut writer = CommandWriter::new();
		let mut count = 0;
		for polygon in &polygons {
			let Some(rings) = self.quantize_polygon(polygon) else {
				continue;
			};
			for ring in &rings {
				writer.write_ring(ring)?;
			}
			count += 1;
		}
		Ok((count > 0).then(|| (GeomType::Polygon, writer.into_vec())))
	}

	/// Quantizes a working-space polygon into open rings with normalized winding: exterior rings
	/// run positive and start at their top-left vertex, holes run negative and start at their
	/// bottom-right vertex.
	fn quantize_polygon(&self, polygon: &Coordinates2) -> Option<Vec<Vec<TilePoint>>> {
		let mut result: Vec<Vec<TilePoint>> = Vec::with_capacity(polygon.len());
		for (index, ring) in polygon.iter().enumerate() {
			let mut points = self.quantize_path(ring);
			if points.len() > 1 && points.first() == points.last() {
				points.pop();
			}
			let area = ring_area(&points.iter().map(|p| [p[0] as f64, p[1] as f64]).collect::<Vec<_>>());
			if points.len() < 3 || area == 0.0 {
				trace!("ring #{index} collapsed when quantized");
				if index == 0 {
					return None;
				}
				continue;
			}
			let exterior = index == 0;
			if (area > 0.0) != exterior {
				points.reverse();
			}
			if exterior {
				rotate_ring_start(&mut points, |a, b| a[1].cmp(&b[1]).then(a[0].cmp(&b[0])));
			} else {
				rotate_ring_start(&mut points, |a, b| b[1].cmp(&a[1]).then(b[0].cmp(&a[0])));
			}
			result.push(points);
		}
		Some(result)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		boolean::{FillType, default_backend},
		geojson::parse_geojson,
	};
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	fn world() -> TileCoord {
		TileCoord::new(0, 0, 0).unwrap()
	}

	fn square(d: f64) -> Coordinates1 {
		vec![[-d, d], [d, d], [d, -d], [-d, -d], [-d, d]]
	}

	fn decode(options: &EncodeOptions, geometry: Geometry) -> Result<Option<Geometry>> {
		decode_at(world(), options, geometry)
	}

	fn decode_at(coord: TileCoord, options: &EncodeOptions, geometry: Geometry) -> Result<Option<Geometry>> {
		let _ = env_logger::builder().is_test(true).try_init();
		let backend = default_backend();
		let encoder = GeometryEncoder::new(coord, 4096, 256, options, Some(&backend))?;
		let Some((geom_type, geometry)) = encoder.encode_geometry(&geometry)? else {
			return Ok(None);
		};
		VectorTileFeature {
			geom_type,
			geometry,
			..VectorTileFeature::default()
		}
		.to_tile_geometry()
	}

	fn nested_squares() -> Geometry {
		Geometry::MultiPolygon(vec![vec![square(2.0)], vec![square(1.0)]])
	}

	#[test]
	fn point() -> Result<()> {
		let backend = default_backend();
		let options = EncodeOptions::default();
		let encoder = GeometryEncoder::new(world(), 4096, 256, &options, Some(&backend))?;
		assert_eq!(
			encoder.encode_geometry(&Geometry::Point([-122.0, 48.0]))?,
			Some((GeomType::Point, vec![9, 1320, 2848]))
		);
		assert_eq!(
			encoder.encode_geometry(&Geometry::MultiPoint(vec![[-122.0, 48.0], [-121.0, 48.0]]))?,
			Some((GeomType::Point, vec![17, 1320, 2848, 22, 0]))
		);
		Ok(())
	}

	#[test]
	fn polygon_winding_and_start() -> Result<()> {
		let geometry = Geometry::Polygon(vec![square(2.0), square(1.0)]);
		assert_eq!(
			decode(&EncodeOptions::default(), geometry)?,
			Some(Geometry::Polygon(vec![
				vec![[2025.0, 2025.0], [2071.0, 2025.0], [2071.0, 2071.0], [2025.0, 2071.0], [2025.0, 2025.0]],
				vec![[2059.0, 2059.0], [2059.0, 2037.0], [2037.0, 2037.0], [2037.0, 2059.0], [2059.0, 2059.0]],
			]))
		);
		Ok(())
	}

	#[test]
	fn without_union_parts_stay_separate() -> Result<()> {
		let Some(Geometry::MultiPolygon(polygons)) = decode(&EncodeOptions::default(), nested_squares())? else {
			panic!("expected a MultiPolygon");
		};
		assert_eq!(polygons.len(), 2);
		assert_eq!(polygons[1][0][0], [2037.0, 2037.0]);
		Ok(())
	}

	#[test]
	fn nonzero_union_merges_parts() -> Result<()> {
		let options = EncodeOptions::default().with_multi_polygon_union(true);
		assert_eq!(
			decode(&options, nested_squares())?,
			Some(Geometry::Polygon(vec![vec![
				[2025.0, 2025.0],
				[2071.0, 2025.0],
				[2071.0, 2071.0],
				[2025.0, 2071.0],
				[2025.0, 2025.0]
			]]))
		);
		Ok(())
	}

	#[test]
	fn even_odd_union_cuts_a_hole() -> Result<()> {
		let options = EncodeOptions::default()
			.with_multi_polygon_union(true)
			.with_fill_type(FillType::EvenOdd);
		assert_eq!(
			decode(&options, nested_squares())?,
			Some(Geometry::Polygon(vec![
				vec![[2025.0, 2025.0], [2071.0, 2025.0], [2071.0, 2071.0], [2025.0, 2071.0], [2025.0, 2025.0]],
				vec![[2059.0, 2059.0], [2059.0, 2037.0], [2037.0, 2037.0], [2037.0, 2059.0], [2059.0, 2059.0]],
			]))
		);
		Ok(())
	}

	#[test]
	fn degenerate_exterior() -> Result<()> {
		let geometry = Geometry::Polygon(vec![vec![[-2.0, 2.0], [-2.0, 2.0]], square(1.0)]);

		assert_eq!(decode(&EncodeOptions::default(), geometry.clone())?, None);

		let options = EncodeOptions::default().with_process_all_rings(true);
		assert_eq!(
			decode(&options, geometry)?,
			Some(Geometry::Polygon(vec![vec![
				[2037.0, 2037.0],
				[2059.0, 2037.0],
				[2059.0, 2059.0],
				[2037.0, 2059.0],
				[2037.0, 2037.0]
			]]))
		);
		Ok(())
	}

	#[test]
	fn degenerate_part_of_a_multi_polygon() -> Result<()> {
		let geometry = Geometry::MultiPolygon(vec![vec![vec![[-2.0, 2.0], [-2.0, 2.0]]], vec![square(1.0)]]);

		assert_eq!(decode(&EncodeOptions::default(), geometry.clone())?, None);

		let options = EncodeOptions::default().with_process_all_rings(true);
		assert_eq!(
			decode(&options, geometry)?,
			Some(Geometry::Polygon(vec![vec![
				[2037.0, 2037.0],
				[2059.0, 2037.0],
				[2059.0, 2059.0],
				[2037.0, 2059.0],
				[2037.0, 2037.0]
			]]))
		);
		Ok(())
	}

	#[test]
	fn only_ring_degenerate() -> Result<()> {
		let geometry = Geometry::Polygon(vec![vec![[0.0, 0.0], [0.0, 0.0], [0.0, 0.0]]]);
		let options = EncodeOptions::default().with_process_all_rings(true);
		assert_eq!(decode(&options, geometry)?, None);
		Ok(())
	}

	#[test]
	fn small_rings_are_dropped() -> Result<()> {
		let geometry = Geometry::Polygon(vec![square(2.0), square(0.01)]);
		let Some(Geometry::Polygon(rings)) = decode(&EncodeOptions::default(), geometry)? else {
			panic!("expected a Polygon");
		};
		assert_eq!(rings.len(), 1);
		Ok(())
	}

	#[test]
	fn union_without_backend_is_not_supported() {
		let options = EncodeOptions::default().with_multi_polygon_union(true);
		let err = GeometryEncoder::new(world(), 4096, 256, &options, None).err().unwrap();
		assert_eq!(
			vtkit_core::TileError::kind_of(&err),
			Some(vtkit_core::ErrorKind::NotSupported)
		);
	}

	#[test]
	fn works_without_backend() -> Result<()> {
		let options = EncodeOptions::default();
		let encoder = GeometryEncoder::new(world(), 4096, 256, &options, None)?;
		let encoded = encoder.encode_geometry(&Geometry::Polygon(vec![square(2.0)]))?;
		assert_eq!(encoded.map(|(t, _)| t), Some(GeomType::Polygon));
		Ok(())
	}

	#[test]
	fn lines_are_simplified() -> Result<()> {
		let line = Geometry::LineString(vec![[-10.0, 0.0], [0.0, 0.01], [10.0, 0.0]]);
		assert_eq!(
			decode(&EncodeOptions::default(), line.clone())?,
			Some(Geometry::LineString(vec![[1934.0, 2048.0], [2048.0, 2048.0], [2162.0, 2048.0]]))
		);
		let options = EncodeOptions::default().with_simplify_distance(1.0);
		assert_eq!(
			decode(&options, line)?,
			Some(Geometry::LineString(vec![[1934.0, 2048.0], [2162.0, 2048.0]]))
		);
		Ok(())
	}

	#[test]
	fn features_outside_the_buffer_are_dropped() -> Result<()> {
		let coord = TileCoord::new(2, 0, 0)?;
		let options = EncodeOptions::default();
		let encoder = GeometryEncoder::new(coord, 4096, 256, &options, None)?;
		assert_eq!(encoder.encode_geometry(&Geometry::Point([170.0, -60.0]))?, None);
		assert_eq!(
			encoder.encode_geometry(&Geometry::LineString(vec![[170.0, -60.0], [171.0, -61.0]]))?,
			None
		);
		Ok(())
	}

	#[test]
	fn world_polygon_is_clipped_to_the_buffer() -> Result<()> {
		let world = Geometry::Polygon(vec![vec![[-180.0, 85.0], [180.0, 85.0], [180.0, -85.0], [-180.0, -85.0], [-180.0, 85.0]]]);
		assert_eq!(
			decode_at(TileCoord::new(3, 3, 3)?, &EncodeOptions::default(), world)?,
			Some(Geometry::Polygon(vec![vec![
				[-128.0, -128.0],
				[4224.0, -128.0],
				[4224.0, 4224.0],
				[-128.0, 4224.0],
				[-128.0, -128.0]
			]]))
		);
		Ok(())
	}

	#[test]
	fn hole_outside_the_buffer_is_dropped() -> Result<()> {
		let ring = |x0: f64, y0: f64, x1: f64, y1: f64| vec![[x0, y1], [x1, y1], [x1, y0], [x0, y0], [x0, y1]];
		let polygon = Geometry::Polygon(vec![ring(-100.0, -80.0, 100.0, 80.0), ring(160.0, -10.0, 170.0, 10.0)]);
		let Some(Geometry::Polygon(rings)) = decode_at(TileCoord::new(2, 1, 1)?, &EncodeOptions::default(), polygon)? else {
			panic!("expected a Polygon");
		};
		assert_eq!(rings.len(), 1);
		assert_eq!(rings[0][0], [-128.0, -128.0]);
		Ok(())
	}

	#[test]
	fn long_lines_are_clipped() -> Result<()> {
		let line = Geometry::LineString(vec![[-200000.0, 0.0], [200000.0, 0.0]]);
		assert_eq!(
			decode(&EncodeOptions::default(), line)?,
			Some(Geometry::LineString(vec![[-128.0, 2048.0], [4224.0, 2048.0]]))
		);
		Ok(())
	}

	#[test]
	fn lines_leaving_the_tile_are_split() -> Result<()> {
		// east out of tile 1/0/0, back in further south
		let line = Geometry::LineString(vec![[-90.0, 45.0], [90.0, 45.0], [90.0, 30.0], [-90.0, 30.0]]);
		let Some(Geometry::MultiLineString(lines)) = decode_at(TileCoord::new(1, 0, 0)?, &EncodeOptions::default(), line)?
		else {
			panic!("expected a MultiLineString");
		};
		assert_eq!(lines.len(), 2);
		assert_eq!(lines[0][1][0], 4224.0);
		assert_eq!(lines[1][0][0], 4224.0);
		Ok(())
	}

	#[rstest]
	#[case(vec![[-1e20, 0.0], [1e20, 0.0]])]
	#[case(vec![[f64::NAN, 0.0], [10.0, 0.0]])]
	#[case(vec![[0.0, 0.0], [f64::INFINITY, 0.0]])]
	fn unrepresentable_positions_are_rejected(#[case] line: Coordinates1) -> Result<()> {
		let options = EncodeOptions::default();
		let encoder = GeometryEncoder::new(world(), 4096, 256, &options, None)?;
		let err = encoder.encode_geometry(&Geometry::LineString(line)).unwrap_err();
		assert_eq!(
			vtkit_core::TileError::kind_of(&err),
			Some(vtkit_core::ErrorKind::InvalidArgument)
		);
		Ok(())
	}

	#[test]
	fn layer_ids_and_properties() -> Result<()> {
		let collection = parse_geojson(
			r#"{"type":"FeatureCollection","features":[
				{"type":"Feature","geometry":{"type":"Point","coordinates":[-122,48]},"properties":{"name":"geojson data"}},
				{"type":"Feature","id":9,"geometry":{"type":"Point","coordinates":[-121,48]},"properties":{"name":"geojson data","n":1}},
				{"type":"Feature","geometry":{"type":"Point","coordinates":[-120,48]},"properties":{}}
			]}"#,
		)?;
		let options = EncodeOptions::default();
		let encoder = GeometryEncoder::new(world(), 4096, 256, &options, None)?;
		let layer = encoder.encode_layer("layer-name", &collection)?;
		assert_eq!(layer.features.len(), 3);
		assert_eq!(layer.features[0].id, Some(1));
		assert_eq!(layer.features[1].id, Some(9));
		assert_eq!(layer.features[2].id, Some(2));
		assert_eq!(layer.features[1].tag_ids, vec![0, 0, 1, 1]);
		assert_eq!(layer.property_manager.keys.len(), 2);
		assert_eq!(layer.property_manager.values.len(), 2);
		Ok(())
	}
}
