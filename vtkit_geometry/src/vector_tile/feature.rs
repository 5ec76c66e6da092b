use super::{
	commands::{Path, read_paths},
	geometry_type::GeomType,
};
use crate::{geo::*, math::ring_area};
use anyhow::{Context, Result};
use byteorder::LE;
use log::trace;
use vtkit_core::{
	Blob,
	io::{ValueReader, ValueWriter, ValueWriterBlob, WIRE_LEN, WIRE_VARINT},
};

/// A feature as stored in a layer: its geometry stays an undecoded command stream, its
/// properties stay dictionary indexes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VectorTileFeature {
	pub id: Option<u64>,
	pub tag_ids: Vec<u32>,
	pub geom_type: GeomType,
	pub geometry: Vec<u32>,
	/// Opaque image bytes carried instead of vector geometry.
	pub raster: Option<Blob>,
}

impl VectorTileFeature {
	pub fn new_raster(raster: Blob) -> VectorTileFeature {
		VectorTileFeature {
			raster: Some(raster),
			..VectorTileFeature::default()
		}
	}

	pub fn read(reader: &mut dyn ValueReader<'_, LE>) -> Result<VectorTileFeature> {
		let mut f = VectorTileFeature::default();

		while reader.has_remaining() {
			match reader.read_pbf_key().context("Failed to read PBF key")? {
				(1, WIRE_VARINT) => f.id = Some(reader.read_varint().context("Failed to read feature ID")?),
				(2, WIRE_LEN) => f.tag_ids = reader.read_pbf_packed_uint32().context("Failed to read tag IDs")?,
				(3, WIRE_VARINT) => {
					f.geom_type = GeomType::from(reader.read_varint().context("Failed to read geometry type")?);
				}
				(4, WIRE_LEN) => {
					f.geometry = reader
						.read_pbf_packed_uint32()
						.context("Failed to read geometry data")?;
				}
				(5, WIRE_LEN) => f.raster = Some(reader.read_pbf_blob().context("Failed to read raster")?),
				(field, wire_type) => {
					trace!("skipping feature field {field} with wire type {wire_type}");
					reader.skip_pbf_field(wire_type)?;
				}
			}
		}

		Ok(f)
	}

	pub fn to_blob(&self) -> Result<Blob> {
		let mut writer = ValueWriterBlob::new_le();

		if let Some(id) = self.id {
			writer
				.write_pbf_key(1, WIRE_VARINT)
				.context("Failed to write PBF key for feature ID")?;
			writer.write_varint(id).context("Failed to write feature ID")?;
		}

		if !self.tag_ids.is_empty() {
			writer
				.write_pbf_key(2, WIRE_LEN)
				.context("Failed to write PBF key for tag IDs")?;
			writer
				.write_pbf_packed_uint32(&self.tag_ids)
				.context("Failed to write tag IDs")?;
		}

		writer
			.write_pbf_key(3, WIRE_VARINT)
			.context("Failed to write PBF key for geometry type")?;
		writer
			.write_varint(self.geom_type.as_u64())
			.context("Failed to write geometry type")?;

		if !self.geometry.is_empty() {
			writer
				.write_pbf_key(4, WIRE_LEN)
				.context("Failed to write PBF key for geometry data")?;
			writer
				.write_pbf_packed_uint32(&self.geometry)
				.context("Failed to write geometry data")?;
		}

		if let Some(raster) = &self.raster {
			writer
				.write_pbf_key(5, WIRE_LEN)
				.context("Failed to write PBF key for raster")?;
			writer.write_pbf_blob(raster).context("Failed to write raster")?;
		}

		Ok(writer.into_blob())
	}

	pub fn paths(&self) -> Result<Vec<Path>> {
		read_paths(&self.geometry)
	}

	/// Decodes the command stream into tile-local coordinates.
	///
	/// Polygon rings are grouped by winding: a ring with the same orientation as the first ring
	/// starts a new polygon, a ring with the opposite orientation is a hole in the current one.
	/// Rings without area are left out. Returns `None` when nothing drawable remains.
	pub fn to_tile_geometry(&self) -> Result<Option<Geometry>> {
		let to_f64 = |path: Path| -> Coordinates1 { path.points.iter().map(|p| [p[0] as f64, p[1] as f64]).collect() };
		let paths = self.paths()?;

		Ok(match self.geom_type {
			GeomType::Unknown => None,
			GeomType::Point => {
				let mut points: Coordinates1 = paths.into_iter().flat_map(to_f64).collect();
				match points.len() {
					0 => None,
					1 => Some(Geometry::Point(points.remove(0))),
					_ => Some(Geometry::MultiPoint(points)),
				}
			}
			GeomType::LineString => {
				let mut lines: Coordinates2 = Vec::new();
				for path in paths {
					if path.points.len() < 2 {
						trace!("skipping line with {} position(s)", path.points.len());
						continue;
					}
					lines.push(to_f64(path));
				}
				match lines.len() {
					0 => None,
					1 => Some(Geometry::LineString(lines.remove(0))),
					_ => Some(Geometry::MultiLineString(lines)),
				}
			}
			GeomType::Polygon => {
				let mut polygons: Coordinates3 = Vec::new();
				let mut exterior_sign = 0.0;
				for path in paths {
					let mut ring = to_f64(path);
					let area = ring_area(&ring);
					if area == 0.0 {
						trace!("skipping ring without area");
						continue;
					}
					if let Some(first) = ring.first().copied() {
						ring.push(first);
					}
					if exterior_sign == 0.0 {
						exterior_sign = area.signum();
					}
					match polygons.last_mut() {
						Some(polygon) if area.signum() != exterior_sign => polygon.push(ring),
						_ => polygons.push(vec![ring]),
					}
				}
				match polygons.len() {
					0 => None,
					1 => Some(Geometry::Polygon(polygons.remove(0))),
					_ => Some(Geometry::MultiPolygon(polygons)),
				}
			}
		})
	}
}
