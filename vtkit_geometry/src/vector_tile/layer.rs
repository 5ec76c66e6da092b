//! A single layer of a vector tile.
//!
//! The wire layout:
//!  * field 1: `name` (string)
//!  * field 2: repeated `feature` (embedded message)
//!  * field 3: repeated `keys` (string)
//!  * field 4: repeated `values` (embedded message)
//!  * field 5: `extent` (varint, default 4096)
//!  * field 15: `version` (varint)

use super::{feature::VectorTileFeature, property_manager::PropertyManager, value::GeoValuePBF};
use crate::geo::{GeoProperties, GeoValue};
use anyhow::{Context, Result, anyhow};
use byteorder::LE;
use log::trace;
use vtkit_core::{
	Blob, TileError,
	io::{ValueReader, ValueWriter, ValueWriterBlob, WIRE_LEN, WIRE_VARINT},
};

pub const DEFAULT_EXTENT: u32 = 4096;
pub const DEFAULT_VERSION: u32 = 1;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct VectorTileLayer {
	/// Size of the layer's coordinate grid.
	pub extent: u32,
	pub features: Vec<VectorTileFeature>,
	pub name: String,
	pub property_manager: PropertyManager,
	pub version: u32,
}

impl VectorTileLayer {
	pub fn new(name: String, extent: u32, version: u32) -> VectorTileLayer {
		VectorTileLayer {
			extent,
			features: vec![],
			name,
			property_manager: PropertyManager::default(),
			version,
		}
	}

	/// A layer with `extent = 4096` and `version = 1`.
	pub fn new_standard(name: &str) -> VectorTileLayer {
		VectorTileLayer::new(name.to_string(), DEFAULT_EXTENT, DEFAULT_VERSION)
	}

	pub fn read(reader: &mut dyn ValueReader<'_, LE>) -> Result<VectorTileLayer> {
		let mut extent = DEFAULT_EXTENT;
		let mut features: Vec<VectorTileFeature> = Vec::new();
		let mut name = None;
		let mut property_manager = PropertyManager::new();
		let mut version = DEFAULT_VERSION;

		while reader.has_remaining() {
			match reader.read_pbf_key().context("Failed to read PBF key")? {
				(1, WIRE_LEN) => name = Some(reader.read_pbf_string().context("Failed to read layer name")?),
				(2, WIRE_LEN) => {
					let index = features.len();
					features.push(
						VectorTileFeature::read(
							reader
								.get_pbf_sub_reader()
								.context("Failed to get PBF sub-reader for feature")?
								.as_mut(),
						)
						.with_context(|| format!("Failed to read feature #{index}"))?,
					);
				}
				(3, WIRE_LEN) => {
					property_manager
						.keys
						.push(reader.read_pbf_string().context("Failed to read property key")?);
				}
				(4, WIRE_LEN) => {
					property_manager.values.push(
						GeoValue::read(
							reader
								.get_pbf_sub_reader()
								.context("Failed to get PBF sub-reader for property value")?
								.as_mut(),
						)
						.context("Failed to read property value")?,
					);
				}
				(5, WIRE_VARINT) => extent = u32::try_from(reader.read_varint().context("Failed to read extent")?)?,
				(15, WIRE_VARINT) => version = u32::try_from(reader.read_varint().context("Failed to read version")?)?,
				(field, wire_type) => {
					trace!("skipping layer field {field} with wire type {wire_type}");
					reader.skip_pbf_field(wire_type)?;
				}
			}
		}

		Ok(VectorTileLayer {
			extent,
			features,
			name: name.ok_or_else(|| anyhow!(TileError::parse("layer name is required")))?,
			property_manager,
			version,
		})
	}

	/// Serializes the layer. `extent` and `version` are always written.
	pub fn to_blob(&self) -> Result<Blob> {
		let mut writer = ValueWriterBlob::new_le();

		writer
			.write_pbf_key(1, WIRE_LEN)
			.context("Failed to write PBF key for layer name")?;
		writer.write_pbf_string(&self.name).context("Failed to write layer name")?;

		for feature in &self.features {
			writer
				.write_pbf_key(2, WIRE_LEN)
				.context("Failed to write PBF key for feature")?;
			writer
				.write_pbf_blob(&feature.to_blob().context("Failed to convert feature to blob")?)
				.context("Failed to write feature blob")?;
		}

		for key in self.property_manager.keys.iter() {
			writer
				.write_pbf_key(3, WIRE_LEN)
				.context("Failed to write PBF key for property key")?;
			writer.write_pbf_string(key).context("Failed to write property key")?;
		}

		for value in self.property_manager.values.iter() {
			writer
				.write_pbf_key(4, WIRE_LEN)
				.context("Failed to write PBF key for property value")?;
			writer
				.write_pbf_blob(&value.to_blob().context("Failed to convert property value to blob")?)
				.context("Failed to write property value blob")?;
		}

		writer
			.write_pbf_key(5, WIRE_VARINT)
			.context("Failed to write PBF key for extent")?;
		writer
			.write_varint(u64::from(self.extent))
			.context("Failed to write extent")?;

		writer
			.write_pbf_key(15, WIRE_VARINT)
			.context("Failed to write PBF key for version")?;
		writer
			.write_varint(u64::from(self.version))
			.context("Failed to write version")?;

		Ok(writer.into_blob())
	}

	/// Appends a feature, interning its properties into the layer dictionaries.
	pub fn add_feature(&mut self, mut feature: VectorTileFeature, properties: &GeoProperties) {
		feature.tag_ids = self.property_manager.encode_tag_ids(properties);
		self.features.push(feature);
	}

	pub fn feature_properties(&self, feature: &VectorTileFeature) -> Result<GeoProperties> {
		self.property_manager.decode_tag_ids(&feature.tag_ids)
	}
}
