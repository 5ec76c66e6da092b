use super::layer::VectorTileLayer;
use anyhow::{Context, Result};
use log::trace;
use vtkit_core::{Blob, TileError, io::*};

/// The layers of a tile, in wire order. Names may repeat.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VectorTile {
	pub layers: Vec<VectorTileLayer>,
}

/// What the shallow scan learns about a layer without decoding its features.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LayerSummary {
	pub name: String,
	pub feature_count: usize,
}

impl VectorTile {
	pub fn new(layers: Vec<VectorTileLayer>) -> VectorTile {
		VectorTile { layers }
	}

	/// Fully decodes an uncompressed tile. Unknown top-level fields are skipped.
	pub fn from_blob(blob: &Blob) -> Result<VectorTile> {
		let mut reader = ValueReaderSlice::new_le(blob.as_slice());

		let mut tile = VectorTile::default();
		while reader.has_remaining() {
			let position = reader.position();
			match reader.read_pbf_key().context(TileError::parse(format!(
				"Failed to read PBF key at byte {position}"
			)))? {
				(3, WIRE_LEN) => {
					let index = tile.layers.len();
					let layer = VectorTileLayer::read(
						reader
							.get_pbf_sub_reader()
							.context(TileError::parse(format!("Truncated layer at byte {position}")))?
							.as_mut(),
					)
					.context(TileError::parse(format!(
						"Failed to read layer #{index} at byte {position}"
					)))?;
					tile.layers.push(layer);
				}
				(field, wire_type) => {
					trace!("skipping tile field {field} with wire type {wire_type}");
					reader.skip_pbf_field(wire_type).context(TileError::parse(format!(
						"Failed to skip field {field} at byte {position}"
					)))?;
				}
			}
		}

		Ok(tile)
	}

	/// Walks the tile far enough to list its layers, without decoding features.
	pub fn scan(blob: &Blob) -> Result<Vec<LayerSummary>> {
		let mut reader = ValueReaderSlice::new_le(blob.as_slice());
		let mut layers = Vec::new();

		while reader.has_remaining() {
			let position = reader.position();
			let (field, wire_type) = reader.read_pbf_key().context(TileError::parse(format!(
				"Failed to read PBF key at byte {position}"
			)))?;
			if (field, wire_type) != (3, WIRE_LEN) {
				reader.skip_pbf_field(wire_type).context(TileError::parse(format!(
					"Failed to skip field {field} at byte {position}"
				)))?;
				continue;
			}

			let mut layer_reader = reader
				.get_pbf_sub_reader()
				.context(TileError::parse(format!("Truncated layer at byte {position}")))?;
			let mut summary = LayerSummary::default();
			while layer_reader.has_remaining() {
				let (field, wire_type) = layer_reader
					.read_pbf_key()
					.context(TileError::parse(format!("Failed to read layer key in layer at byte {position}")))?;
				if (field, wire_type) == (1, WIRE_LEN) {
					summary.name = layer_reader
						.read_pbf_string()
						.context(TileError::parse(format!("Failed to read layer name at byte {position}")))?;
					continue;
				}
				if (field, wire_type) == (2, WIRE_LEN) {
					summary.feature_count += 1;
				}
				layer_reader.skip_pbf_field(wire_type).context(TileError::parse(format!(
					"Failed to skip layer field {field} at byte {position}"
				)))?;
			}
			drop(layer_reader);
			layers.push(summary);
		}

		Ok(layers)
	}

	pub fn to_blob(&self) -> Result<Blob> {
		let mut writer = ValueWriterBlob::new_le();

		for layer in &self.layers {
			writer.write_pbf_key(3, WIRE_LEN).context("Failed to write PBF key")?;
			writer
				.write_pbf_blob(&layer.to_blob().context("Failed to convert VectorTileLayer to blob")?)
				.context("Failed to write PBF blob")?;
		}

		Ok(writer.into_blob())
	}

	pub fn find_layer(&self, name: &str) -> Option<&VectorTileLayer> {
		self.layers.iter().find(|layer| layer.name == name)
	}
}
