//! Map sources: the renderer side of `Tile::render`.

use crate::RenderOptions;
use anyhow::{Context, Result};
use vtkit_core::TileCoord;
use vtkit_geometry::GeoCollection;

/// One layer of features, already in longitude/latitude.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceLayer {
	pub name: String,
	pub collection: GeoCollection,
}

/// Produces the styled layers of a map for a tile address.
pub trait MapSource: Send + Sync {
	fn layers(&self, coord: &TileCoord, options: &RenderOptions) -> Result<Vec<SourceLayer>>;
}

/// Serves fixed FeatureCollections, one per layer name, for every tile address.
#[derive(Clone, Debug, Default)]
pub struct GeoJsonSource {
	layers: Vec<SourceLayer>,
}

impl GeoJsonSource {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add_layer(&mut self, name: &str, geojson: &str) -> Result<()> {
		let collection =
			GeoCollection::from_json_str(geojson).with_context(|| format!("Failed to read GeoJSON of layer '{name}'"))?;
		self.layers.push(SourceLayer {
			name: name.to_string(),
			collection,
		});
		Ok(())
	}

	pub fn with_layer(mut self, name: &str, geojson: &str) -> Result<Self> {
		self.add_layer(name, geojson)?;
		Ok(self)
	}
}

impl MapSource for GeoJsonSource {
	fn layers(&self, _coord: &TileCoord, _options: &RenderOptions) -> Result<Vec<SourceLayer>> {
		Ok(self.layers.clone())
	}
}
