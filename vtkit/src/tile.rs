use crate::{Compression, GetDataOptions, MapSource, RenderOptions, TileOptions, ToJsonOptions};
use anyhow::{Context, Result, ensure};
use log::debug;
use serde_json::Value;
use std::{borrow::Cow, fmt, sync::Arc};
use vtkit_core::{
	Blob, TileCoord, TileError,
	compression::{compress_gzip, decompress_auto},
};
use vtkit_geometry::{
	GeoCollection, GeoProperties,
	analyzer::{self, GeometryReport},
	boolean::{BooleanBackend, default_backend},
	decoder::{self, GeoJsonTarget},
	encoder::{EncodeOptions, GeometryEncoder},
	vector_tile::{DEFAULT_EXTENT, LayerSummary, VectorTile, VectorTileFeature, VectorTileLayer},
};

/// A vector tile at a fixed address, holding its serialized layers.
///
/// The bytes are the source of truth. They are checked with a shallow scan whenever they change
/// and decoded on demand, or once with [`parse`](Self::parse).
pub struct Tile {
	coord: TileCoord,
	options: TileOptions,
	data: Blob,
	parsed: Option<VectorTile>,
	painted: bool,
	backend: Option<Arc<dyn BooleanBackend>>,
}

impl Tile {
	pub fn new(z: u8, x: u32, y: u32) -> Result<Tile> {
		Tile::with_options(z, x, y, TileOptions::default())
	}

	pub fn with_options(z: u8, x: u32, y: u32, options: TileOptions) -> Result<Tile> {
		ensure!(
			options.width > 0 && options.height > 0,
			TileError::invalid_argument("width and height must be positive integers")
		);
		Ok(Tile {
			coord: TileCoord::new(z, x, y)?,
			options,
			data: Blob::new_empty(),
			parsed: None,
			painted: false,
			backend: Some(default_backend()),
		})
	}

	pub fn z(&self) -> u8 {
		self.coord.level
	}

	pub fn x(&self) -> u32 {
		self.coord.x
	}

	pub fn y(&self) -> u32 {
		self.coord.y
	}

	pub fn coord(&self) -> &TileCoord {
		&self.coord
	}

	pub fn width(&self) -> u32 {
		self.options.width
	}

	pub fn height(&self) -> u32 {
		self.options.height
	}

	pub fn buffer_size(&self) -> i32 {
		self.options.buffer_size
	}

	pub fn backend(&self) -> Option<&Arc<dyn BooleanBackend>> {
		self.backend.as_ref()
	}

	/// Replaces the boolean geometry backend. Without one, polygon union and the geometry
	/// reports fail with `NotSupported`.
	pub fn set_backend(&mut self, backend: Option<Arc<dyn BooleanBackend>>) {
		self.backend = backend;
	}

	fn scan(&self) -> Result<Vec<LayerSummary>> {
		VectorTile::scan(&self.data).context("Failed to scan tile layers")
	}

	/// Layer names in wire order, duplicates included.
	pub fn names(&self) -> Result<Vec<String>> {
		Ok(self.scan()?.into_iter().map(|layer| layer.name).collect())
	}

	/// True when no layer carries a feature.
	pub fn empty(&self) -> Result<bool> {
		Ok(self.scan()?.iter().all(|layer| layer.feature_count == 0))
	}

	pub fn painted(&self) -> bool {
		self.painted || !self.data.is_empty()
	}

	/// Decodes all layers now instead of on every access.
	pub fn parse(&mut self) -> Result<()> {
		self.parsed = Some(VectorTile::from_blob(&self.data).context("Failed to parse tile")?);
		Ok(())
	}

	fn layers(&self) -> Result<Cow<'_, VectorTile>> {
		Ok(match &self.parsed {
			Some(tile) => Cow::Borrowed(tile),
			None => Cow::Owned(VectorTile::from_blob(&self.data).context("Failed to parse tile")?),
		})
	}

	/// Replaces all layers with those in `data`, which may be raw, zlib or gzip.
	///
	/// A corrupt envelope leaves the tile untouched. Bytes that inflate but do not scan are kept,
	/// so the tile keeps failing until valid data is set.
	pub fn set_data(&mut self, data: &Blob) -> Result<()> {
		let (inflated, envelope) = decompress_auto(data.clone()).context("Failed to set tile data")?;
		debug!("set {} bytes of {envelope:?} tile data", inflated.len());
		self.data = inflated;
		self.parsed = None;
		self.scan()?;
		Ok(())
	}

	/// Appends the layers in `data` to the existing ones.
	pub fn add_data(&mut self, data: &Blob) -> Result<()> {
		let (inflated, envelope) = decompress_auto(data.clone()).context("Failed to add tile data")?;
		debug!("added {} bytes of {envelope:?} tile data", inflated.len());
		self.data.append(&inflated);
		self.parsed = None;
		self.scan()?;
		Ok(())
	}

	pub fn get_data(&self, options: &GetDataOptions) -> Result<Blob> {
		match options.compression {
			Compression::None => Ok(self.data.clone()),
			Compression::Gzip => {
				let compressed = compress_gzip(&self.data, &options.gzip).context("Failed to compress tile data")?;
				debug!("compressed {} into {} bytes", self.data.len(), compressed.len());
				Ok(compressed)
			}
		}
	}

	pub fn clear(&mut self) {
		self.data = Blob::new_empty();
		self.parsed = None;
		self.painted = false;
	}

	fn push_layers(&mut self, layers: Vec<VectorTileLayer>) -> Result<()> {
		let mut tile = VectorTile::new(layers);
		self.data.append(&tile.to_blob().context("Failed to serialize layers")?);
		if let Some(parsed) = &mut self.parsed {
			parsed.layers.append(&mut tile.layers);
		}
		self.painted = true;
		Ok(())
	}

	fn encoder<'a>(&'a self, coord: TileCoord, options: &'a EncodeOptions) -> Result<GeometryEncoder<'a>> {
		GeometryEncoder::new(
			coord,
			DEFAULT_EXTENT,
			self.options.width,
			options,
			self.backend.as_ref(),
		)
	}

	/// Encodes a GeoJSON FeatureCollection or Feature into a new layer.
	pub fn add_geojson(&mut self, geojson: &str, name: &str, options: &EncodeOptions) -> Result<()> {
		ensure!(
			!name.is_empty(),
			TileError::invalid_argument("layer name must be a non-empty string")
		);
		let collection = GeoCollection::from_json_str(geojson)?;
		let layer = self
			.encoder(self.coord, options)?
			.encode_layer(name, &collection)
			.with_context(|| format!("Failed to encode layer '{name}'"))?;
		self.push_layers(vec![layer])
	}

	/// Adds a layer with a single raster feature holding `image` as is.
	pub fn add_image(&mut self, image: &Blob, name: &str) -> Result<()> {
		ensure!(
			!image.is_empty(),
			TileError::invalid_argument("image buffer must not be empty")
		);
		ensure!(
			!name.is_empty(),
			TileError::invalid_argument("layer name must be a non-empty string")
		);
		let mut layer = VectorTileLayer::new_standard(name);
		layer.add_feature(VectorTileFeature::new_raster(image.clone()), &GeoProperties::new());
		self.push_layers(vec![layer])
	}

	/// Encodes every layer of `source` for this tile, or for `options.coord` when set.
	pub fn render(&mut self, source: &dyn MapSource, options: &RenderOptions) -> Result<()> {
		let coord = options.coord.unwrap_or(self.coord);
		let encode = options.encode_options();
		let layers = {
			let encoder = self.encoder(coord, &encode)?;
			source
				.layers(&coord, options)
				.context("Failed to query map source")?
				.iter()
				.map(|layer| {
					encoder
						.encode_layer(&layer.name, &layer.collection)
						.with_context(|| format!("Failed to render layer '{}'", layer.name))
				})
				.collect::<Result<Vec<_>>>()?
		};
		debug!("rendered {} layer(s) into tile {:?}", layers.len(), self.coord);
		self.push_layers(layers)
	}

	pub fn to_json(&self, options: &ToJsonOptions) -> Result<Value> {
		decoder::tile_to_json(&*self.layers()?, options.decode_geometry)
	}

	pub fn to_geojson(&self, target: &GeoJsonTarget) -> Result<Value> {
		decoder::tile_to_geojson(&*self.layers()?, &self.coord, target)
	}

	/// Whether every layer is one box covering the tile, plus the layer names joined with `-`.
	pub fn is_solid(&self) -> Result<(bool, String)> {
		analyzer::is_solid(
			&self.layers()?.layers,
			i64::from(self.options.buffer_size),
			self.options.width,
		)
	}

	pub fn report_geometry_validity(&self) -> Result<Vec<GeometryReport>> {
		analyzer::report_validity(&self.layers()?.layers, self.backend.as_ref())
	}

	pub fn report_geometry_simplicity(&self) -> Result<Vec<GeometryReport>> {
		analyzer::report_simplicity(&self.layers()?.layers, self.backend.as_ref())
	}
}

impl fmt::Debug for Tile {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Tile")
			.field("coord", &self.coord)
			.field("options", &self.options)
			.field("bytes", &self.data.len())
			.field("parsed", &self.parsed.is_some())
			.field("backend", &self.backend.as_ref().map(|b| b.name()))
			.finish()
	}
}
