//! Option structs of the `Tile` operations and their JSON parsers.

use anyhow::{Result, bail, ensure};
use serde_json::{Map, Value};
use vtkit_core::{
	TileCoord, TileError,
	compression::{CompressionStrategy, GzipOptions},
};
use vtkit_geometry::{encoder::EncodeOptions, options::JsonOptions};

/// Size of the rendered tile in pixels, and the margin around it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileOptions {
	pub width: u32,
	pub height: u32,
	pub buffer_size: i32,
}

impl Default for TileOptions {
	fn default() -> Self {
		TileOptions {
			width: 256,
			height: 256,
			buffer_size: 128,
		}
	}
}

fn positive_u32(options: &JsonOptions, key: &str) -> Result<Option<u32>> {
	match options.get(key) {
		None => Ok(None),
		Some(value) => match value.as_u64().and_then(|v| u32::try_from(v).ok()) {
			Some(v) if v > 0 => Ok(Some(v)),
			_ => bail!(TileError::invalid_argument(format!(
				"option '{key}' must be a positive integer"
			))),
		},
	}
}

fn integer_i32(options: &JsonOptions, key: &str) -> Result<Option<i32>> {
	match options.get_i64(key)? {
		None => Ok(None),
		Some(v) => Ok(Some(i32::try_from(v).map_err(|_| {
			TileError::invalid_argument(format!("option '{key}' is out of range ({v})"))
		})?)),
	}
}

impl TileOptions {
	pub fn from_json(value: &Value) -> Result<TileOptions> {
		let options = JsonOptions::new(value, "options")?;
		let mut result = TileOptions::default();
		if let Some(v) = positive_u32(&options, "width")? {
			result.width = v;
		}
		if let Some(v) = positive_u32(&options, "height")? {
			result.height = v;
		}
		if let Some(v) = integer_i32(&options, "buffer_size")? {
			result.buffer_size = v;
		}
		Ok(result)
	}
}

/// The envelope `get_data` puts around the serialized tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Compression {
	#[default]
	None,
	Gzip,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GetDataOptions {
	pub compression: Compression,
	pub gzip: GzipOptions,
}

impl GetDataOptions {
	pub fn gzip(gzip: GzipOptions) -> Self {
		GetDataOptions {
			compression: Compression::Gzip,
			gzip,
		}
	}

	pub fn from_json(value: &Value) -> Result<GetDataOptions> {
		let options = JsonOptions::new(value, "options")?;

		let compression = match options.get("compression") {
			None => Compression::None,
			Some(Value::String(s)) if s == "gzip" => Compression::Gzip,
			Some(Value::String(s)) if s == "none" => Compression::None,
			Some(_) => bail!(TileError::invalid_argument(
				"option 'compression' must be a string, either 'gzip', or 'none' (default)"
			)),
		};

		let level = match options.get("level") {
			None => i64::from(GzipOptions::DEFAULT_LEVEL),
			Some(value) => match value.as_i64() {
				Some(level) => level,
				None => bail!(TileError::invalid_argument(
					"option 'level' must be an integer between 0 (no compression) and 9 (best compression) inclusive"
				)),
			},
		};

		let strategy = match options.get("strategy") {
			None => CompressionStrategy::Default,
			Some(Value::String(name)) => CompressionStrategy::parse(name)?,
			Some(_) => bail!(TileError::invalid_argument(format!(
				"option 'strategy' must be one of the following strings: {}",
				CompressionStrategy::NAMES
			))),
		};

		Ok(GetDataOptions {
			compression,
			gzip: GzipOptions::new(level, strategy)?,
		})
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ToJsonOptions {
	/// Emit coordinates and a `geometry_type` label instead of the raw command integers.
	pub decode_geometry: bool,
}

impl ToJsonOptions {
	pub fn from_json(value: &Value) -> Result<ToJsonOptions> {
		let options = JsonOptions::new(value, "options")?;
		Ok(ToJsonOptions {
			decode_geometry: options.get_bool("decode_geometry")?.unwrap_or(false),
		})
	}
}

/// Settings for rendering a map source into a tile.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderOptions {
	pub scale: f64,
	pub scale_denominator: f64,
	/// Margin in pixels; replaces the `buffer_size` of `encode`.
	pub buffer_size: i32,
	/// Passed through to the map source.
	pub variables: Map<String, Value>,
	pub encode: EncodeOptions,
	/// Renders another tile address than the tile's own.
	pub coord: Option<TileCoord>,
}

impl Default for RenderOptions {
	fn default() -> Self {
		RenderOptions {
			scale: 1.0,
			scale_denominator: 0.0,
			buffer_size: 8,
			variables: Map::new(),
			encode: EncodeOptions::default(),
			coord: None,
		}
	}
}

impl RenderOptions {
	pub fn from_json(value: &Value) -> Result<RenderOptions> {
		let options = JsonOptions::new(value, "options")?;
		let mut result = RenderOptions {
			encode: EncodeOptions::from_json(value)?,
			..RenderOptions::default()
		};

		if let Some(v) = options.get_f64("scale")? {
			ensure!(
				v > 0.0,
				TileError::invalid_argument("option 'scale' must be a positive number")
			);
			result.scale = v;
		}
		if let Some(v) = options.get_f64("scale_denominator")? {
			ensure!(
				v >= 0.0,
				TileError::invalid_argument("option 'scale_denominator' must not be negative")
			);
			result.scale_denominator = v;
		}
		if let Some(v) = integer_i32(&options, "buffer_size")? {
			result.buffer_size = v;
		}
		if let Some(v) = options.get_object("variables")? {
			result.variables = v.clone();
		}

		let z = options.get_u64("z")?;
		let x = options.get_u64("x")?;
		let y = options.get_u64("y")?;
		result.coord = match (z, x, y) {
			(None, None, None) => None,
			(Some(z), Some(x), Some(y)) => {
				let (Ok(z), Ok(x), Ok(y)) = (u8::try_from(z), u32::try_from(x), u32::try_from(y)) else {
					bail!(TileError::invalid_argument(format!(
						"options 'z', 'x' and 'y' do not form a tile address ({z}/{x}/{y})"
					)));
				};
				Some(TileCoord::new(z, x, y)?)
			}
			_ => bail!(TileError::invalid_argument(
				"options 'z', 'x' and 'y' must be given together"
			)),
		};

		Ok(result)
	}

	/// The encoder settings with this render's buffer.
	pub fn encode_options(&self) -> EncodeOptions {
		self.encode.clone().with_buffer_size(self.buffer_size)
	}
}
