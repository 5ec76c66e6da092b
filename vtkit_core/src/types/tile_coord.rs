//! Tile addresses in the Web Mercator pyramid and the projection between geographic
//! coordinates and the tile-local grid.
//!
//! ```
//! use vtkit_core::TileCoord;
//!
//! let coord = TileCoord::new(0, 0, 0).unwrap();
//! let [x, y] = coord.project(-122.0, 48.0, 4096.0);
//! assert_eq!((x.round(), y.round()), (660.0, 1424.0));
//! ```

use crate::TileError;
use anyhow::{Result, ensure};
use std::{
	f64::consts::PI,
	fmt::{self, Debug},
};

/// Latitude limit of the Web Mercator projection.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// A tile address: zoom `level` plus column `x` and row `y`.
#[derive(Eq, PartialEq, Clone, Hash, Copy)]
pub struct TileCoord {
	pub level: u8,
	pub x: u32,
	pub y: u32,
}

impl TileCoord {
	/// Creates a new `TileCoord`.
	///
	/// # Errors
	/// Returns an `InvalidArgument` error if `level` > 31 or `x`/`y` are outside the pyramid.
	pub fn new(level: u8, x: u32, y: u32) -> Result<TileCoord> {
		ensure!(
			level <= 31,
			TileError::invalid_argument(format!("level ({level}) must be <= 31"))
		);
		let max = 2u64.pow(u32::from(level));
		ensure!(
			u64::from(x) < max,
			TileError::invalid_argument(format!("x ({x}) out of bounds for level {level}"))
		);
		ensure!(
			u64::from(y) < max,
			TileError::invalid_argument(format!("y ({y}) out of bounds for level {level}"))
		);
		Ok(TileCoord { level, x, y })
	}

	fn scale(&self) -> f64 {
		2.0f64.powi(i32::from(self.level))
	}

	/// Projects longitude/latitude in degrees into this tile's local grid of size `extent`.
	///
	/// The result is not clamped: positions west/north of the tile are negative and positions
	/// east/south exceed `extent`.
	pub fn project(&self, lon: f64, lat: f64, extent: f64) -> [f64; 2] {
		let scale = self.scale();
		let lat = lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
		let x = (lon + 180.0) / 360.0 * scale;
		let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * scale;
		[
			(x - f64::from(self.x)) * extent,
			(y - f64::from(self.y)) * extent,
		]
	}

	/// Reverses [`project`](Self::project): turns a tile-local position into longitude/latitude.
	pub fn unproject(&self, x: f64, y: f64, extent: f64) -> [f64; 2] {
		let scale = self.scale();
		let gx = (f64::from(self.x) + x / extent) / scale;
		let gy = (f64::from(self.y) + y / extent) / scale;
		[
			gx * 360.0 - 180.0,
			(PI * (1.0 - 2.0 * gy)).sinh().atan().to_degrees(),
		]
	}
}

impl Debug for TileCoord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "TileCoord({}, [{}, {}])", self.level, self.x, self.y)
	}
}
