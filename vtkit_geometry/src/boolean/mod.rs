//! Polygon boolean operations behind a capability interface.
//!
//! Union, strict-simplicity correction and the validity/simplicity reports need a boolean
//! geometry engine. Callers hold an `Option<Arc<dyn BooleanBackend>>`; when it is `None` the
//! operations that depend on it fail with `NotSupported`.

mod geo_backend;

pub use geo_backend::GeoBackend;

use crate::{Coordinates0, Coordinates2, Coordinates3};
use anyhow::{Result, bail};
use std::{fmt, sync::Arc};
use vtkit_core::TileError;

/// The winding rule that decides which areas are inside when polygons overlap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FillType {
	EvenOdd,
	#[default]
	NonZero,
}

impl FillType {
	pub fn as_str(&self) -> &'static str {
		match self {
			FillType::EvenOdd => "evenOdd",
			FillType::NonZero => "nonZero",
		}
	}
}

impl fmt::Display for FillType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

pub trait BooleanBackend: Send + Sync {
	fn name(&self) -> &'static str;

	/// Merges `polygons` into as few polygons as `fill_type` allows.
	fn union(&self, polygons: &[Coordinates2], fill_type: FillType) -> Coordinates3;

	/// Rewrites a polygon so that no ring crosses itself or another ring.
	fn make_simple(&self, polygon: &Coordinates2) -> Coordinates3;

	/// True when the closed `ring` has no self-intersection or self-tangency.
	fn ring_is_simple(&self, ring: &[Coordinates0]) -> bool;

	/// True when the closed ring `inner` lies inside the closed ring `outer`.
	fn ring_within(&self, inner: &[Coordinates0], outer: &[Coordinates0]) -> bool;

	/// True when the areas enclosed by two closed rings share more than their boundaries.
	fn rings_overlap(&self, a: &[Coordinates0], b: &[Coordinates0]) -> bool;
}

/// The backend used when none is chosen explicitly.
pub fn default_backend() -> Arc<dyn BooleanBackend> {
	Arc::new(GeoBackend)
}

/// Returns the backend or fails with `NotSupported`, naming the operation that needed it.
pub fn require_backend<'a>(
	backend: Option<&'a Arc<dyn BooleanBackend>>,
	operation: &str,
) -> Result<&'a dyn BooleanBackend> {
	match backend {
		Some(backend) => Ok(backend.as_ref()),
		None => bail!(TileError::not_supported(format!(
			"{operation} requires a boolean geometry backend"
		))),
	}
}
