//! Classified errors.
//!
//! Everything in this workspace returns [`anyhow::Result`]. When a failure belongs to one of the
//! well-known categories, the root cause is a [`TileError`], raised with `bail!`/`ensure!` so that
//! it survives any context added further up. [`TileError::kind_of`] recovers the category.

use thiserror::Error;

/// The category of a failure, independent of the context messages wrapped around it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	InvalidArgument,
	Parse,
	Decompression,
	NotFound,
	NotSupported,
	ConcurrentOperation,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TileError {
	/// Bad types, ranges or missing required arguments.
	#[error("{0}")]
	InvalidArgument(String),
	/// Malformed or truncated binary structure.
	#[error("{0}")]
	Parse(String),
	/// A payload announced itself as gzip/zlib but could not be inflated.
	#[error("{0}")]
	Decompression(String),
	/// Unknown layer name or out-of-range layer index.
	#[error("{0}")]
	NotFound(String),
	/// An optional capability is not available.
	#[error("{0}")]
	NotSupported(String),
	/// Another operation on the same tile is still outstanding.
	#[error("{0}")]
	ConcurrentOperation(String),
}

impl TileError {
	pub fn kind(&self) -> ErrorKind {
		match self {
			TileError::InvalidArgument(_) => ErrorKind::InvalidArgument,
			TileError::Parse(_) => ErrorKind::Parse,
			TileError::Decompression(_) => ErrorKind::Decompression,
			TileError::NotFound(_) => ErrorKind::NotFound,
			TileError::NotSupported(_) => ErrorKind::NotSupported,
			TileError::ConcurrentOperation(_) => ErrorKind::ConcurrentOperation,
		}
	}

	/// Returns the category of the outermost classified layer, whether it was raised as the root
	/// cause or attached later with `.context(TileError::...)`.
	pub fn kind_of(error: &anyhow::Error) -> Option<ErrorKind> {
		if let Some(tile_error) = error.downcast_ref::<TileError>() {
			return Some(tile_error.kind());
		}
		error
			.chain()
			.find_map(|cause| cause.downcast_ref::<TileError>())
			.map(TileError::kind)
	}

	pub fn invalid_argument(message: impl Into<String>) -> Self {
		TileError::InvalidArgument(message.into())
	}

	pub fn parse(message: impl Into<String>) -> Self {
		TileError::Parse(message.into())
	}

	pub fn decompression(message: impl Into<String>) -> Self {
		TileError::Decompression(message.into())
	}

	pub fn not_found(message: impl Into<String>) -> Self {
		TileError::NotFound(message.into())
	}

	pub fn not_supported(message: impl Into<String>) -> Self {
		TileError::NotSupported(message.into())
	}

	pub fn concurrent_operation(message: impl Into<String>) -> Self {
		TileError::ConcurrentOperation(message.into())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use anyhow::{Context, Result, bail};

	fn fails_with(error: TileError) -> Result<()> {
		bail!(error)
	}

	#[test]
	fn kind_survives_context() {
		let err = fails_with(TileError::parse("bad varint"))
			.context("Failed to read layer")
			.context("Failed to parse tile")
			.unwrap_err();
		assert_eq!(TileError::kind_of(&err), Some(ErrorKind::Parse));
		assert_eq!(format!("{err:#}"), "Failed to parse tile: Failed to read layer: bad varint");
	}

	#[test]
	fn kind_attached_as_context() {
		let err = anyhow::anyhow!("unexpected end of file")
			.context(TileError::decompression("Failed to inflate gzip payload"));
		assert_eq!(TileError::kind_of(&err), Some(ErrorKind::Decompression));
	}

	#[test]
	fn unclassified_errors_have_no_kind() {
		let err = anyhow::anyhow!("something else");
		assert_eq!(TileError::kind_of(&err), None);
	}

	#[test]
	fn every_variant_maps_to_its_kind() {
		let cases = [
			(TileError::invalid_argument("a"), ErrorKind::InvalidArgument),
			(TileError::parse("a"), ErrorKind::Parse),
			(TileError::decompression("a"), ErrorKind::Decompression),
			(TileError::not_found("a"), ErrorKind::NotFound),
			(TileError::not_supported("a"), ErrorKind::NotSupported),
			(TileError::concurrent_operation("a"), ErrorKind::ConcurrentOperation),
		];
		for (error, kind) in cases {
			assert_eq!(error.kind(), kind);
		}
	}
}
