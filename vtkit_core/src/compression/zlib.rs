use crate::{Blob, TileError};
use anyhow::{Context, Result};
use flate2::bufread::ZlibDecoder;
use std::io::Read;

/// Inflates a zlib envelope.
///
/// # Errors
/// A corrupt stream is a `Decompression` error.
pub fn decompress_zlib(blob: &Blob) -> Result<Blob> {
	let mut decoder = ZlibDecoder::new(blob.as_slice());
	let mut decompressed_data = Vec::new();
	decoder
		.read_to_end(&mut decompressed_data)
		.context(TileError::decompression("Failed to decompress data using zlib"))?;
	Ok(Blob::from(decompressed_data))
}

#[cfg(test)]
mod tests {
	use super::super::{Envelope, test_utils::generate_test_data};
	use super::*;
	use flate2::{Compression, bufread::ZlibEncoder};

	#[test]
	fn should_decompress_zlib_correctly() -> Result<()> {
		let data = generate_test_data(100_000);
		let mut compressed = Vec::new();
		ZlibEncoder::new(data.as_slice(), Compression::new(6)).read_to_end(&mut compressed)?;
		let compressed = Blob::from(compressed);
		assert_eq!(Envelope::detect(&compressed), Envelope::Zlib);
		let decompressed = decompress_zlib(&compressed)?;
		assert_eq!(data, decompressed, "zlib compression and decompression failed");
		Ok(())
	}
}
