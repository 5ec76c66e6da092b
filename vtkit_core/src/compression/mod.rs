//! The compression envelope around serialized tiles.
//!
//! Incoming buffers may be raw, zlib-wrapped or gzip-wrapped; the wrapper is recognised by its
//! magic bytes and removed with [`decompress_auto`]. Outgoing buffers are optionally gzip-wrapped
//! with an explicit level and deflate strategy.
//!
//! ```rust
//! use vtkit_core::{Blob, compression::*};
//!
//! let data = Blob::from("some tile bytes, some tile bytes");
//! let compressed = compress_gzip(&data, &GzipOptions::default()).unwrap();
//! assert_eq!(Envelope::detect(&compressed), Envelope::Gzip);
//! let (inflated, envelope) = decompress_auto(compressed).unwrap();
//! assert_eq!(envelope, Envelope::Gzip);
//! assert_eq!(inflated, data);
//! ```

mod envelope;
mod gzip;
mod options;
mod zlib;

pub use envelope::*;
pub use gzip::*;
pub use options::*;
pub use zlib::*;

#[cfg(test)]
pub(crate) mod test_utils {
	use crate::Blob;

	/// Deterministic, moderately compressible data.
	pub fn generate_test_data(size: usize) -> Blob {
		let mut state: u32 = 0x1234_5678;
		let bytes = (0..size)
			.map(|i| {
				state = state.wrapping_mul(1_103_515_245).wrapping_add(12345);
				if i % 3 == 0 { (state >> 24) as u8 } else { (i % 17) as u8 }
			})
			.collect::<Vec<u8>>();
		Blob::from(bytes)
	}
}
