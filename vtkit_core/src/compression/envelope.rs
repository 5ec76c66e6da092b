use super::{decompress_gzip, decompress_zlib};
use crate::Blob;
use anyhow::Result;
use log::trace;

/// The wrapper found around a serialized tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Envelope {
	Raw,
	Gzip,
	Zlib,
}

impl Envelope {
	/// Recognises gzip (`1F 8B`) and zlib (`78 01`, `78 5E`, `78 9C`, `78 DA`, or any other
	/// CMF/FLG pair passing the header checksum) magic bytes.
	pub fn detect(blob: &Blob) -> Envelope {
		match blob.as_slice() {
			[0x1F, 0x8B, ..] => Envelope::Gzip,
			[cmf @ 0x78, flg, ..] if ((u16::from(*cmf) << 8) | u16::from(*flg)) % 31 == 0 => Envelope::Zlib,
			_ => Envelope::Raw,
		}
	}
}

/// Removes a gzip or zlib envelope if present. Returns the inflated bytes and the detected envelope.
///
/// # Errors
/// Fails with a `Decompression` error when the magic bytes announce an envelope whose payload
/// cannot be inflated.
pub fn decompress_auto(blob: Blob) -> Result<(Blob, Envelope)> {
	let envelope = Envelope::detect(&blob);
	trace!("detected {envelope:?} envelope around {} bytes", blob.len());
	let inflated = match envelope {
		Envelope::Raw => blob,
		Envelope::Gzip => decompress_gzip(&blob)?,
		Envelope::Zlib => decompress_zlib(&blob)?,
	};
	Ok((inflated, envelope))
}
