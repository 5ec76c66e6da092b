//! The [`Blob`] type: an owned buffer of tile bytes.
//!
//! ```rust
//! use vtkit_core::Blob;
//!
//! let blob = Blob::from_hex("1a0c0a0a6c617965722d6e616d65").unwrap();
//! assert_eq!(blob.len(), 14);
//! assert_eq!(blob.as_hex(), "1a0c0a0a6c617965722d6e616d65");
//! ```

use anyhow::{Result, bail};
use std::fmt::Debug;

/// A simple wrapper around [`Vec<u8>`] used for serialized tiles, compressed envelopes and raster payloads.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Blob(Vec<u8>);

impl Blob {
	#[must_use]
	pub fn new_empty() -> Blob {
		Blob(Vec::new())
	}

	#[must_use]
	pub fn new_sized(length: usize) -> Blob {
		Blob(vec![0u8; length])
	}

	/// Parses a hexadecimal string. Whitespace between bytes is ignored.
	pub fn from_hex(text: &str) -> Result<Blob> {
		let digits: Vec<u8> = text.bytes().filter(|b| !b.is_ascii_whitespace()).collect();
		if digits.len() % 2 != 0 {
			bail!("hex string has an odd number of digits ({})", digits.len())
		}
		let mut bytes = Vec::with_capacity(digits.len() / 2);
		for pair in digits.chunks(2) {
			let hi = hex_digit(pair[0])?;
			let lo = hex_digit(pair[1])?;
			bytes.push((hi << 4) | lo);
		}
		Ok(Blob(bytes))
	}

	#[must_use]
	pub fn as_slice(&self) -> &[u8] {
		self.0.as_ref()
	}

	pub fn as_mut_slice(&mut self) -> &mut [u8] {
		self.0.as_mut()
	}

	#[must_use]
	pub fn into_vec(self) -> Vec<u8> {
		self.0
	}

	/// Appends the bytes of `other`. Two serialized tiles concatenated this way form a tile
	/// holding the layers of both, in order.
	pub fn append(&mut self, other: &Blob) {
		self.0.extend_from_slice(other.as_slice());
	}

	#[must_use]
	pub fn as_hex(&self) -> String {
		self.0.iter().map(|byte| format!("{byte:02x}")).collect()
	}

	#[must_use]
	pub fn len(&self) -> u64 {
		self.0.len() as u64
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

fn hex_digit(c: u8) -> Result<u8> {
	Ok(match c {
		b'0'..=b'9' => c - b'0',
		b'a'..=b'f' => c - b'a' + 10,
		b'A'..=b'F' => c - b'A' + 10,
		_ => bail!("invalid hex digit '{}'", c as char),
	})
}

impl From<Vec<u8>> for Blob {
	fn from(item: Vec<u8>) -> Self {
		Blob(item)
	}
}

impl From<&Vec<u8>> for Blob {
	fn from(item: &Vec<u8>) -> Self {
		Blob(item.clone())
	}
}

impl From<&[u8]> for Blob {
	fn from(item: &[u8]) -> Self {
		Blob(item.to_vec())
	}
}

impl<const N: usize> From<&[u8; N]> for Blob {
	fn from(item: &[u8; N]) -> Self {
		Blob(item.to_vec())
	}
}

impl From<&str> for Blob {
	fn from(item: &str) -> Self {
		Blob(item.as_bytes().to_vec())
	}
}

impl Debug for Blob {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		const PREVIEW: usize = 32;
		let head: String = self.0.iter().take(PREVIEW).map(|b| format!("{b:02x}")).collect();
		if self.0.len() > PREVIEW {
			write!(f, "Blob({}: {head}…)", self.0.len())
		} else {
			write!(f, "Blob({}: {head})", self.0.len())
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[test]
	fn empty_blob() {
		let blob = Blob::new_empty();
		assert!(blob.is_empty());
		assert_eq!(blob.len(), 0);
		assert_eq!(Blob::default(), blob);
	}

	#[test]
	fn append_concatenates() {
		let mut a = Blob::from(&[1, 2]);
		a.append(&Blob::from(&[3]));
		assert_eq!(a.into_vec(), vec![1, 2, 3]);
	}

	#[rstest]
	#[case("089601", vec![0x08, 0x96, 0x01])]
	#[case("0D 01 23 45 67", vec![0x0d, 0x01, 0x23, 0x45, 0x67])]
	#[case("", vec![])]
	fn from_hex_parses(#[case] text: &str, #[case] expected: Vec<u8>) {
		assert_eq!(Blob::from_hex(text).unwrap().into_vec(), expected);
	}

	#[rstest]
	#[case("0D0123456")]
	#[case("zz")]
	fn from_hex_rejects(#[case] text: &str) {
		assert!(Blob::from_hex(text).is_err());
	}

	#[test]
	fn debug_is_truncated() {
		let blob = Blob::new_sized(40);
		let text = format!("{blob:?}");
		assert!(text.starts_with("Blob(40: 0000"));
		assert!(text.ends_with("…)"));
	}
}
