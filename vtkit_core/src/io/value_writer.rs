//! The [`ValueWriter`] trait, the counterpart of [`ValueReader`](super::ValueReader).

use super::ValueWriterBlob;
use crate::Blob;
use anyhow::{Context, Result};
use byteorder::{ByteOrder, WriteBytesExt};
use std::io::Write;

pub trait ValueWriter<E: ByteOrder> {
	fn get_writer(&mut self) -> &mut dyn Write;

	fn position(&mut self) -> Result<u64>;

	fn is_empty(&mut self) -> Result<bool> {
		Ok(self.position()? == 0)
	}

	fn write_varint(&mut self, mut value: u64) -> Result<()> {
		while value >= 0x80 {
			self.get_writer().write_all(&[((value & 0x7F) as u8) | 0x80])?;
			value >>= 7;
		}
		self.get_writer().write_all(&[value as u8])?;
		Ok(())
	}

	fn write_svarint(&mut self, value: i64) -> Result<()> {
		self.write_varint(((value << 1) ^ (value >> 63)) as u64)
	}

	fn write_u8(&mut self, value: u8) -> Result<()> {
		Ok(self.get_writer().write_u8(value)?)
	}

	fn write_f32(&mut self, value: f32) -> Result<()> {
		Ok(self.get_writer().write_f32::<E>(value)?)
	}

	fn write_f64(&mut self, value: f64) -> Result<()> {
		Ok(self.get_writer().write_f64::<E>(value)?)
	}

	fn write_u32(&mut self, value: u32) -> Result<()> {
		Ok(self.get_writer().write_u32::<E>(value)?)
	}

	fn write_blob(&mut self, blob: &Blob) -> Result<()> {
		self.get_writer().write_all(blob.as_slice())?;
		Ok(())
	}

	fn write_slice(&mut self, buf: &[u8]) -> Result<()> {
		self.get_writer().write_all(buf)?;
		Ok(())
	}

	fn write_pbf_key(&mut self, field_number: u32, wire_type: u8) -> Result<()> {
		self
			.write_varint((u64::from(field_number) << 3) | u64::from(wire_type))
			.context("Failed to write PBF key")
	}

	fn write_pbf_packed_uint32(&mut self, data: &[u32]) -> Result<()> {
		let mut writer = ValueWriterBlob::new_le();
		for &value in data {
			writer
				.write_varint(u64::from(value))
				.context("Failed to write varint for packed uint32")?;
		}
		self
			.write_pbf_blob(&writer.into_blob())
			.context("Failed to write packed uint32 blob")
	}

	fn write_pbf_blob(&mut self, blob: &Blob) -> Result<()> {
		self
			.write_varint(blob.len())
			.context("Failed to write varint for blob length")?;
		self.write_blob(blob).context("Failed to write PBF blob")
	}

	fn write_pbf_string(&mut self, text: &str) -> Result<()> {
		self
			.write_varint(text.len() as u64)
			.context("Failed to write varint for string length")?;
		self.write_slice(text.as_bytes()).context("Failed to write PBF string")
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(0, &[0x00])]
	#[case(1, &[0x01])]
	#[case(300, &[0xAC, 0x02])]
	#[case(2848, &[0xA0, 0x16])]
	fn test_write_varint(#[case] value: u64, #[case] expected: &[u8]) -> Result<()> {
		let mut writer = ValueWriterBlob::new_le();
		writer.write_varint(value)?;
		assert_eq!(writer.into_blob().as_slice(), expected);
		Ok(())
	}

	#[rstest]
	#[case(0, &[0x00])]
	#[case(-1, &[0x01])]
	#[case(1, &[0x02])]
	#[case(-75, &[0x95, 0x01])]
	fn test_write_svarint(#[case] value: i64, #[case] expected: &[u8]) -> Result<()> {
		let mut writer = ValueWriterBlob::new_le();
		writer.write_svarint(value)?;
		assert_eq!(writer.into_blob().as_slice(), expected);
		Ok(())
	}

	#[test]
	fn test_write_pbf_key() -> Result<()> {
		let mut writer = ValueWriterBlob::new_le();
		writer.write_pbf_key(15, 0)?;
		writer.write_pbf_key(3, 2)?;
		assert_eq!(writer.into_blob().as_slice(), &[0x78, 0x1A]);
		Ok(())
	}

	#[test]
	fn test_write_pbf_packed_uint32() -> Result<()> {
		let mut writer = ValueWriterBlob::new_le();
		writer.write_pbf_packed_uint32(&[100, 150, 300])?;
		assert_eq!(writer.into_blob().as_slice(), &[0x05, 0x64, 0x96, 0x01, 0xAC, 0x02]);
		Ok(())
	}

	#[test]
	fn test_write_pbf_string() -> Result<()> {
		let mut writer = ValueWriterBlob::new_le();
		writer.write_pbf_string("name")?;
		assert_eq!(writer.into_blob().as_slice(), &[0x04, b'n', b'a', b'm', b'e']);
		Ok(())
	}

	#[test]
	fn test_is_empty() -> Result<()> {
		let mut writer = ValueWriterBlob::new_le();
		assert!(writer.is_empty()?);
		writer.write_u8(1)?;
		assert!(!writer.is_empty()?);
		Ok(())
	}
}
