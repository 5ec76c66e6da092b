use crate::geo::GeoValue;
use anyhow::{Context, Result, anyhow, bail};
use byteorder::LE;
use log::trace;
use vtkit_core::{
	Blob,
	io::{ValueReader, ValueWriter, ValueWriterBlob, WIRE_FIXED32, WIRE_FIXED64, WIRE_LEN, WIRE_VARINT},
};

/// Reading and writing the `Value` message of a layer's value dictionary.
pub trait GeoValuePBF<'a> {
	fn read(reader: &mut dyn ValueReader<'a, LE>) -> Result<GeoValue>;
	fn to_blob(&self) -> Result<Blob>;
}

impl<'a> GeoValuePBF<'a> for GeoValue {
	fn read(reader: &mut dyn ValueReader<'a, LE>) -> Result<GeoValue> {
		use GeoValue::*;
		let mut value: Option<GeoValue> = None;

		while reader.has_remaining() {
			match reader.read_pbf_key().context("Failed to read PBF key")? {
				(1, WIRE_LEN) => value = Some(String(reader.read_pbf_string().context("Failed to read string value")?)),
				(2, WIRE_FIXED32) => value = Some(Float(reader.read_f32().context("Failed to read f32 value")?)),
				(3, WIRE_FIXED64) => value = Some(Double(reader.read_f64().context("Failed to read f64 value")?)),
				(4, WIRE_VARINT) => {
					value = Some(Int(
						reader.read_varint().context("Failed to read varint for int value")? as i64,
					));
				}
				(5, WIRE_VARINT) => {
					value = Some(UInt(
						reader.read_varint().context("Failed to read varint for uint value")?,
					));
				}
				(6, WIRE_VARINT) => value = Some(SInt(reader.read_svarint().context("Failed to read svarint value")?)),
				(7, WIRE_VARINT) => {
					value = Some(Bool(
						reader.read_varint().context("Failed to read varint for bool value")? != 0,
					));
				}
				(field, wire_type) => {
					trace!("skipping value field {field} with wire type {wire_type}");
					reader.skip_pbf_field(wire_type)?;
				}
			}
		}
		value
			.ok_or_else(|| anyhow!("No value found"))
			.context("Failed to read GeoValue")
	}

	fn to_blob(&self) -> Result<Blob> {
		let mut writer = ValueWriterBlob::new_le();

		match self {
			GeoValue::String(s) => {
				writer.write_pbf_key(1, WIRE_LEN)?;
				writer.write_pbf_string(s).context("Failed to write string value")?;
			}
			GeoValue::Float(f) => {
				writer.write_pbf_key(2, WIRE_FIXED32)?;
				writer.write_f32(*f).context("Failed to write float value")?;
			}
			GeoValue::Double(f) => {
				writer.write_pbf_key(3, WIRE_FIXED64)?;
				writer.write_f64(*f).context("Failed to write double value")?;
			}
			GeoValue::Int(i) => {
				writer.write_pbf_key(4, WIRE_VARINT)?;
				writer.write_varint(*i as u64).context("Failed to write int value")?;
			}
			GeoValue::UInt(u) => {
				writer.write_pbf_key(5, WIRE_VARINT)?;
				writer.write_varint(*u).context("Failed to write uint value")?;
			}
			GeoValue::SInt(s) => {
				writer.write_pbf_key(6, WIRE_VARINT)?;
				writer.write_svarint(*s).context("Failed to write sint value")?;
			}
			GeoValue::Bool(b) => {
				writer.write_pbf_key(7, WIRE_VARINT)?;
				writer.write_varint(u64::from(*b)).context("Failed to write bool value")?;
			}
			GeoValue::Null => bail!("null values cannot be stored in a vector tile"),
		}

		Ok(writer.into_blob())
	}
}
