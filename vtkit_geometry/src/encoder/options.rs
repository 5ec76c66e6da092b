use crate::{boolean::FillType, options::JsonOptions};
use anyhow::{Result, bail, ensure};
use serde_json::Value;
use vtkit_core::TileError;

/// Settings of the geometry encoder.
#[derive(Clone, Debug, PartialEq)]
pub struct EncodeOptions {
	/// Rings whose area in tile units is below this are dropped.
	pub area_threshold: f64,
	/// Runs polygons through the boolean backend so that output rings are OGC-simple.
	pub strictly_simple: bool,
	/// Merges the parts of a MultiPolygon according to `fill_type`.
	pub multi_polygon_union: bool,
	pub fill_type: FillType,
	/// When false, one disqualified ring discards the whole feature.
	pub process_all_rings: bool,
	/// Working precision: coordinates are scaled by this before processing and divided back
	/// out when quantizing.
	pub path_multiplier: u32,
	/// Douglas-Peucker tolerance in tile units; 0 disables simplification.
	pub simplify_distance: f64,
	/// Margin in pixels beyond the tile edge that is kept.
	pub buffer_size: i32,
}

impl Default for EncodeOptions {
	fn default() -> Self {
		EncodeOptions {
			area_threshold: 0.1,
			strictly_simple: true,
			multi_polygon_union: false,
			fill_type: FillType::NonZero,
			process_all_rings: false,
			path_multiplier: 16,
			simplify_distance: 0.0,
			buffer_size: 8,
		}
	}
}

impl FillType {
	/// Accepts `"evenOdd"`/`"nonZero"` or the numeric codes `0`/`1`.
	pub fn from_json(value: &Value) -> Result<FillType> {
		match value {
			Value::String(s) if s == "evenOdd" => return Ok(FillType::EvenOdd),
			Value::String(s) if s == "nonZero" => return Ok(FillType::NonZero),
			Value::Number(n) => match n.as_i64() {
				Some(0) => return Ok(FillType::EvenOdd),
				Some(1) => return Ok(FillType::NonZero),
				_ => {}
			},
			_ => {}
		}
		bail!(TileError::invalid_argument(format!(
			"option 'fill_type' must be 'evenOdd' (0) or 'nonZero' (1), found {value}"
		)))
	}
}

impl EncodeOptions {
	/// Reads the encoder keys of an options object. Absent keys keep their defaults.
	pub fn from_json(value: &Value) -> Result<EncodeOptions> {
		let options = JsonOptions::new(value, "options")?;
		let mut result = EncodeOptions::default();

		if let Some(v) = options.get_f64("area_threshold")? {
			ensure!(
				v >= 0.0,
				TileError::invalid_argument("option 'area_threshold' must not be negative")
			);
			result.area_threshold = v;
		}
		if let Some(v) = options.get_bool("strictly_simple")? {
			result.strictly_simple = v;
		}
		if let Some(v) = options.get_bool("multi_polygon_union")? {
			result.multi_polygon_union = v;
		}
		if let Some(v) = options.get("fill_type") {
			result.fill_type = FillType::from_json(v)?;
		}
		if let Some(v) = options.get_bool("process_all_rings")? {
			result.process_all_rings = v;
		}
		if let Some(v) = options.get_i64("path_multiplier")? {
			ensure!(
				(1..=i64::from(u16::MAX)).contains(&v),
				TileError::invalid_argument("option 'path_multiplier' must be a positive integer")
			);
			result.path_multiplier = v as u32;
		}
		if let Some(v) = options.get_f64("simplify_distance")? {
			ensure!(
				v >= 0.0,
				TileError::invalid_argument("option 'simplify_distance' must not be negative")
			);
			result.simplify_distance = v;
		}
		if let Some(v) = options.get_i64("buffer_size")? {
			result.buffer_size = i32::try_from(v).map_err(|_| {
				TileError::invalid_argument(format!("option 'buffer_size' is out of range ({v})"))
			})?;
		}

		Ok(result)
	}

	pub fn with_fill_type(mut self, fill_type: FillType) -> Self {
		self.fill_type = fill_type;
		self
	}

	pub fn with_multi_polygon_union(mut self, union: bool) -> Self {
		self.multi_polygon_union = union;
		self
	}

	pub fn with_process_all_rings(mut self, process_all_rings: bool) -> Self {
		self.process_all_rings = process_all_rings;
		self
	}

	pub fn with_strictly_simple(mut self, strictly_simple: bool) -> Self {
		self.strictly_simple = strictly_simple;
		self
	}

	pub fn with_simplify_distance(mut self, simplify_distance: f64) -> Self {
		self.simplify_distance = simplify_distance;
		self
	}

	pub fn with_buffer_size(mut self, buffer_size: i32) -> Self {
		self.buffer_size = buffer_size;
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;
	use vtkit_core::ErrorKind;

	#[test]
	fn defaults() -> Result<()> {
		assert_eq!(EncodeOptions::from_json(&json!({}))?, EncodeOptions::default());
		Ok(())
	}

	#[test]
	fn all_keys() -> Result<()> {
		let options = EncodeOptions::from_json(&json!({
			"area_threshold": 2,
			"strictly_simple": false,
			"multi_polygon_union": true,
			"fill_type": "evenOdd",
			"process_all_rings": true,
			"path_multiplier": 4,
			"simplify_distance": 1.5,
			"buffer_size": -16,
			"unrelated": "ignored"
		}))?;
		assert_eq!(
			options,
			EncodeOptions {
				area_threshold: 2.0,
				strictly_simple: false,
				multi_polygon_union: true,
				fill_type: FillType::EvenOdd,
				process_all_rings: true,
				path_multiplier: 4,
				simplify_distance: 1.5,
				buffer_size: -16,
			}
		);
		Ok(())
	}

	#[rstest]
	#[case(json!("evenOdd"), FillType::EvenOdd)]
	#[case(json!("nonZero"), FillType::NonZero)]
	#[case(json!(0), FillType::EvenOdd)]
	#[case(json!(1), FillType::NonZero)]
	fn fill_types(#[case] value: Value, #[case] expected: FillType) -> Result<()> {
		assert_eq!(FillType::from_json(&value)?, expected);
		Ok(())
	}

	#[rstest]
	#[case(json!({"fill_type": 99}))]
	#[case(json!({"fill_type": null}))]
	#[case(json!({"fill_type": "positive"}))]
	#[case(json!({"simplify_distance": -0.5}))]
	#[case(json!({"simplify_distance": null}))]
	#[case(json!({"area_threshold": "0.1"}))]
	#[case(json!({"strictly_simple": null}))]
	#[case(json!({"multi_polygon_union": 1}))]
	#[case(json!({"process_all_rings": "true"}))]
	#[case(json!({"path_multiplier": 0}))]
	#[case(json!({"path_multiplier": 1.5}))]
	#[case(json!({"buffer_size": null}))]
	#[case(json!(null))]
	fn invalid_options(#[case] value: Value) {
		let err = EncodeOptions::from_json(&value).unwrap_err();
		assert_eq!(TileError::kind_of(&err), Some(ErrorKind::InvalidArgument), "{value}");
	}
}
