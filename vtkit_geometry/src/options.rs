//! Typed access to option objects passed in as JSON.
//!
//! A key that is absent yields `None`. A key that is present must hold the expected type;
//! `null` counts as the wrong type.

use anyhow::{Result, bail};
use serde_json::{Map, Value};
use vtkit_core::TileError;

pub struct JsonOptions<'a> {
	object: &'a Map<String, Value>,
}

impl<'a> JsonOptions<'a> {
	pub fn new(value: &'a Value, name: &str) -> Result<JsonOptions<'a>> {
		match value.as_object() {
			Some(object) => Ok(JsonOptions { object }),
			None => bail!(TileError::invalid_argument(format!("{name} must be an object"))),
		}
	}

	pub fn get(&self, key: &str) -> Option<&'a Value> {
		self.object.get(key)
	}

	fn typed<T>(&self, key: &str, expected: &str, f: impl Fn(&'a Value) -> Option<T>) -> Result<Option<T>> {
		match self.object.get(key) {
			None => Ok(None),
			Some(value) => match f(value) {
				Some(v) => Ok(Some(v)),
				None => bail!(TileError::invalid_argument(format!(
					"option '{key}' must be {expected}"
				))),
			},
		}
	}

	pub fn get_bool(&self, key: &str) -> Result<Option<bool>> {
		self.typed(key, "a boolean", Value::as_bool)
	}

	pub fn get_f64(&self, key: &str) -> Result<Option<f64>> {
		self.typed(key, "a number", Value::as_f64)
	}

	pub fn get_i64(&self, key: &str) -> Result<Option<i64>> {
		self.typed(key, "an integer", Value::as_i64)
	}

	pub fn get_u64(&self, key: &str) -> Result<Option<u64>> {
		self.typed(key, "a non-negative integer", Value::as_u64)
	}

	pub fn get_str(&self, key: &str) -> Result<Option<&'a str>> {
		self.typed(key, "a string", Value::as_str)
	}

	pub fn get_object(&self, key: &str) -> Result<Option<&'a Map<String, Value>>> {
		self.typed(key, "an object", Value::as_object)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;
	use vtkit_core::ErrorKind;

	#[test]
	fn absent_keys_are_none() -> Result<()> {
		let value = json!({});
		let options = JsonOptions::new(&value, "options")?;
		assert_eq!(options.get_bool("a")?, None);
		assert_eq!(options.get_f64("a")?, None);
		assert_eq!(options.get_str("a")?, None);
		Ok(())
	}

	#[test]
	fn typed_values() -> Result<()> {
		let value = json!({"b": true, "f": 0.5, "i": -3, "u": 4, "s": "x"});
		let options = JsonOptions::new(&value, "options")?;
		assert_eq!(options.get_bool("b")?, Some(true));
		assert_eq!(options.get_f64("f")?, Some(0.5));
		assert_eq!(options.get_f64("i")?, Some(-3.0));
		assert_eq!(options.get_i64("i")?, Some(-3));
		assert_eq!(options.get_u64("u")?, Some(4));
		assert_eq!(options.get_str("s")?, Some("x"));
		Ok(())
	}

	#[rstest]
	#[case(json!({"key": null}))]
	#[case(json!({"key": "1"}))]
	#[case(json!({"key": [1]}))]
	fn wrong_types_are_invalid(#[case] value: Value) -> Result<()> {
		let options = JsonOptions::new(&value, "options")?;
		let err = options.get_f64("key").unwrap_err();
		assert_eq!(TileError::kind_of(&err), Some(ErrorKind::InvalidArgument));
		assert_eq!(err.to_string(), "option 'key' must be a number");
		Ok(())
	}

	#[test]
	fn non_objects_are_invalid() {
		let value = json!(12);
		let err = JsonOptions::new(&value, "options").err().unwrap();
		assert_eq!(err.to_string(), "options must be an object");
	}
}
