use serde_json::{Number, Value};
use std::{
	fmt::{Debug, Display},
	hash::Hash,
};

/// A property value. The variants mirror the value types a vector tile layer can store.
#[derive(Clone, PartialEq)]
pub enum GeoValue {
	Bool(bool),
	Double(f64),
	Float(f32),
	Int(i64),
	Null,
	SInt(i64),
	String(String),
	UInt(u64),
}

impl Debug for GeoValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::String(v) => f.debug_tuple("String").field(v).finish(),
			Self::Float(v) => f.debug_tuple("Float").field(v).finish(),
			Self::Double(v) => f.debug_tuple("Double").field(v).finish(),
			Self::Int(v) => f.debug_tuple("Int").field(v).finish(),
			Self::SInt(v) => f.debug_tuple("SInt").field(v).finish(),
			Self::UInt(v) => f.debug_tuple("UInt").field(v).finish(),
			Self::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
			Self::Null => f.debug_tuple("Null").finish(),
		}
	}
}

impl From<&str> for GeoValue {
	fn from(value: &str) -> Self {
		GeoValue::String(value.to_string())
	}
}

impl From<String> for GeoValue {
	fn from(value: String) -> Self {
		GeoValue::String(value)
	}
}

impl From<i32> for GeoValue {
	fn from(value: i32) -> Self {
		GeoValue::from(i64::from(value))
	}
}

impl From<i64> for GeoValue {
	fn from(value: i64) -> Self {
		if value < 0 {
			GeoValue::SInt(value)
		} else {
			GeoValue::UInt(value as u64)
		}
	}
}

impl From<u64> for GeoValue {
	fn from(value: u64) -> Self {
		GeoValue::UInt(value)
	}
}

impl From<f32> for GeoValue {
	fn from(value: f32) -> Self {
		GeoValue::Float(value)
	}
}

impl From<f64> for GeoValue {
	fn from(value: f64) -> Self {
		GeoValue::Double(value)
	}
}

impl From<bool> for GeoValue {
	fn from(value: bool) -> Self {
		GeoValue::Bool(value)
	}
}

impl Eq for GeoValue {}

impl Hash for GeoValue {
	fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
		core::mem::discriminant(self).hash(state);
		match self {
			GeoValue::Bool(v) => v.hash(state),
			GeoValue::Double(v) => v.to_bits().hash(state),
			GeoValue::Float(v) => v.to_bits().hash(state),
			GeoValue::Int(v) | GeoValue::SInt(v) => v.hash(state),
			GeoValue::Null => (),
			GeoValue::String(v) => v.hash(state),
			GeoValue::UInt(v) => v.hash(state),
		}
	}
}

impl Display for GeoValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			GeoValue::Bool(v) => write!(f, "{v}"),
			GeoValue::Double(v) => write!(f, "{v}"),
			GeoValue::Float(v) => write!(f, "{v}"),
			GeoValue::Int(v) | GeoValue::SInt(v) => write!(f, "{v}"),
			GeoValue::Null => write!(f, "null"),
			GeoValue::String(v) => write!(f, "{v}"),
			GeoValue::UInt(v) => write!(f, "{v}"),
		}
	}
}

impl GeoValue {
	/// Converts a JSON scalar. Arrays and objects have no vector tile representation and yield
	/// `None`.
	pub fn from_json(value: &Value) -> Option<GeoValue> {
		Some(match value {
			Value::Null => GeoValue::Null,
			Value::Bool(b) => GeoValue::Bool(*b),
			Value::String(s) => GeoValue::String(s.clone()),
			Value::Number(n) => {
				if let Some(u) = n.as_u64() {
					GeoValue::UInt(u)
				} else if let Some(i) = n.as_i64() {
					GeoValue::SInt(i)
				} else {
					GeoValue::Double(n.as_f64()?)
				}
			}
			Value::Array(_) | Value::Object(_) => return None,
		})
	}

	pub fn to_json(&self) -> Value {
		match self {
			GeoValue::Bool(v) => Value::Bool(*v),
			GeoValue::Double(v) => Number::from_f64(*v).map_or(Value::Null, Value::Number),
			GeoValue::Float(v) => Number::from_f64(f64::from(*v)).map_or(Value::Null, Value::Number),
			GeoValue::Int(v) | GeoValue::SInt(v) => Value::from(*v),
			GeoValue::Null => Value::Null,
			GeoValue::String(v) => Value::String(v.clone()),
			GeoValue::UInt(v) => Value::from(*v),
		}
	}

	pub fn is_null(&self) -> bool {
		matches!(self, GeoValue::Null)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case(json!("abc"), GeoValue::from("abc"))]
	#[case(json!(true), GeoValue::Bool(true))]
	#[case(json!(42), GeoValue::UInt(42))]
	#[case(json!(-42), GeoValue::SInt(-42))]
	#[case(json!(1.5), GeoValue::Double(1.5))]
	#[case(json!(null), GeoValue::Null)]
	fn from_json_scalars(#[case] input: Value, #[case] expected: GeoValue) {
		assert_eq!(GeoValue::from_json(&input), Some(expected));
	}

	#[test]
	fn from_json_rejects_nested_values() {
		assert_eq!(GeoValue::from_json(&json!([1, 2])), None);
		assert_eq!(GeoValue::from_json(&json!({"a": 1})), None);
	}

	#[rstest]
	#[case(GeoValue::from("x"), json!("x"))]
	#[case(GeoValue::Float(0.5), json!(0.5))]
	#[case(GeoValue::Int(-3), json!(-3))]
	#[case(GeoValue::UInt(3), json!(3))]
	#[case(GeoValue::Bool(false), json!(false))]
	fn to_json(#[case] value: GeoValue, #[case] expected: Value) {
		assert_eq!(value.to_json(), expected);
	}

	#[test]
	fn display() {
		assert_eq!(GeoValue::from(-5).to_string(), "-5");
		assert_eq!(GeoValue::from("a b").to_string(), "a b");
		assert_eq!(GeoValue::Null.to_string(), "null");
	}
}
