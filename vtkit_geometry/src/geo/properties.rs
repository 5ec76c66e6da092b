use super::GeoValue;
use serde_json::{Map, Value};
use std::fmt::Debug;

/// Feature properties. Keys keep the order in which they were first inserted.
#[derive(Clone, Default, PartialEq)]
pub struct GeoProperties {
	entries: Vec<(String, GeoValue)>,
}

impl GeoProperties {
	pub fn new() -> GeoProperties {
		GeoProperties { entries: Vec::new() }
	}

	/// Sets `key`. An existing key keeps its position and gets the new value.
	pub fn insert(&mut self, key: String, value: GeoValue) {
		if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
			entry.1 = value;
		} else {
			self.entries.push((key, value));
		}
	}

	pub fn get(&self, key: &str) -> Option<&GeoValue> {
		self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&String, &GeoValue)> {
		self.entries.iter().map(|(k, v)| (k, v))
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn to_json(&self) -> Value {
		Value::Object(
			self
				.entries
				.iter()
				.map(|(k, v)| (k.clone(), v.to_json()))
				.collect::<Map<String, Value>>(),
		)
	}
}

impl IntoIterator for GeoProperties {
	type Item = (String, GeoValue);
	type IntoIter = std::vec::IntoIter<(String, GeoValue)>;
	fn into_iter(self) -> Self::IntoIter {
		self.entries.into_iter()
	}
}

impl From<Vec<(&str, GeoValue)>> for GeoProperties {
	fn from(value: Vec<(&str, GeoValue)>) -> Self {
		value.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
	}
}

impl FromIterator<(String, GeoValue)> for GeoProperties {
	fn from_iter<T: IntoIterator<Item = (String, GeoValue)>>(iter: T) -> Self {
		let mut properties = GeoProperties::new();
		for (k, v) in iter {
			properties.insert(k, v);
		}
		properties
	}
}

impl Debug for GeoProperties {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_map().entries(self.entries.iter().map(|(k, v)| (k, v))).finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn keeps_insertion_order() {
		let mut properties = GeoProperties::new();
		properties.insert("z".to_string(), GeoValue::from(1));
		properties.insert("a".to_string(), GeoValue::from(2));
		properties.insert("z".to_string(), GeoValue::from(3));
		let keys: Vec<&String> = properties.iter().map(|(k, _)| k).collect();
		assert_eq!(keys, ["z", "a"]);
		assert_eq!(properties.get("z"), Some(&GeoValue::UInt(3)));
		assert_eq!(properties.len(), 2);
	}

	#[test]
	fn to_json_is_ordered() {
		let properties = GeoProperties::from(vec![("b", GeoValue::from("x")), ("a", GeoValue::Bool(true))]);
		assert_eq!(
			serde_json::to_string(&properties.to_json()).unwrap(),
			serde_json::to_string(&json!({"b": "x", "a": true})).unwrap()
		);
	}

	#[test]
	fn debug() {
		let properties = GeoProperties::from(vec![("name", GeoValue::from("Nice"))]);
		assert_eq!(format!("{properties:?}"), "{\"name\": String(\"Nice\")}");
	}
}
