use crate::{GeoCollection, GeoFeature, GeoProperties, Geometry};
use serde_json::{Map, Value};

/// Writes a GeoJSON `Feature`. A missing geometry is written as `null`.
pub fn feature_to_json(id: Option<u64>, geometry: Option<&Geometry>, properties: &GeoProperties) -> Value {
	let mut obj = Map::new();
	obj.insert("type".to_string(), Value::from("Feature"));
	if let Some(id) = id {
		obj.insert("id".to_string(), Value::from(id));
	}
	obj.insert("geometry".to_string(), geometry.map_or(Value::Null, Geometry::to_json));
	obj.insert("properties".to_string(), properties.to_json());
	Value::Object(obj)
}

/// Writes a `FeatureCollection`, optionally carrying a `name` member.
pub fn collection_to_json(name: Option<&str>, features: Vec<Value>) -> Value {
	let mut obj = Map::new();
	obj.insert("type".to_string(), Value::from("FeatureCollection"));
	if let Some(name) = name {
		obj.insert("name".to_string(), Value::from(name));
	}
	obj.insert("features".to_string(), Value::Array(features));
	Value::Object(obj)
}

impl GeoFeature {
	pub fn to_json(&self) -> Value {
		feature_to_json(self.id, Some(&self.geometry), &self.properties)
	}
}

impl GeoCollection {
	pub fn to_json(&self) -> Value {
		collection_to_json(None, self.features.iter().map(GeoFeature::to_json).collect())
	}
}
