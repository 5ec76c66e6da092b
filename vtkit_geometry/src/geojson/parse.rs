use crate::{
	Coordinates0, Coordinates1, Coordinates2, Coordinates3, GeoCollection, GeoFeature, GeoProperties, GeoValue,
	Geometry,
};
use anyhow::{Context, Result, bail, ensure};
use log::trace;
use serde_json::{Map, Value};
use vtkit_core::TileError;

/// Parses a GeoJSON `FeatureCollection` or a single `Feature`.
pub fn parse_geojson(json: &str) -> Result<GeoCollection> {
	let value: Value = serde_json::from_str(json)
		.with_context(|| TileError::invalid_argument("failed to parse GeoJSON"))?;
	parse_geojson_value(&value)
}

pub fn parse_geojson_value(value: &Value) -> Result<GeoCollection> {
	let object = as_object(value, "GeoJSON")?;
	match object.get("type").and_then(Value::as_str) {
		Some("FeatureCollection") => parse_geojson_collection(object),
		Some("Feature") => Ok(GeoCollection::from(
			parse_geojson_feature(object)?.into_iter().collect(),
		)),
		_ => bail!(TileError::invalid_argument(
			"GeoJSON must be a FeatureCollection or a Feature"
		)),
	}
}

fn as_object<'a>(value: &'a Value, name: &str) -> Result<&'a Map<String, Value>> {
	match value.as_object() {
		Some(object) => Ok(object),
		None => bail!(TileError::invalid_argument(format!("{name} must be an object"))),
	}
}

fn check_type(object: &Map<String, Value>, name: &str) -> Result<()> {
	let object_type = object.get("type").and_then(Value::as_str);
	ensure!(
		object_type.is_some(),
		TileError::invalid_argument(format!("{name} must have a type"))
	);
	ensure!(
		object_type == Some(name),
		TileError::invalid_argument(format!("type must be '{name}'"))
	);
	Ok(())
}

pub fn parse_geojson_collection(object: &Map<String, Value>) -> Result<GeoCollection> {
	check_type(object, "FeatureCollection")?;
	let Some(entries) = object.get("features").and_then(Value::as_array) else {
		bail!(TileError::invalid_argument("FeatureCollection must have a 'features' array"));
	};

	let mut features = Vec::with_capacity(entries.len());
	for (index, entry) in entries.iter().enumerate() {
		let feature = as_object(entry, "Feature")
			.and_then(parse_geojson_feature)
			.with_context(|| format!("Failed to parse feature #{index}"))?;
		match feature {
			Some(feature) => features.push(feature),
			None => trace!("skipping feature #{index} without geometry"),
		}
	}
	Ok(GeoCollection { features })
}

/// Parses a `Feature`. Features whose geometry is `null` yield `None`.
pub fn parse_geojson_feature(object: &Map<String, Value>) -> Result<Option<GeoFeature>> {
	check_type(object, "Feature")?;

	let geometry = match object.get("geometry") {
		None => bail!(TileError::invalid_argument("feature is missing 'geometry'")),
		Some(Value::Null) => return Ok(None),
		Some(geometry) => parse_geojson_geometry(as_object(geometry, "geometry")?)?,
	};

	let properties = match object.get("properties") {
		None | Some(Value::Null) => GeoProperties::new(),
		Some(properties) => parse_geojson_properties(as_object(properties, "properties")?),
	};

	Ok(Some(GeoFeature::new(
		object.get("id").and_then(Value::as_u64),
		geometry,
		properties,
	)))
}

fn parse_geojson_properties(object: &Map<String, Value>) -> GeoProperties {
	object
		.iter()
		.filter_map(|(key, value)| match GeoValue::from_json(value) {
			Some(value) => Some((key.clone(), value)),
			None => {
				trace!("skipping nested property '{key}'");
				None
			}
		})
		.collect()
}

pub fn parse_geojson_geometry(object: &Map<String, Value>) -> Result<Geometry> {
	let Some(geometry_type) = object.get("type").and_then(Value::as_str) else {
		bail!(TileError::invalid_argument("geometry must have a type"));
	};
	let Some(coordinates) = object.get("coordinates") else {
		bail!(TileError::invalid_argument("geometry must have coordinates"));
	};

	Ok(match geometry_type {
		"Point" => Geometry::Point(parse_c0(coordinates)?),
		"LineString" => Geometry::LineString(parse_c1(coordinates)?),
		"Polygon" => Geometry::Polygon(parse_c2(coordinates)?),
		"MultiPoint" => Geometry::MultiPoint(parse_c1(coordinates)?),
		"MultiLineString" => Geometry::MultiLineString(parse_c2(coordinates)?),
		"MultiPolygon" => Geometry::MultiPolygon(parse_c3(coordinates)?),
		_ => bail!(TileError::invalid_argument(format!(
			"unknown geometry type '{geometry_type}'"
		))),
	})
}

fn parse_array(value: &Value) -> Result<&Vec<Value>> {
	match value.as_array() {
		Some(array) => Ok(array),
		None => bail!(TileError::invalid_argument(format!(
			"coordinates must be nested arrays, found {value}"
		))),
	}
}

fn parse_c0(value: &Value) -> Result<Coordinates0> {
	let array = parse_array(value)?;
	let x = array.first().and_then(Value::as_f64);
	let y = array.get(1).and_then(Value::as_f64);
	match (x, y) {
		(Some(x), Some(y)) => Ok([x, y]),
		_ => bail!(TileError::invalid_argument(format!(
			"a position needs two numbers, found {value}"
		))),
	}
}

fn parse_c1(value: &Value) -> Result<Coordinates1> {
	parse_array(value)?.iter().map(parse_c0).collect()
}

fn parse_c2(value: &Value) -> Result<Coordinates2> {
	parse_array(value)?.iter().map(parse_c1).collect()
}

fn parse_c3(value: &Value) -> Result<Coordinates3> {
	parse_array(value)?.iter().map(parse_c2).collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use rstest::rstest;
	use vtkit_core::ErrorKind;

	#[test]
	fn parses_a_collection() -> Result<()> {
		let collection = parse_geojson(
			r#"{"type":"FeatureCollection","features":[
				{"type":"Feature","id":7,"geometry":{"type":"Point","coordinates":[-122,48]},"properties":{"name":"geojson data","n":-2}},
				{"type":"Feature","geometry":{"type":"LineString","coordinates":[[0,0],[1.5,2]]},"properties":null},
				{"type":"Feature","geometry":null,"properties":{}}
			]}"#,
		)?;
		assert_eq!(collection.len(), 2);
		assert_eq!(
			collection.features[0],
			GeoFeature {
				id: Some(7),
				geometry: Geometry::Point([-122.0, 48.0]),
				properties: GeoProperties::from(vec![
					("name", GeoValue::from("geojson data")),
					("n", GeoValue::SInt(-2)),
				]),
			}
		);
		assert_eq!(collection.features[1].geometry, Geometry::LineString(vec![[0.0, 0.0], [1.5, 2.0]]));
		assert_eq!(collection.features[1].id, None);
		Ok(())
	}

	#[test]
	fn parses_a_single_feature() -> Result<()> {
		let collection = parse_geojson(
			r#"{"type":"Feature","geometry":{"type":"MultiPolygon","coordinates":[[[[0,0],[1,0],[1,1],[0,0]]]]}}"#,
		)?;
		assert_eq!(collection.len(), 1);
		assert_eq!(collection.features[0].geometry.type_name(), "MultiPolygon");
		Ok(())
	}

	#[rstest]
	#[case("{")]
	#[case("[]")]
	#[case(r#"{"type":"Point","coordinates":[0,0]}"#)]
	#[case(r#"{"type":"FeatureCollection"}"#)]
	#[case(r#"{"type":"FeatureCollection","features":[{"type":"Feature"}]}"#)]
	#[case(r#"{"type":"FeatureCollection","features":[{"type":"Feature","geometry":{"type":"Circle","coordinates":[0,0]}}]}"#)]
	#[case(r#"{"type":"FeatureCollection","features":[{"type":"Feature","geometry":{"type":"Point","coordinates":[0]}}]}"#)]
	#[case(r#"{"type":"FeatureCollection","features":[{"type":"Feature","geometry":{"type":"Point","coordinates":"x"}}]}"#)]
	fn invalid_input(#[case] json: &str) {
		let err = parse_geojson(json).unwrap_err();
		assert_eq!(TileError::kind_of(&err), Some(ErrorKind::InvalidArgument), "{json}");
	}
}
