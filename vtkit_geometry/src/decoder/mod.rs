//! Turns parsed vector tiles back into JSON: the raw layer structure (`toJSON`) or reprojected
//! GeoJSON.

use crate::{
	Geometry,
	geojson::{collection_to_json, feature_to_json},
	vector_tile::{VectorTile, VectorTileFeature, VectorTileLayer},
};
use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};
use vtkit_core::{TileCoord, TileError};

/// Which layers `to_geojson` exports.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GeoJsonTarget {
	/// Zero-based layer index.
	Index(usize),
	/// The first layer with this name.
	Name(String),
	/// All layers merged into one collection (`"__all__"`).
	All,
	/// One collection per layer (`"__array__"`).
	Array,
}

impl GeoJsonTarget {
	pub fn from_json(value: &Value) -> Result<GeoJsonTarget> {
		Ok(match value {
			Value::String(s) if s == "__all__" => GeoJsonTarget::All,
			Value::String(s) if s == "__array__" => GeoJsonTarget::Array,
			Value::String(s) => GeoJsonTarget::Name(s.clone()),
			Value::Number(n) => match n.as_u64() {
				Some(index) => GeoJsonTarget::Index(index as usize),
				None => bail!(TileError::not_found(format!("Layer index {n} is out of range"))),
			},
			_ => bail!(TileError::invalid_argument(
				"layer must be a layer name (string) or index (positive integer)"
			)),
		})
	}
}

fn feature_to_tile_json(layer: &VectorTileLayer, feature: &VectorTileFeature, decode: bool) -> Result<Value> {
	let mut obj = Map::new();
	if let Some(id) = feature.id {
		obj.insert("id".to_string(), Value::from(id));
	}
	obj.insert("type".to_string(), Value::from(feature.geom_type.as_u64()));
	if let Some(raster) = &feature.raster {
		obj.insert(
			"raster".to_string(),
			Value::Array(raster.as_slice().iter().map(|b| Value::from(*b)).collect()),
		);
	} else if decode {
		let geometry = feature.to_tile_geometry()?;
		obj.insert(
			"geometry_type".to_string(),
			Value::from(geometry.as_ref().map_or(feature.geom_type.as_str(), Geometry::type_name)),
		);
		obj.insert(
			"geometry".to_string(),
			geometry.map_or_else(|| Value::Array(vec![]), |g| g.coordinates_json(true)),
		);
	} else {
		obj.insert(
			"geometry".to_string(),
			Value::Array(feature.geometry.iter().map(|v| Value::from(*v)).collect()),
		);
	}
	obj.insert(
		"properties".to_string(),
		layer.feature_properties(feature)?.to_json(),
	);
	Ok(Value::Object(obj))
}

/// The layer structure with geometry either as raw command integers or, with `decode`, as
/// tile-local coordinates plus a `geometry_type` label.
pub fn layer_to_json(layer: &VectorTileLayer, decode: bool) -> Result<Value> {
	let features = layer
		.features
		.iter()
		.enumerate()
		.map(|(index, feature)| {
			feature_to_tile_json(layer, feature, decode)
				.with_context(|| format!("Failed to decode feature #{index} of layer '{}'", layer.name))
		})
		.collect::<Result<Vec<Value>>>()?;

	let mut obj = Map::new();
	obj.insert("name".to_string(), Value::from(layer.name.as_str()));
	obj.insert("extent".to_string(), Value::from(layer.extent));
	obj.insert("version".to_string(), Value::from(layer.version));
	obj.insert("features".to_string(), Value::Array(features));
	Ok(Value::Object(obj))
}

pub fn tile_to_json(tile: &VectorTile, decode: bool) -> Result<Value> {
	Ok(Value::Array(
		tile
			.layers
			.iter()
			.map(|layer| layer_to_json(layer, decode))
			.collect::<Result<Vec<Value>>>()?,
	))
}

/// GeoJSON features of a layer, reprojected to longitude/latitude. Features without drawable
/// geometry are kept with a `null` geometry, so the count matches the layer.
pub fn layer_features_to_geojson(layer: &VectorTileLayer, coord: &TileCoord) -> Result<Vec<Value>> {
	let extent = f64::from(layer.extent);
	layer
		.features
		.iter()
		.enumerate()
		.map(|(index, feature)| {
			let geometry = feature
				.to_tile_geometry()
				.with_context(|| format!("Failed to decode feature #{index} of layer '{}'", layer.name))?
				.map(|g| g.map_coords(&|[x, y]| coord.unproject(x, y, extent)));
			let properties = layer.feature_properties(feature)?;
			Ok(feature_to_json(feature.id, geometry.as_ref(), &properties))
		})
		.collect()
}

pub fn layer_to_geojson(layer: &VectorTileLayer, coord: &TileCoord) -> Result<Value> {
	Ok(collection_to_json(
		Some(&layer.name),
		layer_features_to_geojson(layer, coord)?,
	))
}

/// Exports the layers selected by `target`. Unknown names and indexes fail with `NotFound`.
pub fn tile_to_geojson(tile: &VectorTile, coord: &TileCoord, target: &GeoJsonTarget) -> Result<Value> {
	match target {
		GeoJsonTarget::Index(index) => match tile.layers.get(*index) {
			Some(layer) => layer_to_geojson(layer, coord),
			None => bail!(TileError::not_found(format!(
				"Layer index {index} is out of range, the tile has {} layer(s)",
				tile.layers.len()
			))),
		},
		GeoJsonTarget::Name(name) => match tile.find_layer(name) {
			Some(layer) => layer_to_geojson(layer, coord),
			None => bail!(TileError::not_found(format!("Layer name '{name}' not found"))),
		},
		GeoJsonTarget::All => {
			let mut features = Vec::new();
			for layer in &tile.layers {
				features.extend(layer_features_to_geojson(layer, coord)?);
			}
			let names: Vec<&str> = tile.layers.iter().map(|l| l.name.as_str()).collect();
			Ok(collection_to_json(Some(&names.join(",")), features))
		}
		GeoJsonTarget::Array => Ok(Value::Array(
			tile
				.layers
				.iter()
				.map(|layer| layer_to_geojson(layer, coord))
				.collect::<Result<Vec<Value>>>()?,
		)),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		GeoProperties, GeoValue,
		vector_tile::{GeomType, commands::CommandWriter},
	};
	use approx::assert_abs_diff_eq;
	use pretty_assertions::assert_eq;
	use rstest::rstest;
	use serde_json::json;
	use vtkit_core::{Blob, ErrorKind};

	fn world() -> TileCoord {
		TileCoord::new(0, 0, 0).unwrap()
	}

	fn example_tile() -> VectorTile {
		let mut points = VectorTileLayer::new_standard("points");
		points.add_feature(
			VectorTileFeature {
				id: Some(1),
				geom_type: GeomType::Point,
				geometry: vec![9, 1320, 2848],
				..VectorTileFeature::default()
			},
			&GeoProperties::from(vec![("name", GeoValue::from("geojson data"))]),
		);

		let mut writer = CommandWriter::new();
		writer.write_ring(&[[2025, 2025], [2071, 2025], [2071, 2071], [2025, 2071]]).unwrap();
		let mut polygons = VectorTileLayer::new_standard("polygons");
		polygons.add_feature(
			VectorTileFeature {
				id: Some(2),
				geom_type: GeomType::Polygon,
				geometry: writer.into_vec(),
				..VectorTileFeature::default()
			},
			&GeoProperties::new(),
		);
		VectorTile::new(vec![points, polygons])
	}

	#[test]
	fn raw_json() -> Result<()> {
		assert_eq!(
			tile_to_json(&example_tile(), false)?[0],
			json!({
				"name": "points",
				"extent": 4096,
				"version": 1,
				"features": [{"id": 1, "type": 1, "geometry": [9, 1320, 2848], "properties": {"name": "geojson data"}}]
			})
		);
		Ok(())
	}

	#[test]
	fn decoded_json() -> Result<()> {
		let json = tile_to_json(&example_tile(), true)?;
		assert_eq!(
			json[0]["features"][0],
			json!({"id": 1, "type": 1, "geometry_type": "Point", "geometry": [660, 1424], "properties": {"name": "geojson data"}})
		);
		assert_eq!(
			json[1]["features"][0]["geometry"],
			json!([[[2025, 2025], [2071, 2025], [2071, 2071], [2025, 2071], [2025, 2025]]])
		);
		assert_eq!(json[1]["features"][0]["geometry_type"], json!("Polygon"));
		Ok(())
	}

	#[test]
	fn empty_layer_json() -> Result<()> {
		let layer = VectorTileLayer::new_standard("geojson");
		assert_eq!(
			serde_json::to_string(&layer_to_json(&layer, true)?)?,
			r#"{"name":"geojson","extent":4096,"version":1,"features":[]}"#
		);
		Ok(())
	}

	#[test]
	fn raster_json() -> Result<()> {
		let mut layer = VectorTileLayer::new_standard("image");
		layer.add_feature(
			VectorTileFeature::new_raster(Blob::from(&[137u8, 80])),
			&GeoProperties::new(),
		);
		assert_eq!(
			layer_to_json(&layer, true)?["features"][0],
			json!({"type": 0, "raster": [137, 80], "properties": {}})
		);
		Ok(())
	}

	#[test]
	fn geojson_by_name_and_index() -> Result<()> {
		let tile = example_tile();
		let by_name = tile_to_geojson(&tile, &world(), &GeoJsonTarget::Name("points".to_string()))?;
		let by_index = tile_to_geojson(&tile, &world(), &GeoJsonTarget::Index(0))?;
		assert_eq!(by_name, by_index);
		assert_eq!(by_name["type"], "FeatureCollection");
		assert_eq!(by_name["name"], "points");
		let coordinates = &by_name["features"][0]["geometry"]["coordinates"];
		assert_abs_diff_eq!(coordinates[0].as_f64().unwrap(), -122.0, epsilon = 0.3);
		assert_abs_diff_eq!(coordinates[1].as_f64().unwrap(), 48.0, epsilon = 0.3);
		assert_eq!(by_name["features"][0]["id"], 1);
		assert_eq!(by_name["features"][0]["properties"], json!({"name": "geojson data"}));
		Ok(())
	}

	#[test]
	fn geojson_aggregates() -> Result<()> {
		let tile = example_tile();
		let all = tile_to_geojson(&tile, &world(), &GeoJsonTarget::All)?;
		assert_eq!(all["name"], "points,polygons");
		assert_eq!(all["features"].as_array().map(Vec::len), Some(2));
		assert_eq!(all["features"][1]["geometry"]["type"], "Polygon");

		let array = tile_to_geojson(&tile, &world(), &GeoJsonTarget::Array)?;
		assert_eq!(array.as_array().map(Vec::len), Some(2));
		assert_eq!(array[1]["name"], "polygons");
		Ok(())
	}

	#[rstest]
	#[case(GeoJsonTarget::Index(2))]
	#[case(GeoJsonTarget::Name("missing".to_string()))]
	fn unknown_layers(#[case] target: GeoJsonTarget) {
		let err = tile_to_geojson(&example_tile(), &world(), &target).unwrap_err();
		assert_eq!(TileError::kind_of(&err), Some(ErrorKind::NotFound));
	}

	#[rstest]
	#[case(json!("__all__"), GeoJsonTarget::All)]
	#[case(json!("__array__"), GeoJsonTarget::Array)]
	#[case(json!("world"), GeoJsonTarget::Name("world".to_string()))]
	#[case(json!(3), GeoJsonTarget::Index(3))]
	fn targets(#[case] value: Value, #[case] expected: GeoJsonTarget) -> Result<()> {
		assert_eq!(GeoJsonTarget::from_json(&value)?, expected);
		Ok(())
	}

	#[rstest]
	#[case(json!(-1), ErrorKind::NotFound)]
	#[case(json!(null), ErrorKind::InvalidArgument)]
	#[case(json!({}), ErrorKind::InvalidArgument)]
	fn invalid_targets(#[case] value: Value, #[case] kind: ErrorKind) {
		let err = GeoJsonTarget::from_json(&value).unwrap_err();
		assert_eq!(TileError::kind_of(&err), Some(kind));
	}
}
