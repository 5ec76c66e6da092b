use super::*;

/// A geographic feature: geometry in longitude/latitude plus ordered properties.
#[derive(Clone, Debug, PartialEq)]
pub struct GeoFeature {
	pub id: Option<u64>,
	pub geometry: Geometry,
	pub properties: GeoProperties,
}

impl GeoFeature {
	pub fn new(id: Option<u64>, geometry: Geometry, properties: GeoProperties) -> Self {
		Self {
			id,
			geometry,
			properties,
		}
	}

	#[cfg(test)]
	pub fn new_example() -> Self {
		Self::new(
			Some(13),
			Geometry::Point([-122.0, 48.0]),
			GeoProperties::from(vec![
				("name", GeoValue::from("Nice")),
				("population", GeoValue::from(348085)),
				("is_nice", GeoValue::from(true)),
			]),
		)
	}
}
