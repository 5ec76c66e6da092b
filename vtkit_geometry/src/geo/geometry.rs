use serde_json::{Number, Value, json};
use std::fmt::Debug;

pub type Coordinates0 = [f64; 2];
pub type Coordinates1 = Vec<Coordinates0>;
pub type Coordinates2 = Vec<Coordinates1>;
pub type Coordinates3 = Vec<Coordinates2>;

/// A geometry in either geographic (`[lon, lat]`) or tile-local (`[x, y]`) coordinates.
/// Polygon rings are stored closed.
#[derive(Clone, PartialEq)]
pub enum Geometry {
	Point(Coordinates0),
	LineString(Coordinates1),
	Polygon(Coordinates2),
	MultiPoint(Coordinates1),
	MultiLineString(Coordinates2),
	MultiPolygon(Coordinates3),
}

impl Geometry {
	pub fn type_name(&self) -> &'static str {
		match self {
			Geometry::Point(_) => "Point",
			Geometry::LineString(_) => "LineString",
			Geometry::Polygon(_) => "Polygon",
			Geometry::MultiPoint(_) => "MultiPoint",
			Geometry::MultiLineString(_) => "MultiLineString",
			Geometry::MultiPolygon(_) => "MultiPolygon",
		}
	}

	/// Returns the same geometry with every position passed through `f`.
	pub fn map_coords(&self, f: &impl Fn(Coordinates0) -> Coordinates0) -> Geometry {
		let map1 = |c: &Coordinates1| c.iter().map(|p| f(*p)).collect::<Coordinates1>();
		let map2 = |c: &Coordinates2| c.iter().map(map1).collect::<Coordinates2>();
		match self {
			Geometry::Point(p) => Geometry::Point(f(*p)),
			Geometry::LineString(c) => Geometry::LineString(map1(c)),
			Geometry::Polygon(c) => Geometry::Polygon(map2(c)),
			Geometry::MultiPoint(c) => Geometry::MultiPoint(map1(c)),
			Geometry::MultiLineString(c) => Geometry::MultiLineString(map2(c)),
			Geometry::MultiPolygon(c) => Geometry::MultiPolygon(c.iter().map(map2).collect()),
		}
	}

	/// The coordinate nesting as JSON. With `integer` set, positions are written as whole numbers,
	/// which is how tile-local coordinates are reported.
	pub fn coordinates_json(&self, integer: bool) -> Value {
		let pos = |p: &Coordinates0| {
			if integer {
				json!([p[0].round() as i64, p[1].round() as i64])
			} else {
				Value::Array(p.iter().map(|v| Number::from_f64(*v).map_or(Value::Null, Value::Number)).collect())
			}
		};
		let c1 = |c: &Coordinates1| Value::Array(c.iter().map(pos).collect());
		let c2 = |c: &Coordinates2| Value::Array(c.iter().map(c1).collect());
		match self {
			Geometry::Point(p) => pos(p),
			Geometry::LineString(c) | Geometry::MultiPoint(c) => c1(c),
			Geometry::Polygon(c) | Geometry::MultiLineString(c) => c2(c),
			Geometry::MultiPolygon(c) => Value::Array(c.iter().map(c2).collect()),
		}
	}

	/// A GeoJSON geometry object.
	pub fn to_json(&self) -> Value {
		json!({
			"type": self.type_name(),
			"coordinates": self.coordinates_json(false),
		})
	}

	/// Collapses a multi geometry with a single member into its single form.
	pub fn into_single(self) -> Geometry {
		match self {
			Geometry::MultiPoint(mut c) if c.len() == 1 => Geometry::Point(c.remove(0)),
			Geometry::MultiLineString(mut c) if c.len() == 1 => Geometry::LineString(c.remove(0)),
			Geometry::MultiPolygon(mut c) if c.len() == 1 => Geometry::Polygon(c.remove(0)),
			other => other,
		}
	}
}

impl Debug for Geometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let inner: &dyn Debug = match self {
			Geometry::Point(g) => g,
			Geometry::LineString(g) | Geometry::MultiPoint(g) => g,
			Geometry::Polygon(g) | Geometry::MultiLineString(g) => g,
			Geometry::MultiPolygon(g) => g,
		};
		f.debug_tuple(self.type_name()).field(inner).finish()
	}
}
