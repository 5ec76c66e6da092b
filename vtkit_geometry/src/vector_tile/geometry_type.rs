/// The geometry type tag of a feature. Multi geometries share the tag of their single form and
/// are told apart by the number of MoveTo groups.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum GeomType {
	#[default]
	Unknown = 0,
	Point = 1,
	LineString = 2,
	Polygon = 3,
}

impl GeomType {
	pub fn as_u64(&self) -> u64 {
		*self as u64
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			GeomType::Unknown => "Unknown",
			GeomType::Point => "Point",
			GeomType::LineString => "LineString",
			GeomType::Polygon => "Polygon",
		}
	}
}

impl From<u64> for GeomType {
	fn from(value: u64) -> Self {
		match value {
			1 => GeomType::Point,
			2 => GeomType::LineString,
			3 => GeomType::Polygon,
			_ => GeomType::Unknown,
		}
	}
}
