//! Geometry for vector tiles: the geographic feature model, GeoJSON, the Mapbox vector tile
//! codec and the encode/decode/analysis passes between them.

pub mod analyzer;
pub mod boolean;
pub mod decoder;
pub mod encoder;
pub mod geo;
pub mod geojson;
pub mod math;
pub mod options;
pub mod vector_tile;

pub use self::geo::*;
