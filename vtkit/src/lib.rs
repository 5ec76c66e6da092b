//! Mapbox vector tiles: build them from GeoJSON or a map source, read them back as JSON or
//! GeoJSON, and analyze them.
//!
//! ```rust
//! use vtkit::{GetDataOptions, Tile};
//! use vtkit_geometry::encoder::EncodeOptions;
//!
//! let mut tile = Tile::new(0, 0, 0).unwrap();
//! let geojson = r#"{"type":"Feature","geometry":{"type":"Point","coordinates":[-122,48]},"properties":{}}"#;
//! tile.add_geojson(geojson, "points", &EncodeOptions::default()).unwrap();
//! assert_eq!(tile.names().unwrap(), vec!["points".to_string()]);
//! assert!(!tile.get_data(&GetDataOptions::default()).unwrap().is_empty());
//! ```

mod async_tile;
mod options;
mod source;
mod tile;

pub use async_tile::AsyncTile;
pub use options::*;
pub use source::*;
pub use tile::Tile;
