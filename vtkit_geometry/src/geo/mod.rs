//! The geographic feature model shared by the GeoJSON reader, the encoder and the decoder.

mod collection;
mod feature;
mod geometry;
mod properties;
mod value;

pub use collection::*;
pub use feature::*;
pub use geometry::*;
pub use properties::*;
pub use value::*;
