//! Reading and writing GeoJSON.

mod parse;
mod write;

pub use parse::*;
pub use write::*;
