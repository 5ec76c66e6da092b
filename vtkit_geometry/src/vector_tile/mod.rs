//! The Mapbox vector tile wire format.
//!
//! - [`commands`]: MoveTo/LineTo/ClosePath command streams with zigzag-delta coordinates.
//! - [`feature`]: one feature: id, tags, geometry type and command stream, or a raster payload.
//! - [`geometry_type`]: the wire-level geometry type.
//! - [`layer`]: a named layer with its features and interned key/value dictionaries.
//! - [`property_manager`]: the dictionaries themselves.
//! - [`tile`]: the layer list, plus the shallow scan that reads layer names only.
//! - [`value`]: typed property values.

pub mod commands;
mod feature;
mod geometry_type;
mod layer;
mod property_manager;
mod tile;
mod value;

pub use feature::*;
pub use geometry_type::*;
pub use layer::*;
pub use property_manager::*;
pub use tile::*;
pub use value::*;
