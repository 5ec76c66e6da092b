//! Low level building blocks shared by the vector tile crates: byte blobs, protobuf value
//! readers/writers, compression envelopes, tile addresses and the error taxonomy.

pub mod compression;
pub mod error;
pub mod io;
pub mod types;

pub use error::*;
pub use types::*;
