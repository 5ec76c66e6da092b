//! Readers and writers for the primitive values of the protobuf wire format.
//!
//! ```rust
//! use vtkit_core::io::*;
//!
//! let mut writer = ValueWriterBlob::new_le();
//! writer.write_pbf_key(1, 0).unwrap();
//! writer.write_varint(150).unwrap();
//! let blob = writer.into_blob();
//!
//! let mut reader = ValueReaderSlice::new_le(blob.as_slice());
//! assert_eq!(reader.read_pbf_key().unwrap(), (1, 0));
//! assert_eq!(reader.read_varint().unwrap(), 150);
//! ```

mod value_reader;
mod value_reader_slice;
mod value_writer;
mod value_writer_blob;

pub use value_reader::*;
pub use value_reader_slice::*;
pub use value_writer::*;
pub use value_writer_blob::*;
