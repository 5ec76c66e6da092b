//! Gzip framing around a deflate stream.
//!
//! Output comes straight from zlib's `deflateInit2(level, Z_DEFLATED, 31, 8, strategy)`, so the
//! bytes match what any other zlib-backed writer produces for the same level and strategy. Input
//! is inflated with `flate2`.

use super::{CompressionStrategy, GzipOptions};
use crate::{Blob, TileError};
use anyhow::{Context, Result, bail, ensure};
use flate2::bufread::GzDecoder;
use libz_sys::{
	Z_BUF_ERROR, Z_DEFLATED, Z_FINISH, Z_OK, Z_STREAM_END, deflate, deflateBound, deflateEnd, deflateInit2_, uInt,
	uLong, voidpf, z_stream, zlibVersion,
};
use log::debug;
use std::{
	alloc::{self, Layout},
	ffi::c_int,
	io::Read,
	ptr,
};

/// 15 bit window plus 16 selects the gzip wrapper.
const GZIP_WINDOW_BITS: c_int = 31;
const MEM_LEVEL: c_int = 8;

fn zlib_strategy(strategy: CompressionStrategy) -> c_int {
	match strategy {
		CompressionStrategy::Default => 0,
		CompressionStrategy::Filtered => 1,
		CompressionStrategy::HuffmanOnly => 2,
		CompressionStrategy::Rle => 3,
		CompressionStrategy::Fixed => 4,
	}
}

const HEADER: usize = size_of::<usize>();
const ALIGN: usize = align_of::<usize>();

// zlib gets its memory from the Rust allocator. Each block is prefixed with its size so `zfree`
// can rebuild the layout.
#[allow(clippy::cast_ptr_alignment)]
unsafe extern "C" fn zalloc(_opaque: voidpf, items: uInt, size: uInt) -> voidpf {
	let Some(bytes) = (items as usize)
		.checked_mul(size as usize)
		.and_then(|bytes| bytes.checked_add(HEADER))
	else {
		return ptr::null_mut();
	};
	let Ok(layout) = Layout::from_size_align(bytes, ALIGN) else {
		return ptr::null_mut();
	};
	unsafe {
		let block = alloc::alloc(layout).cast::<usize>();
		if block.is_null() {
			return ptr::null_mut();
		}
		block.write(bytes);
		block.add(1).cast()
	}
}

unsafe extern "C" fn zfree(_opaque: voidpf, address: voidpf) {
	if address.is_null() {
		return;
	}
	unsafe {
		let block = address.cast::<usize>().sub(1);
		let bytes = block.read();
		alloc::dealloc(block.cast(), Layout::from_size_align_unchecked(bytes, ALIGN));
	}
}

/// An initialized deflate stream. zlib keeps a pointer back to the `z_stream`, so it stays boxed.
struct Deflater {
	stream: Box<z_stream>,
}

impl Deflater {
	fn new(options: &GzipOptions) -> Result<Deflater> {
		let mut stream = Box::new(z_stream {
			next_in: ptr::null_mut(),
			avail_in: 0,
			total_in: 0,
			next_out: ptr::null_mut(),
			avail_out: 0,
			total_out: 0,
			msg: ptr::null_mut(),
			state: ptr::null_mut(),
			zalloc,
			zfree,
			opaque: ptr::null_mut(),
			data_type: 0,
			adler: 0,
			reserved: 0,
		});
		// SAFETY: the stream is zeroed apart from the allocator callbacks and outlives the call.
		let status = unsafe {
			deflateInit2_(
				&raw mut *stream,
				c_int::from(options.level()),
				Z_DEFLATED,
				GZIP_WINDOW_BITS,
				MEM_LEVEL,
				zlib_strategy(options.strategy),
				zlibVersion(),
				size_of::<z_stream>() as c_int,
			)
		};
		ensure!(status == Z_OK, "deflateInit2 failed with status {status}");
		Ok(Deflater { stream })
	}

	fn compress(&mut self, input: &[u8]) -> Result<Vec<u8>> {
		let Ok(avail_in) = uInt::try_from(input.len()) else {
			bail!(TileError::invalid_argument(format!(
				"cannot gzip {} bytes in one stream",
				input.len()
			)));
		};
		let stream = &mut *self.stream;
		stream.next_in = input.as_ptr().cast_mut();
		stream.avail_in = avail_in;

		// SAFETY: the stream was initialized by `deflateInit2_`.
		let bound = unsafe { deflateBound(&raw mut *stream, uLong::from(avail_in)) } as usize;
		let mut output = vec![0u8; bound.max(64)];
		loop {
			let written = stream.total_out as usize;
			let free = &mut output[written..];
			stream.next_out = free.as_mut_ptr();
			stream.avail_out = uInt::try_from(free.len()).unwrap_or(uInt::MAX);

			// SAFETY: `next_in` and `next_out` point into live buffers of the announced sizes.
			match unsafe { deflate(&raw mut *stream, Z_FINISH) } {
				Z_STREAM_END => {
					output.truncate(stream.total_out as usize);
					return Ok(output);
				}
				Z_OK | Z_BUF_ERROR => output.resize(output.len() * 2, 0),
				status => bail!("deflate stopped with status {status}"),
			}
		}
	}
}

impl Drop for Deflater {
	fn drop(&mut self) {
		// SAFETY: `deflateEnd` tolerates streams whose initialization failed.
		unsafe {
			deflateEnd(&raw mut *self.stream);
		}
	}
}

/// Wraps `blob` into a gzip envelope.
pub fn compress_gzip(blob: &Blob, options: &GzipOptions) -> Result<Blob> {
	let output = Deflater::new(options)
		.and_then(|mut deflater| deflater.compress(blob.as_slice()))
		.context("Failed to compress data using Gzip")?;

	debug!(
		"gzip level {} strategy {}: {} -> {} bytes",
		options.level(),
		options.strategy,
		blob.len(),
		output.len()
	);
	Ok(Blob::from(output))
}

/// Inflates a gzip envelope.
///
/// # Errors
/// A corrupt stream is a `Decompression` error.
pub fn decompress_gzip(blob: &Blob) -> Result<Blob> {
	let mut decoder = GzDecoder::new(blob.as_slice());
	let mut decompressed_data = Vec::new();
	decoder
		.read_to_end(&mut decompressed_data)
		.context(TileError::decompression("Failed to decompress data using Gzip"))?;
	Ok(Blob::from(decompressed_data))
}
