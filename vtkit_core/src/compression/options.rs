use crate::TileError;
use anyhow::{Result, bail, ensure};
use std::fmt;

/// Deflate strategies, named after their zlib counterparts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CompressionStrategy {
	#[default]
	Default,
	Filtered,
	HuffmanOnly,
	Rle,
	Fixed,
}

impl CompressionStrategy {
	pub const NAMES: &'static str = "FILTERED, HUFFMAN_ONLY, RLE, FIXED, DEFAULT";

	/// Parses the zlib-style strategy name.
	///
	/// # Errors
	/// Unknown names are an `InvalidArgument` error.
	pub fn parse(name: &str) -> Result<CompressionStrategy> {
		use CompressionStrategy::*;
		Ok(match name {
			"DEFAULT" => Default,
			"FILTERED" => Filtered,
			"HUFFMAN_ONLY" => HuffmanOnly,
			"RLE" => Rle,
			"FIXED" => Fixed,
			_ => bail!(TileError::invalid_argument(format!(
				"option 'strategy' must be one of the following strings: {}",
				Self::NAMES
			))),
		})
	}

	pub fn as_str(&self) -> &'static str {
		use CompressionStrategy::*;
		match self {
			Default => "DEFAULT",
			Filtered => "FILTERED",
			HuffmanOnly => "HUFFMAN_ONLY",
			Rle => "RLE",
			Fixed => "FIXED",
		}
	}
}

impl fmt::Display for CompressionStrategy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Level and strategy for gzip output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GzipOptions {
	level: u8,
	pub strategy: CompressionStrategy,
}

impl GzipOptions {
	pub const DEFAULT_LEVEL: u8 = 6;

	/// # Errors
	/// `level` outside `0..=9` is an `InvalidArgument` error.
	pub fn new(level: i64, strategy: CompressionStrategy) -> Result<GzipOptions> {
		ensure!(
			(0..=9).contains(&level),
			TileError::invalid_argument(
				"option 'level' must be an integer between 0 (no compression) and 9 (best compression) inclusive"
			)
		);
		Ok(GzipOptions {
			level: level as u8,
			strategy,
		})
	}

	pub fn level(&self) -> u8 {
		self.level
	}
}

impl Default for GzipOptions {
	fn default() -> Self {
		GzipOptions {
			level: Self::DEFAULT_LEVEL,
			strategy: CompressionStrategy::Default,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ErrorKind;
	use rstest::rstest;

	#[rstest]
	#[case("DEFAULT", CompressionStrategy::Default)]
	#[case("FILTERED", CompressionStrategy::Filtered)]
	#[case("HUFFMAN_ONLY", CompressionStrategy::HuffmanOnly)]
	#[case("RLE", CompressionStrategy::Rle)]
	#[case("FIXED", CompressionStrategy::Fixed)]
	fn parse_strategy(#[case] name: &str, #[case] expected: CompressionStrategy) {
		let strategy = CompressionStrategy::parse(name).unwrap();
		assert_eq!(strategy, expected);
		assert_eq!(strategy.to_string(), name);
	}

	#[rstest]
	#[case("FOO")]
	#[case("rle")]
	#[case("")]
	fn parse_strategy_rejects(#[case] name: &str) {
		let err = CompressionStrategy::parse(name).unwrap_err();
		assert_eq!(TileError::kind_of(&err), Some(ErrorKind::InvalidArgument));
		assert!(err.to_string().contains("FILTERED, HUFFMAN_ONLY, RLE, FIXED, DEFAULT"));
	}

	#[rstest]
	#[case(-1)]
	#[case(10)]
	#[case(99)]
	fn level_out_of_range(#[case] level: i64) {
		let err = GzipOptions::new(level, CompressionStrategy::Default).unwrap_err();
		assert_eq!(TileError::kind_of(&err), Some(ErrorKind::InvalidArgument));
	}

	#[test]
	fn default_matches_zlib_default() {
		let options = GzipOptions::default();
		assert_eq!(options.level(), 6);
		assert_eq!(options.strategy, CompressionStrategy::Default);
	}
}
