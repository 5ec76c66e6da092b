//! Geometry command streams.
//!
//! Every command header packs `(count << 3) | id`. MoveTo and LineTo are followed by `count`
//! coordinate pairs, each a zigzag-encoded delta to the previous position. ClosePath takes no
//! parameters.

use anyhow::{Result, bail, ensure};
use vtkit_core::TileError;

pub const MOVE_TO: u32 = 1;
pub const LINE_TO: u32 = 2;
pub const CLOSE_PATH: u32 = 7;

/// A position in the layer's integer grid.
pub type TilePoint = [i64; 2];

pub fn command_header(id: u32, count: u32) -> u32 {
	(count << 3) | id
}

fn zigzag(value: i64) -> u32 {
	((value << 1) ^ (value >> 63)) as u32
}

fn unzigzag(value: u32) -> i64 {
	i64::from(value >> 1) ^ -i64::from(value & 1)
}

/// Builds a command stream, tracking the cursor for delta encoding.
#[derive(Default)]
pub struct CommandWriter {
	data: Vec<u32>,
	cursor: TilePoint,
}

impl CommandWriter {
	pub fn new() -> Self {
		Self::default()
	}

	/// Deltas must fit a zigzag-encoded `u32`, i.e. the `i32` range.
	fn push_point(&mut self, point: TilePoint) -> Result<()> {
		for axis in 0..2 {
			let delta = point[axis]
				.checked_sub(self.cursor[axis])
				.and_then(|delta| i32::try_from(delta).ok());
			let Some(delta) = delta else {
				bail!(TileError::invalid_argument(format!(
					"coordinate {point:?} is too far from {:?} to be encoded",
					self.cursor
				)));
			};
			self.data.push(zigzag(i64::from(delta)));
		}
		self.cursor = point;
		Ok(())
	}

	fn push_command(&mut self, id: u32, points: &[TilePoint]) -> Result<()> {
		let count = u32::try_from(points.len())
			.ok()
			.filter(|count| *count < 1 << 29)
			.ok_or_else(|| TileError::invalid_argument(format!("too many positions ({}) in one command", points.len())))?;
		self.data.push(command_header(id, count));
		for point in points {
			self.push_point(*point)?;
		}
		Ok(())
	}

	/// All points under a single MoveTo.
	pub fn write_points(&mut self, points: &[TilePoint]) -> Result<()> {
		if points.is_empty() {
			return Ok(());
		}
		self.push_command(MOVE_TO, points)
	}

	pub fn write_line(&mut self, line: &[TilePoint]) -> Result<()> {
		if let Some((first, rest)) = line.split_first() {
			self.push_command(MOVE_TO, &[*first])?;
			self.push_command(LINE_TO, rest)?;
		}
		Ok(())
	}

	/// Writes an open ring (without the repeated first point) followed by ClosePath.
	pub fn write_ring(&mut self, ring: &[TilePoint]) -> Result<()> {
		if ring.is_empty() {
			return Ok(());
		}
		self.write_line(ring)?;
		self.data.push(command_header(CLOSE_PATH, 1));
		Ok(())
	}

	pub fn into_vec(self) -> Vec<u32> {
		self.data
	}
}

/// A decoded path: the positions after one MoveTo, and whether a ClosePath ended it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
	pub points: Vec<TilePoint>,
	pub closed: bool,
}

/// Splits a command stream into paths. Each MoveTo position starts a new path.
pub fn read_paths(data: &[u32]) -> Result<Vec<Path>> {
	let mut paths: Vec<Path> = Vec::new();
	let mut cursor: TilePoint = [0, 0];
	let mut index = 0;

	while index < data.len() {
		let header = data[index];
		let id = header & 0x7;
		let count = (header >> 3) as usize;
		index += 1;

		match id {
			MOVE_TO | LINE_TO => {
				ensure!(
					index + count * 2 <= data.len(),
					TileError::parse(format!(
						"command at position {} needs {} parameters but only {} remain",
						index - 1,
						count * 2,
						data.len() - index
					))
				);
				if id == LINE_TO {
					ensure!(
						paths.last().is_some_and(|p| !p.closed),
						TileError::parse(format!("LineTo without MoveTo at position {}", index - 1))
					);
				}
				for _ in 0..count {
					cursor[0] += unzigzag(data[index]);
					cursor[1] += unzigzag(data[index + 1]);
					index += 2;
					if id == MOVE_TO {
						paths.push(Path::default());
					}
					if let Some(path) = paths.last_mut() {
						path.points.push(cursor);
					}
				}
			}
			CLOSE_PATH => match paths.last_mut() {
				Some(path) if !path.points.is_empty() => path.closed = true,
				_ => bail!(TileError::parse(format!(
					"ClosePath without a path at position {}",
					index - 1
				))),
			},
			_ => bail!(TileError::parse(format!(
				"unknown command {id} at position {}",
				index - 1
			))),
		}
	}

	Ok(paths)
}
