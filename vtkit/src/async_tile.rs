//! Asynchronous access to a [`Tile`].
//!
//! Every call takes the tile for its whole duration and runs the work on tokio's blocking pool.
//! A call that finds the tile taken fails at once with `ConcurrentOperation` instead of waiting.

use crate::{GetDataOptions, MapSource, RenderOptions, Tile, ToJsonOptions};
use anyhow::{Context, Result, anyhow};
use log::trace;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;
use vtkit_core::{Blob, TileError};
use vtkit_geometry::{analyzer::GeometryReport, decoder::GeoJsonTarget, encoder::EncodeOptions};

#[derive(Clone, Debug)]
pub struct AsyncTile {
	inner: Arc<Mutex<Tile>>,
}

impl AsyncTile {
	pub fn new(tile: Tile) -> AsyncTile {
		AsyncTile {
			inner: Arc::new(Mutex::new(tile)),
		}
	}

	async fn run<T, F>(&self, operation: &'static str, work: F) -> Result<T>
	where
		T: Send + 'static,
		F: FnOnce(&mut Tile) -> Result<T> + Send + 'static,
	{
		let mut tile = self.inner.clone().try_lock_owned().map_err(|_| {
			anyhow!(TileError::concurrent_operation(format!(
				"cannot {operation}: another operation on this tile is still running"
			)))
		})?;
		trace!("{operation} started");
		tokio::task::spawn_blocking(move || work(&mut tile))
			.await
			.with_context(|| format!("{operation} did not complete"))?
	}

	/// Returns the tile once no other handle shares it.
	pub fn into_inner(self) -> Result<Tile> {
		match Arc::try_unwrap(self.inner) {
			Ok(mutex) => Ok(mutex.into_inner()),
			Err(_) => Err(anyhow!(TileError::concurrent_operation(
				"the tile is still shared with another handle"
			))),
		}
	}

	pub async fn set_data(&self, data: Blob) -> Result<()> {
		self.run("setData", move |tile| tile.set_data(&data)).await
	}

	pub async fn add_data(&self, data: Blob) -> Result<()> {
		self.run("addData", move |tile| tile.add_data(&data)).await
	}

	pub async fn parse(&self) -> Result<()> {
		self.run("parse", Tile::parse).await
	}

	pub async fn get_data(&self, options: GetDataOptions) -> Result<Blob> {
		self.run("getData", move |tile| tile.get_data(&options)).await
	}

	pub async fn clear(&self) -> Result<()> {
		self
			.run("clear", |tile| {
				tile.clear();
				Ok(())
			})
			.await
	}

	pub async fn add_geojson(&self, geojson: String, name: String, options: EncodeOptions) -> Result<()> {
		self
			.run("addGeoJSON", move |tile| tile.add_geojson(&geojson, &name, &options))
			.await
	}

	pub async fn to_json(&self, options: ToJsonOptions) -> Result<Value> {
		self.run("toJSON", move |tile| tile.to_json(&options)).await
	}

	pub async fn to_geojson(&self, target: GeoJsonTarget) -> Result<Value> {
		self.run("toGeoJSON", move |tile| tile.to_geojson(&target)).await
	}

	pub async fn is_solid(&self) -> Result<(bool, String)> {
		self.run("isSolid", |tile| tile.is_solid()).await
	}

	pub async fn render(&self, source: Arc<dyn MapSource>, options: RenderOptions) -> Result<()> {
		self
			.run("render", move |tile| tile.render(source.as_ref(), &options))
			.await
	}

	pub async fn report_geometry_validity(&self) -> Result<Vec<GeometryReport>> {
		self
			.run("reportGeometryValidity", |tile| tile.report_geometry_validity())
			.await
	}

	pub async fn report_geometry_simplicity(&self) -> Result<Vec<GeometryReport>> {
		self
			.run("reportGeometrySimplicity", |tile| tile.report_geometry_simplicity())
			.await
	}
}

impl From<Tile> for AsyncTile {
	fn from(tile: Tile) -> Self {
		AsyncTile::new(tile)
	}
}
