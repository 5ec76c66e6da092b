use crate::geo::{GeoProperties, GeoValue};
use anyhow::{Result, anyhow, ensure};
use std::{collections::HashMap, fmt::Debug, hash::Hash};
use vtkit_core::TileError;

/// An append-only list with a lookup from entry to index. Indexes never change once handed out.
#[derive(Clone, PartialEq)]
pub struct Dictionary<T>
where
	T: Clone + Eq + Hash,
{
	list: Vec<T>,
	map: HashMap<T, u32>,
}

impl<T> Dictionary<T>
where
	T: Clone + Debug + Eq + Hash,
{
	/// Returns the index of `entry`, appending it first if it is new.
	pub fn intern(&mut self, entry: T) -> u32 {
		if let Some(index) = self.map.get(&entry) {
			return *index;
		}
		let index = self.push(entry.clone());
		self.map.insert(entry, index);
		index
	}

	/// Appends `entry` without looking for an existing copy, as read from the wire.
	pub fn push(&mut self, entry: T) -> u32 {
		let index = self.list.len() as u32;
		self.map.entry(entry.clone()).or_insert(index);
		self.list.push(entry);
		index
	}

	pub fn get(&self, id: u32) -> Result<&T> {
		self
			.list
			.get(id as usize)
			.ok_or_else(|| anyhow!(TileError::parse(format!("dictionary index {id} out of range"))))
	}

	pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
		self.list.iter()
	}

	pub fn len(&self) -> usize {
		self.list.len()
	}

	pub fn is_empty(&self) -> bool {
		self.list.is_empty()
	}
}

impl<T: Clone + Eq + Hash> Default for Dictionary<T> {
	fn default() -> Dictionary<T> {
		Dictionary {
			list: Vec::new(),
			map: HashMap::new(),
		}
	}
}

impl<T> Debug for Dictionary<T>
where
	T: Clone + Debug + Eq + Hash,
{
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.list).finish()
	}
}

/// The key and value dictionaries of a layer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyManager {
	pub keys: Dictionary<String>,
	pub values: Dictionary<GeoValue>,
}

impl PropertyManager {
	pub fn new() -> Self {
		Self::default()
	}

	/// Interns `properties` and returns the alternating key/value index list of a feature.
	/// Null values have no wire representation and are left out.
	pub fn encode_tag_ids(&mut self, properties: &GeoProperties) -> Vec<u32> {
		let mut tag_ids: Vec<u32> = Vec::with_capacity(properties.len() * 2);
		for (key, value) in properties.iter() {
			if value.is_null() {
				continue;
			}
			tag_ids.push(self.keys.intern(key.clone()));
			tag_ids.push(self.values.intern(value.clone()));
		}
		tag_ids
	}

	pub fn decode_tag_ids(&self, tag_ids: &[u32]) -> Result<GeoProperties> {
		ensure!(
			tag_ids.len().is_multiple_of(2),
			TileError::parse(format!("odd number of tag ids ({})", tag_ids.len()))
		);
		let mut properties = GeoProperties::new();
		for pair in tag_ids.chunks_exact(2) {
			properties.insert(self.keys.get(pair[0])?.clone(), self.values.get(pair[1])?.clone());
		}
		Ok(properties)
	}
}
