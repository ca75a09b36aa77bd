//! Secondary index from a non-unique attribute value to record keys

use crate::folded::FoldedKey;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone)]
struct IndexEntry {
	/// Spelling of the value as first seen
	display: String,
	keys: BTreeSet<FoldedKey>,
}

/// Inverted index over one record attribute.
///
/// Holds only folded record keys; resolving them to records is the job of
/// the owning catalog.
#[derive(Debug, Clone)]
pub struct SecondaryIndex {
	name: &'static str,
	entries: BTreeMap<FoldedKey, IndexEntry>,
}

impl SecondaryIndex {
	pub fn new(name: &'static str) -> Self {
		Self {
			name,
			entries: BTreeMap::new(),
		}
	}

	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Add `key` under `value`, creating the value's set if absent
	pub fn insert(&mut self, value: &FoldedKey, display: &str, key: &FoldedKey) {
		self.entries
			.entry(value.clone())
			.or_insert_with(|| IndexEntry {
				display: display.to_string(),
				keys: BTreeSet::new(),
			})
			.keys
			.insert(key.clone());
	}

	/// Record keys indexed under `value`. Blank or unknown values yield `None`.
	pub fn keys_for(&self, value: &str) -> Option<&BTreeSet<FoldedKey>> {
		let folded = FoldedKey::new(value);
		if folded.is_blank() {
			return None;
		}

		self.entries.get(&folded).map(|entry| &entry.keys)
	}

	/// Distinct indexed values in display spelling
	pub fn values(&self) -> impl Iterator<Item = &str> {
		self.entries.values().map(|entry| entry.display.as_str())
	}

	pub(crate) fn sets(&self) -> impl Iterator<Item = (&FoldedKey, &BTreeSet<FoldedKey>)> {
		self.entries.iter().map(|(value, entry)| (value, &entry.keys))
	}

	pub(crate) fn contains(&self, value: &FoldedKey, key: &FoldedKey) -> bool {
		self.entries
			.get(value)
			.is_some_and(|entry| entry.keys.contains(key))
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
