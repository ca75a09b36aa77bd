//! In-memory catalog: a primary record store plus author and category indices

mod index;

#[cfg(test)]
mod tests;

pub use index::SecondaryIndex;

use crate::error::{CatalogError, CatalogResult};
use crate::folded::{self, FoldedKey};
use crate::record::{FoldedSet, Record};
use serde::Serialize;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

/// Record and index counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
	pub records: usize,
	pub authors: usize,
	pub categories: usize,
}

/// Primary store keyed by folded record key, with secondary indices kept as
/// the exact inverse of each record's author and category sets.
///
/// Every key held by an index exists in `primary`. Sequence results are
/// ordered by folded record key.
#[derive(Debug, Clone)]
pub struct Catalog {
	primary: BTreeMap<FoldedKey, Record>,
	by_author: SecondaryIndex,
	by_category: SecondaryIndex,
}

impl Default for Catalog {
	fn default() -> Self {
		Self::new()
	}
}

impl Catalog {
	pub fn new() -> Self {
		Self {
			primary: BTreeMap::new(),
			by_author: SecondaryIndex::new("author"),
			by_category: SecondaryIndex::new("category"),
		}
	}

	/// Insert a record, returning false if it was rejected.
	/// A rejected insert leaves the catalog unchanged.
	pub fn insert(&mut self, record: Record) -> bool {
		self.try_insert(record).is_ok()
	}

	/// Insert a record, reporting why it was rejected
	pub fn try_insert(&mut self, record: Record) -> CatalogResult<()> {
		let key = FoldedKey::new(record.key());
		if key.is_blank() {
			tracing::debug!("Rejected record with blank key");
			return Err(CatalogError::BlankKey);
		}

		// All validation is done once the slot is vacant; nothing below can fail
		let slot = match self.primary.entry(key) {
			Entry::Occupied(_) => {
				tracing::debug!("Rejected duplicate key '{}'", record.key());
				return Err(CatalogError::DuplicateKey(record.key().to_string()));
			}
			Entry::Vacant(slot) => slot,
		};

		let key = slot.key().clone();
		for (author, display) in record.authors().entries() {
			self.by_author.insert(author, display, &key);
		}
		for (category, display) in record.categories().entries() {
			self.by_category.insert(category, display, &key);
		}

		tracing::debug!(
			"Inserted '{}' ({} authors, {} categories)",
			record.key(),
			record.authors().len(),
			record.categories().len()
		);
		slot.insert(record);

		Ok(())
	}

	/// Case-insensitive exact lookup. No trimming is applied.
	pub fn lookup_by_key(&self, key: &str) -> Option<&Record> {
		self.primary.get(&FoldedKey::new(key))
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.primary.contains_key(&FoldedKey::new(key))
	}

	/// Records whose title contains `fragment`, ignoring case.
	/// A blank fragment matches nothing.
	pub fn search_by_title_substring(&self, fragment: &str) -> Vec<&Record> {
		if fragment.trim().is_empty() {
			return Vec::new();
		}

		let fragment = folded::fold(fragment);
		self.primary
			.values()
			.filter(|record| record.title_contains_folded(&fragment))
			.collect()
	}

	pub fn list_by_author(&self, author: &str) -> Vec<&Record> {
		self.resolve(&self.by_author, author)
	}

	pub fn list_by_category(&self, category: &str) -> Vec<&Record> {
		self.resolve(&self.by_category, category)
	}

	pub fn list_all(&self) -> Vec<&Record> {
		self.primary.values().collect()
	}

	/// Distinct authors, in the spelling first inserted
	pub fn authors(&self) -> Vec<&str> {
		self.by_author.values().collect()
	}

	/// Distinct categories, in the spelling first inserted
	pub fn categories(&self) -> Vec<&str> {
		self.by_category.values().collect()
	}

	pub fn len(&self) -> usize {
		self.primary.len()
	}

	pub fn is_empty(&self) -> bool {
		self.primary.is_empty()
	}

	pub fn stats(&self) -> CatalogStats {
		CatalogStats {
			records: self.primary.len(),
			authors: self.by_author.len(),
			categories: self.by_category.len(),
		}
	}

	/// Re-derive the index invariants from the primary store.
	///
	/// Fails if an index references a missing key, lists a key under a value
	/// its record does not carry, or misses a value a record does carry.
	pub fn verify_integrity(&self) -> CatalogResult<()> {
		for (stored_key, record) in &self.primary {
			if *stored_key != FoldedKey::new(record.key()) {
				return Err(CatalogError::InvariantViolation(format!(
					"record '{}' stored under key '{}'",
					record.key(),
					stored_key
				)));
			}
		}

		self.verify_index(&self.by_author, Record::authors)?;
		self.verify_index(&self.by_category, Record::categories)?;

		Ok(())
	}

	fn verify_index(
		&self,
		index: &SecondaryIndex,
		attribute: fn(&Record) -> &FoldedSet,
	) -> CatalogResult<()> {
		for (value, keys) in index.sets() {
			for key in keys {
				let record = self.primary.get(key).ok_or_else(|| {
					CatalogError::InvariantViolation(format!(
						"{} index entry '{}' references missing key '{}'",
						index.name(),
						value,
						key
					))
				})?;

				if !attribute(record).contains_folded(value) {
					return Err(CatalogError::InvariantViolation(format!(
						"{} index lists '{}' under '{}' but the record does not carry it",
						index.name(),
						record.key(),
						value
					)));
				}
			}
		}

		for (key, record) in &self.primary {
			for (value, _) in attribute(record).entries() {
				if !index.contains(value, key) {
					return Err(CatalogError::InvariantViolation(format!(
						"{} index is missing '{}' for '{}'",
						index.name(),
						value,
						record.key()
					)));
				}
			}
		}

		Ok(())
	}

	fn resolve<'a>(&'a self, index: &'a SecondaryIndex, value: &str) -> Vec<&'a Record> {
		let Some(keys) = index.keys_for(value) else {
			return Vec::new();
		};

		keys.iter()
			.map(|key| match self.primary.get(key) {
				Some(record) => record,
				None => panic!(
					"{} index references key '{}' missing from the primary store",
					index.name(),
					key
				),
			})
			.collect()
	}
}
