//! Thread-safe handle around a single catalog
//!
//! One lock guards the primary store and both indices together, so an insert
//! is never observed half applied by a concurrent reader.

use crate::catalog::{Catalog, CatalogStats};
use crate::error::CatalogResult;
use crate::record::Record;
use parking_lot::RwLock;
use std::sync::Arc;

/// Cloneable handle; clones share the same catalog.
///
/// Queries return owned records because references cannot outlive the read
/// guard. Use [`SharedCatalog::with_read`] to borrow instead.
#[derive(Debug, Clone, Default)]
pub struct SharedCatalog {
	inner: Arc<RwLock<Catalog>>,
}

impl SharedCatalog {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn from_catalog(catalog: Catalog) -> Self {
		Self {
			inner: Arc::new(RwLock::new(catalog)),
		}
	}

	pub fn insert(&self, record: Record) -> bool {
		self.inner.write().insert(record)
	}

	pub fn try_insert(&self, record: Record) -> CatalogResult<()> {
		self.inner.write().try_insert(record)
	}

	pub fn lookup_by_key(&self, key: &str) -> Option<Record> {
		self.inner.read().lookup_by_key(key).cloned()
	}

	pub fn search_by_title_substring(&self, fragment: &str) -> Vec<Record> {
		Self::owned(self.inner.read().search_by_title_substring(fragment))
	}

	pub fn list_by_author(&self, author: &str) -> Vec<Record> {
		Self::owned(self.inner.read().list_by_author(author))
	}

	pub fn list_by_category(&self, category: &str) -> Vec<Record> {
		Self::owned(self.inner.read().list_by_category(category))
	}

	pub fn list_all(&self) -> Vec<Record> {
		Self::owned(self.inner.read().list_all())
	}

	pub fn len(&self) -> usize {
		self.inner.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.inner.read().is_empty()
	}

	pub fn stats(&self) -> CatalogStats {
		self.inner.read().stats()
	}

	/// Run `f` against the catalog under one read guard
	pub fn with_read<R>(&self, f: impl FnOnce(&Catalog) -> R) -> R {
		f(&self.inner.read())
	}

	fn owned(records: Vec<&Record>) -> Vec<Record> {
		records.into_iter().cloned().collect()
	}
}
