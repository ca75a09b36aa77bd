//! Catalog records and their case-insensitive attribute sets

use crate::folded::{self, FoldedKey};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

/// A set of strings compared case-insensitively.
///
/// The first spelling inserted for a folded value is the one kept for
/// display. Blank strings are never members.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoldedSet {
	entries: BTreeMap<FoldedKey, String>,
}

impl FoldedSet {
	pub fn new() -> Self {
		Self::default()
	}

	/// Add a value, returning false if it is blank or already present
	pub fn insert(&mut self, value: &str) -> bool {
		let folded = FoldedKey::new(value);
		if folded.is_blank() {
			return false;
		}

		match self.entries.entry(folded) {
			Entry::Occupied(_) => false,
			Entry::Vacant(slot) => {
				slot.insert(value.to_string());
				true
			}
		}
	}

	pub fn contains(&self, value: &str) -> bool {
		self.entries.contains_key(&FoldedKey::new(value))
	}

	pub(crate) fn contains_folded(&self, value: &FoldedKey) -> bool {
		self.entries.contains_key(value)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Display spellings, ordered by folded value
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.entries.values().map(String::as_str)
	}

	pub(crate) fn entries(&self) -> impl Iterator<Item = (&FoldedKey, &str)> {
		self.entries.iter().map(|(folded, display)| (folded, display.as_str()))
	}
}

impl Serialize for FoldedSet {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_seq(self.iter())
	}
}

/// One catalog entry.
///
/// Fields are fixed at construction; once handed to the catalog a record is
/// only ever read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
	key: String,
	title: String,
	authors: FoldedSet,
	year: i64,
	categories: FoldedSet,
	#[serde(skip)]
	folded_title: String,
}

impl Record {
	pub fn new(key: impl Into<String>, title: impl Into<String>, year: i64) -> Self {
		let title = title.into();
		Self {
			key: key.into(),
			folded_title: folded::fold(&title),
			title,
			authors: FoldedSet::new(),
			year,
			categories: FoldedSet::new(),
		}
	}

	pub fn with_authors<I, S>(mut self, authors: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		for author in authors {
			self.authors.insert(author.as_ref());
		}
		self
	}

	pub fn with_categories<I, S>(mut self, categories: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		for category in categories {
			self.categories.insert(category.as_ref());
		}
		self
	}

	pub fn key(&self) -> &str {
		&self.key
	}

	pub fn title(&self) -> &str {
		&self.title
	}

	pub fn authors(&self) -> &FoldedSet {
		&self.authors
	}

	pub fn year(&self) -> i64 {
		self.year
	}

	pub fn categories(&self) -> &FoldedSet {
		&self.categories
	}

	/// Case-insensitive substring match against the title.
	/// `fragment` must already be folded.
	pub(crate) fn title_contains_folded(&self, fragment: &str) -> bool {
		self.folded_title.contains(fragment)
	}
}
