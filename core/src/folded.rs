//! Case-folded keys used for every case-insensitive comparison in the catalog

use std::fmt;

/// Lowercase `value` one character at a time.
///
/// Each character folds the same way wherever it sits, so a fragment folds
/// to a substring of the folded text that contains it.
pub fn fold(value: &str) -> String {
	value.chars().flat_map(char::to_lowercase).collect()
}

/// Canonical lowercase form of a string.
///
/// Two inputs that differ only by case fold to equal keys. Ordering is the
/// byte order of the folded form, which fixes the iteration order of every
/// map and set keyed by it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FoldedKey(String);

impl FoldedKey {
	pub fn new(value: &str) -> Self {
		Self(fold(value))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// True when the key is empty or whitespace only
	pub fn is_blank(&self) -> bool {
		self.0.trim().is_empty()
	}
}

impl From<&str> for FoldedKey {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}

impl fmt::Display for FoldedKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}
