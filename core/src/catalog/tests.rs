use super::*;
use pretty_assertions::assert_eq;

fn dune() -> Record {
	Record::new("001", "Dune", 1965)
		.with_authors(["Frank Herbert"])
		.with_categories(["Sci-Fi"])
}

fn sample_catalog() -> Catalog {
	let mut catalog = Catalog::new();
	assert!(catalog.insert(dune()));
	assert!(catalog.insert(
		Record::new("002", "Good Omens", 1990)
			.with_authors(["Terry Pratchett", "Neil Gaiman"])
			.with_categories(["Fantasy", "Comedy"])
	));
	assert!(catalog.insert(
		Record::new("003", "American Gods", 2001)
			.with_authors(["Neil Gaiman"])
			.with_categories(["fantasy"])
	));
	assert!(catalog.insert(Record::new("004", "Anonymous Pamphlet", 1776)));
	catalog
}

fn keys(records: &[&Record]) -> Vec<String> {
	records.iter().map(|record| record.key().to_string()).collect()
}

#[test]
fn test_dune_scenario() {
	let mut catalog = Catalog::new();

	assert!(catalog.insert(dune()));
	assert!(!catalog.insert(dune()));
	assert_eq!(catalog.list_all().len(), 1);

	let by_author = catalog.list_by_author("frank herbert");
	assert_eq!(by_author, vec![&dune()]);

	let by_title = catalog.search_by_title_substring("un");
	assert_eq!(by_title, vec![&dune()]);

	assert!(catalog.list_by_category("drama").is_empty());
}

#[test]
fn test_duplicate_insert_leaves_state_unchanged() {
	let mut catalog = sample_catalog();
	let snapshot = catalog.clone();

	let result = catalog.try_insert(
		Record::new("001", "Another Dune", 2000)
			.with_authors(["Brian Herbert"])
			.with_categories(["Drama"]),
	);

	assert_eq!(result, Err(CatalogError::DuplicateKey("001".to_string())));
	assert_eq!(catalog.list_all(), snapshot.list_all());
	assert_eq!(catalog.authors(), snapshot.authors());
	assert_eq!(catalog.categories(), snapshot.categories());
	assert!(catalog.list_by_author("brian herbert").is_empty());
	assert!(catalog.list_by_category("drama").is_empty());
	assert_eq!(catalog.stats(), snapshot.stats());
	catalog.verify_integrity().unwrap();
}

#[test]
fn test_duplicate_detection_ignores_case() {
	let mut catalog = Catalog::new();
	assert!(catalog.insert(
		Record::new("Abc-1", "First", 1)
			.with_authors(["Ann Author"])
			.with_categories(["Essays"])
	));
	let snapshot = catalog.clone();

	assert!(!catalog.insert(
		Record::new("ABC-1", "Second", 2)
			.with_authors(["Bob Writer"])
			.with_categories(["Poetry"])
	));
	assert!(!catalog.insert(
		Record::new("abc-1", "Third", 3)
			.with_authors(["Ann Author", "Cy Scribe"])
			.with_categories(["Essays", "Letters"])
	));

	assert_eq!(catalog.len(), 1);
	assert_eq!(catalog.lookup_by_key("abc-1").map(Record::title), Some("First"));
	assert_eq!(catalog.list_all(), snapshot.list_all());
	assert_eq!(catalog.authors(), vec!["Ann Author"]);
	assert_eq!(catalog.categories(), vec!["Essays"]);
	assert_eq!(catalog.stats(), snapshot.stats());
	assert!(catalog.list_by_author("bob writer").is_empty());
	assert!(catalog.list_by_author("cy scribe").is_empty());
	assert!(catalog.list_by_category("letters").is_empty());
	assert_eq!(keys(&catalog.list_by_author("ann author")), vec!["Abc-1"]);
	catalog.verify_integrity().unwrap();
}

#[test]
fn test_final_sigma_keys_collide() {
	let mut catalog = Catalog::new();
	assert!(catalog.insert(Record::new("ΟΔΟΣ", "Upper", 1)));

	assert_eq!(
		catalog.try_insert(Record::new("οδοσ", "Lower", 2)),
		Err(CatalogError::DuplicateKey("οδοσ".to_string()))
	);
	assert_eq!(catalog.len(), 1);
	assert_eq!(catalog.lookup_by_key("οδοσ").map(Record::title), Some("Upper"));
	assert_eq!(catalog.lookup_by_key("ΟΔΟΣ").map(Record::title), Some("Upper"));
}

#[test]
fn test_title_search_folds_final_sigma() {
	let mut catalog = Catalog::new();
	assert!(catalog.insert(Record::new("g-1", "Η ΟΔΟΣ", 1950)));
	assert!(catalog.insert(Record::new("g-2", "Ο ΔΡΟΜΟΣ ΜΑΣ", 1960)));
	assert!(catalog.insert(Record::new("g-3", "Dune", 1965)));

	assert_eq!(keys(&catalog.search_by_title_substring("Σ")), vec!["g-1", "g-2"]);
	assert_eq!(keys(&catalog.search_by_title_substring("οδοσ")), vec!["g-1"]);
	assert_eq!(keys(&catalog.search_by_title_substring("ΟΔΟΣ")), vec!["g-1"]);
}

#[test]
fn test_blank_key_rejected() {
	let mut catalog = Catalog::new();

	assert_eq!(
		catalog.try_insert(Record::new("", "Nothing", 0)),
		Err(CatalogError::BlankKey)
	);
	assert!(!catalog.insert(Record::new("   ", "Whitespace", 0).with_authors(["Someone"])));
	assert!(catalog.is_empty());
	assert!(catalog.authors().is_empty());
}

#[test]
fn test_lookup_is_case_insensitive_and_exact() {
	let mut catalog = Catalog::new();
	assert!(catalog.insert(Record::new("Abc-1", "Case Study", 2020)));

	let upper = catalog.lookup_by_key("ABC-1");
	let lower = catalog.lookup_by_key("abc-1");
	assert!(upper.is_some());
	assert_eq!(upper, lower);

	assert!(catalog.lookup_by_key(" abc-1 ").is_none());
	assert!(catalog.lookup_by_key("abc").is_none());
}

#[test]
fn test_empty_queries_return_nothing() {
	let catalog = sample_catalog();
	let before = catalog.stats();

	assert!(catalog.lookup_by_key("").is_none());
	assert!(catalog.search_by_title_substring("").is_empty());
	assert!(catalog.search_by_title_substring("  ").is_empty());
	assert!(catalog.list_by_author("").is_empty());
	assert!(catalog.list_by_category("").is_empty());

	assert_eq!(catalog.stats(), before);
}

#[test]
fn test_title_search_matches_substring_ignoring_case() {
	let catalog = sample_catalog();

	assert_eq!(keys(&catalog.search_by_title_substring("GOD")), vec!["003"]);
	assert_eq!(
		keys(&catalog.search_by_title_substring("o")),
		vec!["002", "003", "004"]
	);
	assert!(catalog.search_by_title_substring("zzz").is_empty());
}

#[test]
fn test_author_index_is_complete() {
	let catalog = sample_catalog();

	for record in catalog.list_all() {
		for author in record.authors().iter() {
			let listed = catalog.list_by_author(&author.to_uppercase());
			let hits = listed.iter().filter(|r| r.key() == record.key()).count();
			assert_eq!(hits, 1, "{} under {}", record.key(), author);
		}
		for category in record.categories().iter() {
			let listed = catalog.list_by_category(&category.to_lowercase());
			let hits = listed.iter().filter(|r| r.key() == record.key()).count();
			assert_eq!(hits, 1, "{} under {}", record.key(), category);
		}
	}
}

#[test]
fn test_author_index_is_exclusive() {
	let catalog = sample_catalog();

	for author in catalog.authors() {
		for record in catalog.list_by_author(author) {
			assert!(record.authors().contains(author));
		}
	}
	assert_eq!(keys(&catalog.list_by_author("NEIL GAIMAN")), vec!["002", "003"]);
	assert_eq!(keys(&catalog.list_by_author("Terry Pratchett")), vec!["002"]);
}

#[test]
fn test_category_lookup_merges_case_variants() {
	let catalog = sample_catalog();

	assert_eq!(keys(&catalog.list_by_category("FANTASY")), vec!["002", "003"]);
	assert_eq!(catalog.categories(), vec!["Comedy", "Fantasy", "Sci-Fi"]);
}

#[test]
fn test_records_without_attributes_are_listed() {
	let catalog = sample_catalog();

	let pamphlet = catalog.lookup_by_key("004").unwrap();
	assert!(pamphlet.authors().is_empty());
	assert!(keys(&catalog.list_all()).contains(&"004".to_string()));
}

#[test]
fn test_list_all_is_idempotent() {
	let catalog = sample_catalog();

	let first = catalog.list_all();
	let second = catalog.list_all();
	assert_eq!(first, second);
	assert_eq!(keys(&first), vec!["001", "002", "003", "004"]);
}

#[test]
fn test_stats_and_integrity() {
	let catalog = sample_catalog();

	assert_eq!(
		catalog.stats(),
		CatalogStats {
			records: 4,
			authors: 3,
			categories: 3,
		}
	);
	catalog.verify_integrity().unwrap();
}

#[test]
fn test_integrity_holds_across_many_inserts() {
	let mut catalog = Catalog::new();

	for i in 0..200 {
		let record = Record::new(format!("K-{}", i % 150), format!("Title {}", i), i)
			.with_authors([format!("Author {}", i % 7), format!("AUTHOR {}", i % 7)])
			.with_categories([format!("Cat {}", i % 5)]);
		let accepted = catalog.insert(record);
		assert_eq!(accepted, i < 150);
		catalog.verify_integrity().unwrap();
	}

	assert_eq!(catalog.len(), 150);
	assert_eq!(catalog.stats().authors, 7);
	assert_eq!(catalog.stats().categories, 5);
	let total: usize = catalog
		.authors()
		.iter()
		.map(|author| catalog.list_by_author(author).len())
		.sum();
	assert_eq!(total, 150);
}

#[test]
fn test_integrity_detects_dangling_index_entry() {
	let mut catalog = sample_catalog();
	catalog.by_author.insert(
		&FoldedKey::new("Ghost Writer"),
		"Ghost Writer",
		&FoldedKey::new("999"),
	);

	assert!(matches!(
		catalog.verify_integrity(),
		Err(CatalogError::InvariantViolation(_))
	));
}

#[test]
fn test_integrity_detects_missing_index_entry() {
	let mut catalog = Catalog::new();
	let record = Record::new("005", "Orphan", 2000).with_categories(["Mystery"]);
	catalog.primary.insert(FoldedKey::new(record.key()), record);

	assert!(matches!(
		catalog.verify_integrity(),
		Err(CatalogError::InvariantViolation(_))
	));
}

#[test]
#[should_panic(expected = "missing from the primary store")]
fn test_dangling_index_entry_panics_on_listing() {
	let mut catalog = Catalog::new();
	catalog.by_category.insert(
		&FoldedKey::new("Horror"),
		"Horror",
		&FoldedKey::new("404"),
	);

	catalog.list_by_category("horror");
}
