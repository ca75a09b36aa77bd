//! Parsing of catalog command lines into engine calls

use anyhow::{Result, bail};
use catalog_core::Record;

/// Separator between the fields of an `add` line
pub const FIELD_SEPARATOR: char = '|';
/// Separator between items of an author or category list
pub const LIST_SEPARATOR: char = ';';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogCommand {
	Add { record: Record, year_defaulted: bool },
	Get(String),
	Search(String),
	Author(String),
	Category(String),
	List,
}

impl CatalogCommand {
	pub fn parse(line: &str) -> Result<Self> {
		let line = line.trim();
		let (verb, rest) = match line.split_once(char::is_whitespace) {
			Some((verb, rest)) => (verb, rest.trim()),
			None => (line, ""),
		};

		let command = match verb.to_lowercase().as_str() {
			"add" | "insert" => {
				let (record, year_defaulted) = parse_record(rest)?;
				CatalogCommand::Add {
					record,
					year_defaulted,
				}
			}
			"get" | "find" => CatalogCommand::Get(rest.to_string()),
			"search" | "title" => CatalogCommand::Search(rest.to_string()),
			"author" => CatalogCommand::Author(rest.to_string()),
			"category" => CatalogCommand::Category(rest.to_string()),
			"list" | "all" => CatalogCommand::List,
			"" => bail!("Empty command"),
			other => bail!("Unknown command: {}. Type .help for help.", other),
		};

		Ok(command)
	}
}

/// Parse `key | title | authors | year | categories`.
///
/// Fields are trimmed. Trailing fields may be omitted. The returned flag is
/// set when a year was given but could not be parsed and 0 was used instead.
pub fn parse_record(fields: &str) -> Result<(Record, bool)> {
	let parts: Vec<&str> = fields.split(FIELD_SEPARATOR).map(str::trim).collect();
	if parts.len() > 5 {
		bail!("Too many fields: expected at most 5, got {}", parts.len());
	}

	let field = |i: usize| parts.get(i).copied().unwrap_or("");

	let key = field(0);
	if key.is_empty() {
		bail!("Key cannot be empty");
	}

	let raw_year = field(3);
	let (year, year_defaulted) = match parse_year(raw_year) {
		Some(year) => (year, false),
		None if raw_year.is_empty() => (0, false),
		None => {
			tracing::warn!("Unparseable year '{}', defaulting to 0", raw_year);
			(0, true)
		}
	};

	let record = Record::new(key, field(1), year)
		.with_authors(split_list(field(2)))
		.with_categories(split_list(field(4)));

	Ok((record, year_defaulted))
}

pub fn parse_year(raw: &str) -> Option<i64> {
	raw.trim().parse().ok()
}

/// Split a `;`-delimited list, dropping blank items
pub fn split_list(raw: &str) -> Vec<&str> {
	raw.split(LIST_SEPARATOR)
		.map(str::trim)
		.filter(|item| !item.is_empty())
		.collect()
}
