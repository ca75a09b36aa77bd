use crate::input::CatalogCommand;
use catalog_core::{Catalog, Record};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct ExecutionResult {
	pub success: bool,
	pub message: String,
	pub records: Option<Vec<Record>>,
	pub warning: Option<String>,
	pub execution_time: Duration,
}

impl ExecutionResult {
	fn new(success: bool, message: String, execution_time: Duration) -> Self {
		Self {
			success,
			message,
			records: None,
			warning: None,
			execution_time,
		}
	}

	fn with_records(mut self, records: Vec<Record>) -> Self {
		self.records = Some(records);
		self
	}
}

/// Run one parsed command against the catalog.
///
/// Only a rejected insert is unsuccessful; empty results are not failures.
/// Only the engine call itself is timed.
pub fn execute(catalog: &mut Catalog, command: CatalogCommand) -> ExecutionResult {
	match command {
		CatalogCommand::Add {
			record,
			year_defaulted,
		} => {
			let key = record.key().to_string();
			let (result, elapsed) = timed(|| catalog.try_insert(record));

			let mut outcome = match result {
				Ok(()) => ExecutionResult::new(true, format!("Added '{}'", key), elapsed),
				Err(e) => ExecutionResult::new(false, e.to_string(), elapsed),
			};
			if year_defaulted {
				outcome.warning = Some("Year could not be parsed, defaulted to 0".to_string());
			}
			outcome
		}
		CatalogCommand::Get(key) => {
			let (record, elapsed) = timed(|| catalog.lookup_by_key(&key));
			match record {
				Some(record) => ExecutionResult::new(true, format!("Found '{}'", record.key()), elapsed)
					.with_records(vec![record.clone()]),
				None => ExecutionResult::new(true, format!("No record with key '{}'", key), elapsed)
					.with_records(Vec::new()),
			}
		}
		CatalogCommand::Search(fragment) => {
			let (records, elapsed) = timed(|| catalog.search_by_title_substring(&fragment));
			listing(records, format!("title containing '{}'", fragment), elapsed)
		}
		CatalogCommand::Author(author) => {
			let (records, elapsed) = timed(|| catalog.list_by_author(&author));
			listing(records, format!("author '{}'", author), elapsed)
		}
		CatalogCommand::Category(category) => {
			let (records, elapsed) = timed(|| catalog.list_by_category(&category));
			listing(records, format!("category '{}'", category), elapsed)
		}
		CatalogCommand::List => {
			let (records, elapsed) = timed(|| catalog.list_all());
			listing(records, "catalog".to_string(), elapsed)
		}
	}
}

fn listing(records: Vec<&Record>, subject: String, elapsed: Duration) -> ExecutionResult {
	let count = records.len();
	let plural = if count == 1 { "" } else { "s" };
	let message = format!("{} record{} for {}", count, plural, subject);

	ExecutionResult::new(true, message, elapsed)
		.with_records(records.into_iter().cloned().collect())
}

fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
	let start = Instant::now();
	let value = f();
	(value, start.elapsed())
}
