use thiserror::Error;

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
	#[error("Record key is blank")]
	BlankKey,

	#[error("Duplicate key: {0}")]
	DuplicateKey(String),

	#[error("Invariant violation: {0}")]
	InvariantViolation(String),
}
