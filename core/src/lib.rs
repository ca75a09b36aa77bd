//! Catalog engine - in-memory record store with secondary indices

pub mod catalog;
pub mod error;
pub mod folded;
pub mod record;
pub mod shared;

pub use catalog::{Catalog, CatalogStats, SecondaryIndex};
pub use error::{CatalogError, CatalogResult};
pub use folded::FoldedKey;
pub use record::{FoldedSet, Record};
pub use shared::SharedCatalog;
