pub mod cache;
pub mod error;
pub mod executor;
pub mod price_parser;
pub mod row_extractor;
pub mod source_client;
pub mod url_normalizer;

#[cfg(test)]
pub mod test_support;

pub use cache::{CatalogCache, CatalogSnapshot, Clock, SystemClock};
pub use error::IngestionError;
pub use executor::fetch_catalog;
pub use source_client::{CatalogSource, FetchedPayload, HttpCatalogSource};
