//! Cinema dataset loading.
//!
//! Reads the cinema table from a CSV file once per process and keeps it
//! immutable afterwards. Rows with unusable coordinates are dropped at load
//! time rather than reported as errors.

mod cache;
mod error;
mod loader;

pub use cache::DatasetCache;
pub use error::DataLoadError;
pub use loader::{Dataset, REQUIRED_COLUMNS, load};
