//! Load-once cache for the cinema dataset.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::OnceCell;

use super::error::DataLoadError;
use super::loader::{Dataset, load};

/// Lazily loaded, immutable cinema dataset.
///
/// The first successful [`DatasetCache::get`] parses the file; every later
/// call returns the same `Arc<Dataset>` without touching the disk.
/// Concurrent first callers wait on a single load. A failed load is not
/// remembered, so the next call tries again.
#[derive(Debug)]
pub struct DatasetCache {
    path: PathBuf,
    cell: OnceCell<Arc<Dataset>>,
}

impl DatasetCache {
    /// Create an empty cache for the dataset at `path`. Nothing is read yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cell: OnceCell::new(),
        }
    }

    /// Create a cache that is already populated.
    pub fn preloaded(path: impl Into<PathBuf>, dataset: Dataset) -> Self {
        Self {
            path: path.into(),
            cell: OnceCell::new_with(Some(Arc::new(dataset))),
        }
    }

    /// Get the dataset, loading it on first use.
    ///
    /// File reading and parsing run on the blocking thread pool.
    pub async fn get(&self) -> Result<Arc<Dataset>, DataLoadError> {
        self.cell
            .get_or_try_init(|| async {
                let path = self.path.clone();
                tokio::task::spawn_blocking(move || load(&path))
                    .await
                    .map_err(|source| DataLoadError::Interrupted {
                        path: self.path.clone(),
                        source,
                    })?
                    .map(Arc::new)
            })
            .await
            .cloned()
    }

    /// The dataset if it has already been loaded.
    pub fn loaded(&self) -> Option<Arc<Dataset>> {
        self.cell.get().cloned()
    }

    /// Path of the underlying file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
