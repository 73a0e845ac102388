//! Application state for the web layer.

use std::sync::Arc;

use crate::dataset::DatasetCache;
use crate::finder::SearchConfig;
use crate::geocode::Geocoder;

/// Shared application state.
///
/// Contains all the services needed to handle requests. The dataset is
/// read-only once loaded, so handlers share it without locking.
#[derive(Clone)]
pub struct AppState {
    /// Load-once cinema dataset
    pub dataset: Arc<DatasetCache>,

    /// Postcode geocoder (live API or mock)
    pub geocoder: Arc<dyn Geocoder>,

    /// Search limits and defaults
    pub config: Arc<SearchConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        dataset: DatasetCache,
        geocoder: impl Geocoder + 'static,
        config: SearchConfig,
    ) -> Self {
        Self {
            dataset: Arc::new(dataset),
            geocoder: Arc::new(geocoder),
            config: Arc::new(config),
        }
    }
}
