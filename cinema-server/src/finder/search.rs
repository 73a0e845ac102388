//! End-to-end nearest-cinema search.

use tracing::debug;

use crate::dataset::Dataset;
use crate::domain::GeoPoint;
use crate::geocode::{GeocodeError, Geocoder, geocode};

use super::config::SearchParams;
use super::rank::{RankedResult, rank};

/// Errors that can abort a search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Search parameters outside the allowed values
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The postcode could not be resolved
    #[error(transparent)]
    Geocode(#[from] GeocodeError),
}

/// Outcome of a successful search.
///
/// An empty `results` list is a valid outcome: nothing lies within the radius.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The user's geocoded position
    pub origin: GeoPoint,

    /// Parameters the search ran with
    pub params: SearchParams,

    /// Nearest cinemas, closest first
    pub results: Vec<RankedResult>,
}

/// Resolves a postcode and ranks the dataset around it.
pub struct Finder<'a> {
    geocoder: &'a dyn Geocoder,
    dataset: &'a Dataset,
}

impl<'a> Finder<'a> {
    pub fn new(geocoder: &'a dyn Geocoder, dataset: &'a Dataset) -> Self {
        Self { geocoder, dataset }
    }

    /// Geocode `postcode` (one lookup) and rank the dataset around it.
    pub async fn search(
        &self,
        postcode: &str,
        params: SearchParams,
    ) -> Result<SearchResult, SearchError> {
        let origin = geocode(self.geocoder, postcode).await?;
        let results = rank(origin, self.dataset, params.max_km, params.count);

        debug!(
            %origin,
            max_km = params.max_km,
            count = params.count,
            found = results.len(),
            "ranked cinemas"
        );

        Ok(SearchResult {
            origin,
            params,
            results,
        })
    }
}
