//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::GeoPoint;
use crate::finder::{RankedResult, SearchResult};

/// Query for the nearest cinemas to a postcode.
#[derive(Debug, Clone, Deserialize)]
pub struct NearestRequest {
    /// Free-text postcode (normalized before lookup)
    #[serde(default)]
    pub postcode: String,

    /// Maximum straight-line distance in km (defaults to the configured value)
    pub max_km: Option<f64>,

    /// Number of cinemas to return (defaults to the configured value)
    pub count: Option<usize>,
}

/// Response for a nearest-cinema search.
#[derive(Debug, Serialize)]
pub struct NearestResponse {
    /// Geocoded position of the postcode
    pub origin: GeoPoint,

    /// Radius that was searched, in km
    pub max_km: f64,

    /// Maximum number of results requested
    pub count: usize,

    /// Cinemas within the radius, nearest first (may be empty)
    pub results: Vec<RankedResult>,
}

impl NearestResponse {
    /// Create from a search result.
    pub fn from_search(found: SearchResult) -> Self {
        Self {
            origin: found.origin,
            max_km: found.params.max_km,
            count: found.params.count,
            results: found.results,
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
