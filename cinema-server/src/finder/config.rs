//! Search configuration for the cinema finder.

use super::search::SearchError;

/// Limits and defaults for user-facing search parameters.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Smallest radius the user may choose (km).
    pub min_radius_km: u32,

    /// Largest radius the user may choose (km).
    pub max_radius_km: u32,

    /// Radius used when the request does not specify one (km).
    pub default_radius_km: u32,

    /// Result counts offered to the user.
    pub result_counts: Vec<usize>,

    /// Result count used when the request does not specify one.
    pub default_count: usize,
}

/// Validated parameters for a single search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchParams {
    pub max_km: f64,
    pub count: usize,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        min_radius_km: u32,
        max_radius_km: u32,
        default_radius_km: u32,
        result_counts: Vec<usize>,
        default_count: usize,
    ) -> Self {
        Self {
            min_radius_km,
            max_radius_km,
            default_radius_km,
            result_counts,
            default_count,
        }
    }

    /// Apply defaults and check the requested radius and count.
    pub fn params(
        &self,
        max_km: Option<f64>,
        count: Option<usize>,
    ) -> Result<SearchParams, SearchError> {
        let max_km = max_km.unwrap_or(f64::from(self.default_radius_km));
        let count = count.unwrap_or(self.default_count);

        let (lo, hi) = (f64::from(self.min_radius_km), f64::from(self.max_radius_km));
        if !(lo..=hi).contains(&max_km) {
            return Err(SearchError::InvalidRequest(format!(
                "maximum distance must be between {} and {} km",
                self.min_radius_km, self.max_radius_km
            )));
        }

        if !self.result_counts.contains(&count) {
            let allowed: Vec<String> = self.result_counts.iter().map(|c| c.to_string()).collect();
            return Err(SearchError::InvalidRequest(format!(
                "number of cinemas must be one of {}",
                allowed.join(", ")
            )));
        }

        Ok(SearchParams { max_km, count })
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_radius_km: 1,
            max_radius_km: 50,
            default_radius_km: 10,
            result_counts: vec![5, 10, 15, 20],
            default_count: 10,
        }
    }
}
