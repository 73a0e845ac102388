//! Askama templates for the web frontend.

use askama::Template;
use serde::Serialize;

use crate::finder::{RankedResult, SearchConfig, SearchResult};

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with search form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub cinema_count: usize,
    pub min_radius_km: u32,
    pub max_radius_km: u32,
    pub default_radius_km: u32,
    pub count_options: Vec<CountOption>,
}

impl IndexTemplate {
    /// Build the form from search limits and the loaded dataset size.
    pub fn new(config: &SearchConfig, cinema_count: usize) -> Self {
        let count_options = config
            .result_counts
            .iter()
            .map(|&value| CountOption {
                value,
                selected: value == config.default_count,
            })
            .collect();

        Self {
            cinema_count,
            min_radius_km: config.min_radius_km,
            max_radius_km: config.max_radius_km,
            default_radius_km: config.default_radius_km,
            count_options,
        }
    }
}

/// About page.
#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate;

/// Error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
    pub details: Option<String>,
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Search results fragment: summary, table, map and CSV download.
#[derive(Template)]
#[template(path = "results.html")]
pub struct ResultsTemplate {
    /// Postcode as the user typed it, for the CSV download form
    pub postcode: String,
    pub origin: String,
    pub max_km: String,
    pub count: usize,
    pub rows: Vec<CinemaRow>,
    /// JSON consumed by the map script
    pub map_data: String,
}

impl ResultsTemplate {
    /// Create from a search result.
    pub fn from_search(postcode: &str, found: &SearchResult) -> Result<Self, serde_json::Error> {
        let rows = found
            .results
            .iter()
            .enumerate()
            .map(|(i, r)| CinemaRow::from_result(i + 1, r))
            .collect();

        let map_data = serde_json::to_string(&MapData::from_search(found))?;

        Ok(Self {
            postcode: postcode.trim().to_string(),
            origin: found.origin.to_string(),
            max_km: found.params.max_km.to_string(),
            count: found.params.count,
            rows,
            map_data,
        })
    }
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// An entry in the result-count dropdown.
#[derive(Debug, Clone)]
pub struct CountOption {
    pub value: usize,
    pub selected: bool,
}

/// A row of the results table.
#[derive(Debug, Clone)]
pub struct CinemaRow {
    pub position: usize,
    pub name: String,
    pub city: String,
    pub brand: String,
    pub operator: String,
    pub distance_km: String,
}

impl CinemaRow {
    /// Create from a ranked result.
    pub fn from_result(position: usize, result: &RankedResult) -> Self {
        Self {
            position,
            name: result.cinema.name.clone(),
            city: result.cinema.city.clone(),
            brand: result.cinema.brand.clone(),
            operator: result.cinema.operator.clone(),
            distance_km: format!("{:.2}", result.distance_km),
        }
    }
}

/// Points for the results map: the user's position plus each cinema.
#[derive(Debug, Serialize)]
pub struct MapData {
    pub origin: MapPoint,
    pub cinemas: Vec<MapPoint>,
}

/// A labelled map marker.
#[derive(Debug, Serialize)]
pub struct MapPoint {
    pub label: String,
    pub lat: f64,
    pub lon: f64,
}

impl MapData {
    pub fn from_search(found: &SearchResult) -> Self {
        Self {
            origin: MapPoint {
                label: "Your location".to_string(),
                lat: found.origin.latitude(),
                lon: found.origin.longitude(),
            },
            cinemas: found
                .results
                .iter()
                .map(|r| MapPoint {
                    label: format!("{} ({:.2} km)", r.cinema.name, r.distance_km),
                    lat: r.cinema.latitude(),
                    lon: r.cinema.longitude(),
                })
                .collect(),
        }
    }
}
