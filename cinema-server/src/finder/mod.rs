//! Nearest-cinema search.
//!
//! This module answers: "which cinemas are closest to this postcode?"
//!
//! Distances are straight-line (haversine) on a spherical Earth. The
//! ranking itself is a pure function of the origin and the dataset; the
//! only I/O is the single geocoder lookup made by [`Finder::search`].

mod config;
mod distance;
mod rank;
mod search;

pub use config::{SearchConfig, SearchParams};
pub use distance::{EARTH_RADIUS_KM, haversine_km};
pub use rank::{RankedResult, rank};
pub use search::{Finder, SearchError, SearchResult};
