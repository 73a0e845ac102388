//! Postcode geocoding.
//!
//! Resolves a free-text UK postcode to coordinates. The network lookup sits
//! behind the [`Geocoder`] trait so the web layer and tests can swap the
//! live postcodes.io client for [`MockGeocoder`].

mod client;
mod error;
mod mock;
mod types;

use async_trait::async_trait;

use crate::domain::{GeoPoint, Postcode};

pub use client::{DEFAULT_BASE_URL, PostcodeClient, PostcodeClientConfig};
pub use error::{GeocodeError, SetupError};
pub use mock::MockGeocoder;
pub use types::{PostcodeResponse, PostcodeResult};

/// Something that can turn a normalized postcode into coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Look up one postcode. Implementations perform at most one request
    /// per call and never retry.
    async fn lookup(&self, postcode: &Postcode) -> Result<GeoPoint, GeocodeError>;
}

/// Normalize free-text input and look it up.
///
/// Input that is empty after normalization fails with
/// [`GeocodeError::EmptyInput`] before the geocoder is called.
pub async fn geocode(geocoder: &dyn Geocoder, raw: &str) -> Result<GeoPoint, GeocodeError> {
    let postcode = Postcode::parse_normalized(raw)?;
    geocoder.lookup(&postcode).await
}
