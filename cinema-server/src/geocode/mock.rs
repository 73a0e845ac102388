//! Mock geocoder for testing without network access.
//!
//! Serves coordinates from an in-memory postcode table, optionally loaded
//! from a JSON file, as if they were live API responses.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{GeoPoint, Postcode};

use super::Geocoder;
use super::error::{GeocodeError, SetupError};

/// Coordinates as stored in a mock data file.
#[derive(Debug, Deserialize)]
struct MockEntry {
    latitude: f64,
    longitude: f64,
}

/// Mock geocoder backed by a fixed postcode table.
///
/// Unknown postcodes produce `InvalidPostcode`, mirroring the live API.
/// Clones share the lookup counter.
#[derive(Debug, Clone, Default)]
pub struct MockGeocoder {
    postcodes: HashMap<Postcode, GeoPoint>,
    unavailable: bool,
    lookups: Arc<AtomicUsize>,
}

impl MockGeocoder {
    /// Create an empty mock; every lookup is an unknown postcode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock whose lookups always fail as if the service were down.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Add a postcode. The key is normalized like user input.
    ///
    /// Invalid entries (empty postcode or out-of-range coordinates) are ignored.
    pub fn with_postcode(mut self, postcode: &str, latitude: f64, longitude: f64) -> Self {
        if let (Ok(pc), Ok(point)) = (
            Postcode::parse_normalized(postcode),
            GeoPoint::new(latitude, longitude),
        ) {
            self.postcodes.insert(pc, point);
        }
        self
    }

    /// Load a mock from a JSON file of the form
    /// `{ "SW1A 1AA": { "latitude": 51.5, "longitude": -0.14 } }`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SetupError> {
        let path = path.as_ref();

        let json = std::fs::read_to_string(path).map_err(|e| SetupError::MockData {
            message: format!("failed to read {:?}: {}", path, e),
        })?;

        let entries: HashMap<String, MockEntry> =
            serde_json::from_str(&json).map_err(|e| SetupError::MockData {
                message: format!("failed to parse {:?}: {}", path, e),
            })?;

        let mut postcodes = HashMap::with_capacity(entries.len());
        for (raw, entry) in entries {
            let postcode = Postcode::parse_normalized(&raw).map_err(|_| SetupError::MockData {
                message: format!("empty postcode key in {:?}", path),
            })?;
            let point = GeoPoint::new(entry.latitude, entry.longitude).map_err(|e| {
                SetupError::MockData {
                    message: format!("{}: {}", raw, e),
                }
            })?;
            postcodes.insert(postcode, point);
        }

        Ok(Self {
            postcodes,
            ..Self::default()
        })
    }

    /// Number of lookups performed so far.
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    /// Number of known postcodes.
    pub fn len(&self) -> usize {
        self.postcodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postcodes.is_empty()
    }
}

#[async_trait]
impl Geocoder for MockGeocoder {
    async fn lookup(&self, postcode: &Postcode) -> Result<GeoPoint, GeocodeError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);

        if self.unavailable {
            return Err(GeocodeError::LookupFailed {
                status: Some(503),
                message: "mock geocoder unavailable".to_string(),
            });
        }

        self.postcodes
            .get(postcode)
            .copied()
            .ok_or_else(|| GeocodeError::InvalidPostcode {
                postcode: postcode.to_string(),
            })
    }
}
