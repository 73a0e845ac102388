//! Cinema records.

use serde::Serialize;

use super::GeoPoint;

/// A single cinema from the dataset.
///
/// Only records with valid coordinates exist; rows that fail to parse are
/// dropped by the loader before a `Cinema` is built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cinema {
    pub name: String,
    pub city: String,
    pub brand: String,
    pub operator: String,
    #[serde(flatten)]
    pub location: GeoPoint,
}

impl Cinema {
    pub fn new(
        name: impl Into<String>,
        city: impl Into<String>,
        brand: impl Into<String>,
        operator: impl Into<String>,
        location: GeoPoint,
    ) -> Self {
        Self {
            name: name.into(),
            city: city.into(),
            brand: brand.into(),
            operator: operator.into(),
            location,
        }
    }

    pub fn latitude(&self) -> f64 {
        self.location.latitude()
    }

    pub fn longitude(&self) -> f64 {
        self.location.longitude()
    }
}
