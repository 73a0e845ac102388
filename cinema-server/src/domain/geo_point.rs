//! Geographic coordinate types.

use std::fmt;

use serde::Serialize;

/// Error returned when coordinates fall outside the valid range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid coordinates ({latitude}, {longitude}): {reason}")]
pub struct InvalidGeoPoint {
    latitude: f64,
    longitude: f64,
    reason: &'static str,
}

/// A point on the Earth's surface, in degrees.
///
/// Latitude is always within [-90, 90] and longitude within [-180, 180].
/// Non-finite values are rejected, so any `GeoPoint` is safe to feed into
/// distance calculations.
///
/// # Examples
///
/// ```
/// use cinema_server::domain::GeoPoint;
///
/// let westminster = GeoPoint::new(51.5033, -0.1276).unwrap();
/// assert_eq!(westminster.latitude(), 51.5033);
///
/// assert!(GeoPoint::new(91.0, 0.0).is_err());
/// assert!(GeoPoint::new(0.0, f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Create a point from latitude and longitude in degrees.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidGeoPoint> {
        let invalid = |reason| InvalidGeoPoint {
            latitude,
            longitude,
            reason,
        };

        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(invalid("coordinates must be finite"));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(invalid("latitude must be within [-90, 90]"));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(invalid("longitude must be within [-180, 180]"));
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_boundaries() {
        assert!(GeoPoint::new(90.0, 180.0).is_ok());
        assert!(GeoPoint::new(-90.0, -180.0).is_ok());
        assert!(GeoPoint::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(GeoPoint::new(90.0001, 0.0).is_err());
        assert!(GeoPoint::new(-90.0001, 0.0).is_err());
        assert!(GeoPoint::new(0.0, 180.0001).is_err());
        assert!(GeoPoint::new(0.0, -180.0001).is_err());
    }

    #[test]
    fn rejects_non_finite() {
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::new(0.0, f64::INFINITY).is_err());
        assert!(GeoPoint::new(f64::NEG_INFINITY, 0.0).is_err());
    }

    #[test]
    fn display_uses_six_decimals() {
        let point = GeoPoint::new(51.5033, -0.1276).unwrap();
        assert_eq!(point.to_string(), "51.503300, -0.127600");
    }

    #[test]
    fn error_display() {
        let err = GeoPoint::new(100.0, 0.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid coordinates (100, 0): latitude must be within [-90, 90]"
        );
    }
}
