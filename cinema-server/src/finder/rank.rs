//! Distance ranking of cinemas.
//!
//! Ranks every cinema in the dataset by straight-line distance from the
//! user's point and keeps the nearest ones within a radius.

use serde::Serialize;

use crate::dataset::Dataset;
use crate::domain::{Cinema, GeoPoint};

use super::distance::haversine_km;

/// A cinema annotated with its distance from the search origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedResult {
    #[serde(flatten)]
    pub cinema: Cinema,

    /// Distance in kilometres, rounded to 2 decimal places.
    pub distance_km: f64,
}

/// Rank cinemas by distance from `origin`.
///
/// 1. Compute the distance to every cinema
/// 2. Keep those with distance <= `max_km`
/// 3. Sort ascending; equal distances keep dataset order
/// 4. Keep the first `limit`
///
/// Distances are rounded only after filtering and sorting, so rounding never
/// changes which cinemas are included or their order. An empty dataset, an
/// empty radius, or `limit == 0` all give an empty result.
pub fn rank(origin: GeoPoint, dataset: &Dataset, max_km: f64, limit: usize) -> Vec<RankedResult> {
    if limit == 0 {
        return Vec::new();
    }

    let mut within: Vec<(f64, &Cinema)> = dataset
        .iter()
        .map(|cinema| (haversine_km(origin, cinema.location), cinema))
        .filter(|(distance, _)| *distance <= max_km)
        .collect();

    // `sort_by` is stable
    within.sort_by(|a, b| a.0.total_cmp(&b.0));

    within
        .into_iter()
        .take(limit)
        .map(|(distance, cinema)| RankedResult {
            cinema: cinema.clone(),
            distance_km: round_2dp(distance),
        })
        .collect()
}

/// Round to 2 decimal places for presentation.
fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    fn cinema(name: &str, lat: f64, lon: f64) -> Cinema {
        Cinema::new(name, "London", "Brand", "Operator", point(lat, lon))
    }

    fn names(results: &[RankedResult]) -> Vec<&str> {
        results.iter().map(|r| r.cinema.name.as_str()).collect()
    }

    fn westminster() -> GeoPoint {
        point(51.5033, -0.1276)
    }

    #[test]
    fn known_distance_is_rounded() {
        let dataset = Dataset::from_cinemas(vec![cinema("Trafalgar", 51.5080, -0.1281)]);

        let results = rank(westminster(), &dataset, 10.0, 5);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].distance_km, 0.52);
    }

    #[test]
    fn sorts_nearest_first() {
        let dataset = Dataset::from_cinemas(vec![
            cinema("Far", 51.60, -0.1276),
            cinema("Near", 51.51, -0.1276),
            cinema("Middle", 51.55, -0.1276),
        ]);

        let results = rank(westminster(), &dataset, 50.0, 10);
        assert_eq!(names(&results), vec!["Near", "Middle", "Far"]);
    }

    #[test]
    fn filters_by_radius() {
        let dataset = Dataset::from_cinemas(vec![
            cinema("Inside", 51.51, -0.1276),
            cinema("Outside", 52.5, -0.1276),
        ]);

        let results = rank(westminster(), &dataset, 10.0, 10);
        assert_eq!(names(&results), vec!["Inside"]);
    }

    #[test]
    fn radius_boundary_is_inclusive() {
        let dataset = Dataset::from_cinemas(vec![cinema("Here", 51.5033, -0.1276)]);

        let results = rank(westminster(), &dataset, 0.0, 10);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].distance_km, 0.0);
    }

    #[test]
    fn keeps_the_closest_when_truncating() {
        // 12 cinemas due north, 0.5 km apart, listed furthest first
        let cinemas: Vec<Cinema> = (1..=12)
            .rev()
            .map(|i| cinema(&format!("C{i}"), 51.5033 + 0.0045 * i as f64, -0.1276))
            .collect();
        let dataset = Dataset::from_cinemas(cinemas);

        let results = rank(westminster(), &dataset, 10.0, 5);
        assert_eq!(names(&results), vec!["C1", "C2", "C3", "C4", "C5"]);
    }

    #[test]
    fn ties_keep_dataset_order() {
        let dataset = Dataset::from_cinemas(vec![
            cinema("First", 51.51, -0.1276),
            cinema("Second", 51.51, -0.1276),
            cinema("Third", 51.51, -0.1276),
        ]);

        let results = rank(westminster(), &dataset, 10.0, 10);
        assert_eq!(names(&results), vec!["First", "Second", "Third"]);
    }

    #[test]
    fn rounding_does_not_reorder() {
        // Both round to the same value; the truly nearer one must come first
        // even though it is listed second.
        let dataset = Dataset::from_cinemas(vec![
            cinema("Slightly Further", 51.5033 + 0.00902, -0.1276),
            cinema("Slightly Nearer", 51.5033 + 0.00900, -0.1276),
        ]);

        let results = rank(westminster(), &dataset, 10.0, 10);
        assert_eq!(names(&results), vec!["Slightly Nearer", "Slightly Further"]);
        assert_eq!(results[0].distance_km, results[1].distance_km);
    }

    #[test]
    fn empty_dataset() {
        let results = rank(westminster(), &Dataset::default(), 10.0, 10);
        assert!(results.is_empty());
    }

    #[test]
    fn nothing_in_range() {
        let dataset = Dataset::from_cinemas(vec![cinema("Edinburgh", 55.95, -3.19)]);
        assert!(rank(westminster(), &dataset, 50.0, 10).is_empty());
    }

    #[test]
    fn zero_limit() {
        let dataset = Dataset::from_cinemas(vec![cinema("Near", 51.51, -0.1276)]);
        assert!(rank(westminster(), &dataset, 10.0, 0).is_empty());
    }

    #[test]
    fn rounding() {
        assert_eq!(round_2dp(0.5237), 0.52);
        assert_eq!(round_2dp(1.005_1), 1.01);
        assert_eq!(round_2dp(12.0), 12.0);
    }
}
