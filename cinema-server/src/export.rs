//! CSV export of search results.

use serde::Serialize;

use crate::finder::RankedResult;

/// Suggested download filename.
pub const EXPORT_FILENAME: &str = "nearest_cinemas.csv";

/// Errors writing the export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV buffer error: {0}")]
    Buffer(String),
}

/// One exported row. Field order is the column order.
#[derive(Serialize)]
struct ExportRow<'a> {
    name: &'a str,
    city: &'a str,
    brand: &'a str,
    operator: &'a str,
    latitude: f64,
    longitude: f64,
    distance_km: f64,
}

impl<'a> From<&'a RankedResult> for ExportRow<'a> {
    fn from(r: &'a RankedResult) -> Self {
        Self {
            name: &r.cinema.name,
            city: &r.cinema.city,
            brand: &r.cinema.brand,
            operator: &r.cinema.operator,
            latitude: r.cinema.latitude(),
            longitude: r.cinema.longitude(),
            distance_km: r.distance_km,
        }
    }
}

/// Write results as UTF-8 CSV with a header row, in ranked order.
///
/// An empty result set still produces the header.
pub fn to_csv(results: &[RankedResult]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record([
        "name",
        "city",
        "brand",
        "operator",
        "latitude",
        "longitude",
        "distance_km",
    ])?;
    for result in results {
        writer.serialize(ExportRow::from(result))?;
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::Buffer(e.error().to_string()))
}
