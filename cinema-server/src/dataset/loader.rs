//! CSV loader for the cinema table.

use std::fs::File;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info, warn};

use crate::domain::{Cinema, GeoPoint};

use super::error::DataLoadError;

/// Columns the dataset must provide. Extra columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "name",
    "city",
    "brand",
    "operator",
    "latitude",
    "longitude",
];

/// The loaded cinema table.
///
/// Preserves file order. Never mutated after loading.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    cinemas: Vec<Cinema>,
    dropped: usize,
}

impl Dataset {
    /// Build a dataset directly from records (no rows dropped).
    pub fn from_cinemas(cinemas: Vec<Cinema>) -> Self {
        Self {
            cinemas,
            dropped: 0,
        }
    }

    pub fn cinemas(&self) -> &[Cinema] {
        &self.cinemas
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cinema> {
        self.cinemas.iter()
    }

    pub fn len(&self) -> usize {
        self.cinemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cinemas.is_empty()
    }

    /// Number of rows skipped because their coordinates were absent or invalid.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

/// Column positions resolved from the header row.
struct Columns {
    name: usize,
    city: usize,
    brand: usize,
    operator: usize,
    latitude: usize,
    longitude: usize,
}

impl Columns {
    fn resolve(headers: &StringRecord, path: &Path) -> Result<Self, DataLoadError> {
        let find = |column: &str| headers.iter().position(|h| h == column);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|&&c| find(c).is_none())
            .map(|c| c.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(DataLoadError::MissingColumns {
                path: path.to_path_buf(),
                missing,
            });
        }

        // All present, checked above
        let index = |column: &str| find(column).unwrap_or_default();
        Ok(Self {
            name: index("name"),
            city: index("city"),
            brand: index("brand"),
            operator: index("operator"),
            latitude: index("latitude"),
            longitude: index("longitude"),
        })
    }

    fn to_cinema(&self, record: &StringRecord) -> Option<Cinema> {
        let text = |i: usize| record.get(i).unwrap_or_default().to_string();

        let latitude = parse_coordinate(record.get(self.latitude))?;
        let longitude = parse_coordinate(record.get(self.longitude))?;
        let location = GeoPoint::new(latitude, longitude).ok()?;

        Some(Cinema::new(
            text(self.name),
            text(self.city),
            text(self.brand),
            text(self.operator),
            location,
        ))
    }
}

/// Parse a coordinate field, treating empty or non-numeric values as absent.
fn parse_coordinate(field: Option<&str>) -> Option<f64> {
    field?.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Load the cinema table from a CSV file with a header row.
///
/// Rows whose latitude or longitude is missing, non-numeric or out of range
/// are dropped and counted. Malformed rows are dropped the same way. Only
/// whole-file problems (missing file, I/O failure, missing columns) are
/// errors.
pub fn load(path: impl AsRef<Path>) -> Result<Dataset, DataLoadError> {
    let path = path.as_ref();

    let file = File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(file);

    let csv_error = |source| DataLoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let headers = reader.headers().map_err(csv_error)?.clone();
    let columns = Columns::resolve(&headers, path)?;

    let mut cinemas = Vec::new();
    let mut dropped = 0;

    for (row, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => return Err(csv_error(e)),
            Err(e) => {
                debug!(row, error = %e, "skipping malformed row");
                dropped += 1;
                continue;
            }
        };

        match columns.to_cinema(&record) {
            Some(cinema) => cinemas.push(cinema),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        warn!(
            path = %path.display(),
            dropped,
            "dropped rows with missing or invalid coordinates"
        );
    }
    info!(path = %path.display(), cinemas = cinemas.len(), "loaded cinema dataset");

    Ok(Dataset { cinemas, dropped })
}
