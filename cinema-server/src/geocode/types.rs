//! Response types for the postcode lookup API.
//!
//! Only the fields needed for geocoding are modelled; everything else in
//! the payload is ignored.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Top-level lookup response: `{ "status": 200, "result": { ... } }`.
///
/// A `status` that is not an integer in `u16` range reads as `None`.
#[derive(Debug, Deserialize)]
pub struct PostcodeResponse {
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: Option<u16>,
    pub result: Option<PostcodeResult>,
}

/// The `result` object of a successful lookup.
///
/// Coordinates are optional because the service returns `null` for
/// postcodes it cannot place (e.g. some Crown Dependencies).
///
/// Numeric strings are accepted as coordinates; any other non-number reads
/// as `None`.
#[derive(Debug, Deserialize)]
pub struct PostcodeResult {
    pub postcode: Option<String>,
    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub longitude: Option<f64>,
}

fn lenient_status<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_u64)
        .and_then(|n| u16::try_from(n).ok()))
}

fn lenient_coordinate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}
