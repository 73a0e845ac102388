//! postcodes.io lookup client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use tracing::debug;

use crate::domain::{GeoPoint, Postcode};

use super::Geocoder;
use super::error::{GeocodeError, SetupError};
use super::types::PostcodeResponse;

/// Default base URL for the postcode lookup API.
pub const DEFAULT_BASE_URL: &str = "https://api.postcodes.io";

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the postcode lookup client.
#[derive(Debug, Clone)]
pub struct PostcodeClientConfig {
    /// Base URL for the API; lookups go to `<base_url>/postcodes/<postcode>`
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl PostcodeClientConfig {
    /// Create a config pointing at the public API.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for PostcodeClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the postcode lookup API.
///
/// Each lookup is exactly one GET request. Nothing is cached or retried.
#[derive(Debug, Clone)]
pub struct PostcodeClient {
    http: reqwest::Client,
    base_url: Url,
}

impl PostcodeClient {
    /// Create a new postcode client.
    pub fn new(config: PostcodeClientConfig) -> Result<Self, SetupError> {
        let invalid = |reason: &str| SetupError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: reason.to_string(),
        };

        let base_url = Url::parse(&config.base_url).map_err(|e| invalid(&e.to_string()))?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(invalid("must be an absolute http(s) URL"));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, base_url })
    }

    /// URL that a lookup for `postcode` will request.
    ///
    /// The postcode becomes a single, percent-encoded path segment.
    pub fn lookup_url(&self, postcode: &Postcode) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`: the base URL can always carry path segments
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push("postcodes")
                .push(postcode.as_str());
        }
        url
    }
}

#[async_trait]
impl Geocoder for PostcodeClient {
    async fn lookup(&self, postcode: &Postcode) -> Result<GeoPoint, GeocodeError> {
        let url = self.lookup_url(postcode);
        debug!(%postcode, %url, "looking up postcode");

        let response = self.http.get(url).send().await?;
        let status = response.status();

        if status != StatusCode::OK {
            return Err(GeocodeError::LookupFailed {
                status: Some(status.as_u16()),
                message: format!("HTTP {}", status.as_u16()),
            });
        }

        let body = response.text().await?;

        let payload: PostcodeResponse =
            serde_json::from_str(&body).map_err(|e| GeocodeError::LookupFailed {
                status: Some(status.as_u16()),
                message: format!("malformed response: {e}"),
            })?;

        point_from_response(payload, postcode)
    }
}

/// Extract coordinates from a 200 response body.
///
/// Anything short of `status: 200` with a placeable result means the
/// service did not recognise the postcode.
fn point_from_response(
    payload: PostcodeResponse,
    postcode: &Postcode,
) -> Result<GeoPoint, GeocodeError> {
    let invalid = || GeocodeError::InvalidPostcode {
        postcode: postcode.to_string(),
    };

    if payload.status != Some(200) {
        return Err(invalid());
    }

    let result = payload.result.ok_or_else(invalid)?;
    let (Some(latitude), Some(longitude)) = (result.latitude, result.longitude) else {
        return Err(invalid());
    };

    GeoPoint::new(latitude, longitude).map_err(|_| invalid())
}
