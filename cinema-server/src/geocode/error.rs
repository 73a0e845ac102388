//! Geocoding error types.

/// Errors that can occur when resolving a postcode to coordinates.
///
/// All of these abort the current query only; the user can retry with
/// different input.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// Postcode was empty after normalization
    #[error("please enter a postcode")]
    EmptyInput,

    /// The lookup request itself failed (non-200 status, network error, timeout)
    #[error("postcode lookup failed: {message}")]
    LookupFailed {
        status: Option<u16>,
        message: String,
    },

    /// The lookup service does not know this postcode
    #[error("invalid postcode: {postcode}")]
    InvalidPostcode { postcode: String },
}

impl From<crate::domain::EmptyPostcode> for GeocodeError {
    fn from(_: crate::domain::EmptyPostcode) -> Self {
        GeocodeError::EmptyInput
    }
}

/// Errors building a geocoder.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// Base URL is not an absolute http(s) URL
    #[error("invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// HTTP client could not be built
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),

    /// Mock postcode data could not be read
    #[error("failed to load mock postcodes: {message}")]
    MockData { message: String },
}

impl GeocodeError {
    /// Message suitable for showing to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            GeocodeError::EmptyInput => "Please enter a postcode.",
            GeocodeError::LookupFailed { .. } => "Postcode lookup failed. Try again.",
            GeocodeError::InvalidPostcode { .. } => {
                "Invalid postcode. Please try a valid UK postcode."
            }
        }
    }
}

impl From<reqwest::Error> for GeocodeError {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            "request timed out".to_string()
        } else {
            err.to_string()
        };
        GeocodeError::LookupFailed {
            status: err.status().map(|s| s.as_u16()),
            message,
        }
    }
}
