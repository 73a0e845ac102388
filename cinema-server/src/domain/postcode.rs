//! Postcode type.

use std::fmt;

/// Error returned when a postcode is empty after normalization.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("postcode is empty")]
pub struct EmptyPostcode;

/// A normalized UK postcode.
///
/// Normalization trims the input, uppercases it and removes all internal
/// whitespace, so `"sw1a 1aa "` and `"SW1A1AA"` are the same postcode.
/// The format is not validated further; the lookup service is the authority
/// on which postcodes exist.
///
/// # Examples
///
/// ```
/// use cinema_server::domain::Postcode;
///
/// let pc = Postcode::parse_normalized("sw1a 1aa ").unwrap();
/// assert_eq!(pc.as_str(), "SW1A1AA");
///
/// assert!(Postcode::parse_normalized("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Postcode(String);

impl Postcode {
    /// Normalize and wrap a free-text postcode.
    pub fn parse_normalized(s: &str) -> Result<Self, EmptyPostcode> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_uppercase)
            .collect();

        if normalized.is_empty() {
            return Err(EmptyPostcode);
        }

        Ok(Self(normalized))
    }

    /// Returns the normalized postcode.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Postcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Postcode({})", self.0)
    }
}

impl fmt::Display for Postcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
