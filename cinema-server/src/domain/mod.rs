//! Domain types for the cinema finder.
//!
//! All types enforce their invariants at construction time, so code that
//! receives these types can trust their validity.

mod cinema;
mod geo_point;
mod postcode;

pub use cinema::Cinema;
pub use geo_point::{GeoPoint, InvalidGeoPoint};
pub use postcode::{EmptyPostcode, Postcode};
