//! UK cinema finder server.
//!
//! A web application that answers: "which cinemas are nearest to my
//! postcode?" Postcodes are geocoded through postcodes.io and cinemas are
//! ranked by straight-line distance.

pub mod config;
pub mod dataset;
pub mod domain;
pub mod export;
pub mod finder;
pub mod geocode;
pub mod web;
