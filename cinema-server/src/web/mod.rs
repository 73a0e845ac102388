//! Web layer for the cinema finder.
//!
//! Serves the search page and the nearest-cinema endpoints (HTML fragment,
//! JSON and CSV download).

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
