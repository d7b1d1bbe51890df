//! Elendur HTTP presentation layer
//!
//! Serves the web chat page and the JSON API over the shared
//! application services.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
