mod client;
pub use client::ApiClient;
mod error;
pub use error::ApiError;
pub mod public;
pub mod routes;
