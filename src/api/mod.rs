pub mod client;
pub mod envelope;
pub mod error;
pub mod types;

pub use client::ApiClient;
pub use error::ApiError;
