//! HTTP client layer for the CMS administration API.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
