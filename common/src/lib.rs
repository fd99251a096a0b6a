//! Shared building blocks for complexity-lens.
//!
//! This crate holds the small, dependency-light types every other crate in
//! the workspace leans on. It has no business logic.
//!
//! ## Architecture
//!
//! - **common** (this crate): error locations, HTTP status, secret handling
//! - **lens-core**: extractor, coordinator, messaging and presenter
//! - **complexity-lens**: command-line shell wiring everything together

pub mod error;
pub mod http_status;
pub mod redacted_key;

#[cfg(test)]
mod tests;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use redacted_key::RedactedApiKey;
