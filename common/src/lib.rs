//! Shared building blocks for the RCON control panel.
//!
//! ## Architecture
//!
//! - **common** (this crate): error location tracking and secret handling
//! - **models**: pure data structures (credentials, outcomes, log entries)
//! - **rcon-core**: config store, command runner, session orchestration
//! - **rcon-panel**: terminal front end wiring everything together

pub mod error;
pub mod redacted_secret;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use redacted_secret::RedactedSecret;

#[cfg(test)]
mod tests;
