//! Domain models for the RCON control panel.
//!
//! Pure data structures shared by the core and the front end. Models carry
//! validation but no I/O: loading, running and logging live in `rcon-core`.

pub mod connection_status;
pub mod credentials;
pub mod error;
pub mod log_entry;
pub mod outcome;

pub use common::ErrorLocation;
pub use connection_status::ConnectionStatus;
pub use credentials::Credentials;
pub use credentials::builder::CredentialsBuilder;
pub use error::model_error::ModelError;
pub use log_entry::{LogCategory, LogEntry};
pub use outcome::{CommandOutcome, ErrorKind};

#[cfg(test)]
mod tests;
