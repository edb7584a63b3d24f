//! Terminal front end for the RCON panel.
//!
//! `main.rs` wires these modules to a [`rcon_core::session::SessionManager`].

pub mod commands;
pub mod error;
pub mod logger;
pub mod printer;
pub mod settings;

#[cfg(test)]
mod tests;
