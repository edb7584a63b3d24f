pub mod config;
pub mod connection;
pub mod console;
pub mod error;
pub mod runner;
pub mod session;

#[cfg(test)]
mod tests;

use std::time::Duration;

pub const RCON_CLIENT_BINARY: &str =
    const_format::concatcp!("mcrcon", std::env::consts::EXE_SUFFIX);
pub const DEFAULT_CONFIG_FILE: &str = "config.json";
pub const PROBE_COMMAND: &str = "list";
pub const BROADCAST_COMMAND: &str = "say";
pub const DEFAULT_INVOCATION_TIMEOUT: Duration = Duration::from_secs(5);
pub const CONFIG_POLL_INTERVAL: Duration = Duration::from_secs(2);
