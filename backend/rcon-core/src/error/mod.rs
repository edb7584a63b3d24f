pub mod config;
pub mod runner;
pub mod session;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Runner(#[from] runner::RunnerError),

    #[error(transparent)]
    Session(#[from] session::SessionError),
}
