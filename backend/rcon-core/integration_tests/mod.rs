mod config;
mod error;
mod helpers;
mod runner;
mod session;
