mod config;
mod runner;
mod session;
