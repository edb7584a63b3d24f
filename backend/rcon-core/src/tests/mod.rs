mod connection;
mod console;
mod runner;
mod session;
