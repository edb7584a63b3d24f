mod commands;
mod error;
mod logger;
mod printer;
