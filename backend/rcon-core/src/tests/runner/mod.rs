mod classify;
mod process;
