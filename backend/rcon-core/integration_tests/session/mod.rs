mod lifecycle;
mod session;
