mod store;
mod watcher;
