//! Test helpers for rcon-core integration tests.
//!
//! - A recording [`CommandRunner`] that never starts a process
//! - Credential file fixtures with controllable modification times
//! - Polling helpers for asynchronous assertions

use rcon_core::config::ConfigStore;
use rcon_core::runner::{CommandRunner, Invocation};

use models::{CommandOutcome, Credentials, CredentialsBuilder};

use std::collections::{HashMap, VecDeque};
use std::fs::File;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

pub const TEST_HOST: &str = "mc.example.org";
pub const TEST_PORT: &str = "25575";
pub const TEST_SECRET: &str = "test-secret";

/// Runner that records every invocation and replies from a script.
///
/// Clones share the same recording, so a test keeps one clone and hands the
/// other to the session.
#[derive(Clone, Default)]
pub struct RecordingRunner {
    calls: Arc<Mutex<Vec<(Credentials, Invocation)>>>,
    scripted: Arc<Mutex<VecDeque<CommandOutcome>>>,
    delays: Arc<Mutex<HashMap<String, Duration>>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the outcome for the next invocation. Unscripted invocations succeed.
    pub fn push_outcome(&self, outcome: CommandOutcome) {
        self.scripted.lock().unwrap().push_back(outcome);
    }

    /// Make invocations of `command` take `delay` before replying.
    pub fn delay_command(&self, command: &str, delay: Duration) {
        self.delays
            .lock()
            .unwrap()
            .insert(command.to_string(), delay);
    }

    pub fn calls(&self) -> Vec<(Credentials, Invocation)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn commands(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .map(|(_, invocation)| invocation.command_text().to_string())
            .collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl CommandRunner for RecordingRunner {
    async fn run(&self, credentials: &Credentials, invocation: &Invocation) -> CommandOutcome {
        self.calls
            .lock()
            .unwrap()
            .push((credentials.clone(), invocation.clone()));

        let delay = self
            .delays
            .lock()
            .unwrap()
            .get(invocation.command_text())
            .copied();

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let scripted = self.scripted.lock().unwrap().pop_front();
        scripted.unwrap_or_else(|| CommandOutcome::success(format!("ran {}", invocation.command_text())))
    }
}

pub fn test_credentials() -> Credentials {
    CredentialsBuilder::default()
        .with_host(TEST_HOST)
        .with_port(TEST_PORT)
        .with_secret(TEST_SECRET)
        .build()
        .expect("valid test credentials")
}

/// Write a credential record and push its modification time `offset` into
/// the future, so consecutive writes always advance it.
pub fn write_record(path: &Path, host: &str, port: &str, password: &str, offset: Duration) {
    let json = serde_json::json!({
        "server_ip": host,
        "port": port,
        "password": password,
    });
    std::fs::write(path, serde_json::to_string_pretty(&json).unwrap()).unwrap();
    set_modified(path, SystemTime::now() + offset);
}

pub fn set_modified(path: &Path, time: SystemTime) {
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(time)
        .unwrap();
}

/// Store backed by `dir/config.json`, already holding the test credentials.
pub fn configured_store(dir: &Path) -> Arc<ConfigStore> {
    let path = dir.join("config.json");
    write_record(&path, TEST_HOST, TEST_PORT, TEST_SECRET, Duration::ZERO);
    let store = ConfigStore::new(path);
    let (_, configured) = store.load();
    assert!(configured, "fixture should be configured");
    Arc::new(store)
}

/// Poll `condition` every 10ms until it holds or `timeout` elapses.
pub async fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}
