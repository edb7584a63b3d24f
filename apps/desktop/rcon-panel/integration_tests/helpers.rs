use rcon_core::config::ConfigStore;
use rcon_core::runner::{CommandRunner, Invocation};
use rcon_core::session::SessionManager;

use models::{CommandOutcome, Credentials};

use std::path::Path;
use std::sync::{Arc, Mutex};

/// Runner that records command text and always succeeds.
#[derive(Clone, Default)]
pub struct StubRunner {
    commands: Arc<Mutex<Vec<String>>>,
}

impl StubRunner {
    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }
}

impl CommandRunner for StubRunner {
    async fn run(&self, _credentials: &Credentials, invocation: &Invocation) -> CommandOutcome {
        self.commands
            .lock()
            .unwrap()
            .push(invocation.command_text().to_string());
        CommandOutcome::success("ok")
    }
}

/// Session over `dir/config.json`, configured when `configured` is set.
pub fn session_in(dir: &Path, configured: bool) -> (SessionManager<StubRunner>, StubRunner) {
    let path = dir.join("config.json");
    if configured {
        std::fs::write(
            &path,
            r#"{"server_ip": "mc.example.org", "port": "25575", "password": "pw"}"#,
        )
        .unwrap();
    }

    let store = Arc::new(ConfigStore::new(path));
    store.load();

    let runner = StubRunner::default();
    (SessionManager::new(store, runner.clone()), runner)
}
