use rcon_panel::commands::{Flow, PanelCommand};
use rcon_panel::error::PanelError;
use rcon_panel::logger::initialize as LoggerInitialize;
use rcon_panel::printer;
use rcon_panel::settings::{PanelSettings, load_dotenv};

use rcon_core::config::ConfigStore;
use rcon_core::runner::McrconRunner;
use rcon_core::session::SessionManager;

use common::ErrorLocation;

use std::fs::create_dir_all;
use std::panic::Location;
use std::process::ExitCode;
use std::sync::Arc;

use log::{error, info};
use tokio::io::{AsyncBufReadExt, BufReader, stdin};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), PanelError> {
    let env_file = load_dotenv();
    let settings = PanelSettings::from_env()?;

    create_dir_all(&settings.log_dir).map_err(|e| PanelError::Panel {
        message: format!("Failed to create log directory: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })?;

    // Initialize logger FIRST
    LoggerInitialize(&settings.log_dir)?;

    info!("RCON panel starting");
    info!("Log directory: {}", settings.log_dir.display());
    if let Some(path) = env_file {
        info!("Loaded .env from: {}", path.display());
    }

    let store = Arc::new(ConfigStore::new(&settings.config_path));
    let runner = McrconRunner::new(&settings.client_path, settings.timeout);
    let session = SessionManager::new(store, runner);

    let printer_task = printer::spawn(&session);
    session.start(settings.poll_interval);

    let mut lines = BufReader::new(stdin()).lines();
    loop {
        let line = lines.next_line().await.map_err(|e| PanelError::Panel {
            message: format!("Failed to read input: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        // EOF
        let Some(line) = line else {
            break;
        };

        let Some(command) = PanelCommand::parse(&line) else {
            continue;
        };

        match command.execute(&session) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Print(text)) => println!("{text}"),
            Ok(Flow::Quit) => break,
            Err(e) => error!("{e}"),
        }
    }

    info!("RCON panel shutting down");
    session.stop_watching();
    printer_task.abort();

    Ok(())
}
