use clap::Parser;
use gh_explorer::cli::{Cli, handle_command};
use gh_explorer::config::load_config_from;
use gh_explorer::credentials::CredentialStore;
use gh_explorer::data_manager::DataManager;
use gh_explorer::logger::setup_logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load config first to get log level
    let mut config = load_config_from(cli.config.as_deref()).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {}", e);
        std::process::exit(1);
    });

    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    // Keep the guard alive so log messages are flushed on exit
    let _guard = setup_logging(&config);

    tracing::info!("gh-explorer starting");

    let credentials = CredentialStore::new().unwrap_or_else(|e| {
        eprintln!("Failed to initialize credential storage: {}", e);
        std::process::exit(1);
    });

    // DataManagerを初期化
    let data_manager = match DataManager::new(&config, credentials) {
        Ok(manager) => manager,
        Err(e) => {
            eprintln!("Failed to initialize: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = handle_command(cli.command, data_manager).await {
        tracing::error!("Command failed: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
