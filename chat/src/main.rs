//! OneFlow Chat - Entry Point
//!
//! Serves natural-language workflow generation over HTTP.

use std::env;
use std::path::PathBuf;

use oneflow_chat::app::options::AppOptions;
use oneflow_chat::app::run::run;
use oneflow_chat::catalog::NodeCatalog;
use oneflow_chat::logs::init_logging;
use oneflow_chat::storage::settings::{api_key_from_env, Settings};
use oneflow_chat::utils::{parse_cli_args, version_info};

use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Parse command line arguments
    let cli_args = parse_cli_args(env::args().skip(1));

    // Print version and exit
    let version = version_info();
    if cli_args.contains_key("version") {
        match serde_json::to_string_pretty(&version) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Failed to render version: {e}"),
        }
        return;
    }

    // Environment from .env, if present
    let _ = dotenv::dotenv();

    // Retrieve the settings file
    let settings_path = cli_args
        .get("config")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("./settings.json"));
    let settings = match Settings::load(&settings_path)
        .await
        .and_then(Settings::with_env)
    {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Unable to read settings: {e}");
            std::process::exit(1);
        }
    };

    // Initialize logging
    let _log_guard = match init_logging(settings.log_options()) {
        Ok(guard) => guard,
        Err(e) => {
            println!("Failed to initialize logging: {e}");
            None
        }
    };

    // Dump the catalog and exit
    if cli_args.contains_key("print-nodes") {
        let catalog = NodeCatalog::load(&settings.plugin_dir).await;
        match serde_json::to_string_pretty(&catalog.summary()) {
            Ok(json) => println!("{}", json),
            Err(e) => error!("Failed to render node catalog: {e}"),
        }
        return;
    }

    let api_key = match api_key_from_env() {
        Ok(key) => key,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    // Run the server
    let options = AppOptions::from_settings(&settings);
    info!(
        "Running OneFlow chat {} with options: {:?}",
        version.version, options
    );
    if let Err(e) = run(options, api_key, await_shutdown_signal()).await {
        error!("Failed to run the chat service: {e}");
        std::process::exit(1);
    }
}

async fn await_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let (mut sigterm, mut sigint) =
            match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
                (Ok(sigterm), Ok(sigint)) => (sigterm, sigint),
                _ => {
                    error!("Failed to install signal handlers, falling back to Ctrl+C");
                    let _ = tokio::signal::ctrl_c().await;
                    return;
                }
            };

        tokio::select! {
            _ = sigterm.recv() => {
                info!("SIGTERM received, shutting down...");
            }
            _ = sigint.recv() => {
                info!("SIGINT received, shutting down...");
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Ctrl+C received, shutting down...");
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {e}");
        }
        info!("Ctrl+C received, shutting down...");
    }
}
