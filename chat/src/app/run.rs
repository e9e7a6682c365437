//! Main application run loop

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::app::options::AppOptions;
use crate::app::state::AppState;
use crate::errors::ChatError;
use crate::server::serve::serve;
use crate::server::state::ServerState;

/// Run the chat service until `shutdown_signal` resolves
pub async fn run(
    options: AppOptions,
    api_key: SecretString,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> Result<(), ChatError> {
    info!("Initializing OneFlow chat service...");

    let (shutdown_tx, _shutdown_rx): (broadcast::Sender<()>, _) = broadcast::channel(1);
    let mut shutdown_manager = ShutdownManager::new(shutdown_tx.clone(), options.max_shutdown_delay);

    if let Err(e) = init(&options, api_key, &shutdown_tx, &mut shutdown_manager).await {
        error!("Failed to start chat service: {}", e);
        shutdown_manager.shutdown().await?;
        return Err(e);
    }

    shutdown_signal.await;
    info!("Shutdown signal received, shutting down...");

    drop(shutdown_tx);
    shutdown_manager.shutdown().await
}

// =============================== INITIALIZATION ================================== //

async fn init(
    options: &AppOptions,
    api_key: SecretString,
    shutdown_tx: &broadcast::Sender<()>,
    shutdown_manager: &mut ShutdownManager,
) -> Result<(), ChatError> {
    let app_state = Arc::new(AppState::init(options, api_key).await?);
    shutdown_manager.with_app_state(app_state.clone())?;

    init_socket_server(options, app_state, shutdown_manager, shutdown_tx.subscribe()).await
}

async fn init_socket_server(
    options: &AppOptions,
    app_state: Arc<AppState>,
    shutdown_manager: &mut ShutdownManager,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> Result<(), ChatError> {
    info!("Initializing chat HTTP server...");

    let server_state = ServerState::new(app_state.chat.clone());

    let server_handle = serve(&options.server, Arc::new(server_state), async move {
        let _ = shutdown_rx.recv().await;
    })
    .await?;

    shutdown_manager.with_socket_server_handle(server_handle)?;
    Ok(())
}

// ================================= SHUTDOWN ===================================== //

struct ShutdownManager {
    shutdown_tx: broadcast::Sender<()>,
    max_shutdown_delay: Duration,
    app_state: Option<Arc<AppState>>,
    socket_server_handle: Option<JoinHandle<Result<(), ChatError>>>,
}

impl ShutdownManager {
    fn new(shutdown_tx: broadcast::Sender<()>, max_shutdown_delay: Duration) -> Self {
        Self {
            shutdown_tx,
            max_shutdown_delay,
            app_state: None,
            socket_server_handle: None,
        }
    }

    fn with_app_state(&mut self, state: Arc<AppState>) -> Result<(), ChatError> {
        if self.app_state.is_some() {
            return Err(ChatError::ShutdownError("app_state already set".to_string()));
        }
        self.app_state = Some(state);
        Ok(())
    }

    fn with_socket_server_handle(
        &mut self,
        handle: JoinHandle<Result<(), ChatError>>,
    ) -> Result<(), ChatError> {
        if self.socket_server_handle.is_some() {
            return Err(ChatError::ShutdownError("server_handle already set".to_string()));
        }
        self.socket_server_handle = Some(handle);
        Ok(())
    }

    async fn shutdown(&mut self) -> Result<(), ChatError> {
        let _ = self.shutdown_tx.send(());

        match tokio::time::timeout(self.max_shutdown_delay, self.shutdown_impl()).await {
            Ok(result) => result,
            Err(_) => {
                error!(
                    "Shutdown timed out after {:?}, forcing shutdown...",
                    self.max_shutdown_delay
                );
                std::process::exit(1);
            }
        }
    }

    async fn shutdown_impl(&mut self) -> Result<(), ChatError> {
        info!("Shutting down OneFlow chat service...");

        // 1. Socket server
        if let Some(handle) = self.socket_server_handle.take() {
            handle.await.map_err(|e| ChatError::ShutdownError(e.to_string()))??;
        }

        // 2. App state
        if let Some(app_state) = self.app_state.take() {
            app_state.shutdown().await?;
        }

        info!("Shutdown complete");
        Ok(())
    }
}
