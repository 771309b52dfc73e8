//! Session setup and initialization

use crate::api::{Credentials, MonitorApi, MonitorClient};
use crate::config::Config;
use crate::consts::cli_consts::UPDATE_QUEUE_SIZE;
use crate::consts::cli_consts::refresh::interval;
use crate::controller::DashboardController;
use crate::controller::updates::Update;
use crate::environment::Environment;
use crate::workers::refresher::spawn_refresher;
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

/// Session data for both TUI and headless modes
pub struct SessionData {
    /// Dashboard controller, not yet started
    pub controller: DashboardController,
    /// Fetch results and refresh ticks
    pub update_receiver: mpsc::Receiver<Update>,
    /// Join handles for background workers
    pub join_handles: Vec<JoinHandle<()>>,
    /// Shutdown sender to stop all workers
    pub shutdown_sender: broadcast::Sender<()>,
    /// Backend base URL, for startup messages
    pub base_url: String,
}

/// Options collected from the command line.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub environment: Environment,
    pub credentials: Credentials,
    pub config: Config,
    /// Where preference changes are persisted
    pub config_path: Option<PathBuf>,
    pub with_background: bool,
}

/// Sets up a dashboard session
///
/// This function handles the setup shared by every mode:
/// 1. Creates the backend client
/// 2. Sets up the update and shutdown channels
/// 3. Starts the refresh worker, exactly once per session
/// 4. Returns session data for mode-specific handling
///
/// # Arguments
/// * `options` - Resolved backend, credentials and preferences
/// * `with_refresher` - Whether to start the periodic refresh worker
///
/// # Returns
/// * `Ok(SessionData)` - Successfully set up session
/// * `Err` - The HTTP client could not be built
pub fn setup_session(
    options: SessionOptions,
    with_refresher: bool,
) -> Result<SessionData, Box<dyn Error>> {
    let client = MonitorClient::new(options.environment, options.credentials)?;
    let base_url = client.environment().base_url();
    log::debug!("Monitor backend: {}", base_url);

    let (update_sender, update_receiver) = mpsc::channel::<Update>(UPDATE_QUEUE_SIZE);

    // Create shutdown channel - only one shutdown signal needed
    let (shutdown_sender, _) = broadcast::channel(1);

    let mut join_handles = Vec::new();
    if with_refresher {
        join_handles.push(spawn_refresher(
            interval(),
            update_sender.clone(),
            shutdown_sender.subscribe(),
        ));
    }

    let controller = DashboardController::new(
        Arc::new(client),
        update_sender,
        options.config,
        options.config_path,
        options.with_background,
    );

    Ok(SessionData {
        controller,
        update_receiver,
        join_handles,
        shutdown_sender,
        base_url,
    })
}
