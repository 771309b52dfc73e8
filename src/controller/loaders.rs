//! Panel loaders.
//!
//! Each load is one GET whose outcome is reported to the UI loop as an
//! [`Update`]. Failures never retry; they only reach diagnostics.

use super::updates::{Payload, Update};
use crate::api::MonitorApi;
use crate::api::error::ApiError;
use crate::consts::cli_consts::refresh::TOKEN_USAGE_DAYS;
use crate::events::Panel;
use crate::network::ErrorHandler;
use tokio::sync::mpsc;

/// Panels reloaded together on every refresh cycle.
pub const SUMMARY_PANELS: [Panel; 4] = [
    Panel::Summary,
    Panel::System,
    Panel::Version,
    Panel::TokenUsage,
];

/// Issue the GET backing `panel`.
pub async fn fetch_panel(
    api: &dyn MonitorApi,
    panel: Panel,
    log_days: u32,
) -> Result<Payload, ApiError> {
    Ok(match panel {
        Panel::Summary => Payload::Summary(api.get_summary().await?),
        Panel::System => Payload::System(api.get_system().await?),
        Panel::Version => Payload::Version(api.get_version().await?),
        Panel::TokenUsage => Payload::TokenUsage(api.get_token_usage(TOKEN_USAGE_DAYS).await?),
        Panel::Tasks => Payload::Tasks(api.get_tasks().await?),
        Panel::Logs => Payload::Logs(api.get_logs(log_days).await?),
        Panel::Pricing => Payload::Pricing(api.get_pricing().await?),
    })
}

/// Turn a load result into the update sent to the UI loop.
pub fn load_update(
    panel: Panel,
    generation: u64,
    result: Result<Payload, ApiError>,
    error_handler: &ErrorHandler,
) -> Update {
    match result {
        Ok(payload) => Update::Loaded {
            generation,
            payload,
        },
        Err(e) => Update::LoadFailed {
            panel,
            generation,
            level: error_handler.classify_error(&e),
            message: e.to_string(),
        },
    }
}

/// Fetch `panel` and report the outcome.
pub async fn load_and_report(
    api: &dyn MonitorApi,
    updates: &mpsc::Sender<Update>,
    error_handler: &ErrorHandler,
    panel: Panel,
    generation: u64,
    log_days: u32,
) {
    let result = fetch_panel(api, panel, log_days).await;
    let _ = updates
        .send(load_update(panel, generation, result, error_handler))
        .await;
}
