use crate::api::error::ApiError;
use crate::environment::Environment;
use crate::models::{
    Currency, LogEntry, MutationResponse, PricingConfig, PricingUpdate, Summary, SystemInfo,
    TasksResponse, TokenUsageSeries, VersionResponse,
};

pub(crate) mod client;
pub use client::{Credentials, MonitorClient};
pub mod error;

#[cfg(test)]
use mockall::automock;

/// Read and write operations of the monitor backend's REST API.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait MonitorApi: Send + Sync {
    fn environment(&self) -> &Environment;

    /// Gateway, task and token overview.
    async fn get_summary(&self) -> Result<Summary, ApiError>;

    /// Host resource statistics.
    async fn get_system(&self) -> Result<SystemInfo, ApiError>;

    /// Tool version and update flag.
    async fn get_version(&self) -> Result<VersionResponse, ApiError>;

    /// Daily token usage over the last `days` days.
    async fn get_token_usage(&self, days: u32) -> Result<TokenUsageSeries, ApiError>;

    /// Running and recently completed tasks.
    async fn get_tasks(&self) -> Result<TasksResponse, ApiError>;

    /// Aggregated error log entries of the last `days` days.
    async fn get_logs(&self, days: u32) -> Result<Vec<LogEntry>, ApiError>;

    /// The full pricing configuration.
    async fn get_pricing(&self) -> Result<PricingConfig, ApiError>;

    /// Create or update one model's pricing.
    async fn save_pricing(&self, update: &PricingUpdate) -> Result<MutationResponse, ApiError>;

    /// Delete one model's pricing.
    async fn delete_pricing(&self, model: &str) -> Result<MutationResponse, ApiError>;

    /// Restore the built-in default pricing.
    async fn reset_pricing(&self) -> Result<MutationResponse, ApiError>;

    /// Change the display currency.
    async fn set_currency(&self, currency: Currency) -> Result<MutationResponse, ApiError>;

    /// Set the USD to CNY rate, or let the backend fetch one when `rate` is `None`.
    async fn update_exchange_rate(&self, rate: Option<f64>)
    -> Result<MutationResponse, ApiError>;
}
