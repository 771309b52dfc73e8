//! Wire types of the monitor backend.
//!
//! Every response field is optional or defaulted: the dashboard renders
//! placeholders for whatever the backend leaves out.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// =============================================================================
// SUMMARY
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Summary {
    pub gateway: Option<GatewayStatus>,
    pub tasks: Option<TaskCounts>,
    pub token_usage: Option<TokenUsage>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GatewayStatus {
    pub online: bool,
    pub uptime_seconds: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TaskCounts {
    pub running: u64,
    pub completed_24h: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TokenUsage {
    pub today: Option<UsagePeriod>,
    pub week: Option<UsagePeriod>,
    pub total_sessions: Option<u64>,
}

impl TokenUsage {
    pub fn today_total(&self) -> u64 {
        self.today.as_ref().map(|p| p.total).unwrap_or(0)
    }

    pub fn week_total(&self) -> u64 {
        self.week.as_ref().map(|p| p.total).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct UsagePeriod {
    pub input: u64,
    pub output: u64,
    pub total: u64,
}

// =============================================================================
// SYSTEM / VERSION
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SystemInfo {
    pub hostname: Option<String>,
    pub os: Option<String>,
    pub architecture: Option<String>,
    pub ip: Option<String>,
    pub cpu: Option<CpuInfo>,
    pub memory: Option<MemoryInfo>,
    pub disk: Option<DiskInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CpuInfo {
    pub count: Option<u32>,
    pub percent: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MemoryInfo {
    pub total_gb: Option<f64>,
    pub available_gb: Option<f64>,
    pub percent: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DiskInfo {
    pub total_gb: Option<f64>,
    pub free_gb: Option<f64>,
}

impl SystemInfo {
    pub fn cpu_percent(&self) -> f64 {
        self.cpu.as_ref().and_then(|c| c.percent).unwrap_or(0.0)
    }

    pub fn memory_percent(&self) -> f64 {
        self.memory.as_ref().and_then(|m| m.percent).unwrap_or(0.0)
    }

    /// Used share of the disk, 0 when either figure is missing.
    pub fn disk_percent(&self) -> f64 {
        match self.disk.as_ref().map(|d| (d.total_gb, d.free_gb)) {
            Some((Some(total), Some(free))) if total > 0.0 => (total - free) / total * 100.0,
            _ => 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct VersionResponse {
    pub monitor: Option<String>,
    pub openclaw: Option<VersionInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct VersionInfo {
    pub current: Option<String>,
    pub latest: Option<String>,
    pub update_available: bool,
}

// =============================================================================
// TOKEN USAGE / TASKS / LOGS
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TokenUsageSeries {
    pub daily: Vec<DailyUsage>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DailyUsage {
    pub date: String,
    pub input: u64,
    pub output: u64,
    pub cost: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TasksResponse {
    pub running: u64,
    pub completed_24h: u64,
    pub tasks: Option<Vec<Task>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Task {
    pub id: String,
    pub status: String,
    pub model: String,
    pub last_active: Option<String>,
    pub duration_minutes: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LogEntry {
    pub level: String,
    pub message: String,
    pub time: Option<String>,
    pub count: u64,
}

// =============================================================================
// PRICING
// =============================================================================

/// Display currency accepted by the backend.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, strum::Display)]
pub enum Currency {
    #[default]
    #[strum(serialize = "CNY")]
    Cny,
    #[strum(serialize = "USD")]
    Usd,
}

impl Currency {
    /// Anything other than `CNY` is priced in dollars.
    pub fn from_code(code: &str) -> Self {
        if code.eq_ignore_ascii_case("CNY") {
            Currency::Cny
        } else {
            Currency::Usd
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Cny => "¥",
            Currency::Usd => "$",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Currency::Cny => Currency::Usd,
            Currency::Usd => Currency::Cny,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub currency: Option<String>,
    pub exchange_rate: Option<ExchangeRate>,
    #[serde(deserialize_with = "ordered_models")]
    pub models: Vec<(String, ModelPricing)>,
    pub history: Vec<PricingHistoryEntry>,
}

impl PricingConfig {
    pub fn display_currency(&self) -> Currency {
        self.currency
            .as_deref()
            .map(Currency::from_code)
            .unwrap_or_default()
    }

    pub fn model(&self, name: &str) -> Option<&ModelPricing> {
        self.models
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, pricing)| pricing)
    }

    /// Entries shown in the editable table, i.e. everything but the default.
    pub fn editable_models(&self) -> Vec<&(String, ModelPricing)> {
        self.models
            .iter()
            .filter(|(key, _)| key != crate::consts::cli_consts::pricing::DEFAULT_MODEL_KEY)
            .collect()
    }

    pub fn usd_to_cny(&self) -> Option<f64> {
        self.exchange_rate.as_ref().and_then(|r| r.usd_to_cny)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ModelPricing {
    pub provider: Option<String>,
    pub input_per_1k: Option<f64>,
    pub output_per_1k: Option<f64>,
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExchangeRate {
    #[serde(rename = "USD_TO_CNY")]
    pub usd_to_cny: Option<f64>,
    pub last_updated: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PricingHistoryEntry {
    pub model: String,
    pub action: Option<String>,
    pub old_input: Option<f64>,
    pub new_input: Option<f64>,
    pub old_output: Option<f64>,
    pub new_output: Option<f64>,
    pub date: Option<String>,
    pub reason: Option<String>,
}

impl PricingHistoryEntry {
    pub fn is_reset(&self) -> bool {
        self.action.as_deref() == Some("reset_to_default")
    }
}

/// Keeps the backend's key order, which a `BTreeMap` would discard.
fn ordered_models<'de, D>(deserializer: D) -> Result<Vec<(String, ModelPricing)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OrderedModels;

    impl<'de> Visitor<'de> for OrderedModels {
        type Value = Vec<(String, ModelPricing)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of model name to pricing")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut models = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((name, pricing)) = map.next_entry::<String, ModelPricing>()? {
                models.push((name, pricing));
            }
            Ok(models)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(OrderedModels)
}

// =============================================================================
// MUTATIONS
// =============================================================================

/// Body of `POST /api/pricing`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingUpdate {
    pub model: String,
    pub input_per_1k: f64,
    pub output_per_1k: f64,
    pub currency: String,
    pub provider: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrencyRequest {
    pub currency: String,
}

/// Body of `POST /api/pricing/exchange-rate`. A `null` rate asks the
/// backend to fetch a live rate itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExchangeRateRequest {
    pub rate: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MutationResponse {
    pub success: bool,
    pub error: Option<String>,
    pub rate: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_models_keep_server_order() {
        let json = r#"{
            "currency": "USD",
            "models": {
                "zeta": {"input_per_1k": 1.0, "output_per_1k": 2.0},
                "default": {"input_per_1k": 0.003, "output_per_1k": 0.015},
                "alpha": {"provider": "OpenAI"}
            }
        }"#;
        let config: PricingConfig = serde_json::from_str(json).unwrap();

        let names: Vec<&str> = config.models.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["zeta", "default", "alpha"]);

        let editable: Vec<&str> = config
            .editable_models()
            .iter()
            .map(|(n, _)| n.as_str())
            .collect();
        assert_eq!(editable, vec!["zeta", "alpha"]);
        assert_eq!(config.display_currency(), Currency::Usd);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let summary: Summary = serde_json::from_str("{}").unwrap();
        assert!(summary.gateway.is_none());

        let config: PricingConfig = serde_json::from_str(r#"{"models": null}"#).unwrap();
        assert!(config.models.is_empty());
        assert_eq!(config.display_currency(), Currency::Cny);

        let tasks: TasksResponse = serde_json::from_str(r#"{"running": 2}"#).unwrap();
        assert_eq!(tasks.running, 2);
        assert!(tasks.tasks.is_none());
    }

    #[test]
    fn test_exchange_rate_uses_backend_key() {
        let rate: ExchangeRate =
            serde_json::from_str(r#"{"USD_TO_CNY": 7.1, "last_updated": null}"#).unwrap();
        assert_eq!(rate.usd_to_cny, Some(7.1));
    }

    #[test]
    fn test_auto_rate_request_serializes_null() {
        let body = serde_json::to_string(&ExchangeRateRequest { rate: None }).unwrap();
        assert_eq!(body, r#"{"rate":null}"#);
    }

    #[test]
    fn test_disk_percent() {
        let info = SystemInfo {
            disk: Some(DiskInfo {
                total_gb: Some(200.0),
                free_gb: Some(50.0),
            }),
            ..Default::default()
        };
        assert_eq!(info.disk_percent(), 75.0);
        assert_eq!(SystemInfo::default().disk_percent(), 0.0);
    }
}
