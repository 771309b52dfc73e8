//! Messages carried from fetch tasks back to the UI loop.

use crate::events::Panel;
use crate::logging::LogLevel;
use crate::models::{
    Currency, LogEntry, MutationResponse, PricingConfig, Summary, SystemInfo, TasksResponse,
    TokenUsageSeries, VersionResponse,
};

/// A successfully decoded panel response.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Summary(Summary),
    System(SystemInfo),
    Version(VersionResponse),
    TokenUsage(TokenUsageSeries),
    Tasks(TasksResponse),
    Logs(Vec<LogEntry>),
    Pricing(PricingConfig),
}

impl Payload {
    pub fn panel(&self) -> Panel {
        match self {
            Payload::Summary(_) => Panel::Summary,
            Payload::System(_) => Panel::System,
            Payload::Version(_) => Panel::Version,
            Payload::TokenUsage(_) => Panel::TokenUsage,
            Payload::Tasks(_) => Panel::Tasks,
            Payload::Logs(_) => Panel::Logs,
            Payload::Pricing(_) => Panel::Pricing,
        }
    }
}

/// A write operation against the pricing configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    SavePricing { model: String },
    DeletePricing { model: String },
    ResetPricing,
    SetCurrency(Currency),
    UpdateRate { auto: bool },
}

impl Mutation {
    pub fn success_message(&self, response: &MutationResponse) -> String {
        match self {
            Mutation::SavePricing { .. } => "定价已保存".to_string(),
            Mutation::DeletePricing { .. } => "定价已删除".to_string(),
            Mutation::ResetPricing => "已重置为默认定价".to_string(),
            Mutation::SetCurrency(currency) => format!("显示货币已切换为 {}", currency),
            Mutation::UpdateRate { .. } => match response.rate {
                Some(rate) => format!("汇率已更新: {}", rate),
                None => "汇率已更新".to_string(),
            },
        }
    }

    /// Message for a response with `success: false`.
    pub fn rejected_message(&self, response: &MutationResponse) -> String {
        let fallback = match self {
            Mutation::SavePricing { .. } => "保存失败",
            Mutation::DeletePricing { .. } => return "删除失败".to_string(),
            Mutation::ResetPricing => return "重置失败".to_string(),
            Mutation::SetCurrency(_) => return "切换货币失败".to_string(),
            Mutation::UpdateRate { .. } => "更新失败",
        };
        response
            .error
            .clone()
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| fallback.to_string())
    }

    /// Message for a request that never produced a response.
    pub fn failed_message(&self, error: &str) -> String {
        match self {
            Mutation::SavePricing { .. } => format!("保存失败: {}", error),
            Mutation::DeletePricing { .. } => format!("删除失败: {}", error),
            Mutation::ResetPricing => format!("重置失败: {}", error),
            Mutation::SetCurrency(_) => "切换货币失败".to_string(),
            Mutation::UpdateRate { .. } => format!("更新汇率失败: {}", error),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    Loaded {
        generation: u64,
        payload: Payload,
    },
    LoadFailed {
        panel: Panel,
        generation: u64,
        message: String,
        level: LogLevel,
    },
    Mutated {
        mutation: Mutation,
        result: Result<MutationResponse, String>,
    },
    /// All four summary loads of a cycle have finished.
    RefreshCycleDone { manual: bool },
    /// The periodic refresh timer fired.
    Tick,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_message_prefers_server_error() {
        let response = MutationResponse {
            success: false,
            error: Some("model locked".to_string()),
            rate: None,
        };
        let save = Mutation::SavePricing {
            model: "gpt-4o".to_string(),
        };
        assert_eq!(save.rejected_message(&response), "model locked");
        assert_eq!(
            save.rejected_message(&MutationResponse::default()),
            "保存失败"
        );
        assert_eq!(
            Mutation::ResetPricing.rejected_message(&response),
            "重置失败"
        );
    }

    #[test]
    fn test_rate_success_message_includes_rate() {
        let response = MutationResponse {
            success: true,
            error: None,
            rate: Some(7.18),
        };
        assert_eq!(
            Mutation::UpdateRate { auto: true }.success_message(&response),
            "汇率已更新: 7.18"
        );
        assert_eq!(
            Mutation::SetCurrency(Currency::Usd).success_message(&response),
            "显示货币已切换为 USD"
        );
    }
}
