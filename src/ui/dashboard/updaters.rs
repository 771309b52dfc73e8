//! Dashboard state update logic
//!
//! Applies decoded responses and per-frame housekeeping to the state

use super::chart::UsageChart;
use super::state::DashboardState;
use crate::controller::updates::Payload;

use std::time::Instant;

impl DashboardState {
    /// Per-frame update: advance the tick and drop expired toasts.
    pub fn update(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        self.expire_toasts(Instant::now());
    }

    /// Replace the panel's data with a freshly loaded payload.
    pub fn apply_payload(&mut self, payload: Payload) {
        match payload {
            Payload::Summary(summary) => self.summary = Some(summary),
            Payload::System(system) => self.system = Some(system),
            Payload::Version(version) => self.version = Some(version),
            Payload::TokenUsage(series) => {
                self.usage_chart = Some(UsageChart::build(&series.daily, self.theme));
            }
            Payload::Tasks(tasks) => self.tasks = Some(tasks),
            Payload::Logs(logs) => self.logs = Some(logs),
            Payload::Pricing(pricing) => {
                self.currency = pricing.display_currency();
                if !self.editing_rate {
                    if let Some(rate) = pricing.exchange_rate.as_ref() {
                        let value = rate
                            .usd_to_cny
                            .unwrap_or(crate::consts::cli_consts::pricing::FALLBACK_USD_TO_CNY);
                        self.rate_input = value.to_string();
                    }
                }
                self.pricing = Some(pricing);
                self.clamp_selection();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Theme;
    use crate::environment::Environment;
    use crate::models::{
        Currency, DailyUsage, ExchangeRate, ModelPricing, PricingConfig, TokenUsageSeries,
    };

    fn state() -> DashboardState {
        DashboardState::new(Environment::Local, Theme::Light, 7, false)
    }

    fn pricing(models: &[&str], rate: Option<f64>) -> PricingConfig {
        PricingConfig {
            currency: Some("USD".to_string()),
            exchange_rate: Some(ExchangeRate {
                usd_to_cny: rate,
                last_updated: None,
            }),
            models: models
                .iter()
                .map(|m| (m.to_string(), ModelPricing::default()))
                .collect(),
            history: Vec::new(),
        }
    }

    #[test]
    fn test_pricing_load_sets_currency_and_rate_input() {
        let mut state = state();
        state.apply_payload(Payload::Pricing(pricing(&["a"], Some(7.1))));
        assert_eq!(state.currency, Currency::Usd);
        assert_eq!(state.rate_input, "7.1");

        state.apply_payload(Payload::Pricing(pricing(&["a"], None)));
        assert_eq!(state.rate_input, "7.25");
    }

    #[test]
    fn test_pricing_load_keeps_rate_being_edited() {
        let mut state = state();
        state.editing_rate = true;
        state.rate_input = "7.3".to_string();
        state.apply_payload(Payload::Pricing(pricing(&["a"], Some(7.1))));
        assert_eq!(state.rate_input, "7.3");
    }

    #[test]
    fn test_pricing_reload_clamps_selection() {
        let mut state = state();
        state.apply_payload(Payload::Pricing(pricing(&["a", "b", "c"], None)));
        state.pricing_selected = 2;
        state.apply_payload(Payload::Pricing(pricing(&["a", "b"], None)));
        assert_eq!(state.pricing_selected, 1);
    }

    #[test]
    fn test_token_usage_rebuilds_chart_with_current_theme() {
        let mut state = state();
        let series = TokenUsageSeries {
            daily: vec![DailyUsage {
                date: "2024-05-06".to_string(),
                input: 100,
                output: 50,
                cost: 0.1,
            }],
        };
        state.apply_payload(Payload::TokenUsage(series.clone()));
        let first = state.usage_chart.clone().unwrap();
        assert_eq!(first.days[0].label, "05-06");

        state.theme = Theme::Dark;
        state.apply_payload(Payload::TokenUsage(series));
        let second = state.usage_chart.clone().unwrap();
        assert_ne!(first.palette, second.palette);
    }
}
