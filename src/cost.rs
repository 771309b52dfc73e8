//! Cost preview for the overview cards.
//!
//! A rough estimate only: the backend never reports the input/output split
//! of the summary totals, so a fixed 60/40 split is assumed and the
//! "default" pricing entry is used for every token.

use crate::consts::cli_consts::pricing::{
    DEFAULT_MODEL_KEY, FALLBACK_INPUT_PER_1K, FALLBACK_OUTPUT_PER_1K, FALLBACK_USD_TO_CNY,
    INPUT_SHARE,
};
use crate::format::format_currency;
use crate::models::{Currency, PricingConfig, TokenUsage};

/// Per-1k rates used by the estimator.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rates {
    pub input_per_1k: f64,
    pub output_per_1k: f64,
}

impl Rates {
    /// Rates of the pricing config's default entry, or the built-in fallback.
    pub fn default_entry(pricing: &PricingConfig) -> Self {
        match pricing.model(DEFAULT_MODEL_KEY) {
            Some(entry) => Self {
                input_per_1k: entry.input_per_1k.unwrap_or(0.0),
                output_per_1k: entry.output_per_1k.unwrap_or(0.0),
            },
            None => Self {
                input_per_1k: FALLBACK_INPUT_PER_1K,
                output_per_1k: FALLBACK_OUTPUT_PER_1K,
            },
        }
    }
}

/// Estimated cost of `tokens` assuming the fixed input/output split.
pub fn estimate_cost(tokens: u64, rates: Rates) -> f64 {
    if tokens == 0 {
        return 0.0;
    }
    let tokens = tokens as f64;
    let input_tokens = tokens * INPUT_SHARE;
    let output_tokens = tokens * (1.0 - INPUT_SHARE);
    (input_tokens / 1000.0) * rates.input_per_1k + (output_tokens / 1000.0) * rates.output_per_1k
}

/// Multiplier from the estimator's currency (USD) to the display currency.
pub fn display_rate(currency: Currency, pricing: &PricingConfig) -> f64 {
    match currency {
        Currency::Cny => pricing.usd_to_cny().unwrap_or(FALLBACK_USD_TO_CNY),
        Currency::Usd => 1.0,
    }
}

/// Formatted today/week cost preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostPreview {
    pub today: String,
    pub week: String,
}

impl CostPreview {
    pub fn compute(usage: &TokenUsage, pricing: &PricingConfig, currency: Currency) -> Self {
        let rates = Rates::default_entry(pricing);
        let rate = display_rate(currency, pricing);
        Self {
            today: format_currency(estimate_cost(usage.today_total(), rates) * rate, currency),
            week: format_currency(estimate_cost(usage.week_total(), rates) * rate, currency),
        }
    }
}
