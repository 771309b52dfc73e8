//! Dashboard state management
//!
//! Contains the main dashboard state struct and related enums

use super::chart::UsageChart;
use super::form::PricingForm;
use crate::config::Theme;
use crate::consts::cli_consts::{MAX_DIAGNOSTICS, MAX_TOASTS, ui::toast_ttl};
use crate::environment::Environment;
use crate::events::Event;
use crate::models::{
    Currency, LogEntry, PricingConfig, Summary, SystemInfo, TasksResponse, VersionResponse,
};

use std::collections::VecDeque;
use std::time::Instant;

/// Tabs of the dashboard. Exactly one is active at a time.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Overview,
    Pricing,
    Tasks,
    Logs,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Overview, Tab::Pricing, Tab::Tasks, Tab::Logs];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Overview => "概览",
            Tab::Pricing => "定价",
            Tab::Tasks => "任务",
            Tab::Logs => "日志",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn next(&self) -> Tab {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Tab {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

/// Transient notice shown in the footer.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub created: Instant,
}

/// Action waiting for a y/n answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirm {
    Delete(String),
    Reset,
}

impl Confirm {
    pub fn prompt(&self) -> String {
        match self {
            Confirm::Delete(model) => format!("确定要删除 {} 的定价配置吗？", model),
            Confirm::Reset => "确定要重置所有定价为默认值吗？此操作不可恢复。".to_string(),
        }
    }
}

#[derive(Debug)]
pub struct DashboardState {
    /// The backend the dashboard is connected to.
    pub environment: Environment,
    pub theme: Theme,
    pub active_tab: Tab,
    /// Whether to paint the theme background
    pub with_background_color: bool,

    pub summary: Option<Summary>,
    pub system: Option<SystemInfo>,
    pub version: Option<VersionResponse>,
    /// Rebuilt on every token usage load.
    pub usage_chart: Option<UsageChart>,
    pub tasks: Option<TasksResponse>,
    pub logs: Option<Vec<LogEntry>>,
    /// Cached pricing payload; the cost preview is skipped until it exists.
    pub pricing: Option<PricingConfig>,

    /// Display currency, as last confirmed by the backend.
    pub currency: Currency,
    /// Contents of the exchange rate input.
    pub rate_input: String,
    /// Whether keystrokes go to the exchange rate input.
    pub editing_rate: bool,
    /// Day range of the logs tab.
    pub log_days: u32,
    /// Selected row of the pricing table.
    pub pricing_selected: usize,

    pub modal: Option<PricingForm>,
    pub confirm: Option<Confirm>,

    pub toasts: VecDeque<Toast>,
    pub diagnostics: VecDeque<Event>,
    pub show_diagnostics: bool,
    /// Local time of the last completed refresh cycle.
    pub last_refresh: Option<String>,
    /// Animation tick counter
    pub tick: usize,
}

impl DashboardState {
    pub fn new(
        environment: Environment,
        theme: Theme,
        log_days: u32,
        with_background_color: bool,
    ) -> Self {
        Self {
            environment,
            theme,
            active_tab: Tab::default(),
            with_background_color,
            summary: None,
            system: None,
            version: None,
            usage_chart: None,
            tasks: None,
            logs: None,
            pricing: None,
            currency: Currency::default(),
            rate_input: String::new(),
            editing_rate: false,
            log_days,
            pricing_selected: 0,
            modal: None,
            confirm: None,
            toasts: VecDeque::new(),
            diagnostics: VecDeque::new(),
            show_diagnostics: false,
            last_refresh: None,
            tick: 0,
        }
    }

    pub fn push_toast(&mut self, message: impl Into<String>, kind: ToastKind) {
        if self.toasts.len() >= MAX_TOASTS {
            self.toasts.pop_front();
        }
        self.toasts.push_back(Toast {
            message: message.into(),
            kind,
            created: Instant::now(),
        });
    }

    pub fn expire_toasts(&mut self, now: Instant) {
        self.toasts
            .retain(|toast| now.saturating_duration_since(toast.created) < toast_ttl());
    }

    /// Add an event to the diagnostics ring with size limit
    pub fn add_diagnostic(&mut self, event: Event) {
        event.emit();
        if self.diagnostics.len() >= MAX_DIAGNOSTICS {
            self.diagnostics.pop_front();
        }
        self.diagnostics.push_back(event);
    }

    /// Name of the selected editable pricing entry.
    pub fn selected_model(&self) -> Option<String> {
        self.pricing.as_ref().and_then(|pricing| {
            pricing
                .editable_models()
                .get(self.pricing_selected)
                .map(|(name, _)| name.clone())
        })
    }

    pub fn select_next_model(&mut self) {
        let count = self.editable_model_count();
        if count > 0 {
            self.pricing_selected = (self.pricing_selected + 1) % count;
        }
    }

    pub fn select_prev_model(&mut self) {
        let count = self.editable_model_count();
        if count > 0 {
            self.pricing_selected = (self.pricing_selected + count - 1) % count;
        }
    }

    /// Whether a modal, dialog or input currently captures key presses.
    pub fn is_capturing_input(&self) -> bool {
        self.modal.is_some() || self.confirm.is_some() || self.editing_rate
    }

    /// Start typing a manual exchange rate.
    pub fn begin_rate_edit(&mut self) {
        self.editing_rate = true;
    }

    pub fn rate_input_char(&mut self, c: char) {
        if c.is_ascii_digit() || c == '.' {
            self.rate_input.push(c);
        }
    }

    pub fn rate_backspace(&mut self) {
        self.rate_input.pop();
    }

    /// Leave the rate input and restore the last loaded rate.
    pub fn cancel_rate_edit(&mut self) {
        self.editing_rate = false;
        if let Some(rate) = self.pricing.as_ref().and_then(|p| p.exchange_rate.as_ref()) {
            self.rate_input = rate
                .usd_to_cny
                .unwrap_or(crate::consts::cli_consts::pricing::FALLBACK_USD_TO_CNY)
                .to_string();
        }
    }

    fn editable_model_count(&self) -> usize {
        self.pricing
            .as_ref()
            .map(|p| p.editable_models().len())
            .unwrap_or(0)
    }

    pub(crate) fn clamp_selection(&mut self) {
        let count = self.editable_model_count();
        if self.pricing_selected >= count {
            self.pricing_selected = count.saturating_sub(1);
        }
    }
}
