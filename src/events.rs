//! Event System
//!
//! Diagnostic events raised by loaders and mutations

use crate::logging::{LogLevel, should_log_with_env};
use chrono::Local;
use std::fmt::Display;

/// A region of the dashboard backed by one endpoint.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, strum::Display)]
pub enum Panel {
    Summary,
    System,
    Version,
    TokenUsage,
    Tasks,
    Logs,
    Pricing,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    /// A load or mutation completed.
    Success,
    /// A load or mutation failed.
    Error,
    /// A refresh cycle started.
    Refresh,
    /// A response was dropped because a newer one had already been applied.
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub panel: Panel,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
}

impl Event {
    pub fn new(panel: Panel, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self {
            panel,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
        }
    }

    pub fn load_failed(panel: Panel, msg: String, log_level: LogLevel) -> Self {
        Self::new(panel, msg, EventType::Error, log_level)
    }

    pub fn stale(panel: Panel, generation: u64) -> Self {
        Self::new(
            panel,
            format!("Dropped stale response (generation {})", generation),
            EventType::Stale,
            LogLevel::Debug,
        )
    }

    pub fn refresh(msg: impl Into<String>) -> Self {
        Self::new(Panel::Summary, msg.into(), EventType::Refresh, LogLevel::Debug)
    }

    /// Forward the event to the `log` facade.
    pub fn emit(&self) {
        log::log!(self.log_level.into(), "[{}] {}", self.panel, self.msg);
    }

    pub fn should_display(&self) -> bool {
        if self.event_type == EventType::Error || self.log_level >= LogLevel::Warn {
            return true;
        }
        should_log_with_env(self.log_level)
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}: {}",
            self.event_type, self.timestamp, self.panel, self.msg
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_always_display() {
        let event = Event::load_failed(Panel::Tasks, "boom".to_string(), LogLevel::Debug);
        assert!(event.should_display());
    }

    #[test]
    fn test_display_includes_panel_and_message() {
        let event = Event::new(
            Panel::TokenUsage,
            "timed out".to_string(),
            EventType::Error,
            LogLevel::Warn,
        );
        let text = event.to_string();
        assert!(text.starts_with("Error ["));
        assert!(text.ends_with("TokenUsage: timed out"));
    }
}
