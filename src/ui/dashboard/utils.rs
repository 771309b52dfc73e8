//! Dashboard utility functions
//!
//! Contains helper functions used across dashboard components

use crate::config::Theme;
use ratatui::prelude::Color;

/// Colours of one theme.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub danger: Color,
    pub border: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                background: Color::Rgb(15, 23, 42),
                surface: Color::Rgb(30, 41, 59),
                text: Color::Rgb(226, 232, 240),
                muted: Color::Rgb(148, 163, 184),
                accent: Color::Rgb(129, 140, 248),
                success: Color::Rgb(34, 197, 94),
                warning: Color::Rgb(245, 158, 11),
                danger: Color::Rgb(239, 68, 68),
                border: Color::Rgb(51, 65, 85),
            },
            Theme::Light => Self {
                background: Color::Rgb(248, 250, 252),
                surface: Color::Rgb(255, 255, 255),
                text: Color::Rgb(30, 41, 59),
                muted: Color::Rgb(100, 116, 139),
                accent: Color::Rgb(79, 70, 229),
                success: Color::Rgb(22, 163, 74),
                warning: Color::Rgb(217, 119, 6),
                danger: Color::Rgb(220, 38, 38),
                border: Color::Rgb(226, 232, 240),
            },
        }
    }

    /// Colour of a resource gauge by utilisation.
    pub fn usage(&self, percent: f64) -> Color {
        if percent >= 90.0 {
            self.danger
        } else if percent >= 70.0 {
            self.warning
        } else {
            self.success
        }
    }

    /// Colour of a log level label.
    pub fn level(&self, level: &str) -> Color {
        match level.to_ascii_uppercase().as_str() {
            "ERROR" | "CRITICAL" | "FATAL" => self.danger,
            "WARN" | "WARNING" => self.warning,
            _ => self.muted,
        }
    }

    /// Colour of a task status dot.
    pub fn task_status(&self, status: &str) -> Color {
        match status {
            "running" | "active" => self.success,
            "idle" | "waiting" => self.warning,
            "failed" | "error" => self.danger,
            _ => self.muted,
        }
    }
}

/// Format compact timestamp with date and time from full timestamp
pub fn format_compact_timestamp(timestamp: &str) -> String {
    // Extract from "YYYY-MM-DD HH:MM:SS" format
    let mut parts = timestamp.split(' ');
    if let (Some(date_part), Some(time_part)) = (parts.next(), parts.next()) {
        if let (Some(month_day), Some(hour_min)) = (date_part.get(5..10), time_part.get(0..5)) {
            return format!("{} {}", month_day, hour_min);
        }
    }
    timestamp.to_string()
}

/// Clamp a percentage into a gauge ratio.
pub fn ratio(percent: f64) -> f64 {
    if percent.is_finite() {
        (percent / 100.0).clamp(0.0, 1.0)
    } else {
        0.0
    }
}
