//! Token usage chart model.
//!
//! Built from scratch on every load; the previous model is simply dropped.

use crate::config::Theme;
use crate::format::format_date_label;
use crate::models::DailyUsage;
use ratatui::prelude::Color;

pub const INPUT_COLOR: Color = Color::Rgb(99, 102, 241);
pub const OUTPUT_COLOR: Color = Color::Rgb(245, 158, 11);

/// Axis colours, fixed when the chart is built.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ChartPalette {
    pub input: Color,
    pub output: Color,
    pub text: Color,
    pub grid: Color,
}

impl ChartPalette {
    pub fn for_theme(theme: Theme) -> Self {
        let (text, grid) = match theme {
            Theme::Dark => (Color::Rgb(148, 163, 184), Color::Rgb(51, 65, 85)),
            Theme::Light => (Color::Rgb(100, 116, 139), Color::Rgb(226, 232, 240)),
        };
        Self {
            input: INPUT_COLOR,
            output: OUTPUT_COLOR,
            text,
            grid,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageDay {
    /// `MM-DD`
    pub label: String,
    pub input: u64,
    pub output: u64,
}

impl UsageDay {
    pub fn total(&self) -> u64 {
        self.input.saturating_add(self.output)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageChart {
    pub days: Vec<UsageDay>,
    pub palette: ChartPalette,
}

impl UsageChart {
    pub fn build(daily: &[DailyUsage], theme: Theme) -> Self {
        Self {
            days: daily
                .iter()
                .map(|day| UsageDay {
                    label: format_date_label(&day.date),
                    input: day.input,
                    output: day.output,
                })
                .collect(),
            palette: ChartPalette::for_theme(theme),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Largest stacked day total, used to scale the chart.
    pub fn max_value(&self) -> u64 {
        self.days.iter().map(UsageDay::total).max().unwrap_or(0)
    }
}
