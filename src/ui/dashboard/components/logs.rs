//! Logs tab
//!
//! Renders aggregated error log entries for the selected day range

use super::super::state::DashboardState;
use super::super::utils::Palette;
use crate::consts::cli_consts::refresh::LOG_DAY_CHOICES;
use crate::format::{format_time, sanitize_text};
use crate::models::LogEntry;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

pub const EMPTY_LOGS: &str = "暂无错误日志";

/// Two lines per entry (level + message, then time and count), or a
/// single placeholder when there is nothing to show.
pub fn log_lines(logs: Option<&[LogEntry]>, palette: &Palette) -> Vec<Line<'static>> {
    let entries = logs.unwrap_or_default();
    if entries.is_empty() {
        return vec![Line::from(Span::styled(
            EMPTY_LOGS,
            Style::default().fg(palette.muted),
        ))];
    }

    entries
        .iter()
        .flat_map(|entry| {
            let level = sanitize_text(&entry.level);
            [
                Line::from(vec![
                    Span::styled(
                        format!("[{}] ", level),
                        Style::default()
                            .fg(palette.level(&level))
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        sanitize_text(&entry.message),
                        Style::default().fg(palette.text),
                    ),
                ]),
                Line::from(Span::styled(
                    format!(
                        "    {}   发生 {} 次",
                        format_time(entry.time.as_deref()),
                        entry.count
                    ),
                    Style::default().fg(palette.muted),
                )),
            ]
        })
        .collect()
}

/// Day range selector, highlighting the active choice.
pub fn day_selector(selected: u32, palette: &Palette) -> Line<'static> {
    let mut spans = vec![Span::styled("范围: ", Style::default().fg(palette.muted))];
    for days in LOG_DAY_CHOICES {
        let style = if days == selected {
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(palette.muted)
        };
        spans.push(Span::styled(format!(" {}天 ", days), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

pub fn render_logs(f: &mut Frame, area: Rect, state: &DashboardState) {
    let palette = Palette::for_theme(state.theme);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Fill(1)])
        .split(area);

    f.render_widget(Paragraph::new(day_selector(state.log_days, &palette)), chunks[0]);

    let logs_block = Block::default()
        .title("错误日志")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.border))
        .padding(Padding::uniform(1));

    let log_widget = Paragraph::new(log_lines(state.logs.as_deref(), &palette))
        .block(logs_block)
        .wrap(Wrap { trim: true });

    f.render_widget(log_widget, chunks[1]);
}
