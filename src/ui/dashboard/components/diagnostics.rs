//! Diagnostics overlay
//!
//! Shows recent load failures and refresh activity

use super::super::state::DashboardState;
use super::super::utils::{Palette, format_compact_timestamp};
use super::modal::centered_rect;
use crate::events::EventType;
use crate::format::sanitize_text;
use crate::logging::LogLevel;

use ratatui::Frame;
use ratatui::prelude::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap};

pub fn diagnostic_lines(state: &DashboardState, limit: usize) -> Vec<Line<'static>> {
    let palette = Palette::for_theme(state.theme);
    let lines: Vec<Line> = state
        .diagnostics
        .iter()
        .filter(|event| event.should_display())
        .rev()
        .take(limit)
        .map(|event| {
            let status_icon = match (event.event_type, event.log_level) {
                (EventType::Success, _) => "✅",
                (EventType::Error, LogLevel::Error) => "❌",
                (EventType::Error, _) => "⚠️",
                (EventType::Refresh, _) => "🔄",
                (EventType::Stale, _) => "⏭",
            };
            let color = match event.event_type {
                EventType::Error if event.log_level >= LogLevel::Error => palette.danger,
                EventType::Error => palette.warning,
                EventType::Success => palette.success,
                _ => palette.muted,
            };
            Line::from(vec![
                Span::raw(format!("{} ", status_icon)),
                Span::styled(
                    format!("{} ", format_compact_timestamp(&event.timestamp)),
                    Style::default().fg(palette.muted),
                ),
                Span::styled(
                    format!("{}: {}", event.panel, sanitize_text(&event.msg)),
                    Style::default().fg(color),
                ),
            ])
        })
        .collect();

    if lines.is_empty() {
        vec![Line::from("暂无诊断信息")]
    } else {
        lines
    }
}

pub fn render_diagnostics(f: &mut Frame, state: &DashboardState) {
    let palette = Palette::for_theme(state.theme);
    let area = centered_rect(
        f.area().width.saturating_sub(8),
        f.area().height.saturating_sub(6),
        f.area(),
    );
    let limit = area.height.saturating_sub(4).max(1) as usize;

    let block = Block::default()
        .title("诊断 [D] 关闭")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.accent))
        .style(Style::default().bg(palette.surface))
        .padding(Padding::uniform(1));

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(diagnostic_lines(state, limit))
            .block(block)
            .wrap(Wrap { trim: true }),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Theme;
    use crate::environment::Environment;
    use crate::events::{Event, Panel};

    #[test]
    fn test_newest_first_with_limit() {
        let mut state = DashboardState::new(Environment::Local, Theme::Dark, 7, false);
        assert_eq!(diagnostic_lines(&state, 10).len(), 1);

        for i in 0..5 {
            state.add_diagnostic(Event::load_failed(
                Panel::System,
                format!("failure {}", i),
                LogLevel::Warn,
            ));
        }
        let lines = diagnostic_lines(&state, 3);
        assert_eq!(lines.len(), 3);
        let first: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(first.ends_with("System: failure 4"));
    }
}
