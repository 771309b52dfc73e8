//! Dashboard header component
//!
//! Renders the title, tab bar and theme indicator

use super::super::state::{DashboardState, Tab};
use super::super::utils::Palette;
use crate::format::sanitize_text;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Tabs};

/// Title line: client version, plus the backend's own version once known.
pub fn title_text(state: &DashboardState) -> String {
    let version = env!("CARGO_PKG_VERSION");
    let monitor = state
        .version
        .as_ref()
        .and_then(|v| v.monitor.as_deref())
        .map(sanitize_text);
    match monitor {
        Some(monitor) => format!("OPENCLAW MONITOR v{} | backend {}", version, monitor),
        None => format!("OPENCLAW MONITOR v{}", version),
    }
}

pub fn render_header(f: &mut Frame, area: Rect, state: &DashboardState) {
    let palette = Palette::for_theme(state.theme);
    let header_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let title = Paragraph::new(title_text(state))
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_type(BorderType::Thick)
                .border_style(Style::default().fg(palette.border)),
        );
    f.render_widget(title, header_chunks[0]);

    let bar_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Fill(1), Constraint::Length(34)])
        .split(header_chunks[1]);

    let titles: Vec<Line> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| Line::from(format!("{} {}", i + 1, tab.title())))
        .collect();
    let tabs = Tabs::new(titles)
        .select(state.active_tab.index())
        .style(Style::default().fg(palette.muted))
        .highlight_style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .divider("|");
    f.render_widget(tabs, bar_chunks[0]);

    let (icon, label) = state.theme.toggle_indicator();
    let refreshed = state.last_refresh.as_deref().unwrap_or("-");
    let status = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("更新 {} ", refreshed),
            Style::default().fg(palette.muted),
        ),
        Span::styled(
            format!("[T] {} {}", icon, label),
            Style::default().fg(palette.text),
        ),
    ]))
    .alignment(Alignment::Right);
    f.render_widget(status, bar_chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Theme;
    use crate::environment::Environment;
    use crate::models::VersionResponse;

    #[test]
    fn test_title_includes_backend_version() {
        let mut state = DashboardState::new(Environment::Local, Theme::Dark, 7, false);
        assert!(!title_text(&state).contains("backend"));

        state.version = Some(VersionResponse {
            monitor: Some("1.2.0".to_string()),
            openclaw: None,
        });
        assert!(title_text(&state).ends_with("backend 1.2.0"));
    }
}
